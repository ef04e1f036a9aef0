use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use kdimap_client::{DEFAULT_API_URL, ScorecardConfig};
use kdimap_output::{ConnectorConfig, DEFAULT_API_HOST, OutputConfig};
use kdimap_types::{IssueTypeFilter, PortfolioId};
use serde::{Deserialize, Serialize};

use crate::args::Args;

/// Run defaults loaded from a TOML file.
///
/// All fields are optional. A value here is only used when the matching
/// command-line flag (or its environment variable) was not given.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunProfile {
    // --- SecurityScorecard ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssc_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssc_portfolio_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssc_api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    // --- Platform connector ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kenna_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kenna_api_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kenna_connector_id: Option<u64>,

    // --- Output ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,
}

/// Load a profile from a TOML file.
pub fn load_profile(path: &Path) -> Result<RunProfile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile '{}'", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse profile '{}'", path.display()))
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub scorecard: ScorecardConfig,
    pub portfolio: Option<PortfolioId>,
    pub issue_filter: Option<IssueTypeFilter>,
    pub output: OutputConfig,
    pub connector: Option<ConnectorConfig>,
}

impl Settings {
    /// Merge command-line arguments over a profile.
    pub fn resolve(args: &Args, profile: RunProfile) -> Result<Self> {
        let api_key = match args.ssc_api_key.clone().or(profile.ssc_api_key) {
            Some(key) if !key.trim().is_empty() => key,
            _ => bail!("a SecurityScorecard API key is required (--ssc-api-key or SSC_API_KEY)"),
        };

        let scorecard = ScorecardConfig {
            base_url: args
                .ssc_api_url
                .clone()
                .or(profile.ssc_api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            ..ScorecardConfig::new(api_key)
        };

        let portfolio = args
            .ssc_portfolio_id
            .clone()
            .or(profile.ssc_portfolio_id)
            .filter(|id| !id.trim().is_empty())
            .map(PortfolioId);

        let issue_filter = if args.debug {
            Some(IssueTypeFilter::debug_subset())
        } else if let Some(list) = &args.issue_types {
            Some(IssueTypeFilter::parse(list))
        } else if profile.debug.unwrap_or(false) {
            Some(IssueTypeFilter::debug_subset())
        } else {
            profile
                .issue_types
                .map(|types| types.into_iter().collect::<IssueTypeFilter>())
        };
        let issue_filter = issue_filter.filter(|f| !f.is_empty());

        let output = match args.output_directory.clone().or(profile.output_directory) {
            Some(dir) => OutputConfig::in_directory(dir),
            None => OutputConfig::default(),
        };

        let api_host = args
            .kenna_api_host
            .clone()
            .or(profile.kenna_api_host)
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        let api_key = args.kenna_api_key.clone().or(profile.kenna_api_key);
        let connector_id = args.kenna_connector_id.or(profile.kenna_connector_id);
        let connector =
            ConnectorConfig::from_parts(Some(api_host.as_str()), api_key.as_deref(), connector_id);

        Ok(Self {
            scorecard,
            portfolio,
            issue_filter,
            output,
            connector,
        })
    }
}
