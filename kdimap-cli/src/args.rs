use std::path::PathBuf;

use clap::Parser;

/// kdimap: convert SecurityScorecard findings into KDI
#[derive(Parser, Debug, Default)]
#[command(
    name = "kdimap",
    version,
    about = "Pull SecurityScorecard issues and write them as a KDI file"
)]
pub struct Args {
    /// SecurityScorecard API key
    #[arg(long = "ssc-api-key", env = "SSC_API_KEY", hide_env_values = true, value_name = "KEY")]
    pub ssc_api_key: Option<String>,

    /// Portfolio to pull (defaults to the first portfolio visible to the key)
    #[arg(long = "ssc-portfolio-id", value_name = "ID")]
    pub ssc_portfolio_id: Option<String>,

    /// SecurityScorecard API base URL
    #[arg(long = "ssc-api-url", value_name = "URL")]
    pub ssc_api_url: Option<String>,

    /// Only fetch these issue types (comma-separated)
    #[arg(long = "issue-types", value_name = "TYPES", conflicts_with = "debug")]
    pub issue_types: Option<String>,

    /// Only fetch a small fixed set of issue types
    #[arg(long = "debug")]
    pub debug: bool,

    /// Platform API key used for the connector upload
    #[arg(long = "kenna-api-key", env = "KENNA_API_KEY", hide_env_values = true, value_name = "KEY")]
    pub kenna_api_key: Option<String>,

    /// Platform API hostname [default: api.kennasecurity.com]
    #[arg(long = "kenna-api-host", value_name = "HOST")]
    pub kenna_api_host: Option<String>,

    /// Upload the KDI file to this connector when set
    #[arg(long = "kenna-connector-id", value_name = "ID")]
    pub kenna_connector_id: Option<u64>,

    /// Directory the KDI file is written to [default: output/security_scorecard]
    #[arg(short = 'o', long = "output-directory", value_name = "DIR")]
    pub output_directory: Option<PathBuf>,

    /// TOML profile supplying defaults for any flag not given
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (use -v or -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}
