//! SecurityScorecard REST API client.
//!
//! Findings are pulled per company and per issue type:
//! `/portfolios/{id}/companies` lists the companies, and
//! `/companies/{domain}/issues/{type}` returns the findings of one type.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use kdimap_types::{IssueTypeFilter, PortfolioId, RawFinding};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{ClientError, FindingSource};

/// Production API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.securityscorecard.io";

/// Largest response body accepted from the API.
const MAX_RESPONSE_BYTES: usize = 50_000_000;

/// Connection settings for [`ScorecardClient`].
#[derive(Clone)]
pub struct ScorecardConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for ScorecardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScorecardConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ScorecardConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the SecurityScorecard API.
pub struct ScorecardClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScorecardClient {
    pub fn new(config: ScorecardConfig) -> Result<Self, ClientError> {
        let mut auth = HeaderValue::from_str(&format!("Token {}", config.api_key))
            .map_err(|_| ClientError::InvalidApiKey)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("kdimap/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET an endpoint and decode its JSON body.
    async fn get_json(&self, endpoint: &str) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        if body.len() > MAX_RESPONSE_BYTES {
            return Err(ClientError::TooLarge {
                endpoint: endpoint.to_string(),
                size: body.len(),
                max: MAX_RESPONSE_BYTES,
            });
        }

        serde_json::from_slice(&body).map_err(|source| ClientError::Json {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// GET an endpoint and return its `entries` array.
    async fn get_entries(&self, endpoint: &str) -> Result<Vec<Value>, ClientError> {
        match self.get_json(endpoint).await? {
            Value::Object(mut body) => match body.remove("entries") {
                Some(Value::Array(entries)) => Ok(entries),
                _ => Err(ClientError::UnexpectedShape {
                    endpoint: endpoint.to_string(),
                    reason: "missing 'entries' array".into(),
                }),
            },
            _ => Err(ClientError::UnexpectedShape {
                endpoint: endpoint.to_string(),
                reason: "body is not a JSON object".into(),
            }),
        }
    }

    /// Portfolios visible to the API key.
    pub async fn portfolios(&self) -> Result<Vec<Value>, ClientError> {
        self.get_entries("/portfolios").await
    }

    /// Domains of the companies in a portfolio.
    pub async fn portfolio_companies(
        &self,
        portfolio: &PortfolioId,
    ) -> Result<Vec<String>, ClientError> {
        let endpoint = format!("/portfolios/{portfolio}/companies");
        let entries = self.get_entries(&endpoint).await?;
        let domains: Vec<String> = entries
            .iter()
            .filter_map(|c| c.get("domain").and_then(Value::as_str).map(String::from))
            .collect();
        if domains.len() != entries.len() {
            warn!(
                portfolio = %portfolio,
                skipped = entries.len() - domains.len(),
                "portfolio companies without a domain"
            );
        }
        Ok(domains)
    }

    /// Every issue-type code the API knows about.
    pub async fn issue_types(&self) -> Result<Vec<String>, ClientError> {
        let entries = self.get_entries("/metadata/issue-types").await?;
        Ok(entries
            .iter()
            .filter_map(|t| t.get("key").and_then(Value::as_str).map(String::from))
            .collect())
    }

    /// Findings of one issue type for one company.
    pub async fn company_issues(
        &self,
        domain: &str,
        issue_type: &str,
    ) -> Result<Vec<RawFinding>, ClientError> {
        let endpoint = format!("/companies/{domain}/issues/{issue_type}");
        let entries = self.get_entries(&endpoint).await?;
        let total = entries.len();
        let findings: Vec<RawFinding> = entries
            .into_iter()
            .filter_map(RawFinding::from_value)
            .collect();
        if findings.len() != total {
            warn!(
                domain,
                issue_type,
                skipped = total - findings.len(),
                "ignoring non-object issue entries"
            );
        }
        debug!(domain, issue_type, count = findings.len(), "fetched issues");
        Ok(findings)
    }

    /// Company × issue-type pairs to fetch, in fetch order.
    async fn plan_requests(
        &self,
        portfolio: &PortfolioId,
        filter: Option<&IssueTypeFilter>,
    ) -> Result<Vec<(String, String)>, ClientError> {
        let companies = self.portfolio_companies(portfolio).await?;
        let types = match filter {
            Some(filter) => filter.iter().map(String::from).collect(),
            None => self.issue_types().await?,
        };
        info!(
            portfolio = %portfolio,
            companies = companies.len(),
            issue_types = types.len(),
            "fetching issues"
        );

        let mut requests = Vec::with_capacity(companies.len() * types.len());
        for company in &companies {
            for issue_type in &types {
                requests.push((company.clone(), issue_type.clone()));
            }
        }
        Ok(requests)
    }
}

#[async_trait]
impl FindingSource for ScorecardClient {
    async fn authenticate(&self) -> bool {
        match self.portfolios().await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "authentication check failed");
                false
            }
        }
    }

    async fn default_portfolio(&self) -> Result<PortfolioId, ClientError> {
        let portfolios = self.portfolios().await?;
        portfolios
            .first()
            .and_then(|p| p.get("id"))
            .and_then(Value::as_str)
            .map(PortfolioId::from)
            .ok_or(ClientError::NoPortfolio)
    }

    fn get_issues<'a>(
        &'a self,
        portfolio: &'a PortfolioId,
        filter: Option<&'a IssueTypeFilter>,
    ) -> BoxStream<'a, Result<RawFinding, ClientError>> {
        stream::once(self.plan_requests(portfolio, filter))
            .map_ok(move |requests| {
                stream::iter(requests)
                    .then(move |(domain, issue_type)| async move {
                        self.company_issues(&domain, &issue_type).await
                    })
                    .map_ok(|findings| stream::iter(findings.into_iter().map(Ok::<_, ClientError>)))
                    .try_flatten()
            })
            .try_flatten()
            .boxed()
    }
}
