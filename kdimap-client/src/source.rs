use async_trait::async_trait;
use futures::stream::BoxStream;
use kdimap_types::{IssueTypeFilter, PortfolioId, RawFinding};

use crate::ClientError;

/// Where findings come from.
#[async_trait]
pub trait FindingSource: Send + Sync {
    /// Check that the configured credentials are accepted.
    async fn authenticate(&self) -> bool;

    /// The portfolio to use when none was configured.
    async fn default_portfolio(&self) -> Result<PortfolioId, ClientError>;

    /// Stream every finding in a portfolio, optionally limited to some issue
    /// types. The stream is finite and yields findings in a stable order; an
    /// `Err` item ends it.
    fn get_issues<'a>(
        &'a self,
        portfolio: &'a PortfolioId,
        filter: Option<&'a IssueTypeFilter>,
    ) -> BoxStream<'a, Result<RawFinding, ClientError>>;
}
