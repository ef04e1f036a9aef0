use futures::TryStreamExt;
use kdimap_client::{ClientError, FindingSource};
use kdimap_core::{NormalizeOutcome, Normalizer};
use kdimap_mapping::CanonicalMapper;
use kdimap_types::{IssueTypeFilter, PortfolioId};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("unable to proceed, invalid key for SecurityScorecard?")]
    AuthenticationFailure,
    #[error(transparent)]
    Source(#[from] ClientError),
}

/// Authenticate, pull every finding and normalize it.
///
/// Nothing is fetched unless authentication succeeds. An upstream error while
/// streaming discards everything normalized so far.
pub async fn collect_document<S, M>(
    source: &S,
    mapper: M,
    portfolio: Option<PortfolioId>,
    filter: Option<&IssueTypeFilter>,
) -> Result<NormalizeOutcome, PipelineError>
where
    S: FindingSource + ?Sized,
    M: CanonicalMapper,
{
    if !source.authenticate().await {
        return Err(PipelineError::AuthenticationFailure);
    }
    info!("successfully authenticated");

    let portfolio = match portfolio {
        Some(p) => p,
        None => {
            let p = source.default_portfolio().await?;
            info!(portfolio = %p, "using first portfolio since none was specified");
            p
        }
    };
    if let Some(filter) = filter {
        info!(issue_types = %filter, "only fetching selected issue types");
    }

    let mut normalizer = Normalizer::new(mapper);
    let mut findings = source.get_issues(&portfolio, filter);
    while let Some(finding) = findings.try_next().await? {
        normalizer.ingest(&finding);
    }
    Ok(normalizer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::stream::{self, BoxStream, StreamExt};
    use kdimap_mapping::StaticMapper;
    use kdimap_types::RawFinding;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeSource {
        authenticated: bool,
        findings: Vec<RawFinding>,
        fail_after: Option<usize>,
        requested: Mutex<Vec<(PortfolioId, Option<IssueTypeFilter>)>>,
    }

    #[async_trait]
    impl FindingSource for FakeSource {
        async fn authenticate(&self) -> bool {
            self.authenticated
        }

        async fn default_portfolio(&self) -> Result<PortfolioId, ClientError> {
            Ok(PortfolioId::from("default"))
        }

        fn get_issues<'a>(
            &'a self,
            portfolio: &'a PortfolioId,
            filter: Option<&'a IssueTypeFilter>,
        ) -> BoxStream<'a, Result<RawFinding, ClientError>> {
            self.requested
                .lock()
                .unwrap()
                .push((portfolio.clone(), filter.cloned()));

            let mut items: Vec<Result<RawFinding, ClientError>> =
                self.findings.iter().cloned().map(Ok).collect();
            if let Some(n) = self.fail_after {
                items.truncate(n);
                items.push(Err(ClientError::Status {
                    endpoint: "/companies/a.com/issues/service_imap".into(),
                    status: 503,
                }));
            }
            stream::iter(items).boxed()
        }
    }

    fn findings() -> Vec<RawFinding> {
        vec![
            RawFinding::from_value(json!({"type": "service_imap", "ip_address": "10.0.0.1"}))
                .unwrap(),
            RawFinding::from_value(json!({"vulnerability_id": "CVE-2024-6387", "domain": "a.com"}))
                .unwrap(),
        ]
    }

    #[tokio::test]
    async fn authentication_failure_fetches_nothing() {
        let source = FakeSource {
            authenticated: false,
            findings: findings(),
            ..FakeSource::default()
        };
        let err = collect_document(&source, StaticMapper::bundled(), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::AuthenticationFailure));
        assert!(source.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn default_portfolio_used_when_unset() {
        let source = FakeSource {
            authenticated: true,
            findings: findings(),
            ..FakeSource::default()
        };
        let filter = IssueTypeFilter::debug_subset();
        let outcome = collect_document(&source, StaticMapper::bundled(), None, Some(&filter))
            .await
            .unwrap();

        let requested = source.requested.lock().unwrap();
        assert_eq!(requested.len(), 1);
        assert_eq!(requested[0].0, PortfolioId::from("default"));
        assert_eq!(requested[0].1.as_ref(), Some(&filter));

        assert_eq!(outcome.document.assets.len(), 2);
        assert_eq!(outcome.stats.cve_findings, 1);
        assert_eq!(outcome.stats.generic_findings, 1);
    }

    #[tokio::test]
    async fn explicit_portfolio_is_passed_through() {
        let source = FakeSource {
            authenticated: true,
            ..FakeSource::default()
        };
        let outcome = collect_document(
            &source,
            StaticMapper::bundled(),
            Some(PortfolioId::from("chosen")),
            None,
        )
        .await
        .unwrap();

        assert!(outcome.document.assets.is_empty());
        let requested = source.requested.lock().unwrap();
        assert_eq!(requested[0].0, PortfolioId::from("chosen"));
        assert!(requested[0].1.is_none());
    }

    #[tokio::test]
    async fn upstream_error_discards_partial_model() {
        let source = FakeSource {
            authenticated: true,
            findings: findings(),
            fail_after: Some(1),
            ..FakeSource::default()
        };
        let err = collect_document(&source, StaticMapper::bundled(), None, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Source(ClientError::Status { status: 503, .. })
        ));
    }
}
