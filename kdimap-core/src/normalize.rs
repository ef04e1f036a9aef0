use std::collections::HashSet;

use kdimap_mapping::CanonicalMapper;
use kdimap_types::{KdiDocument, RawFinding};
use tracing::{debug, info, warn};

use crate::aggregate::KdiAggregator;
use crate::classify::{VulnClass, build_definition, build_vuln, classify};
use crate::diagnostic::Diagnostic;
use crate::identity::{Extraction, extract_identity};

/// Counters for one normalization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub findings: usize,
    pub skipped_malformed: usize,
    pub unmapped_assets: usize,
    pub cve_findings: usize,
    pub generic_findings: usize,
    /// Distinct issue types with no canonical entry.
    pub unknown_issue_types: usize,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    pub document: KdiDocument,
    pub stats: NormalizeStats,
    pub diagnostics: Vec<Diagnostic>,
}

/// Turns raw findings into a KDI document, one finding at a time.
///
/// Feed findings with [`ingest`](Self::ingest) as they arrive from the source
/// and call [`finish`](Self::finish) once the source is exhausted.
pub struct Normalizer<M> {
    mapper: M,
    aggregator: KdiAggregator,
    stats: NormalizeStats,
    diagnostics: Vec<Diagnostic>,
    unknown_types: HashSet<String>,
}

impl<M: CanonicalMapper> Normalizer<M> {
    pub fn new(mapper: M) -> Self {
        Self {
            mapper,
            aggregator: KdiAggregator::new(),
            stats: NormalizeStats::default(),
            diagnostics: Vec::new(),
            unknown_types: HashSet::new(),
        }
    }

    pub fn ingest(&mut self, finding: &RawFinding) {
        self.stats.findings += 1;

        let (identity, port) = match extract_identity(finding) {
            Extraction::Identified { identity, port } => (identity, port),
            Extraction::Malformed => {
                warn!(finding = %finding, "unknown format for issue, skipping");
                self.stats.skipped_malformed += 1;
                self.diagnostics.push(Diagnostic::MalformedFinding {
                    finding: finding.to_string(),
                });
                return;
            }
        };

        if identity.is_unmapped() {
            debug!(finding = %finding, "unmapped asset for finding");
            self.stats.unmapped_assets += 1;
            self.diagnostics.push(Diagnostic::UnmappedAsset {
                finding: finding.to_string(),
            });
        }

        let asset = self.aggregator.add_asset(identity);

        let class = classify(finding);
        let definition = build_definition(&class, &self.mapper);
        match &class {
            VulnClass::Cve(_) => self.stats.cve_findings += 1,
            VulnClass::Generic(issue_type) => {
                self.stats.generic_findings += 1;
                if definition.is_identifier_only()
                    && self.unknown_types.insert(issue_type.clone())
                {
                    self.stats.unknown_issue_types += 1;
                    self.diagnostics.push(Diagnostic::UnknownIssueType {
                        issue_type: issue_type.clone(),
                    });
                }
            }
        }

        self.aggregator
            .add_vuln(asset, build_vuln(finding, &class, port));
        self.aggregator.upsert_vuln_def(definition);
    }

    pub fn stats(&self) -> &NormalizeStats {
        &self.stats
    }

    pub fn finish(self) -> NormalizeOutcome {
        let stats = self.stats;
        info!(
            findings = stats.findings,
            assets = self.aggregator.asset_count(),
            vuln_defs = self.aggregator.vuln_def_count(),
            skipped = stats.skipped_malformed,
            unmapped = stats.unmapped_assets,
            "normalization complete"
        );
        NormalizeOutcome {
            document: self.aggregator.into_document(false),
            stats,
            diagnostics: self.diagnostics,
        }
    }
}

/// Normalize a complete finding sequence into a KDI document.
pub fn normalize<'a, I, M>(findings: I, mapper: M) -> KdiDocument
where
    I: IntoIterator<Item = &'a RawFinding>,
    M: CanonicalMapper,
{
    normalize_with_diagnostics(findings, mapper).document
}

/// Like [`normalize`], also returning run counters and diagnostics.
pub fn normalize_with_diagnostics<'a, I, M>(findings: I, mapper: M) -> NormalizeOutcome
where
    I: IntoIterator<Item = &'a RawFinding>,
    M: CanonicalMapper,
{
    let mut normalizer = Normalizer::new(mapper);
    for finding in findings {
        normalizer.ingest(finding);
    }
    normalizer.finish()
}
