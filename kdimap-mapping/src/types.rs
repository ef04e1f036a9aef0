// ---------------------------------------------------------------------------
// Canonical mapping types
// ---------------------------------------------------------------------------

use kdimap_types::{KdiVulnDef, SCANNER_TYPE};

/// A canonical vulnerability definition and the issue-type codes it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalEntry {
    pub name: &'static str,
    pub cwe: &'static str,
    /// Severity on a 0-10 scale.
    pub score: u8,
    pub description: &'static str,
    pub remediation: &'static str,
    pub issue_types: &'static [&'static str],
}

impl CanonicalEntry {
    /// Build the definition for one of this entry's issue-type codes.
    pub fn to_vuln_def(&self, issue_type: &str) -> KdiVulnDef {
        KdiVulnDef {
            scanner_type: Some(SCANNER_TYPE.to_string()),
            scanner_identifier: issue_type.to_string(),
            cve_identifiers: None,
            cwe_identifiers: Some(self.cwe.to_string()),
            name: Some(self.name.to_string()),
            description: Some(self.description.to_string()),
            solution: Some(self.remediation.to_string()),
            scanner_score: Some(self.score),
        }
    }
}
