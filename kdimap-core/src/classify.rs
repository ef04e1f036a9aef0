use kdimap_mapping::CanonicalMapper;
use kdimap_types::{KdiVuln, KdiVulnDef, RawFinding, SCANNER_TYPE, VulnStatus};

/// Which definition path a finding takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VulnClass {
    /// Carries a `vulnerability_id`; the CVE is its own definition.
    Cve(String),
    /// Identified by its issue-type code and resolved through the mapper.
    Generic(String),
}

impl VulnClass {
    pub fn scanner_identifier(&self) -> &str {
        match self {
            Self::Cve(id) | Self::Generic(id) => id,
        }
    }
}

/// Route a finding on the presence of `vulnerability_id`.
pub fn classify(finding: &RawFinding) -> VulnClass {
    match finding.text("vulnerability_id") {
        Some(cve) => VulnClass::Cve(cve),
        None => VulnClass::Generic(finding.text("type").unwrap_or_default()),
    }
}

/// Build the vulnerability instance for a classified finding.
pub fn build_vuln(finding: &RawFinding, class: &VulnClass, port: Option<u16>) -> KdiVuln {
    KdiVuln {
        scanner_identifier: class.scanner_identifier().to_string(),
        scanner_type: SCANNER_TYPE.to_string(),
        details: finding.to_pretty_json(),
        created_at: finding.text("first_seen_time"),
        last_seen_at: finding.text("last_seen_time"),
        status: VulnStatus::Open,
        port,
    }
}

/// Build the vulnerability definition for a classified finding.
pub fn build_definition<M: CanonicalMapper + ?Sized>(class: &VulnClass, mapper: &M) -> KdiVulnDef {
    match class {
        VulnClass::Cve(cve) => KdiVulnDef::cve(cve.as_str()),
        VulnClass::Generic(issue_type) => mapper.lookup(issue_type),
    }
}
