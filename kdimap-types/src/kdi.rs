use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Scanner name stamped on every asset tag, vulnerability and CVE definition.
pub const SCANNER_TYPE: &str = "SecurityScorecard";

/// Fields that identify an asset on the risk platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
}

impl AssetIdentity {
    /// True when no identifying field was resolved.
    pub fn is_unmapped(&self) -> bool {
        self.ip_address.is_none()
            && self.hostname.is_none()
            && self.url.is_none()
            && self.fqdn.is_none()
    }
}

/// Lifecycle state of a vulnerability instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VulnStatus {
    #[default]
    Open,
    Closed,
}

/// A vulnerability observed on one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdiVuln {
    pub scanner_identifier: String,
    pub scanner_type: String,
    /// The originating finding, pretty-printed JSON.
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_at: Option<String>,
    pub status: VulnStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// An asset record with the vulnerabilities bound to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdiAsset {
    #[serde(flatten)]
    pub identity: AssetIdentity,
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub vulns: Vec<KdiVuln>,
}

impl KdiAsset {
    /// New asset carrying the scanner tag.
    pub fn new(identity: AssetIdentity) -> Self {
        Self {
            identity,
            tags: BTreeSet::from([SCANNER_TYPE.to_string()]),
            vulns: Vec::new(),
        }
    }
}

/// A vulnerability definition, shared by every instance with the same
/// `scanner_identifier`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdiVulnDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanner_type: Option<String>,
    pub scanner_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cve_identifiers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwe_identifiers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    /// Severity on a 0-10 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanner_score: Option<u8>,
}

impl KdiVulnDef {
    /// Definition carrying nothing but its identifier.
    pub fn identifier_only(scanner_identifier: impl Into<String>) -> Self {
        Self {
            scanner_identifier: scanner_identifier.into(),
            ..Self::default()
        }
    }

    /// True when nothing beyond the identifier is known.
    pub fn is_identifier_only(&self) -> bool {
        *self == Self::identifier_only(self.scanner_identifier.clone())
    }

    /// Definition for a CVE, which is its own canonical identifier.
    pub fn cve(cve_id: impl Into<String>) -> Self {
        let cve_id = cve_id.into();
        Self {
            scanner_type: Some(SCANNER_TYPE.to_string()),
            cve_identifiers: Some(cve_id.clone()),
            scanner_identifier: cve_id,
            ..Self::default()
        }
    }
}

/// The document handed to the platform connector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdiDocument {
    pub skip_autoclose: bool,
    pub assets: Vec<KdiAsset>,
    pub vuln_defs: Vec<KdiVulnDef>,
}

impl KdiDocument {
    pub fn vuln_count(&self) -> usize {
        self.assets.iter().map(|a| a.vulns.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn empty_identity_is_unmapped() {
        assert!(AssetIdentity::default().is_unmapped());
        let identity = AssetIdentity {
            fqdn: Some("example.com".into()),
            ..AssetIdentity::default()
        };
        assert!(!identity.is_unmapped());
    }

    #[test]
    fn asset_flattens_identity_and_skips_missing_fields() {
        let mut asset = KdiAsset::new(AssetIdentity {
            ip_address: Some("10.0.0.1".into()),
            ..AssetIdentity::default()
        });
        asset.vulns.push(KdiVuln {
            scanner_identifier: "service_imap".into(),
            scanner_type: SCANNER_TYPE.into(),
            details: "{}".into(),
            created_at: None,
            last_seen_at: None,
            status: VulnStatus::Open,
            port: Some(143),
        });

        let value = serde_json::to_value(&asset).unwrap();
        assert_eq!(value["ip_address"], "10.0.0.1");
        assert_eq!(value["tags"], json!(["SecurityScorecard"]));
        assert_eq!(value["vulns"][0]["status"], "open");
        assert_eq!(value["vulns"][0]["port"], 143);
        assert!(value.get("hostname").is_none());
        assert!(value["vulns"][0].get("created_at").is_none());
    }

    #[test]
    fn cve_definition_uses_id_for_both_fields() {
        let def = KdiVulnDef::cve("CVE-2021-44228");
        assert_eq!(def.scanner_identifier, "CVE-2021-44228");
        assert_eq!(def.cve_identifiers.as_deref(), Some("CVE-2021-44228"));
        assert_eq!(def.scanner_type.as_deref(), Some(SCANNER_TYPE));
    }

    #[test]
    fn identifier_only_definition_serializes_one_field() {
        let value = serde_json::to_value(KdiVulnDef::identifier_only("mystery")).unwrap();
        assert_eq!(value, json!({"scanner_identifier": "mystery"}));
    }

    #[test]
    fn document_top_level_keys() {
        let doc = KdiDocument::default();
        let value: Value = serde_json::to_value(&doc).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["skip_autoclose", "assets", "vuln_defs"]);
        assert_eq!(value["skip_autoclose"], false);
    }
}
