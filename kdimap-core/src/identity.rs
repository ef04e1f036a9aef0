use kdimap_types::{AssetIdentity, RawFinding, is_present, value_text};
use serde_json::{Map, Value};

/// Connection details attached to network-level findings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionAttributes {
    pub dst_ip: Option<String>,
    pub dst_host: Option<String>,
    pub dst_port: Option<u16>,
}

impl ConnectionAttributes {
    fn from_map(map: &Map<String, Value>) -> Self {
        let text = |key: &str| map.get(key).filter(|v| is_present(v)).map(value_text);
        Self {
            dst_ip: text("dst_ip"),
            dst_host: text("dst_host"),
            dst_port: map.get("dst_port").and_then(parse_port),
        }
    }
}

/// Result of pulling an asset identity out of a raw finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Identified {
        identity: AssetIdentity,
        port: Option<u16>,
    },
    /// `connection_attributes` was present but not an object.
    Malformed,
}

/// Derive the asset identity and port for a finding.
///
/// Fields are applied in a fixed order and later fields overwrite earlier
/// ones: connection attributes, `initial_url`, `url`, `domain`,
/// `ip_address`, then `src_ip`.
pub fn extract_identity(finding: &RawFinding) -> Extraction {
    let mut identity = AssetIdentity::default();
    let mut port = None;

    if let Some(attrs) = finding.field("connection_attributes") {
        let Value::Object(map) = attrs else {
            return Extraction::Malformed;
        };
        let conn = ConnectionAttributes::from_map(map);
        port = conn.dst_port;
        if conn.dst_ip.is_some() {
            identity.ip_address = conn.dst_ip;
        }
        if conn.dst_host.is_some() {
            identity.hostname = conn.dst_host;
        }
    }

    if let Some(url) = finding.text("initial_url") {
        identity.url = Some(url);
    }
    if let Some(url) = finding.text("url") {
        identity.url = Some(url);
    }
    if let Some(domain) = finding.text("domain") {
        identity.fqdn = Some(domain);
    }
    if let Some(ip) = finding.text("ip_address") {
        identity.ip_address = Some(ip);
    }
    if let Some(ip) = finding.text("src_ip") {
        identity.ip_address = Some(ip);
    }

    Extraction::Identified { identity, port }
}

/// Accept an integer or numeric string in the TCP/UDP port range.
fn parse_port(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(value: Value) -> Extraction {
        extract_identity(&RawFinding::from_value(value).unwrap())
    }

    fn identified(value: Value) -> (AssetIdentity, Option<u16>) {
        match extract(value) {
            Extraction::Identified { identity, port } => (identity, port),
            Extraction::Malformed => panic!("unexpected malformed finding"),
        }
    }

    #[test]
    fn connection_attributes_supply_ip_host_and_port() {
        let (identity, port) = identified(json!({
            "connection_attributes": {"dst_ip": "1.2.3.4", "dst_port": 443, "dst_host": "mail.example.com"}
        }));
        assert_eq!(identity.ip_address.as_deref(), Some("1.2.3.4"));
        assert_eq!(identity.hostname.as_deref(), Some("mail.example.com"));
        assert_eq!(port, Some(443));
    }

    #[test]
    fn non_object_connection_attributes_are_malformed() {
        assert_eq!(
            extract(json!({"connection_attributes": "not-a-hash", "ip_address": "1.1.1.1"})),
            Extraction::Malformed
        );
        assert_eq!(
            extract(json!({"connection_attributes": [1, 2]})),
            Extraction::Malformed
        );
    }

    #[test]
    fn null_connection_attributes_are_ignored() {
        let (identity, port) = identified(json!({"connection_attributes": null, "domain": "a.com"}));
        assert_eq!(identity.fqdn.as_deref(), Some("a.com"));
        assert_eq!(port, None);
    }

    #[test]
    fn false_values_are_treated_as_unset() {
        let (identity, port) = identified(json!({
            "type": "service_imap",
            "connection_attributes": false,
            "url": false,
            "vulnerability_id": false,
            "domain": "a.com"
        }));
        assert_eq!(identity.fqdn.as_deref(), Some("a.com"));
        assert!(identity.url.is_none());
        assert!(identity.ip_address.is_none());
        assert_eq!(port, None);

        let (identity, _) = identified(json!({
            "connection_attributes": {"dst_ip": false, "dst_host": "mx.a.com"}
        }));
        assert!(identity.ip_address.is_none());
        assert_eq!(identity.hostname.as_deref(), Some("mx.a.com"));
    }

    #[test]
    fn url_overrides_initial_url() {
        let (identity, _) = identified(json!({
            "initial_url": "http://example.com",
            "url": "https://example.com/login"
        }));
        assert_eq!(identity.url.as_deref(), Some("https://example.com/login"));

        let (identity, _) = identified(json!({"initial_url": "http://example.com"}));
        assert_eq!(identity.url.as_deref(), Some("http://example.com"));
    }

    #[test]
    fn src_ip_has_final_precedence() {
        let (identity, _) = identified(json!({
            "connection_attributes": {"dst_ip": "9.9.9.9"},
            "ip_address": "1.1.1.1",
            "src_ip": "2.2.2.2"
        }));
        assert_eq!(identity.ip_address.as_deref(), Some("2.2.2.2"));
    }

    #[test]
    fn ip_address_overwrites_connection_ip() {
        let (identity, _) = identified(json!({
            "connection_attributes": {"dst_ip": "9.9.9.9"},
            "ip_address": "1.1.1.1"
        }));
        assert_eq!(identity.ip_address.as_deref(), Some("1.1.1.1"));
    }

    #[test]
    fn domain_sets_fqdn() {
        let (identity, _) = identified(json!({"domain": "example.com"}));
        assert_eq!(identity.fqdn.as_deref(), Some("example.com"));
        assert!(identity.hostname.is_none());
    }

    #[test]
    fn no_identity_fields_yields_unmapped_identity() {
        let (identity, port) = identified(json!({"type": "spf_record_missing"}));
        assert!(identity.is_unmapped());
        assert_eq!(port, None);
    }

    #[test]
    fn port_parsing() {
        assert_eq!(parse_port(&json!(22)), Some(22));
        assert_eq!(parse_port(&json!("8443")), Some(8443));
        assert_eq!(parse_port(&json!(70000)), None);
        assert_eq!(parse_port(&json!(-1)), None);
        assert_eq!(parse_port(&json!("http")), None);
        assert_eq!(parse_port(&json!(null)), None);
    }
}
