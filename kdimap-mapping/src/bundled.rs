// ---------------------------------------------------------------------------
// Bundled canonical mapping table
// ---------------------------------------------------------------------------
//
// Canonical definitions for SecurityScorecard issue types that do not carry a
// CVE. Several issue-type codes may share one canonical entry.

use crate::types::CanonicalEntry;

/// Return the bundled mapping table.
pub fn bundled_entries() -> Vec<CanonicalEntry> {
    vec![
        // -------------------------------------------------------------------
        // Patching and end-of-life software
        // -------------------------------------------------------------------
        entry(
            "Patching Cadence",
            "CWE-1104",
            6,
            "Software observed on this host has known vulnerabilities that have \
             not been patched within the expected window.",
            "Apply vendor security updates and track patch latency for exposed services.",
            &[
                "patching_cadence_high",
                "patching_cadence_medium",
                "patching_cadence_low",
            ],
        ),
        entry(
            "End-of-Life Software",
            "CWE-1104",
            5,
            "A product version that no longer receives security updates was observed.",
            "Upgrade to a supported release of the affected operating system or browser.",
            &["outdated_os", "outdated_browser"],
        ),
        // -------------------------------------------------------------------
        // Application security headers
        // -------------------------------------------------------------------
        entry(
            "Content Security Policy Weakness",
            "CWE-693",
            3,
            "The site does not send a Content-Security-Policy header, or the policy \
             allows unsafe sources that defeat its protection against script injection.",
            "Define a restrictive Content-Security-Policy that avoids 'unsafe-inline', \
             'unsafe-eval' and wildcard sources.",
            &["csp_no_policy", "csp_unsafe_policy", "csp_too_broad"],
        ),
        entry(
            "Clickjacking Protection Missing",
            "CWE-1021",
            3,
            "The X-Frame-Options header is missing or misconfigured, allowing the \
             page to be framed by another origin.",
            "Send X-Frame-Options: DENY or SAMEORIGIN, or a CSP frame-ancestors directive.",
            &["x_frame_options_incorrect"],
        ),
        entry(
            "MIME Sniffing Protection Missing",
            "CWE-693",
            2,
            "The X-Content-Type-Options header is not set to nosniff.",
            "Send X-Content-Type-Options: nosniff on all responses.",
            &["x_content_type_options_incorrect"],
        ),
        entry(
            "Browser XSS Filter Misconfigured",
            "CWE-693",
            2,
            "The X-XSS-Protection header is missing or disables the browser filter.",
            "Rely on a strict Content-Security-Policy and set X-XSS-Protection consistently.",
            &["x_xss_protection_incorrect"],
        ),
        entry(
            "Subresource Integrity Missing",
            "CWE-353",
            3,
            "Third-party scripts are loaded without integrity attributes.",
            "Add integrity and crossorigin attributes to externally hosted scripts.",
            &["unsafe_sri"],
        ),
        // -------------------------------------------------------------------
        // Transport security
        // -------------------------------------------------------------------
        entry(
            "HTTP Strict Transport Security Misconfigured",
            "CWE-319",
            4,
            "The Strict-Transport-Security header is missing or has too short a max-age.",
            "Send Strict-Transport-Security with a max-age of at least one year.",
            &["hsts_incorrect"],
        ),
        entry(
            "Insecure HTTP Redirect",
            "CWE-319",
            4,
            "Visitors are redirected through plain HTTP before reaching the HTTPS site.",
            "Redirect directly from HTTP to the final HTTPS location.",
            &["insecure_https_redirect_pattern", "redirect_chain_contains_http"],
        ),
        entry(
            "Site Does Not Support HTTPS",
            "CWE-319",
            5,
            "The domain serves content over plain HTTP only.",
            "Provision a certificate and serve the site over HTTPS.",
            &["domain_missing_https"],
        ),
        entry(
            "Weak TLS Cipher Suites",
            "CWE-327",
            5,
            "The server negotiates cipher suites considered cryptographically weak.",
            "Disable export, RC4, 3DES and CBC-mode suites; prefer AEAD ciphers.",
            &["tls_weak_cipher", "ssl_weak_cipher"],
        ),
        entry(
            "Deprecated TLS Protocol",
            "CWE-326",
            5,
            "The server accepts SSLv3, TLS 1.0 or TLS 1.1.",
            "Restrict the server to TLS 1.2 and later.",
            &["tls_weak_protocol"],
        ),
        entry(
            "Weak SSH Algorithms",
            "CWE-327",
            4,
            "The SSH service offers weak ciphers or MAC algorithms.",
            "Remove CBC ciphers and MD5/SHA1-96 MACs from the SSH server configuration.",
            &["ssh_weak_cipher", "ssh_weak_mac"],
        ),
        // -------------------------------------------------------------------
        // Certificates
        // -------------------------------------------------------------------
        entry(
            "Expired TLS Certificate",
            "CWE-298",
            5,
            "The certificate presented by the server has expired.",
            "Renew the certificate and automate renewal.",
            &["tlscert_expired"],
        ),
        entry(
            "Self-Signed TLS Certificate",
            "CWE-295",
            4,
            "The certificate presented by the server is not issued by a trusted authority.",
            "Replace the certificate with one issued by a publicly trusted CA.",
            &["tlscert_self_signed"],
        ),
        entry(
            "Revoked TLS Certificate",
            "CWE-299",
            5,
            "The certificate presented by the server has been revoked by its issuer.",
            "Install a newly issued certificate.",
            &["tlscert_revoked"],
        ),
        entry(
            "Weak Certificate Signature",
            "CWE-328",
            4,
            "The certificate is signed with a weak hash algorithm such as SHA-1 or MD5.",
            "Reissue the certificate with a SHA-256 or stronger signature.",
            &["tlscert_weak_signature"],
        ),
        entry(
            "Certificate Without Revocation Information",
            "CWE-299",
            2,
            "The certificate carries no OCSP or CRL endpoint.",
            "Request certificates that include revocation information.",
            &["tlscert_no_revocation"],
        ),
        // -------------------------------------------------------------------
        // Exposed services
        // -------------------------------------------------------------------
        entry(
            "Cleartext Mail Service",
            "CWE-319",
            5,
            "An IMAP or POP3 service accepts unencrypted connections from the internet.",
            "Require IMAPS/POP3S or STARTTLS and close the cleartext ports.",
            &["service_imap", "service_pop3"],
        ),
        entry(
            "Telnet Service Exposed",
            "CWE-319",
            8,
            "A Telnet service is reachable from the internet and transmits credentials in cleartext.",
            "Disable Telnet and use SSH for remote administration.",
            &["service_telnet"],
        ),
        entry(
            "FTP Service Exposed",
            "CWE-319",
            6,
            "An FTP service is reachable from the internet and transmits credentials in cleartext.",
            "Replace FTP with SFTP or FTPS, or restrict access by network.",
            &["service_ftp"],
        ),
        entry(
            "Remote Desktop Exposed",
            "CWE-284",
            7,
            "A remote desktop service is reachable from the internet.",
            "Place remote desktop access behind a VPN or gateway with MFA.",
            &["service_rdp", "service_vnc"],
        ),
        entry(
            "File Sharing Service Exposed",
            "CWE-284",
            8,
            "An SMB file sharing service is reachable from the internet.",
            "Block SMB at the network perimeter.",
            &["service_smb"],
        ),
        entry(
            "Database Service Exposed",
            "CWE-284",
            8,
            "A database or data store accepts connections from the internet.",
            "Bind the service to private interfaces and restrict access with firewall rules.",
            &[
                "service_mysql",
                "service_microsoft_sql",
                "service_postgresql",
                "service_mongodb",
                "service_redis",
                "service_elasticsearch",
            ],
        ),
        entry(
            "Open DNS Resolver",
            "CWE-406",
            6,
            "A DNS server answers recursive queries for arbitrary clients and can be \
             abused for amplification attacks.",
            "Restrict recursion to internal clients.",
            &["open_resolver"],
        ),
        entry(
            "Administrative Subdomain Exposed",
            "CWE-200",
            3,
            "A subdomain whose name suggests an administrative interface is publicly resolvable.",
            "Remove public DNS records for internal administrative interfaces.",
            &["admin_subdomain"],
        ),
        // -------------------------------------------------------------------
        // Email authentication
        // -------------------------------------------------------------------
        entry(
            "SPF Record Weakness",
            "CWE-290",
            3,
            "The domain has no SPF record, or the record is malformed, overly permissive \
             or ends in a soft fail.",
            "Publish an SPF record listing authorized senders and ending in -all.",
            &[
                "spf_record_missing",
                "spf_record_softfail",
                "spf_record_wildcard",
                "spf_record_malformed",
            ],
        ),
        entry(
            "DMARC Record Missing",
            "CWE-290",
            3,
            "The domain does not publish a DMARC policy.",
            "Publish a DMARC record, starting with p=none and moving to p=reject.",
            &["dmarc_record_missing"],
        ),
        // -------------------------------------------------------------------
        // Cookies and credentials
        // -------------------------------------------------------------------
        entry(
            "Cookie Missing Secure Attribute",
            "CWE-614",
            3,
            "A cookie is set over HTTPS without the Secure attribute.",
            "Set the Secure attribute on all cookies issued over HTTPS.",
            &["cookie_missing_secure_attribute"],
        ),
        entry(
            "Cookie Missing HttpOnly Attribute",
            "CWE-1004",
            3,
            "A session cookie is readable from client-side scripts.",
            "Set the HttpOnly attribute on session cookies.",
            &["cookie_missing_http_only"],
        ),
        entry(
            "Leaked Credentials",
            "CWE-522",
            6,
            "Credentials belonging to the organization were found in a public breach dataset.",
            "Force a password reset for the affected accounts and enable MFA.",
            &["leaked_credentials"],
        ),
    ]
}

// Helper: build a CanonicalEntry.
fn entry(
    name: &'static str,
    cwe: &'static str,
    score: u8,
    description: &'static str,
    remediation: &'static str,
    issue_types: &'static [&'static str],
) -> CanonicalEntry {
    CanonicalEntry {
        name,
        cwe,
        score,
        description,
        remediation,
        issue_types,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
