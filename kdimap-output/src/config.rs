use std::fmt;
use std::path::PathBuf;

/// Directory the KDI file is written to when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "output/security_scorecard";
/// Name of the KDI file inside the output directory.
pub const KDI_FILENAME: &str = "security_scorecard.kdi.json";
/// Platform API host used when none is configured.
pub const DEFAULT_API_HOST: &str = "api.kennasecurity.com";

/// Where the KDI document is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            filename: KDI_FILENAME.to_string(),
        }
    }
}

impl OutputConfig {
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// Platform connector that receives the KDI file.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    /// API host, optionally with a scheme (`https` is assumed otherwise).
    pub api_host: String,
    pub api_key: String,
    pub connector_id: u64,
}

impl fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("api_host", &self.api_host)
            .field("api_key", &"[redacted]")
            .field("connector_id", &self.connector_id)
            .finish()
    }
}

impl ConnectorConfig {
    /// Build a connector config only when every part is present and non-empty.
    pub fn from_parts(
        api_host: Option<&str>,
        api_key: Option<&str>,
        connector_id: Option<u64>,
    ) -> Option<Self> {
        let api_host = api_host.filter(|s| !s.trim().is_empty())?;
        let api_key = api_key.filter(|s| !s.trim().is_empty())?;
        Some(Self {
            api_host: api_host.trim().to_string(),
            api_key: api_key.to_string(),
            connector_id: connector_id?,
        })
    }

    /// Base URL for API requests.
    pub fn base_url(&self) -> String {
        let host = self.api_host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{host}")
        }
    }

    pub fn data_file_url(&self) -> String {
        format!(
            "{}/connectors/{}/data_file?run=true",
            self.base_url(),
            self.connector_id
        )
    }
}
