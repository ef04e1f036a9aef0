//! Upload of a KDI file to a platform connector.
//!
//! The file is posted as a multipart `file` field to
//! `/connectors/{id}/data_file?run=true`, which stores it and starts a
//! connector run.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::ConnectorConfig;
use crate::traits::OutputError;

/// Longest response body kept in an error message.
const MAX_ERROR_BODY: usize = 512;

/// What the connector reported after accepting a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub connector_run_id: Option<u64>,
}

/// HTTP client for connector uploads.
pub struct ConnectorUploader {
    client: reqwest::Client,
    config: ConnectorConfig,
}

impl ConnectorUploader {
    pub fn new(config: ConnectorConfig) -> Result<Self, OutputError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .user_agent(concat!("kdimap/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    /// Upload the file at `path` and trigger a connector run.
    pub async fn upload(&self, path: &Path) -> Result<UploadReceipt, OutputError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            OutputError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read {}: {}", path.display(), e),
            ))
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| crate::config::KDI_FILENAME.to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/json")?;
        let form = Form::new().part("file", part);

        let url = self.config.data_file_url();
        info!(connector_id = self.config.connector_id, host = %self.config.api_host, "uploading KDI file");

        let resp = self
            .client
            .post(&url)
            .header("X-Risk-Token", &self.config.api_key)
            .header("Accept", "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            let mut body = body;
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(OutputError::UploadRejected {
                connector_id: self.config.connector_id,
                status: status.as_u16(),
                body,
            });
        }

        let receipt = match serde_json::from_str::<UploadReceipt>(&body) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "connector response was not understood");
                UploadReceipt::default()
            }
        };
        info!(
            connector_id = self.config.connector_id,
            run_id = ?receipt.connector_run_id,
            "upload accepted"
        );
        Ok(receipt)
    }
}
