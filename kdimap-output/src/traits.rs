use kdimap_types::KdiDocument;

/// Trait for rendering a KDI document.
pub trait OutputFormatter: Send + Sync {
    fn format(&self, document: &KdiDocument) -> Result<String, OutputError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("formatting error: {0}")]
    FormatError(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("upload request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("connector {connector_id} rejected upload with status {status}: {body}")]
    UploadRejected {
        connector_id: u64,
        status: u16,
        body: String,
    },
}
