pub mod config;
pub mod json;
pub mod manager;
pub mod traits;
pub mod upload;

pub use config::{ConnectorConfig, DEFAULT_API_HOST, DEFAULT_OUTPUT_DIR, KDI_FILENAME, OutputConfig};
pub use json::JsonFormatter;
pub use manager::OutputManager;
pub use traits::{OutputError, OutputFormatter};
pub use upload::{ConnectorUploader, UploadReceipt};
