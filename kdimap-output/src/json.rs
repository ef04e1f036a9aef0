use crate::traits::{OutputError, OutputFormatter};
use kdimap_types::KdiDocument;

/// Formats a KDI document as pretty-printed JSON.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, document: &KdiDocument) -> Result<String, OutputError> {
        serde_json::to_string_pretty(document)
            .map_err(|e| OutputError::FormatError(format!("JSON serialization error: {e}")))
    }
}
