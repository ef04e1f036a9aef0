use std::fs;
use std::path::{Component, Path, PathBuf};

use kdimap_types::KdiDocument;
use tracing::info;

use crate::config::OutputConfig;
use crate::json::JsonFormatter;
use crate::traits::{OutputError, OutputFormatter};

fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    for component in path.components() {
        if matches!(component, Component::ParentDir) {
            return Err(OutputError::FormatError(format!(
                "output path '{}' must not contain '..' components",
                path.display()
            )));
        }
    }
    Ok(())
}

/// Writes the KDI document to its configured location.
pub struct OutputManager {
    config: OutputConfig,
}

impl OutputManager {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Format the document and write it, creating the output directory.
    ///
    /// Returns the path of the written file.
    pub fn write(&self, document: &KdiDocument) -> Result<PathBuf, OutputError> {
        let path = self.config.path();
        validate_output_path(&path)?;

        let output = JsonFormatter.format(document)?;

        fs::create_dir_all(&self.config.directory).map_err(|e| {
            OutputError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "failed to create {}: {}",
                    self.config.directory.display(),
                    e
                ),
            ))
        })?;
        fs::write(&path, &output).map_err(|e| {
            OutputError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to write {}: {}", path.display(), e),
            ))
        })?;

        info!(
            path = %path.display(),
            assets = document.assets.len(),
            vuln_defs = document.vuln_defs.len(),
            "wrote KDI document"
        );
        Ok(path)
    }
}
