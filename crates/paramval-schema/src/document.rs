//! # Document Loading
//!
//! Loads schemas, parameter instances and validator configuration from
//! JSON or YAML files into `serde_json::Value`.
//!
//! The format is chosen from the file extension: `.yaml`/`.yml` for YAML,
//! anything else is read as JSON.

use std::path::Path;

use serde_json::Value;

use crate::error::SchemaError;

/// Serialized form of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON text.
    Json,
    /// YAML text, restricted to its JSON-compatible subset.
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read and parse a document from disk.
///
/// # Errors
///
/// Returns `SchemaError::DocumentLoad` if the file cannot be read or is
/// not valid JSON/YAML.
pub fn load_document(path: &Path) -> Result<Value, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::DocumentLoad {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;

    parse_document(&content, DocumentFormat::from_path(path)).map_err(|reason| {
        SchemaError::DocumentLoad {
            path: path.display().to_string(),
            reason,
        }
    })
}

/// Parse document text in the given format.
///
/// # Errors
///
/// Returns a description of the parse or conversion failure.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value, String> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))
        }
    }
}
