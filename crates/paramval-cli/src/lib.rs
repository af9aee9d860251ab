//! # paramval-cli — Parameter Validation Command-Line Interface
//!
//! Runs the `paramval-schema` pipeline over parameter files so schema
//! authors and CI jobs can check trigger and action parameters without
//! going through the API.
//!
//! ## Subcommands
//!
//! - `validate` — Inject defaults (optional) and validate an instance.
//! - `defaults` — Inject defaults only and print the completed instance.
//!
//! ```bash
//! paramval validate --schema action.yaml --instance params.json --use-default --print
//! paramval defaults --schema action.yaml --instance params.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; validation semantics live in
//!   `paramval-schema`.
//! - Exit codes: 0 success, 1 validation failure, 2 operational error.

pub mod defaults;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use paramval_schema::{get_validator, Validator, ValidatorConfig};

/// Build a validator from an optional config file, with command-line
/// flags taking precedence over file settings.
pub fn build_validator(config_path: Option<&Path>, validate_formats: bool) -> Result<Validator> {
    let mut config = match config_path {
        Some(path) => ValidatorConfig::from_file(path)
            .with_context(|| format!("failed to load validator config {}", path.display()))?,
        None => ValidatorConfig::default(),
    };

    if validate_formats {
        config.validate_formats = true;
    }

    tracing::debug!(validate_formats = config.validate_formats, "validator configured");
    Ok(get_validator(Some(&config)))
}
