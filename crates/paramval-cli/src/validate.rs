//! # Validate Subcommand
//!
//! Loads a schema and a parameter instance, optionally injects declared
//! defaults, and validates the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use paramval_schema::{load_document, validate, SchemaError, ValidateOptions, ValidationError};

/// Arguments for the `paramval validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,

    /// Parameter instance file (JSON or YAML).
    #[arg(long)]
    pub instance: PathBuf,

    /// Inject declared defaults before validating.
    #[arg(long)]
    pub use_default: bool,

    /// Accept explicit nulls for leaf and anyOf/oneOf properties.
    #[arg(long)]
    pub allow_default_none: bool,

    /// Enforce `format` keywords.
    #[arg(long)]
    pub validate_formats: bool,

    /// Print the validated instance, defaults included, as JSON.
    #[arg(long)]
    pub print: bool,
}

impl ValidateArgs {
    fn options(&self) -> ValidateOptions {
        ValidateOptions {
            use_default: self.use_default,
            allow_default_none: self.allow_default_none,
        }
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure.
pub fn run_validate(args: &ValidateArgs, config: Option<&Path>) -> Result<u8> {
    match check_files(args, config)? {
        Ok(instance) => {
            if args.print {
                println!("{}", serde_json::to_string_pretty(&instance)?);
            } else {
                println!("OK: {}", args.instance.display());
            }
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {} — {e}", args.instance.display());
            Ok(1)
        }
    }
}

/// Load both documents and run the validator.
///
/// The outer `Result` carries operational failures (unreadable files,
/// malformed schemas); the inner one the validation outcome.
pub fn check_files(
    args: &ValidateArgs,
    config: Option<&Path>,
) -> Result<std::result::Result<Value, ValidationError>> {
    let validator = crate::build_validator(config, args.validate_formats)?;
    let schema = load_document(&args.schema).context("failed to load schema")?;
    let mut instance = load_document(&args.instance).context("failed to load instance")?;

    tracing::info!(
        schema = %args.schema.display(),
        instance = %args.instance.display(),
        use_default = args.use_default,
        allow_default_none = args.allow_default_none,
        "validating parameters"
    );

    match validate(&mut instance, &schema, &validator, args.options()) {
        Ok(()) => Ok(Ok(instance)),
        Err(SchemaError::Validation(e)) => Ok(Err(e)),
        Err(e) => Err(e).context("schema could not be used for validation"),
    }
}
