//! # Defaults Subcommand
//!
//! Injects declared defaults into a parameter instance without validating
//! it, and prints or writes the completed instance.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::Value;

use paramval_schema::{defaults::inject_value, load_document, SchemaNode};

/// Arguments for the `paramval defaults` subcommand.
#[derive(Args, Debug)]
pub struct DefaultsArgs {
    /// Schema file (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,

    /// Parameter instance file (JSON or YAML).
    #[arg(long)]
    pub instance: PathBuf,

    /// Write the completed instance here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Execute the defaults subcommand.
pub fn run_defaults(args: &DefaultsArgs) -> Result<u8> {
    let completed = complete_instance(&args.schema, &args.instance)?;
    let rendered = serde_json::to_string_pretty(&completed)?;

    match &args.out {
        Some(out) => {
            std::fs::write(out, format!("{rendered}\n"))
                .with_context(|| format!("failed to write {}", out.display()))?;
            tracing::info!(out = %out.display(), "wrote completed instance");
        }
        None => println!("{rendered}"),
    }

    Ok(0)
}

/// Load the documents and return the instance with defaults injected.
pub fn complete_instance(schema_path: &Path, instance_path: &Path) -> Result<Value> {
    let schema = load_document(schema_path).context("failed to load schema")?;
    let node = SchemaNode::parse(&schema).context("failed to parse schema")?;
    let mut instance = load_document(instance_path).context("failed to load instance")?;

    if !inject_value(&node, &mut instance) {
        bail!(
            "defaults can only be injected when both the schema root and the instance are objects"
        );
    }

    Ok(instance)
}
