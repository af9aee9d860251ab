//! # Validation Engine
//!
//! Entry point used by parameter stores and API handlers: optionally
//! inject declared defaults, then validate structurally.
//!
//! Injection mutates the caller's instance in place and happens before
//! validation. It is not rolled back when validation then fails; callers
//! that need atomicity validate a copy.

use serde_json::Value;

use crate::defaults::inject_value;
use crate::error::SchemaError;
use crate::node::SchemaNode;
use crate::validator::Validator;

/// Flags for [`validate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Inject declared defaults into missing properties before validating.
    pub use_default: bool,
    /// Accept explicit nulls for leaf and composition properties.
    pub allow_default_none: bool,
}

impl ValidateOptions {
    /// Options with default injection enabled.
    pub fn with_defaults() -> Self {
        Self {
            use_default: true,
            allow_default_none: false,
        }
    }

    /// Returns a copy with the null override set.
    pub fn allow_default_none(self, enabled: bool) -> Self {
        Self {
            allow_default_none: enabled,
            ..self
        }
    }
}

/// Parse `schema` and validate `instance` against it.
///
/// # Errors
///
/// Returns `SchemaError::InvalidSchema` if the schema cannot be parsed and
/// `SchemaError::Validation` with the first failure otherwise.
pub fn validate(
    instance: &mut Value,
    schema: &Value,
    validator: &Validator,
    options: ValidateOptions,
) -> Result<(), SchemaError> {
    let node = SchemaNode::parse(schema)?;
    validate_node(instance, &node, validator, options)
}

/// Validate `instance` against an already parsed schema.
///
/// # Errors
///
/// Returns `SchemaError::Validation` with the first failure found.
pub fn validate_node(
    instance: &mut Value,
    schema: &SchemaNode,
    validator: &Validator,
    options: ValidateOptions,
) -> Result<(), SchemaError> {
    if options.use_default && !inject_value(schema, instance) {
        tracing::debug!("schema root or instance is not an object; no defaults injected");
    }

    let active = validator.with_null_override(options.allow_default_none);
    if let Err(e) = active.validate(schema, instance) {
        tracing::debug!(error = %e, "parameter validation failed");
        return Err(e.into());
    }

    tracing::debug!(
        use_default = options.use_default,
        allow_default_none = options.allow_default_none,
        "parameters validated"
    );
    Ok(())
}
