//! # Composition Resolution
//!
//! Decides whether a value satisfies an anyOf/oneOf composition.
//!
//! Each branch is validated independently against the same read-only
//! value. anyOf needs at least one accepting branch; oneOf needs exactly
//! one. When the null override is requested and the value is an explicit
//! null, the composition is satisfied without looking at the branches,
//! whether or not any of them admits null. Otherwise keywords declared
//! beside the composition (`type`, `enum`, `minLength`, ...) are checked
//! first and apply whichever branch matches.

use serde_json::Value;

use crate::error::{InstancePath, ValidationError, ValidationErrorKind};
use crate::node::{CompositionKind, CompositionSchema};
use crate::validator::Validator;

/// Check `value` against a composition.
///
/// Branch failures are swallowed when the composition as a whole is
/// satisfied, and attached as branch errors when it is not.
///
/// # Errors
///
/// Returns a `CompositionMismatch` error at `path` when no branch matched
/// (anyOf, oneOf) or more than one branch matched (oneOf).
pub fn matches(
    node: &CompositionSchema,
    value: &Value,
    allow_null_override: bool,
    validator: &Validator,
    path: &InstancePath,
) -> Result<(), ValidationError> {
    if allow_null_override && value.is_null() {
        tracing::trace!(path = %path, keyword = %node.kind, "explicit null accepted by override");
        return Ok(());
    }

    validator.check_constraints(&node.constraints, value, path)?;

    let mut matched = 0usize;
    let mut failures = Vec::new();

    for (idx, branch) in node.branches.iter().enumerate() {
        match validator.check_node(branch, value, path) {
            Ok(()) => {
                tracing::trace!(path = %path, keyword = %node.kind, branch = idx, "branch matched");
                matched += 1;
                if node.kind == CompositionKind::AnyOf {
                    return Ok(());
                }
            }
            Err(e) => failures.push(e),
        }
    }

    if matched == 1 {
        return Ok(());
    }

    let total = node.branches.len();
    let message = if matched == 0 {
        format!(
            "{value} is not valid under any of the {total} schemas listed in the '{}' keyword",
            node.kind
        )
    } else {
        format!(
            "{value} is valid under {matched} of the {total} schemas listed in the '{}' keyword, expected exactly one",
            node.kind
        )
    };

    Err(ValidationError::new(
        ValidationErrorKind::CompositionMismatch {
            kind: node.kind,
            matched,
        },
        path.clone(),
        message,
    )
    .with_branch_errors(failures))
}
