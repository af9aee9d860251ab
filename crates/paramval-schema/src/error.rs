//! # Error Types
//!
//! Structured errors raised by schema parsing, document loading, and
//! parameter validation. All errors use `thiserror`.
//!
//! A [`ValidationError`] always carries the JSON Pointer path of the
//! offending instance value. Composition failures additionally carry the
//! per-branch errors, which are rendered into the error's display text.

use std::fmt;

use thiserror::Error;

use crate::node::CompositionKind;

/// Top-level error type for the parameter validator.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema itself is malformed and cannot be turned into a node tree.
    #[error("invalid schema at '{schema_path}': {reason}")]
    InvalidSchema {
        /// JSON Pointer into the schema document.
        schema_path: String,
        /// Why the fragment was rejected.
        reason: String,
    },

    /// The instance did not conform to the schema.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A schema or instance document could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },
}

impl SchemaError {
    /// Shorthand for [`SchemaError::InvalidSchema`].
    pub(crate) fn invalid(schema_path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            schema_path: schema_path.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the validation error if this is a validation failure.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Classification of a validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required property has no value and no applicable default.
    MissingRequiredProperty {
        /// Name of the missing property.
        property: String,
    },
    /// A value does not satisfy its declared type, enum, format, or other
    /// leaf constraint.
    TypeMismatch,
    /// A property is present that the schema does not declare, while
    /// `additionalProperties` is `false`.
    AdditionalProperty {
        /// Name of the unexpected property.
        property: String,
    },
    /// No branch (anyOf, oneOf) or more than one branch (oneOf) matched.
    CompositionMismatch {
        /// The composition keyword that failed.
        kind: CompositionKind,
        /// How many branches accepted the value.
        matched: usize,
    },
}

/// One step of an [`InstancePath`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathChunk {
    /// A mapping key.
    Property(String),
    /// A sequence index.
    Index(usize),
}

/// Location of a value inside an instance tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstancePath {
    chunks: Vec<PathChunk>,
}

impl InstancePath {
    /// The root of the instance.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path extended by a property name.
    pub fn property(&self, name: &str) -> Self {
        let mut chunks = self.chunks.clone();
        chunks.push(PathChunk::Property(name.to_string()));
        Self { chunks }
    }

    /// Returns a new path extended by a sequence index.
    pub fn index(&self, idx: usize) -> Self {
        let mut chunks = self.chunks.clone();
        chunks.push(PathChunk::Index(idx));
        Self { chunks }
    }

    /// Returns true if this path points at the instance root.
    pub fn is_root(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Human-readable location: `(root)` or the JSON Pointer.
    pub fn describe(&self) -> String {
        if self.is_root() {
            "(root)".to_string()
        } else {
            self.to_string()
        }
    }
}

/// Renders as an RFC 6901 JSON Pointer (empty string for the root).
impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.chunks {
            match chunk {
                PathChunk::Property(name) => {
                    write!(f, "/{}", name.replace('~', "~0").replace('/', "~1"))?;
                }
                PathChunk::Index(idx) => write!(f, "/{idx}")?,
            }
        }
        Ok(())
    }
}

/// A single validation failure with structured context.
#[derive(Error, Debug, Clone)]
#[error("{}: {}{}", .instance_path.describe(), .message, render_branches(.branch_errors))]
pub struct ValidationError {
    /// What went wrong.
    pub kind: ValidationErrorKind,
    /// Where in the instance it went wrong.
    pub instance_path: InstancePath,
    /// Human-readable description of the failure.
    pub message: String,
    /// Underlying branch failures, populated for composition mismatches.
    pub branch_errors: Vec<ValidationError>,
}

impl ValidationError {
    pub(crate) fn new(
        kind: ValidationErrorKind,
        instance_path: InstancePath,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            instance_path,
            message: message.into(),
            branch_errors: Vec::new(),
        }
    }

    pub(crate) fn missing_required(instance_path: InstancePath, property: &str) -> Self {
        Self::new(
            ValidationErrorKind::MissingRequiredProperty {
                property: property.to_string(),
            },
            instance_path,
            format!("\"{property}\" is a required property"),
        )
    }

    pub(crate) fn additional_property(instance_path: InstancePath, property: &str) -> Self {
        Self::new(
            ValidationErrorKind::AdditionalProperty {
                property: property.to_string(),
            },
            instance_path,
            format!("Additional properties are not allowed ('{property}' was unexpected)"),
        )
    }

    pub(crate) fn type_mismatch(instance_path: InstancePath, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::TypeMismatch, instance_path, message)
    }

    pub(crate) fn with_branch_errors(mut self, branch_errors: Vec<ValidationError>) -> Self {
        self.branch_errors = branch_errors;
        self
    }
}

/// Indented listing of branch failures, one line per branch, nested
/// compositions indented further.
fn render_branches(branches: &[ValidationError]) -> String {
    let mut out = String::new();
    for (i, branch) in branches.iter().enumerate() {
        let rendered = branch.to_string().replace('\n', "\n    ");
        out.push_str(&format!("\n  branch {i}: {rendered}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_display() {
        let path = InstancePath::root();
        assert_eq!(path.to_string(), "");
        assert_eq!(path.describe(), "(root)");
    }

    #[test]
    fn test_nested_path_escapes_pointer_tokens() {
        let path = InstancePath::root()
            .property("a/b")
            .index(3)
            .property("c~d");
        assert_eq!(path.to_string(), "/a~1b/3/c~0d");
    }

    #[test]
    fn test_missing_required_message() {
        let err = ValidationError::missing_required(InstancePath::root(), "cmd");
        assert_eq!(err.to_string(), "(root): \"cmd\" is a required property");
        assert_eq!(
            err.kind,
            ValidationErrorKind::MissingRequiredProperty {
                property: "cmd".to_string()
            }
        );
    }

    #[test]
    fn test_branch_errors_rendered_into_display() {
        let path = InstancePath::root().property("arg");
        let err = ValidationError::new(
            ValidationErrorKind::CompositionMismatch {
                kind: CompositionKind::AnyOf,
                matched: 0,
            },
            path.clone(),
            "null is not valid under any of the schemas listed in the 'anyOf' keyword",
        )
        .with_branch_errors(vec![
            ValidationError::type_mismatch(path.clone(), "null is not of type \"string\""),
            ValidationError::type_mismatch(path, "null is not of type \"boolean\""),
        ]);

        let display = err.to_string();
        assert!(display.starts_with("/arg: null is not valid"));
        assert!(display.contains("branch 0: /arg: null is not of type \"string\""));
        assert!(display.contains("branch 1: /arg: null is not of type \"boolean\""));
    }

    #[test]
    fn test_schema_error_exposes_validation() {
        let err: SchemaError =
            ValidationError::missing_required(InstancePath::root(), "x").into();
        assert!(err.as_validation().is_some());
        assert!(err.to_string().starts_with("validation failed:"));
    }
}
