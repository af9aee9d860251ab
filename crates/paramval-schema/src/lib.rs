//! # paramval-schema — Default-Injecting Parameter Validation
//!
//! Validates trigger, action and workflow parameters against
//! author-declared schemas, optionally completing them with declared
//! defaults first.
//!
//! ## Pipeline
//!
//! 1. [`SchemaNode::parse`] turns a schema document into a typed tree.
//! 2. [`defaults::inject`] fills missing properties with declared
//!    defaults, including explicit null defaults.
//! 3. [`Validator`] checks the completed instance structurally, consulting
//!    [`composition::matches`] for anyOf/oneOf properties.
//!
//! [`validate`] runs the whole pipeline:
//!
//! ```
//! use paramval_schema::{get_validator, validate, ValidateOptions};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {"cmd": {"type": "string", "default": "date"}}
//! });
//! let mut params = json!({});
//! validate(&mut params, &schema, &get_validator(None), ValidateOptions::with_defaults())?;
//! assert_eq!(params, json!({"cmd": "date"}));
//! # Ok::<(), paramval_schema::SchemaError>(())
//! ```
//!
//! ## Null override
//!
//! With `allow_default_none`, an explicit null for a leaf or composition
//! property means "intentionally unset" and is accepted regardless of the
//! declared type. This is what lets an explicit null default pass.
//!
//! ## Crate Policy
//!
//! - No I/O in the validation path; [`document`] is the only module that
//!   touches the filesystem.
//! - The instance is only mutated by default injection.

pub mod composition;
pub mod defaults;
pub mod document;
pub mod engine;
pub mod error;
pub mod node;
pub mod validator;

pub use defaults::inject;
pub use document::{load_document, DocumentFormat};
pub use engine::{validate, validate_node, ValidateOptions};
pub use error::{InstancePath, SchemaError, ValidationError, ValidationErrorKind};
pub use node::{
    ArraySchema, CompositionKind, CompositionSchema, Constraints, JsonType, LeafSchema,
    ObjectSchema, PropertySchema, SchemaNode,
};
pub use validator::{get_validator, Validator, ValidatorConfig};
