//! # Structural Validator
//!
//! The [`Validator`] strategy walks a [`SchemaNode`] tree alongside an
//! instance and reports the first structural failure: type, enum and
//! other keywords, `required`, `additionalProperties`, object and array
//! recursion, and anyOf/oneOf composition.
//!
//! Every node checks its own [`Constraints`] first. Object and array
//! nodes then descend only into values of their structural type, so a
//! property declared `type: [object, null]` accepts null.
//!
//! Validators are obtained from [`get_validator`]. They hold no state
//! beyond their configuration, are `Copy`, and can be shared freely
//! across threads.
//!
//! ## Null override
//!
//! A validator built with [`Validator::with_null_override`] accepts an
//! explicit null for any object property whose schema is a leaf or a
//! composition, without applying that schema. `required` is unaffected:
//! a property present with a null value counts as present.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::composition;
use crate::document::load_document;
use crate::error::{InstancePath, SchemaError, ValidationError};
use crate::node::{ArraySchema, Constraints, JsonType, ObjectSchema, SchemaNode};

/// Options recognized by [`get_validator`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Enforce `format` keywords (`date-time`, `ipv4`, `email`, ...).
    pub validate_formats: bool,
}

impl ValidatorConfig {
    /// Load a configuration from a JSON or YAML file.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DocumentLoad` if the file cannot be read,
    /// parsed, or contains unknown options.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let value = load_document(path)?;
        serde_json::from_value(value).map_err(|e| SchemaError::DocumentLoad {
            path: path.display().to_string(),
            reason: format!("invalid validator config: {e}"),
        })
    }
}

/// Build a validator from an optional configuration.
///
/// With no configuration, format checking is disabled.
pub fn get_validator(config: Option<&ValidatorConfig>) -> Validator {
    config.map(Validator::new).unwrap_or_default()
}

/// Structural validation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    validate_formats: bool,
    null_override: bool,
}

impl Validator {
    /// Create a validator from a configuration.
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            validate_formats: config.validate_formats,
            null_override: false,
        }
    }

    /// Returns true if `format` keywords are enforced.
    pub fn validates_formats(&self) -> bool {
        self.validate_formats
    }

    /// Returns true if explicit nulls bypass leaf and composition schemas.
    pub fn null_override(&self) -> bool {
        self.null_override
    }

    /// Returns a copy with the null override switched on or off.
    pub fn with_null_override(self, enabled: bool) -> Self {
        Self {
            null_override: enabled,
            ..self
        }
    }

    /// Validate `instance` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found in traversal order.
    pub fn validate(&self, schema: &SchemaNode, instance: &Value) -> Result<(), ValidationError> {
        self.check_node(schema, instance, &InstancePath::root())
    }

    /// Returns true if `instance` satisfies `schema`.
    pub fn is_valid(&self, schema: &SchemaNode, instance: &Value) -> bool {
        self.validate(schema, instance).is_ok()
    }

    pub(crate) fn check_node(
        &self,
        node: &SchemaNode,
        value: &Value,
        path: &InstancePath,
    ) -> Result<(), ValidationError> {
        match node {
            SchemaNode::Object(obj) => self.check_object(obj, value, path),
            SchemaNode::Array(arr) => self.check_array(arr, value, path),
            SchemaNode::Composition(comp) => composition::matches(comp, value, false, self, path),
            SchemaNode::Leaf(leaf) => self.check_constraints(&leaf.constraints, value, path),
        }
    }

    /// Check the value of a named object property. This is the only
    /// place the null override applies.
    fn check_property(
        &self,
        node: &SchemaNode,
        value: &Value,
        path: &InstancePath,
    ) -> Result<(), ValidationError> {
        match node {
            SchemaNode::Leaf(_) if self.null_override && value.is_null() => {
                tracing::trace!(path = %path, "explicit null accepted by override");
                Ok(())
            }
            SchemaNode::Composition(comp) => {
                composition::matches(comp, value, self.null_override, self, path)
            }
            other => self.check_node(other, value, path),
        }
    }

    /// The checks every node applies to its own value: `type`, `enum`,
    /// then the compiled keywords.
    pub(crate) fn check_constraints(
        &self,
        constraints: &Constraints,
        value: &Value,
        path: &InstancePath,
    ) -> Result<(), ValidationError> {
        let types = &constraints.types;
        if !types.is_empty() && !types.iter().any(|t| t.matches(value)) {
            return Err(ValidationError::type_mismatch(
                path.clone(),
                type_message(value, types),
            ));
        }

        if let Some(allowed) = &constraints.enumeration {
            if !allowed.iter().any(|candidate| json_equal(candidate, value)) {
                return Err(ValidationError::type_mismatch(
                    path.clone(),
                    format!("{value} is not one of {}", Value::Array(allowed.clone())),
                ));
            }
        }

        if let Some(compiled) = constraints.keyword_validator(self.validate_formats) {
            compiled
                .validate(value)
                .map_err(|e| ValidationError::type_mismatch(path.clone(), e.to_string()))?;
        }

        Ok(())
    }

    /// Mappings are walked; any other value the declared types admit is
    /// only subject to the node's own constraints.
    fn check_object(
        &self,
        obj: &ObjectSchema,
        value: &Value,
        path: &InstancePath,
    ) -> Result<(), ValidationError> {
        self.check_constraints(obj.constraints(), value, path)?;
        let Some(map) = value.as_object() else {
            return Ok(());
        };

        if let Some(missing) = obj.required().iter().find(|name| !map.contains_key(*name)) {
            return Err(ValidationError::missing_required(path.clone(), missing));
        }

        for (name, prop) in obj.properties() {
            if let Some(child) = map.get(name) {
                self.check_property(&prop.node, child, &path.property(name))?;
            }
        }

        if !obj.allows_additional_properties() {
            if let Some(extra) = map.keys().find(|key| obj.property(key).is_none()) {
                return Err(ValidationError::additional_property(path.clone(), extra));
            }
        }

        Ok(())
    }

    fn check_array(
        &self,
        arr: &ArraySchema,
        value: &Value,
        path: &InstancePath,
    ) -> Result<(), ValidationError> {
        self.check_constraints(&arr.constraints, value, path)?;
        let Some(elements) = value.as_array() else {
            return Ok(());
        };

        for (idx, element) in elements.iter().enumerate() {
            self.check_node(&arr.items, element, &path.index(idx))?;
        }

        Ok(())
    }
}

/// JSON equality with numbers compared by value, so `1` equals `1.0`.
fn json_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (a.as_u64(), b.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => a.as_f64() == b.as_f64(),
            },
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| json_equal(x, y)))
        }
        _ => left == right,
    }
}

fn type_message(value: &Value, types: &[JsonType]) -> String {
    match types {
        [single] => format!("{value} is not of type \"{single}\""),
        many => {
            let names: Vec<String> = many.iter().map(|t| format!("\"{t}\"")).collect();
            format!("{value} is not of types {}", names.join(", "))
        }
    }
}
