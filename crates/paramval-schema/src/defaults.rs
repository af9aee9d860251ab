//! # Default Injection
//!
//! Populates missing properties of an instance with the defaults declared
//! by its schema, at every object depth.
//!
//! A property is filled only when its key is absent. A key the caller set
//! explicitly, even to null, is never overwritten, which also makes
//! injection idempotent. An explicit null default is injected like any
//! other default.
//!
//! Compositions (anyOf/oneOf) are not descended into: a default declared on
//! the property itself is applied once, whichever branch later matches.

use serde_json::{Map, Value};

use crate::node::{ArraySchema, ObjectSchema, SchemaNode};

/// Inject declared defaults into `instance`, recursing into nested objects
/// and into object elements of arrays. Returns `instance` for chaining.
pub fn inject<'a>(
    schema: &ObjectSchema,
    instance: &'a mut Map<String, Value>,
) -> &'a mut Map<String, Value> {
    for (name, prop) in schema.properties() {
        if !instance.contains_key(name) {
            if let Some(default) = &prop.default {
                tracing::debug!(property = name, default = %default, "injecting declared default");
                instance.insert(name.to_string(), default.clone());
            }
        }

        let Some(value) = instance.get_mut(name) else {
            continue;
        };

        match (&prop.node, value) {
            (SchemaNode::Object(child), Value::Object(child_map)) => {
                inject(child, child_map);
            }
            (SchemaNode::Array(ArraySchema { items, .. }), Value::Array(elements)) => {
                if let SchemaNode::Object(item_schema) = items.as_ref() {
                    for element in elements.iter_mut() {
                        if let Value::Object(element_map) = element {
                            inject(item_schema, element_map);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    instance
}

/// Inject defaults when `schema` is an object schema and `instance` is a
/// mapping. Returns true if injection ran.
pub fn inject_value(schema: &SchemaNode, instance: &mut Value) -> bool {
    match (schema.as_object(), instance) {
        (Some(obj), Value::Object(map)) => {
            inject(obj, map);
            true
        }
        _ => false,
    }
}
