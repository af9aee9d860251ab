//! # Schema Node Model
//!
//! Typed representation of a parameter schema. A raw schema document
//! (already parsed into a `serde_json::Value`) is turned into a closed
//! [`SchemaNode`] tree once per validation call and is read-only after
//! that.
//!
//! ## Declared defaults
//!
//! Defaults live on [`PropertySchema`], not on the node itself, because a
//! default only has meaning for a named property of an object. The default
//! is an `Option<Value>`:
//!
//! - `None` — the property declares no default.
//! - `Some(Value::Null)` — the property explicitly defaults to null.
//!
//! ## Recognized keywords
//!
//! The tree walker handles `properties`, `required`, `additionalProperties`,
//! `default`, `items`, `anyOf` and `oneOf`. `required` is accepted both as
//! an array on the object (draft 4) and as `required: true` on the property
//! fragment (draft 3). A bare `type: object` or `type: array` without any
//! of those keywords is a leaf.
//!
//! Every node, structural or not, also carries [`Constraints`] for its own
//! value: `type`, `enum`, and whatever other validation keywords sit on
//! the fragment (`minLength`, `minItems`, `format`, `pattern`, ...). The
//! latter are compiled with the `jsonschema` crate while parsing, so a
//! malformed keyword is a schema error, not a validation failure.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::SchemaError;

/// Keywords that carry no validation semantics, or that the tree walker
/// consumes on every kind of node.
const ANNOTATION_KEYWORDS: &[&str] = &[
    "title",
    "description",
    "default",
    "required",
    "examples",
    "$comment",
    "$schema",
    "id",
    "$id",
    // Parameter metadata used by action and trigger authors.
    "position",
    "secret",
    "immutable",
];

/// A node of a parsed schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// An object with declared properties.
    Object(ObjectSchema),
    /// A sequence with an item schema.
    Array(ArraySchema),
    /// An anyOf/oneOf list of alternatives.
    Composition(CompositionSchema),
    /// A primitive type constraint.
    Leaf(LeafSchema),
}

/// Schema for a mapping value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    /// Declared properties in authored order.
    properties: Vec<(String, PropertySchema)>,
    /// Names of required properties in authored order, without duplicates.
    required: Vec<String>,
    /// `false` when `additionalProperties: false` was declared.
    additional_properties: bool,
    constraints: Constraints,
}

/// A declared property: its schema and optional default.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    /// Schema of the property value.
    pub node: SchemaNode,
    /// Declared default; `Some(Value::Null)` is an explicit null default.
    pub default: Option<Value>,
}

/// Schema for a sequence value.
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    /// Schema applied to every element.
    pub items: Box<SchemaNode>,
    /// Checks on the sequence itself (`type`, `minItems`, `uniqueItems`, ...).
    pub constraints: Constraints,
}

/// The composition keyword of a [`CompositionSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositionKind {
    /// Matches when at least one branch matches.
    AnyOf,
    /// Matches when exactly one branch matches.
    OneOf,
}

impl CompositionKind {
    /// The JSON Schema keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::AnyOf => "anyOf",
            Self::OneOf => "oneOf",
        }
    }
}

impl fmt::Display for CompositionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// An ordered list of alternative schemas.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionSchema {
    /// anyOf or oneOf.
    pub kind: CompositionKind,
    /// Alternatives in authored order.
    pub branches: Vec<SchemaNode>,
    /// Sibling keywords every value must satisfy regardless of branch.
    pub constraints: Constraints,
}

/// Primitive JSON types usable in a `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    /// `"string"`
    String,
    /// `"number"`, any numeric value.
    Number,
    /// `"integer"`, a number without a fractional part.
    Integer,
    /// `"boolean"`
    Boolean,
    /// `"null"`
    Null,
    /// `"object"`
    Object,
    /// `"array"`
    Array,
}

impl JsonType {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "string" => Self::String,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "null" => Self::Null,
            "object" => Self::Object,
            "array" => Self::Array,
            _ => return None,
        })
    }

    /// The JSON Schema type name.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Returns true if `value` is of this type.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => match value {
                Value::Number(n) => {
                    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
                }
                _ => false,
            },
            Self::Boolean => value.is_boolean(),
            Self::Null => value.is_null(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Checks a fragment applies to its own value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    /// Accepted types; empty means any type.
    pub types: Vec<JsonType>,
    /// Allowed literal values, if constrained.
    pub enumeration: Option<Vec<Value>>,
    /// Remaining validation keywords, compiled.
    keywords: Option<KeywordCheck>,
}

impl Constraints {
    /// The compiled keyword validator, if the fragment has any keywords
    /// beyond `type` and `enum`.
    pub(crate) fn keyword_validator(
        &self,
        validate_formats: bool,
    ) -> Option<&jsonschema::Validator> {
        self.keywords.as_ref().map(|check| match &check.with_formats {
            Some(strict) if validate_formats => strict.as_ref(),
            _ => check.without_formats.as_ref(),
        })
    }
}

/// Keywords only the `jsonschema` compiler enforces.
///
/// A second validator is compiled with format checking on only when the
/// fragment mentions `format` somewhere.
#[derive(Debug, Clone)]
struct KeywordCheck {
    fragment: Value,
    without_formats: Arc<jsonschema::Validator>,
    with_formats: Option<Arc<jsonschema::Validator>>,
}

impl PartialEq for KeywordCheck {
    fn eq(&self, other: &Self) -> bool {
        self.fragment == other.fragment
    }
}

impl KeywordCheck {
    fn compile(mut fragment: Value, schema_path: &str) -> Result<Self, SchemaError> {
        strip_boolean_required(&mut fragment);

        let build = |validate_formats: bool| {
            jsonschema::options()
                .with_draft(jsonschema::Draft::Draft4)
                .should_validate_formats(validate_formats)
                .build(&fragment)
                .map(Arc::new)
                .map_err(|e| SchemaError::invalid(schema_path, e.to_string()))
        };

        let without_formats = build(false)?;
        let with_formats = if mentions_format(&fragment) {
            Some(build(true)?)
        } else {
            None
        };

        Ok(Self {
            fragment,
            without_formats,
            with_formats,
        })
    }
}

/// A type constraint plus any other keywords on a fragment without
/// structure the walker descends into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeafSchema {
    /// Checks applied to the value.
    pub constraints: Constraints,
}

impl SchemaNode {
    /// Parse a schema document into a node tree.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidSchema` naming the offending schema
    /// path if a fragment is not an object, uses an unknown type name,
    /// declares both `anyOf` and `oneOf`, has malformed keyword values, or
    /// carries a keyword the `jsonschema` compiler rejects.
    pub fn parse(schema: &Value) -> Result<Self, SchemaError> {
        parse_node(schema, "")
    }

    /// Returns the object schema if this is an object node.
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl ObjectSchema {
    /// Declared properties in authored order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertySchema)> {
        self.properties.iter().map(|(name, prop)| (name.as_str(), prop))
    }

    /// Look up a declared property.
    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, prop)| prop)
    }

    /// The declared default of property `name`.
    ///
    /// `None` if the property is undeclared or declares no default;
    /// `Some(&Value::Null)` for an explicit null default.
    pub fn declared_default(&self, name: &str) -> Option<&Value> {
        self.property(name).and_then(|prop| prop.default.as_ref())
    }

    /// Names of required properties.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Returns false when undeclared properties are rejected.
    pub fn allows_additional_properties(&self) -> bool {
        self.additional_properties
    }

    /// Checks on the mapping itself (`type`, `minProperties`, ...).
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }
}

fn parse_node(schema: &Value, schema_path: &str) -> Result<SchemaNode, SchemaError> {
    let map = match schema {
        Value::Object(map) => map,
        // `true` is the always-valid schema.
        Value::Bool(true) => return Ok(SchemaNode::Leaf(LeafSchema::default())),
        other => {
            return Err(SchemaError::invalid(
                schema_path,
                format!("expected a schema object, found {other}"),
            ))
        }
    };

    let types = parse_types(map, schema_path)?;

    match (map.get("anyOf"), map.get("oneOf")) {
        (Some(_), Some(_)) => {
            return Err(SchemaError::invalid(
                schema_path,
                "a schema may declare anyOf or oneOf, not both",
            ))
        }
        (Some(branches), None) => {
            return parse_composition(CompositionKind::AnyOf, branches, map, types, schema_path)
        }
        (None, Some(branches)) => {
            return parse_composition(CompositionKind::OneOf, branches, map, types, schema_path)
        }
        (None, None) => {}
    }

    // A bare `type: object` or `type: array` stays a leaf type constraint;
    // only structural keywords make a node the walker descends into.
    let structural_object = map.contains_key("properties")
        || map.get("required").is_some_and(Value::is_array)
        || map.contains_key("additionalProperties");
    if structural_object {
        return parse_object(map, types, schema_path).map(SchemaNode::Object);
    }

    // Tuple-form `items` is left to the keyword compiler.
    if let Some(items) = map.get("items").filter(|items| !items.is_array()) {
        let items = parse_node(items, &format!("{schema_path}/items"))?;
        let fragment = keyword_fragment(map, &["items"]);
        return Ok(SchemaNode::Array(ArraySchema {
            items: Box::new(items),
            constraints: parse_constraints(map, types, fragment, schema_path)?,
        }));
    }

    let fragment = keyword_fragment(map, &[]);
    Ok(SchemaNode::Leaf(LeafSchema {
        constraints: parse_constraints(map, types, fragment, schema_path)?,
    }))
}

fn parse_types(map: &Map<String, Value>, schema_path: &str) -> Result<Vec<JsonType>, SchemaError> {
    let names: Vec<&Value> = match map.get("type") {
        None => return Ok(Vec::new()),
        Some(Value::Array(names)) => names.iter().collect(),
        Some(name) => vec![name],
    };

    names
        .into_iter()
        .map(|name| {
            name.as_str()
                .and_then(JsonType::parse)
                .ok_or_else(|| {
                    SchemaError::invalid(
                        &format!("{schema_path}/type"),
                        format!("unknown type {name}"),
                    )
                })
        })
        .collect()
}

fn parse_composition(
    kind: CompositionKind,
    branches: &Value,
    map: &Map<String, Value>,
    types: Vec<JsonType>,
    schema_path: &str,
) -> Result<SchemaNode, SchemaError> {
    let keyword_path = format!("{schema_path}/{}", kind.keyword());
    let list = branches.as_array().ok_or_else(|| {
        SchemaError::invalid(&keyword_path, format!("{kind} must be an array of schemas"))
    })?;
    if list.is_empty() {
        return Err(SchemaError::invalid(
            &keyword_path,
            format!("{kind} must list at least one schema"),
        ));
    }

    let branches = list
        .iter()
        .enumerate()
        .map(|(i, branch)| parse_node(branch, &format!("{keyword_path}/{i}")))
        .collect::<Result<Vec<_>, _>>()?;

    let fragment = keyword_fragment(map, &["anyOf", "oneOf"]);
    let constraints = parse_constraints(map, types, fragment, schema_path)?;

    Ok(SchemaNode::Composition(CompositionSchema {
        kind,
        branches,
        constraints,
    }))
}

fn parse_object(
    map: &Map<String, Value>,
    types: Vec<JsonType>,
    schema_path: &str,
) -> Result<ObjectSchema, SchemaError> {
    let mut object = ObjectSchema {
        additional_properties: true,
        ..ObjectSchema::default()
    };

    match map.get("required") {
        None | Some(Value::Bool(_)) => {}
        Some(Value::Array(names)) => {
            for name in names {
                let name = name.as_str().ok_or_else(|| {
                    SchemaError::invalid(
                        &format!("{schema_path}/required"),
                        format!("required entries must be strings, found {name}"),
                    )
                })?;
                push_required(&mut object.required, name);
            }
        }
        Some(other) => {
            return Err(SchemaError::invalid(
                &format!("{schema_path}/required"),
                format!("expected an array of property names, found {other}"),
            ))
        }
    }

    let declared = match map.get("properties") {
        None => None,
        Some(Value::Object(declared)) => Some(declared),
        Some(_) => {
            return Err(SchemaError::invalid(
                &format!("{schema_path}/properties"),
                "properties must be an object",
            ))
        }
    };

    for (name, fragment) in declared.into_iter().flatten() {
        let prop_path = format!("{schema_path}/properties/{}", escape_pointer(name));
        let node = parse_node(fragment, &prop_path)?;
        let default = fragment.get("default").cloned();
        if let Some(Value::Bool(true)) = fragment.get("required") {
            push_required(&mut object.required, name);
        }
        object
            .properties
            .push((name.clone(), PropertySchema { node, default }));
    }

    let mut fragment = keyword_fragment(map, &["properties", "additionalProperties"]);

    // The walker closes the object itself for a plain `false`. A
    // schema-valued additionalProperties, or one that must honour
    // patternProperties, goes to the keyword compiler together with the
    // declared names so it only sees undeclared keys.
    match map.get("additionalProperties") {
        None | Some(Value::Bool(true)) => {}
        Some(Value::Bool(false)) if !map.contains_key("patternProperties") => {
            object.additional_properties = false;
        }
        Some(additional) => {
            let names: Map<String, Value> = declared
                .into_iter()
                .flatten()
                .map(|(name, _)| (name.clone(), Value::Object(Map::new())))
                .collect();
            fragment.insert("properties".to_string(), Value::Object(names));
            fragment.insert("additionalProperties".to_string(), additional.clone());
        }
    }

    object.constraints = parse_constraints(map, types, fragment, schema_path)?;
    Ok(object)
}

/// The validation keywords of `map` the walker does not handle itself.
fn keyword_fragment(map: &Map<String, Value>, handled: &[&str]) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| {
            let key = key.as_str();
            !matches!(key, "type" | "enum")
                && !ANNOTATION_KEYWORDS.contains(&key)
                && !handled.contains(&key)
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn parse_constraints(
    map: &Map<String, Value>,
    types: Vec<JsonType>,
    fragment: Map<String, Value>,
    schema_path: &str,
) -> Result<Constraints, SchemaError> {
    let enumeration = match map.get("enum") {
        None => None,
        Some(Value::Array(values)) => Some(values.clone()),
        Some(other) => {
            return Err(SchemaError::invalid(
                &format!("{schema_path}/enum"),
                format!("expected an array of values, found {other}"),
            ))
        }
    };

    let keywords = if fragment.is_empty() {
        None
    } else {
        Some(KeywordCheck::compile(Value::Object(fragment), schema_path)?)
    };

    Ok(Constraints {
        types,
        enumeration,
        keywords,
    })
}

/// Drop draft-3 `required: true|false` markers from nested fragments; the
/// draft-4 compiler only accepts the array form.
fn strip_boolean_required(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("required").is_some_and(Value::is_boolean) {
                map.remove("required");
            }
            map.values_mut().for_each(strip_boolean_required);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_boolean_required),
        _ => {}
    }
}

fn mentions_format(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.contains_key("format") || map.values().any(mentions_format),
        Value::Array(items) => items.iter().any(mentions_format),
        _ => false,
    }
}

fn push_required(required: &mut Vec<String>, name: &str) {
    if !required.iter().any(|r| r == name) {
        required.push(name.to_string());
    }
}

fn escape_pointer(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_object_with_defaults() {
        let node = SchemaNode::parse(&json!({
            "type": "object",
            "properties": {
                "with_default": {"type": "string", "default": "bar"},
                "null_default": {"type": "string", "default": null},
                "no_default": {"type": "string"}
            }
        }))
        .unwrap();

        let obj = node.as_object().expect("object node");
        assert_eq!(obj.declared_default("with_default"), Some(&json!("bar")));
        assert_eq!(obj.declared_default("null_default"), Some(&Value::Null));
        assert_eq!(obj.declared_default("no_default"), None);
        assert_eq!(obj.declared_default("undeclared"), None);
        assert!(obj.property("no_default").is_some());
        assert!(obj.property("undeclared").is_none());
    }

    #[test]
    fn test_required_array_and_boolean_forms_merge() {
        let node = SchemaNode::parse(&json!({
            "type": "object",
            "required": ["a", "a"],
            "properties": {
                "a": {"type": "string"},
                "b": {"type": "string", "required": true},
                "c": {"type": "string", "required": false}
            }
        }))
        .unwrap();
        let obj = node.as_object().unwrap();
        assert_eq!(obj.required(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_additional_properties_flag() {
        let closed = SchemaNode::parse(&json!({"type": "object", "additionalProperties": false}))
            .unwrap();
        assert!(!closed.as_object().unwrap().allows_additional_properties());

        let open = SchemaNode::parse(&json!({"type": "object", "properties": {}})).unwrap();
        assert!(open.as_object().unwrap().allows_additional_properties());

        let schema_valued =
            SchemaNode::parse(&json!({"type": "object", "additionalProperties": {"type": "string"}}))
                .unwrap();
        assert!(schema_valued.as_object().unwrap().allows_additional_properties());
    }

    #[test]
    fn test_parse_composition_kinds() {
        let any_of = SchemaNode::parse(&json!({
            "anyOf": [{"type": "string"}, {"type": "boolean"}]
        }))
        .unwrap();
        match any_of {
            SchemaNode::Composition(c) => {
                assert_eq!(c.kind, CompositionKind::AnyOf);
                assert_eq!(c.branches.len(), 2);
            }
            other => panic!("expected composition, got {other:?}"),
        }

        let one_of = SchemaNode::parse(&json!({
            "oneOf": [{"type": "string"}, {"type": "boolean"}, {"type": "null"}]
        }))
        .unwrap();
        assert!(matches!(
            one_of,
            SchemaNode::Composition(CompositionSchema { kind: CompositionKind::OneOf, .. })
        ));
    }

    #[test]
    fn test_reject_both_composition_keywords() {
        let err = SchemaNode::parse(&json!({
            "anyOf": [{"type": "string"}],
            "oneOf": [{"type": "string"}]
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSchema { .. }));
    }

    #[test]
    fn test_reject_empty_composition() {
        let err = SchemaNode::parse(&json!({"properties": {"x": {"oneOf": []}}})).unwrap_err();
        match err {
            SchemaError::InvalidSchema { schema_path, .. } => {
                assert_eq!(schema_path, "/properties/x/oneOf");
            }
            other => panic!("expected InvalidSchema, got {other}"),
        }
    }

    #[test]
    fn test_reject_unknown_type_with_path() {
        let err = SchemaNode::parse(&json!({
            "properties": {"x": {"type": "strnig"}}
        }))
        .unwrap_err();
        match err {
            SchemaError::InvalidSchema { schema_path, reason } => {
                assert_eq!(schema_path, "/properties/x/type");
                assert!(reason.contains("strnig"));
            }
            other => panic!("expected InvalidSchema, got {other}"),
        }
    }

    #[test]
    fn test_reject_non_object_fragment() {
        let err = SchemaNode::parse(&json!({"properties": {"x": 42}})).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSchema { .. }));
    }

    #[test]
    fn test_leaf_keyword_check_detection() {
        let plain = SchemaNode::parse(&json!({
            "type": "string",
            "description": "Foo",
            "default": "x",
            "required": true
        }))
        .unwrap();
        match plain {
            SchemaNode::Leaf(leaf) => assert!(leaf.constraints.keywords.is_none()),
            other => panic!("expected leaf, got {other:?}"),
        }

        let constrained =
            SchemaNode::parse(&json!({"type": "string", "minLength": 2})).unwrap();
        match constrained {
            SchemaNode::Leaf(leaf) => {
                let check = leaf.constraints.keywords.expect("keyword check");
                assert_eq!(check.fragment, json!({"minLength": 2}));
                assert!(check.with_formats.is_none());
            }
            other => panic!("expected leaf, got {other:?}"),
        }
    }

    #[test]
    fn test_leaf_type_set_and_null_acceptance() {
        let node = SchemaNode::parse(&json!({"type": ["string", "null"]})).unwrap();
        match node {
            SchemaNode::Leaf(leaf) => {
                assert_eq!(leaf.constraints.types, vec![JsonType::String, JsonType::Null]);
            }
            other => panic!("expected leaf, got {other:?}"),
        }
    }

    #[test]
    fn test_array_items_parsed() {
        let node = SchemaNode::parse(&json!({
            "type": "array",
            "items": {"type": "object", "properties": {"k": {"default": 1}}}
        }))
        .unwrap();
        match node {
            SchemaNode::Array(ArraySchema { items, .. }) => {
                let obj = items.as_object().expect("object items");
                assert_eq!(obj.declared_default("k"), Some(&json!(1)));
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_object_and_array_types_are_leaves() {
        for schema in [json!({"type": "object"}), json!({"type": "array"})] {
            assert!(matches!(SchemaNode::parse(&schema).unwrap(), SchemaNode::Leaf(_)));
        }
        let closed = SchemaNode::parse(&json!({"type": "object", "required": ["a"]})).unwrap();
        assert_eq!(closed.as_object().unwrap().required(), ["a".to_string()]);
    }

    #[test]
    fn test_integer_type_matching() {
        assert!(JsonType::Integer.matches(&json!(3)));
        assert!(JsonType::Integer.matches(&json!(3.0)));
        assert!(!JsonType::Integer.matches(&json!(3.5)));
        assert!(JsonType::Number.matches(&json!(3.5)));
        assert!(!JsonType::Number.matches(&json!("3")));
    }

    #[test]
    fn test_structural_nodes_keep_declared_types() {
        let object = SchemaNode::parse(&json!({
            "type": ["object", "null"],
            "properties": {"a": {"type": "string"}}
        }))
        .unwrap();
        assert_eq!(
            object.as_object().unwrap().constraints().types,
            vec![JsonType::Object, JsonType::Null]
        );

        let array = SchemaNode::parse(&json!({
            "type": ["array", "null"],
            "items": {"type": "string"}
        }))
        .unwrap();
        match array {
            SchemaNode::Array(arr) => {
                assert_eq!(arr.constraints.types, vec![JsonType::Array, JsonType::Null]);
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_sibling_keywords_kept_on_structural_nodes() {
        let array = SchemaNode::parse(&json!({
            "type": "array",
            "minItems": 1,
            "items": {"type": "string"}
        }))
        .unwrap();
        match array {
            SchemaNode::Array(arr) => {
                let check = arr.constraints.keywords.expect("keyword check");
                assert_eq!(check.fragment, json!({"minItems": 1}));
            }
            other => panic!("expected array, got {other:?}"),
        }

        let composition = SchemaNode::parse(&json!({
            "type": "string",
            "enum": ["a", "b"],
            "anyOf": [{"minLength": 1}, {"enum": [5]}]
        }))
        .unwrap();
        match composition {
            SchemaNode::Composition(comp) => {
                assert_eq!(comp.constraints.types, vec![JsonType::String]);
                assert_eq!(comp.constraints.enumeration, Some(vec![json!("a"), json!("b")]));
                assert!(comp.constraints.keywords.is_none());
            }
            other => panic!("expected composition, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_keyword_is_schema_error() {
        let err = SchemaNode::parse(&json!({
            "properties": {"name": {"type": "string", "pattern": "(["}}
        }))
        .unwrap_err();
        match err {
            SchemaError::InvalidSchema { schema_path, .. } => {
                assert_eq!(schema_path, "/properties/name");
            }
            other => panic!("expected InvalidSchema, got {other}"),
        }

        let in_branch = SchemaNode::parse(&json!({
            "anyOf": [{"pattern": "(["}, {"type": "integer"}]
        }))
        .unwrap_err();
        assert!(matches!(in_branch, SchemaError::InvalidSchema { .. }));
    }

    #[test]
    fn test_format_compiles_strict_variant() {
        let node = SchemaNode::parse(&json!({"type": "string", "format": "ipv4"})).unwrap();
        match node {
            SchemaNode::Leaf(leaf) => {
                let check = leaf.constraints.keywords.as_ref().expect("keyword check");
                assert!(check.with_formats.is_some());
                assert!(leaf.constraints.keyword_validator(true).is_some());
            }
            other => panic!("expected leaf, got {other:?}"),
        }
    }

    #[test]
    fn test_schema_valued_additional_properties_delegated() {
        let node = SchemaNode::parse(&json!({
            "type": "object",
            "properties": {"known": {"type": "string", "required": true}},
            "additionalProperties": {"type": "integer"}
        }))
        .unwrap();
        let obj = node.as_object().unwrap();
        assert!(obj.allows_additional_properties());
        let check = obj.constraints.keywords.as_ref().expect("keyword check");
        assert_eq!(
            check.fragment,
            json!({"properties": {"known": {}}, "additionalProperties": {"type": "integer"}})
        );
    }
}
