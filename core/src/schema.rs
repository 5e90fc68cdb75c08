//! # Schema Descriptions
//!
//! A dialect-independent, structural description of a schema: its kind, required
//! fields and nested shape. Built from an already expanded JSON Schema value and
//! deliberately unaware of the index, so other description formats can produce it too.
//!
//! No validation semantics are attached.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The JSON kind a schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// A JSON object.
    Object,
    /// A JSON array.
    Array,
    /// A JSON string.
    String,
    /// A whole number.
    Integer,
    /// Any number.
    Number,
    /// true / false.
    Boolean,
    /// Unconstrained, or not expressible in this description.
    Any,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::String => "string",
            SchemaKind::Integer => "integer",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Any => "any",
        };
        f.write_str(name)
    }
}

/// Structural description of one schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaDescription {
    /// The described kind.
    pub kind: SchemaKind,
    /// Format hint (`int64`, `date-time`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Human readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Required property names, sorted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Object properties in declaration order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaDescription>,
    /// Element description for arrays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaDescription>>,
    /// `x-nullable` was set.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    /// Name of a definition left unexpanded because it is recursive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl SchemaDescription {
    fn of_kind(kind: SchemaKind) -> Self {
        Self {
            kind,
            format: None,
            description: None,
            required: Vec::new(),
            properties: IndexMap::new(),
            items: None,
            nullable: false,
            reference: None,
        }
    }

    /// Whether `name` is a required property.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// Describes an expanded schema value.
pub fn describe_schema(schema: &Value) -> SchemaDescription {
    let Some(map) = schema.as_object() else {
        return SchemaDescription::of_kind(SchemaKind::Any);
    };

    if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
        let mut out = SchemaDescription::of_kind(SchemaKind::Any);
        out.reference = reference.rsplit('/').next().map(String::from);
        return out;
    }

    let mut out = SchemaDescription::of_kind(infer_kind(map));
    out.format = str_field(map, "format");
    out.description = str_field(map, "description");
    out.nullable = map
        .get("x-nullable")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if let Some(parts) = map.get("allOf").and_then(Value::as_array) {
        for part in parts {
            let part = describe_schema(part);
            out.required.extend(part.required);
            out.properties.extend(part.properties);
        }
    }

    collect_object_fields(map, &mut out);

    if let Some(items) = map.get("items") {
        out.items = Some(Box::new(describe_schema(items)));
    }

    out.required.sort();
    out.required.dedup();
    out
}

fn collect_object_fields(map: &serde_json::Map<String, Value>, out: &mut SchemaDescription) {
    if let Some(required) = map.get("required").and_then(Value::as_array) {
        out.required
            .extend(required.iter().filter_map(Value::as_str).map(String::from));
    }
    if let Some(properties) = map.get("properties").and_then(Value::as_object) {
        for (name, prop) in properties {
            out.properties.insert(name.clone(), describe_schema(prop));
        }
    }
}

fn infer_kind(map: &serde_json::Map<String, Value>) -> SchemaKind {
    match map.get("type").and_then(Value::as_str) {
        Some("object") => SchemaKind::Object,
        Some("array") => SchemaKind::Array,
        Some("string") | Some("file") => SchemaKind::String,
        Some("integer") => SchemaKind::Integer,
        Some("number") => SchemaKind::Number,
        Some("boolean") => SchemaKind::Boolean,
        Some(_) => SchemaKind::Any,
        None if map.contains_key("properties") || map.contains_key("allOf") => {
            SchemaKind::Object
        }
        None if map.contains_key("items") => SchemaKind::Array,
        None => SchemaKind::Any,
    }
}

fn str_field(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_object() {
        let schema = json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": { "type": "string" },
                "id": { "type": "integer", "format": "int64", "x-nullable": true }
            }
        });
        let desc = describe_schema(&schema);
        assert_eq!(desc.kind, SchemaKind::Object);
        assert_eq!(desc.required, vec!["name"]);
        let names: Vec<&String> = desc.properties.keys().collect();
        assert_eq!(names, vec!["name", "id"]);
        assert_eq!(desc.properties["id"].format.as_deref(), Some("int64"));
        assert!(desc.properties["id"].nullable);
        assert!(desc.is_required("name"));
        assert!(!desc.is_required("id"));
    }

    #[test]
    fn test_all_of_merges_parts() {
        let schema = json!({
            "allOf": [
                { "required": ["name"], "properties": { "name": { "type": "string" } } },
                { "required": ["id", "name"], "properties": { "id": { "type": "integer" } } }
            ]
        });
        let desc = describe_schema(&schema);
        assert_eq!(desc.kind, SchemaKind::Object);
        assert_eq!(desc.required, vec!["id", "name"]);
        assert_eq!(desc.properties.len(), 2);
    }

    #[test]
    fn test_array_items() {
        let desc = describe_schema(&json!({ "type": "array", "items": { "type": "string" } }));
        assert_eq!(desc.kind, SchemaKind::Array);
        assert_eq!(desc.items.unwrap().kind, SchemaKind::String);
    }

    #[test]
    fn test_unexpanded_ref_keeps_name() {
        let desc = describe_schema(&json!({ "$ref": "#/definitions/Node" }));
        assert_eq!(desc.kind, SchemaKind::Any);
        assert_eq!(desc.reference.as_deref(), Some("Node"));
    }

    #[test]
    fn test_serializes_compactly() {
        let desc = describe_schema(&json!({ "type": "boolean" }));
        assert_eq!(serde_json::to_value(&desc).unwrap(), json!({ "kind": "boolean" }));
    }
}
