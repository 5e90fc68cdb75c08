#![deny(missing_docs)]

//! # Swagger Shims
//!
//! Generic structures acting as an Intermediate Deserialization Layer.
//! These structs map directly to Swagger 2.0 YAML objects after `$ref` expansion,
//! so none of them model reference objects.

use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// HTTP methods a Swagger 2.0 Path Item may declare, in declaration-table order.
pub const PATH_ITEM_METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// Schema for the root document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimSwagger {
    /// Metadata about the API.
    pub info: Option<ShimInfo>,

    /// Host (name or IP) serving the API, optionally with a port.
    pub host: Option<String>,

    /// Base path prefixed to every path template.
    #[serde(rename = "basePath")]
    pub base_path: Option<String>,

    /// Transfer protocols of the API.
    #[serde(default)]
    pub schemes: Vec<String>,

    /// Document-wide request media types.
    #[serde(default)]
    pub consumes: Vec<String>,

    /// Path templates and their operations.
    #[serde(default)]
    pub paths: ShimPaths,

    /// Named schema definitions.
    #[serde(default)]
    pub definitions: IndexMap<String, Value>,
}

/// The Info Object (only the fields the tooling surfaces).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimInfo {
    /// API title.
    #[serde(default)]
    pub title: String,
}

/// Represents the Paths Object, skipping specification extensions.
#[derive(Debug, Clone, Default)]
pub struct ShimPaths {
    /// Parsed path items keyed by path template, in declaration order.
    pub items: IndexMap<String, ShimPathItem>,
}

impl<'de> Deserialize<'de> for ShimPaths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut items = IndexMap::new();

        for (key, value) in raw {
            if key.starts_with("x-") {
                continue;
            }
            let path_item = serde_json::from_value::<ShimPathItem>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse path item '{}': {}", key, e))
            })?;
            items.insert(key, path_item);
        }

        Ok(Self { items })
    }
}

/// A Path Item: the operations available on a single path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimPathItem {
    /// GET operation.
    pub get: Option<ShimOperation>,
    /// PUT operation.
    pub put: Option<ShimOperation>,
    /// POST operation.
    pub post: Option<ShimOperation>,
    /// DELETE operation.
    pub delete: Option<ShimOperation>,
    /// OPTIONS operation.
    pub options: Option<ShimOperation>,
    /// HEAD operation.
    pub head: Option<ShimOperation>,
    /// PATCH operation.
    pub patch: Option<ShimOperation>,
    /// Parameters shared by every operation on this path.
    #[serde(default)]
    pub parameters: Vec<ShimParameter>,
}

impl ShimPathItem {
    /// Declared operations paired with their lowercase method name.
    pub fn operations(&self) -> Vec<(&'static str, &ShimOperation)> {
        let slots = [
            &self.get,
            &self.put,
            &self.post,
            &self.delete,
            &self.options,
            &self.head,
            &self.patch,
        ];
        PATH_ITEM_METHODS
            .iter()
            .zip(slots)
            .filter_map(|(method, op)| op.as_ref().map(|op| (*method, op)))
            .collect()
    }
}

/// An Operation Object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimOperation {
    /// Declared unique identifier.
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Request media types overriding the document-wide list.
    pub consumes: Option<Vec<String>>,
    /// Operation-level parameters.
    #[serde(default)]
    pub parameters: Vec<ShimParameter>,
    /// Documented responses.
    #[serde(default)]
    pub responses: ShimResponses,
}

/// A Parameter Object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShimParameter {
    /// Parameter name.
    pub name: String,
    /// Location: `path`, `query`, `header`, `body` or `formData`.
    #[serde(rename = "in")]
    pub location: String,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Body schema (only for `in: body`).
    pub schema: Option<Value>,
    /// Vendor example value.
    #[serde(rename = "x-example")]
    pub example: Option<Value>,
}

/// The Responses Object split into the default response and explicit keys.
#[derive(Debug, Clone, Default)]
pub struct ShimResponses {
    /// The `default` response.
    pub default: Option<ShimResponse>,
    /// Every other non-extension key, unparsed, in declaration order.
    pub codes: IndexMap<String, ShimResponse>,
}

impl<'de> Deserialize<'de> for ShimResponses {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut out = ShimResponses::default();

        for (key, value) in raw {
            if key.starts_with("x-") {
                continue;
            }
            let response = serde_json::from_value::<ShimResponse>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse response '{}': {}", key, e))
            })?;
            if key == "default" {
                out.default = Some(response);
            } else {
                out.codes.insert(key, response);
            }
        }

        Ok(out)
    }
}

/// A Response Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShimResponse {
    /// Required description.
    #[serde(default)]
    pub description: String,
    /// Body schema.
    pub schema: Option<Value>,
    /// Documented response headers.
    #[serde(default)]
    pub headers: IndexMap<String, Value>,
}
