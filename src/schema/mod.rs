// Schema inference module for API response data
// Author: Gabriel Demetrios Lafis

mod columns;
mod detect;

pub use columns::*;
pub use detect::*;

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

/// JSON value categories as a dynamic runtime would see them.
///
/// Integers and floats are a single `Number` kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a JSON value
    pub fn of(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => ValueKind::Null,
            JsonValue::Bool(_) => ValueKind::Boolean,
            JsonValue::Number(_) => ValueKind::Number,
            JsonValue::String(_) => ValueKind::String,
            JsonValue::Array(_) => ValueKind::Array,
            JsonValue::Object(_) => ValueKind::Object,
        }
    }

    /// Get the kind name as used in schema output
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

/// Per-field statistics gathered from an array sample
#[derive(Debug, Clone, Serialize)]
pub struct FieldInfo {
    pub data_type: ValueKind,
    /// Fraction of sampled items carrying this field, in [0, 1]
    pub frequency: f64,
    /// Up to three non-null example values
    pub examples: Vec<JsonValue>,
    /// Whether the field appears in at least 80% of the sample
    pub is_common: bool,
}

/// Structure inferred from an array of records
#[derive(Debug, Clone, Serialize)]
pub struct ArraySchema {
    pub item_count: usize,
    pub sample_size: usize,
    pub fields: HashMap<String, FieldInfo>,
    pub common_field_count: usize,
}

impl ArraySchema {
    /// Whether the source array had no items
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

/// A single field of a plain object
#[derive(Debug, Clone, Serialize)]
pub struct ObjectField {
    pub data_type: ValueKind,
    pub example: JsonValue,
    pub is_nested: bool,
}

/// Structure inferred from a plain object
#[derive(Debug, Clone, Serialize)]
pub struct ObjectSchema {
    pub fields: HashMap<String, ObjectField>,
    pub field_count: usize,
}

/// Best-effort structural description of a decoded JSON payload.
///
/// Used purely for display purposes; this is not a validating schema.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaInfo {
    Null,
    Array(ArraySchema),
    Object(ObjectSchema),
    String { value: JsonValue },
    Number { value: JsonValue },
    Boolean { value: JsonValue },
}

impl SchemaInfo {
    /// The kind of the described value
    pub fn kind(&self) -> ValueKind {
        match self {
            SchemaInfo::Null => ValueKind::Null,
            SchemaInfo::Array(_) => ValueKind::Array,
            SchemaInfo::Object(_) => ValueKind::Object,
            SchemaInfo::String { .. } => ValueKind::String,
            SchemaInfo::Number { .. } => ValueKind::Number,
            SchemaInfo::Boolean { .. } => ValueKind::Boolean,
        }
    }

    /// The type tag used in result metadata
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }
}
