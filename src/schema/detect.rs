// Schema auto-detection for arbitrary JSON payloads
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;

use serde_json::Value as JsonValue;

use super::{ArraySchema, FieldInfo, ObjectField, ObjectSchema, SchemaInfo, ValueKind};

/// Number of leading array items inspected when inferring structure
pub const SCHEMA_SAMPLE_SIZE: usize = 5;

/// Maximum example values retained per field
const MAX_EXAMPLES: usize = 3;

/// Fraction of the sample a field must appear in to count as common
const COMMON_FREQUENCY: f64 = 0.8;

/// Infer a display schema from a decoded JSON payload
pub fn detect_api_schema(data: &JsonValue) -> SchemaInfo {
    match data {
        JsonValue::Null => SchemaInfo::Null,
        JsonValue::Array(items) => detect_array_schema(items),
        JsonValue::Object(object) => detect_object_schema(object),
        JsonValue::String(_) => SchemaInfo::String { value: data.clone() },
        JsonValue::Number(_) => SchemaInfo::Number { value: data.clone() },
        JsonValue::Bool(_) => SchemaInfo::Boolean { value: data.clone() },
    }
}

fn detect_array_schema(items: &[JsonValue]) -> SchemaInfo {
    if items.is_empty() {
        return SchemaInfo::Array(ArraySchema {
            item_count: 0,
            sample_size: 0,
            fields: HashMap::new(),
            common_field_count: 0,
        });
    }

    let sample_size = items.len().min(SCHEMA_SAMPLE_SIZE);

    // Field name -> (first seen kind, occurrence count, example values)
    let mut tallies: HashMap<String, (ValueKind, usize, Vec<JsonValue>)> = HashMap::new();

    for item in items.iter().take(sample_size) {
        // Only object elements contribute to the field tally
        let object = match item {
            JsonValue::Object(object) => object,
            _ => continue,
        };

        for (key, value) in object {
            let entry = tallies
                .entry(key.clone())
                .or_insert_with(|| (ValueKind::of(value), 0, Vec::new()));
            entry.1 += 1;

            if entry.2.len() < MAX_EXAMPLES && !value.is_null() {
                entry.2.push(value.clone());
            }
        }
    }

    let mut fields = HashMap::new();

    for (key, (kind, count, examples)) in tallies {
        let frequency = count as f64 / sample_size as f64;

        fields.insert(
            key,
            FieldInfo {
                data_type: kind,
                frequency,
                examples,
                is_common: frequency >= COMMON_FREQUENCY,
            },
        );
    }

    let common_field_count = fields.len();

    SchemaInfo::Array(ArraySchema {
        item_count: items.len(),
        sample_size,
        fields,
        common_field_count,
    })
}

fn detect_object_schema(object: &serde_json::Map<String, JsonValue>) -> SchemaInfo {
    let mut fields = HashMap::new();

    for (key, value) in object {
        let kind = ValueKind::of(value);

        fields.insert(
            key.clone(),
            ObjectField {
                data_type: kind,
                example: value.clone(),
                is_nested: kind == ValueKind::Object,
            },
        );
    }

    let field_count = fields.len();

    SchemaInfo::Object(ObjectSchema { fields, field_count })
}
