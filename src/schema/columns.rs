// Table column projection from inferred schemas
// Author: Gabriel Demetrios Lafis

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::{FieldInfo, SchemaInfo, ValueKind};

/// Maximum number of columns produced for display
pub const MAX_COLUMNS: usize = 10;

/// A UI-ready table column derived from an array schema
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSpec {
    pub key: String,
    pub title: String,
    pub data_type: ValueKind,
    pub sortable: bool,
    pub filterable: bool,
    pub examples: Vec<JsonValue>,
    pub frequency: f64,
}

/// Project an array schema into an ordered list of display columns.
///
/// Returns an empty list for non-array schemas. Common fields sort before
/// uncommon ones, then simple types before containers; ties break by key
/// so the output is deterministic. The list is capped at ten columns.
pub fn generate_table_columns(schema: &SchemaInfo) -> Vec<ColumnSpec> {
    let fields = match schema {
        SchemaInfo::Array(array) if !array.fields.is_empty() => &array.fields,
        _ => return Vec::new(),
    };

    let mut sorted: Vec<(&String, &FieldInfo)> = fields.iter().collect();
    sorted.sort_by(|(key_a, a), (key_b, b)| {
        b.is_common
            .cmp(&a.is_common)
            .then_with(|| type_priority(a.data_type).cmp(&type_priority(b.data_type)))
            .then_with(|| key_a.cmp(key_b))
    });

    sorted
        .into_iter()
        .take(MAX_COLUMNS)
        .map(|(key, info)| ColumnSpec {
            key: key.clone(),
            title: humanize_title(key),
            data_type: info.data_type,
            sortable: matches!(
                info.data_type,
                ValueKind::String | ValueKind::Number | ValueKind::Boolean
            ),
            filterable: matches!(info.data_type, ValueKind::String | ValueKind::Number),
            examples: info.examples.clone(),
            frequency: info.frequency,
        })
        .collect()
}

/// Display ordering for column types: simple scalars before containers
fn type_priority(kind: ValueKind) -> u8 {
    match kind {
        ValueKind::String => 0,
        ValueKind::Number => 1,
        ValueKind::Boolean => 2,
        ValueKind::Object => 3,
        ValueKind::Array => 4,
        ValueKind::Null => 5,
    }
}

/// Capitalize the first letter and insert a space before interior capitals
fn humanize_title(key: &str) -> String {
    let mut title = String::with_capacity(key.len() + 4);

    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            title.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            title.push(' ');
            title.push(ch);
        } else {
            title.push(ch);
        }
    }

    title
}
