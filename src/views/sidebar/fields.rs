//! Field lines of an expanded block.

use serde_json::Value;

use crate::models::{Block, BlockTypeDefinition, FieldDescriptor, FieldKind};

use super::label::{extract_plain_text, looks_like_markup};

/// One definition field as the sidebar shows it. Repeaters become a slot whose children the
/// sidebar lays out between the slot header and its add line.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldLine {
    Scalar {
        field: String,
        label: String,
        value: String,
        kind: FieldKind,
    },
    Slot {
        field: String,
        label: String,
        allowed: Vec<String>,
    },
}

pub fn field_lines(definition: &BlockTypeDefinition, block: &Block) -> Vec<FieldLine> {
    definition
        .fields
        .iter()
        .map(|field| match field.kind {
            FieldKind::Repeater => FieldLine::Slot {
                field: field.name.clone(),
                label: field.display_label().to_string(),
                allowed: field.allowed.clone(),
            },
            kind => FieldLine::Scalar {
                field: field.name.clone(),
                label: field.display_label().to_string(),
                value: display_value(field, block.field(&field.name)),
                kind,
            },
        })
        .collect()
}

/// Single-line rendering of a field value.
pub fn display_value(field: &FieldDescriptor, value: Option<&Value>) -> String {
    match (field.kind, value) {
        (FieldKind::Checkbox, value) => {
            if value.is_some_and(is_truthy) {
                "[x]".to_string()
            } else {
                "[ ]".to_string()
            }
        }
        (_, None | Some(Value::Null)) => String::new(),
        (FieldKind::Html, Some(Value::String(s))) if looks_like_markup(s) => extract_plain_text(s),
        (_, Some(Value::String(s))) => s.split_whitespace().collect::<Vec<_>>().join(" "),
        (_, Some(other)) => other.to_string(),
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/sidebar/fields.rs"]
mod tests;
