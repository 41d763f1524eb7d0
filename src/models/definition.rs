//! 块类型定义：标题、标签字段与字段描述

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Html,
    Number,
    Checkbox,
    Repeater,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Block types that may be inserted into a repeater slot.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
            allowed: Vec::new(),
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Value a freshly inserted block gets for this field. Repeaters have no scalar value.
    pub fn default_value(&self) -> Option<Value> {
        match self.kind {
            FieldKind::Text | FieldKind::Textarea | FieldKind::Html | FieldKind::Other => {
                Some(Value::String(String::new()))
            }
            FieldKind::Number => Some(Value::from(0)),
            FieldKind::Checkbox => Some(Value::Bool(false)),
            FieldKind::Repeater => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTypeDefinition {
    pub title: String,
    /// Field whose value is shown as the block's preview label.
    #[serde(rename = "label", default, skip_serializing_if = "Option::is_none")]
    pub label_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug)]
pub enum DefinitionsError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for DefinitionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionsError::Io(e) => write!(f, "cannot read definitions: {e}"),
            DefinitionsError::Json(e) => write!(f, "invalid definitions: {e}"),
        }
    }
}

impl std::error::Error for DefinitionsError {}

impl From<std::io::Error> for DefinitionsError {
    fn from(e: std::io::Error) -> Self {
        DefinitionsError::Io(e)
    }
}

impl From<serde_json::Error> for DefinitionsError {
    fn from(e: serde_json::Error) -> Self {
        DefinitionsError::Json(e)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionRegistry {
    defs: BTreeMap<CompactString, BlockTypeDefinition>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, DefinitionsError> {
        let defs: BTreeMap<CompactString, BlockTypeDefinition> = serde_json::from_str(json)?;
        Ok(Self { defs })
    }

    pub fn load(path: &Path) -> Result<Self, DefinitionsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn insert(&mut self, kind: impl Into<CompactString>, def: BlockTypeDefinition) {
        self.defs.insert(kind.into(), def);
    }

    pub fn resolve(&self, kind: &str) -> Option<&BlockTypeDefinition> {
        self.defs.get(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.defs.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Registry used when no definitions file is configured.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(
            "hero",
            BlockTypeDefinition {
                title: "Hero".to_string(),
                label_field: Some("title".to_string()),
                fields: vec![
                    FieldDescriptor::new("title", FieldKind::Text),
                    FieldDescriptor::new("subtitle", FieldKind::Html),
                    FieldDescriptor::new("dark", FieldKind::Checkbox),
                ],
            },
        );
        registry.insert(
            "text",
            BlockTypeDefinition {
                title: "Text".to_string(),
                label_field: Some("content".to_string()),
                fields: vec![FieldDescriptor::new("content", FieldKind::Html)],
            },
        );
        registry.insert(
            "list",
            BlockTypeDefinition {
                title: "List".to_string(),
                label_field: Some("heading".to_string()),
                fields: vec![
                    FieldDescriptor::new("heading", FieldKind::Text),
                    FieldDescriptor {
                        allowed: vec!["item".to_string()],
                        ..FieldDescriptor::new("items", FieldKind::Repeater)
                    },
                ],
            },
        );
        registry.insert(
            "item",
            BlockTypeDefinition {
                title: "Item".to_string(),
                label_field: Some("label".to_string()),
                fields: vec![
                    FieldDescriptor::new("label", FieldKind::Text),
                    FieldDescriptor::new("weight", FieldKind::Number),
                ],
            },
        );
        registry
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/definition.rs"]
mod tests;
