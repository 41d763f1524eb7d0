//! Page document codec.
//!
//! A document is `{ "blocks": [ ... ] }`. Each block object carries `_id`, `_name` and its
//! fields; an array whose items are all block objects is a child slot.

use compact_str::CompactString;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::block::{Block, BlockId};
use super::block_tree::BlockNode;

const ID_KEY: &str = "_id";
const NAME_KEY: &str = "_name";
const BLOCKS_KEY: &str = "blocks";

#[derive(Debug)]
pub enum DocumentError {
    Json(serde_json::Error),
    NotAnObject,
    MissingName { index: usize },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Json(e) => write!(f, "invalid document json: {e}"),
            DocumentError::NotAnObject => write!(f, "document blocks must be objects"),
            DocumentError::MissingName { index } => {
                write!(f, "block #{index} has no string `_name`")
            }
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        DocumentError::Json(e)
    }
}

pub fn parse_document(json: &str) -> Result<Vec<BlockNode>, DocumentError> {
    let value: Value = serde_json::from_str(json)?;
    let blocks = match value {
        Value::Object(mut map) => map.remove(BLOCKS_KEY).unwrap_or(Value::Array(Vec::new())),
        // A bare array is accepted as the block list.
        array @ Value::Array(_) => array,
        _ => return Err(DocumentError::NotAnObject),
    };
    let Value::Array(items) = blocks else {
        return Err(DocumentError::NotAnObject);
    };

    let mut counter = 0usize;
    items
        .into_iter()
        .map(|item| parse_block(item, &mut counter))
        .collect()
}

pub fn serialize_document(nodes: &[BlockNode]) -> Result<String, DocumentError> {
    let blocks: Vec<Value> = nodes.iter().map(block_to_value).collect();
    let mut root = Map::new();
    root.insert(BLOCKS_KEY.to_string(), Value::Array(blocks));
    Ok(serde_json::to_string_pretty(&Value::Object(root))?)
}

fn parse_block(value: Value, counter: &mut usize) -> Result<BlockNode, DocumentError> {
    let index = *counter;
    *counter += 1;

    let Value::Object(mut map) = value else {
        return Err(DocumentError::NotAnObject);
    };
    let kind = match map.remove(NAME_KEY) {
        Some(Value::String(name)) => CompactString::from(name),
        _ => return Err(DocumentError::MissingName { index }),
    };
    // Missing or non-string ids are regenerated by the tree on insert.
    let id = match map.remove(ID_KEY) {
        Some(Value::String(id)) => BlockId::new(id),
        _ => BlockId::new(""),
    };

    let mut data = Map::new();
    let mut slots = BTreeMap::new();
    for (key, value) in map {
        if is_block_list(&value) {
            let Value::Array(items) = value else {
                continue;
            };
            let children = items
                .into_iter()
                .map(|item| parse_block(item, counter))
                .collect::<Result<Vec<_>, _>>()?;
            slots.insert(CompactString::from(key), children);
        } else {
            data.insert(key, value);
        }
    }

    Ok(BlockNode {
        block: Block { id, kind, data },
        slots,
    })
}

fn is_block_list(value: &Value) -> bool {
    let Value::Array(items) = value else {
        return false;
    };
    !items.is_empty()
        && items
            .iter()
            .all(|item| matches!(item.get(NAME_KEY), Some(Value::String(_))))
}

fn block_to_value(node: &BlockNode) -> Value {
    let mut map = Map::new();
    map.insert(ID_KEY.to_string(), Value::String(node.block.id.to_string()));
    map.insert(
        NAME_KEY.to_string(),
        Value::String(node.block.kind.to_string()),
    );
    for (key, value) in &node.block.data {
        map.insert(key.clone(), value.clone());
    }
    for (slot, children) in &node.slots {
        map.insert(
            slot.to_string(),
            Value::Array(children.iter().map(block_to_value).collect()),
        );
    }
    Value::Object(map)
}

#[cfg(test)]
#[path = "../../tests/unit/models/document.rs"]
mod tests;
