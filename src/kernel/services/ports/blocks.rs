//! Block store contracts: one read side and the command sides the sidebar issues.
//!
//! Rows never see the store itself, only these traits, so tests can swap in fakes.

use serde_json::Value;

use crate::models::{Block, BlockId, BlockPath, BlockTypeDefinition, SlotRef};

pub trait BlockQueries {
    /// True when the global focus target is `id` or lies inside its subtree.
    fn is_focused(&self, id: &BlockId) -> bool;
    fn resolve_definition(&self, kind: &str) -> Option<&BlockTypeDefinition>;
}

pub trait BlockCommands {
    fn request_focus(&mut self, path: &BlockPath);
    fn remove_block(&mut self, block: &Block);
    fn duplicate_block(&mut self, block: &Block);
}

/// Commands issued by the field renderer.
pub trait FieldCommands {
    fn set_field(&mut self, id: &BlockId, field: &str, value: Value);
    fn insert_block(&mut self, at: SlotRef, kind: &str);
}

/// Persistence side of the reorder container.
pub trait ReorderCommands {
    fn move_block(&mut self, id: &BlockId, before: &BlockId);
}
