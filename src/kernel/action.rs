use compact_str::CompactString;
use serde_json::Value;
use std::path::PathBuf;

use crate::core::Command;
use crate::models::{BlockId, BlockNode, BlockPath, SlotRef};

#[derive(Debug, Clone)]
pub enum Action {
    RunCommand(Command),
    DocumentLoaded {
        path: PathBuf,
        blocks: Vec<BlockNode>,
    },
    DocumentLoadFailed {
        path: PathBuf,
        error: String,
    },
    DocumentSaved {
        path: PathBuf,
        success: bool,
    },
    RequestFocus {
        path: BlockPath,
    },
    ClearFocus,
    RemoveBlock {
        id: BlockId,
    },
    DuplicateBlock {
        id: BlockId,
    },
    InsertBlock {
        at: SlotRef,
        index: Option<usize>,
        kind: CompactString,
    },
    MoveBlock {
        id: BlockId,
        before: BlockId,
    },
    SetField {
        id: BlockId,
        field: String,
        value: Value,
    },
}
