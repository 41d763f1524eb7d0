use std::path::PathBuf;

use crate::models::{BlockId, BlockTree, DefinitionRegistry, SlotRef};

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub should_quit: bool,
    /// One-line message for the status bar.
    pub status: Option<String>,
}

#[derive(Debug)]
pub struct AppState {
    pub document_path: PathBuf,
    pub tree: BlockTree,
    pub definitions: DefinitionRegistry,
    /// The single globally focused block, if any.
    pub focus: Option<BlockId>,
    pub dirty: bool,
    pub loaded: bool,
    pub ui: UiState,
}

impl AppState {
    pub fn new(document_path: PathBuf, definitions: DefinitionRegistry) -> Self {
        Self {
            document_path,
            tree: BlockTree::new(),
            definitions,
            focus: None,
            dirty: false,
            loaded: false,
            ui: UiState::default(),
        }
    }

    /// Whether a block of `kind` may live in `at`. The root takes anything; a repeater slot
    /// with a non-empty `allowed` list takes only the kinds it names.
    pub fn slot_accepts(&self, at: &SlotRef, kind: &str) -> bool {
        let SlotRef::Child { parent, slot } = at else {
            return true;
        };
        self.tree
            .get(parent)
            .and_then(|parent| self.definitions.resolve(&parent.kind))
            .and_then(|def| def.fields.iter().find(|f| f.name == slot.as_str()))
            .map_or(true, |field| {
                field.allowed.is_empty() || field.allowed.iter().any(|k| k == kind)
            })
    }

    pub fn set_status(&mut self, status: impl Into<String>) -> bool {
        let status = Some(status.into());
        if self.ui.status == status {
            return false;
        }
        self.ui.status = status;
        true
    }
}
