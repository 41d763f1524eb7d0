use compact_str::CompactString;

use crate::core::Command;
use crate::models::{
    serialize_document, Block, BlockId, BlockNode, BlockTree, BlockTypeDefinition, FieldKind,
    SlotRef,
};

use super::services::ports::BlockQueries;
use super::{Action, AppState, Effect};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::RunCommand(cmd) => self.dispatch_command(cmd),
            Action::DocumentLoaded { path, blocks } => {
                self.state.tree = BlockTree::from_nodes(blocks);
                self.state.focus = None;
                self.state.dirty = false;
                self.state.loaded = true;
                let count = self.state.tree.len();
                tracing::info!(path = %path.display(), blocks = count, "document loaded");
                self.state.set_status(format!("Loaded {} ({count} blocks)", path.display()));
                DispatchResult::changed(true)
            }
            Action::DocumentLoadFailed { path, error } => {
                tracing::error!(path = %path.display(), error = %error, "document load failed");
                // A missing file opens as an empty page and is created on save.
                self.state.loaded = true;
                DispatchResult::changed(self.state.set_status(format!("Open failed: {error}")))
            }
            Action::DocumentSaved { path, success } => {
                let status = if success {
                    self.state.dirty = false;
                    format!("Saved {}", path.display())
                } else {
                    format!("Save failed: {}", path.display())
                };
                self.state.set_status(status);
                DispatchResult::changed(true)
            }
            Action::RequestFocus { path } => {
                let Some(id) = self.state.tree.resolve_path(&path).cloned() else {
                    tracing::debug!(path = %path, "focus request for unknown path ignored");
                    return DispatchResult::changed(false);
                };
                DispatchResult::changed(self.set_focus(Some(id)))
            }
            Action::ClearFocus => DispatchResult::changed(self.set_focus(None)),
            Action::RemoveBlock { id } => {
                let clears_focus = self
                    .state
                    .focus
                    .as_ref()
                    .is_some_and(|focused| self.state.tree.is_within(focused, &id));
                match self.state.tree.remove(&id) {
                    Ok(removed) => {
                        tracing::debug!(block = %id, removed = removed.len(), "block removed");
                        if clears_focus {
                            self.state.focus = None;
                        }
                        self.state.dirty = true;
                        DispatchResult::changed(true)
                    }
                    Err(e) => {
                        tracing::warn!(block = %id, error = %e, "remove rejected");
                        DispatchResult::changed(false)
                    }
                }
            }
            Action::DuplicateBlock { id } => match self.state.tree.duplicate(&id) {
                Ok(copy) => {
                    tracing::debug!(block = %id, copy = %copy, "block duplicated");
                    self.state.dirty = true;
                    DispatchResult::changed(true)
                }
                Err(e) => {
                    tracing::warn!(block = %id, error = %e, "duplicate rejected");
                    DispatchResult::changed(false)
                }
            },
            Action::InsertBlock { at, index, kind } => self.insert_block(at, index, kind),
            Action::MoveBlock { id, before } => self.move_block(id, before),
            Action::SetField { id, field, value } => {
                match self.state.tree.set_field(&id, &field, value) {
                    Ok(changed) => {
                        self.state.dirty |= changed;
                        DispatchResult::changed(changed)
                    }
                    Err(e) => {
                        tracing::warn!(block = %id, field = %field, error = %e, "set_field rejected");
                        DispatchResult::changed(false)
                    }
                }
            }
        }
    }

    fn dispatch_command(&mut self, command: Command) -> DispatchResult {
        match command {
            Command::Save => {
                let nodes = self.state.tree.to_nodes();
                match serialize_document(&nodes) {
                    Ok(content) => DispatchResult {
                        effects: vec![Effect::SaveDocument {
                            path: self.state.document_path.clone(),
                            content,
                        }],
                        state_changed: false,
                    },
                    Err(e) => {
                        tracing::error!(error = %e, "serialize document failed");
                        DispatchResult::changed(self.state.set_status(format!("Save failed: {e}")))
                    }
                }
            }
            Command::Quit => {
                self.state.ui.should_quit = true;
                DispatchResult::changed(true)
            }
            Command::ClearFocus => DispatchResult::changed(self.set_focus(None)),
            Command::ScrollUp | Command::ScrollDown | Command::Custom(_) => {
                DispatchResult::changed(false)
            }
        }
    }

    fn set_focus(&mut self, focus: Option<BlockId>) -> bool {
        if self.state.focus == focus {
            return false;
        }
        tracing::debug!(
            from = ?self.state.focus.as_ref().map(BlockId::as_str),
            to = ?focus.as_ref().map(BlockId::as_str),
            "focus changed"
        );
        self.state.focus = focus;
        true
    }

    fn move_block(&mut self, id: BlockId, before: BlockId) -> DispatchResult {
        let destination = self.state.tree.parent_of(&before);
        let kind = self.state.tree.get(&id).map(|block| block.kind.clone());
        if let (Some(at), Some(kind)) = (&destination, &kind) {
            if !self.state.slot_accepts(at, kind) {
                tracing::warn!(
                    block = %id,
                    kind = %kind,
                    before = %before,
                    "move rejected: slot does not allow kind"
                );
                return DispatchResult::changed(false);
            }
        }
        match self.state.tree.move_to(&id, &before) {
            Ok(()) => {
                tracing::debug!(block = %id, before = %before, "block moved");
                self.state.dirty = true;
                DispatchResult::changed(true)
            }
            Err(e) => {
                tracing::warn!(block = %id, before = %before, error = %e, "move rejected");
                DispatchResult::changed(false)
            }
        }
    }

    fn insert_block(
        &mut self,
        at: SlotRef,
        index: Option<usize>,
        kind: CompactString,
    ) -> DispatchResult {
        let node = seeded_node(&kind, self.state.definitions.resolve(&kind));
        match self.state.tree.insert(&at, index, node) {
            Ok(id) => {
                tracing::debug!(block = %id, kind = %kind, "block inserted");
                self.state.dirty = true;
                self.set_focus(Some(id));
                DispatchResult::changed(true)
            }
            Err(e) => {
                tracing::warn!(kind = %kind, error = %e, "insert rejected");
                DispatchResult::changed(false)
            }
        }
    }
}

/// A fresh block of `kind` with every field at its default value and every repeater empty.
fn seeded_node(kind: &str, definition: Option<&BlockTypeDefinition>) -> BlockNode {
    let mut node = BlockNode::leaf(Block::new(BlockId::new(""), kind));
    let Some(definition) = definition else {
        return node;
    };
    for field in &definition.fields {
        if field.kind == FieldKind::Repeater {
            node.slots.insert(field.name.as_str().into(), Vec::new());
        } else if let Some(value) = field.default_value() {
            node.block.data.insert(field.name.clone(), value);
        }
    }
    node
}

impl BlockQueries for AppState {
    /// A block counts as focused while the focus target is the block itself or one of its
    /// descendants, so parents stay open around a focused child.
    fn is_focused(&self, id: &BlockId) -> bool {
        self.focus
            .as_ref()
            .is_some_and(|focused| self.tree.is_within(focused, id))
    }

    fn resolve_definition(&self, kind: &str) -> Option<&BlockTypeDefinition> {
        self.definitions.resolve(kind)
    }
}

impl BlockQueries for Store {
    fn is_focused(&self, id: &BlockId) -> bool {
        self.state.is_focused(id)
    }

    fn resolve_definition(&self, kind: &str) -> Option<&BlockTypeDefinition> {
        self.state.resolve_definition(kind)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
