use super::Workbench;
use crate::kernel::services::ports::{BlockCommands, FieldCommands, ReorderCommands};
use crate::kernel::{Action as KernelAction, Effect as KernelEffect};
use crate::models::{Block, BlockId, BlockPath, SlotRef};
use serde_json::Value;

/// Collects the commands a view issues while it still borrows the store's state.
///
/// The workbench dispatches the queued actions once the view call has returned.
#[derive(Debug, Default)]
pub(super) struct CommandQueue {
    actions: Vec<KernelAction>,
}

impl CommandQueue {
    pub(super) fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub(super) fn into_actions(self) -> Vec<KernelAction> {
        self.actions
    }
}

impl BlockCommands for CommandQueue {
    fn request_focus(&mut self, path: &BlockPath) {
        self.actions
            .push(KernelAction::RequestFocus { path: path.clone() });
    }

    fn remove_block(&mut self, block: &Block) {
        self.actions.push(KernelAction::RemoveBlock {
            id: block.id.clone(),
        });
    }

    fn duplicate_block(&mut self, block: &Block) {
        self.actions.push(KernelAction::DuplicateBlock {
            id: block.id.clone(),
        });
    }
}

impl FieldCommands for CommandQueue {
    fn set_field(&mut self, id: &BlockId, field: &str, value: Value) {
        self.actions.push(KernelAction::SetField {
            id: id.clone(),
            field: field.to_string(),
            value,
        });
    }

    fn insert_block(&mut self, at: SlotRef, kind: &str) {
        self.actions.push(KernelAction::InsertBlock {
            at,
            index: None,
            kind: kind.into(),
        });
    }
}

impl ReorderCommands for CommandQueue {
    fn move_block(&mut self, id: &BlockId, before: &BlockId) {
        self.actions.push(KernelAction::MoveBlock {
            id: id.clone(),
            before: before.clone(),
        });
    }
}

impl Workbench {
    /// Dispatches `action` and runs its effects. Returns whether anything happened: the state
    /// changed or an effect was started.
    pub(super) fn dispatch_kernel(&mut self, action: KernelAction) -> bool {
        let result = self.store.dispatch(action);
        let ran_effects = !result.effects.is_empty();
        for effect in result.effects {
            self.run_effect(effect);
        }
        result.state_changed || ran_effects
    }

    pub(super) fn apply_queue(&mut self, queue: CommandQueue) -> bool {
        let mut changed = false;
        for action in queue.into_actions() {
            changed |= self.dispatch_kernel(action);
        }
        changed
    }

    fn run_effect(&mut self, effect: KernelEffect) {
        match effect {
            KernelEffect::LoadDocument(path) => self.runtime.load_document(path),
            KernelEffect::SaveDocument { path, content } => {
                tracing::debug!(path = %path.display(), bytes = content.len(), "saving document");
                self.runtime.save_document(path, content);
            }
        }
    }
}
