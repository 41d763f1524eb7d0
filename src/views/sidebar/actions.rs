use crate::kernel::services::ports::BlockCommands;
use crate::models::Block;

/// Block-level commands a row issues. Positions are the store's business; only the block
/// identity crosses this boundary.
pub struct BlockActions<'a, C: BlockCommands + ?Sized> {
    commands: &'a mut C,
}

impl<'a, C: BlockCommands + ?Sized> BlockActions<'a, C> {
    pub fn new(commands: &'a mut C) -> Self {
        Self { commands }
    }

    pub fn remove(&mut self, block: &Block) {
        tracing::debug!(block = %block.id, "remove requested");
        self.commands.remove_block(block);
    }

    pub fn duplicate(&mut self, block: &Block) {
        tracing::debug!(block = %block.id, "duplicate requested");
        self.commands.duplicate_block(block);
    }
}
