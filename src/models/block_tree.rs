//! Block 树数据模型
//!
//! 块按树形组织：根层是有序列表，每个块可以有若干命名插槽（repeater 字段），
//! 插槽内同样是有序的子块列表。节点存放在 slotmap 中，`BlockId` 通过索引映射到节点。

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use serde_json::Value;
use slotmap::{new_key_type, SlotMap};
use std::collections::BTreeMap;
use std::fmt;

use super::block::{Block, BlockId, BlockPath};

new_key_type! { pub struct NodeKey; }

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockTreeError {
    UnknownBlock(BlockId),
    UnknownParent(BlockId),
    MoveIntoDescendant,
    MoveOntoSelf,
}

impl fmt::Display for BlockTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTreeError::UnknownBlock(id) => write!(f, "unknown block {id}"),
            BlockTreeError::UnknownParent(id) => write!(f, "unknown parent block {id}"),
            BlockTreeError::MoveIntoDescendant => {
                write!(f, "cannot move block into its own subtree")
            }
            BlockTreeError::MoveOntoSelf => write!(f, "cannot move block onto itself"),
        }
    }
}

impl std::error::Error for BlockTreeError {}

/// Owned nested form of a block, used to build and serialize trees.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockNode {
    pub block: Block,
    pub slots: BTreeMap<CompactString, Vec<BlockNode>>,
}

impl BlockNode {
    pub fn leaf(block: Block) -> Self {
        Self {
            block,
            slots: BTreeMap::new(),
        }
    }

    pub fn with_slot(mut self, name: impl Into<CompactString>, children: Vec<BlockNode>) -> Self {
        self.slots.insert(name.into(), children);
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    block: Block,
    parent: Option<(NodeKey, CompactString)>,
    slots: BTreeMap<CompactString, Vec<NodeKey>>,
}

/// Where a block lives: the root list or a named slot of a parent block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotRef {
    Root,
    Child { parent: BlockId, slot: CompactString },
}

#[derive(Debug, Default)]
pub struct BlockTree {
    arena: SlotMap<NodeKey, Node>,
    roots: Vec<NodeKey>,
    by_id: FxHashMap<BlockId, NodeKey>,
    next_seq: u64,
}

impl BlockTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<BlockNode>) -> Self {
        let mut tree = Self::new();
        for node in nodes {
            let key = tree.insert_node(node, None);
            tree.roots.push(key);
        }
        tree
    }

    pub fn to_nodes(&self) -> Vec<BlockNode> {
        self.roots.iter().map(|&k| self.node_to_owned(k)).collect()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        let key = self.by_id.get(id)?;
        self.arena.get(*key).map(|n| &n.block)
    }

    pub fn root_ids(&self) -> Vec<BlockId> {
        self.ids_of(&self.roots)
    }

    /// Children of `id` in `slot`, in order. Unknown ids or slots yield an empty list.
    pub fn children(&self, id: &BlockId, slot: &str) -> Vec<BlockId> {
        let Some(node) = self.by_id.get(id).and_then(|k| self.arena.get(*k)) else {
            return Vec::new();
        };
        node.slots
            .get(slot)
            .map(|keys| self.ids_of(keys))
            .unwrap_or_default()
    }

    pub fn parent_of(&self, id: &BlockId) -> Option<SlotRef> {
        let node = self.arena.get(*self.by_id.get(id)?)?;
        Some(match &node.parent {
            None => SlotRef::Root,
            Some((parent, slot)) => SlotRef::Child {
                parent: self.arena[*parent].block.id.clone(),
                slot: slot.clone(),
            },
        })
    }

    pub fn path_of(&self, id: &BlockId) -> Option<BlockPath> {
        let mut key = *self.by_id.get(id)?;
        let mut rev_steps = Vec::new();
        loop {
            let node = self.arena.get(key)?;
            match &node.parent {
                None => {
                    let root = self.roots.iter().position(|k| *k == key)?;
                    let mut path = BlockPath::root(root);
                    for (slot, index) in rev_steps.into_iter().rev() {
                        path = path.child(slot, index);
                    }
                    return Some(path);
                }
                Some((parent, slot)) => {
                    let siblings = self.arena.get(*parent)?.slots.get(slot)?;
                    let index = siblings.iter().position(|k| *k == key)?;
                    rev_steps.push((slot.as_str(), index));
                    key = *parent;
                }
            }
        }
    }

    pub fn resolve_path(&self, path: &BlockPath) -> Option<&BlockId> {
        let mut key = *self.roots.get(path.root)?;
        for step in &path.steps {
            key = *self.arena.get(key)?.slots.get(&step.slot)?.get(step.index)?;
        }
        self.arena.get(key).map(|n| &n.block.id)
    }

    /// True when `id` is `ancestor` or lives somewhere below it.
    pub fn is_within(&self, id: &BlockId, ancestor: &BlockId) -> bool {
        let (Some(mut key), Some(&target)) = (self.by_id.get(id).copied(), self.by_id.get(ancestor))
        else {
            return false;
        };
        loop {
            if key == target {
                return true;
            }
            match self.arena.get(key).and_then(|n| n.parent.as_ref()) {
                Some((parent, _)) => key = *parent,
                None => return false,
            }
        }
    }

    /// Generates an id that is not used anywhere in the tree.
    pub fn fresh_id(&mut self) -> BlockId {
        loop {
            self.next_seq += 1;
            let id = BlockId::new(format!("b{:x}", self.next_seq));
            if !self.by_id.contains_key(&id) {
                return id;
            }
        }
    }

    /// Inserts `node` into `at`; `index` past the end (or `None`) appends.
    pub fn insert(
        &mut self,
        at: &SlotRef,
        index: Option<usize>,
        node: BlockNode,
    ) -> Result<BlockId, BlockTreeError> {
        let parent = match at {
            SlotRef::Root => None,
            SlotRef::Child { parent, slot } => {
                let key = *self
                    .by_id
                    .get(parent)
                    .ok_or_else(|| BlockTreeError::UnknownParent(parent.clone()))?;
                Some((key, slot.clone()))
            }
        };

        let key = self.insert_node(node, parent.clone());
        let siblings = self.siblings_mut(parent.as_ref());
        let index = index.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(index, key);
        Ok(self.arena[key].block.id.clone())
    }

    /// Removes the block and its whole subtree. Returns every removed id, the block itself first.
    pub fn remove(&mut self, id: &BlockId) -> Result<Vec<BlockId>, BlockTreeError> {
        let key = *self
            .by_id
            .get(id)
            .ok_or_else(|| BlockTreeError::UnknownBlock(id.clone()))?;

        let parent = self.arena[key].parent.clone();
        self.siblings_mut(parent.as_ref()).retain(|k| *k != key);

        let mut removed = Vec::new();
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            let Some(node) = self.arena.remove(k) else {
                continue;
            };
            self.by_id.remove(&node.block.id);
            removed.push(node.block.id);
            for children in node.slots.into_values() {
                stack.extend(children.into_iter().rev());
            }
        }
        Ok(removed)
    }

    /// Deep-copies the block with fresh ids and places the copy right after the original.
    pub fn duplicate(&mut self, id: &BlockId) -> Result<BlockId, BlockTreeError> {
        let key = *self
            .by_id
            .get(id)
            .ok_or_else(|| BlockTreeError::UnknownBlock(id.clone()))?;

        let mut copy = self.node_to_owned(key);
        self.reassign_ids(&mut copy);

        let parent = self.arena[key].parent.clone();
        let new_key = self.insert_node(copy, parent.clone());
        let siblings = self.siblings_mut(parent.as_ref());
        let index = siblings
            .iter()
            .position(|k| *k == key)
            .map(|i| i + 1)
            .unwrap_or(siblings.len());
        siblings.insert(index, new_key);
        Ok(self.arena[new_key].block.id.clone())
    }

    /// Moves `id` so that it takes the position currently held by `target`.
    ///
    /// Within one slot, moving downwards lands after the target and moving upwards lands before
    /// it; across slots the block is inserted before the target.
    pub fn move_to(&mut self, id: &BlockId, target: &BlockId) -> Result<(), BlockTreeError> {
        if id == target {
            return Err(BlockTreeError::MoveOntoSelf);
        }
        let key = *self
            .by_id
            .get(id)
            .ok_or_else(|| BlockTreeError::UnknownBlock(id.clone()))?;
        let target_key = *self
            .by_id
            .get(target)
            .ok_or_else(|| BlockTreeError::UnknownBlock(target.clone()))?;
        if self.is_within(target, id) {
            return Err(BlockTreeError::MoveIntoDescendant);
        }

        let from_parent = self.arena[key].parent.clone();
        let to_parent = self.arena[target_key].parent.clone();
        let same_slot = from_parent == to_parent;

        let from_siblings = self.siblings_mut(from_parent.as_ref());
        let old_index = from_siblings.iter().position(|k| *k == key);
        from_siblings.retain(|k| *k != key);

        let to_siblings = self.siblings_mut(to_parent.as_ref());
        let target_index = to_siblings
            .iter()
            .position(|k| *k == target_key)
            .unwrap_or(to_siblings.len());
        let moving_down = same_slot && old_index.is_some_and(|old| old <= target_index);
        let index = if moving_down {
            target_index + 1
        } else {
            target_index
        };
        to_siblings.insert(index.min(to_siblings.len()), key);

        self.arena[key].parent = to_parent;
        Ok(())
    }

    pub fn set_field(
        &mut self,
        id: &BlockId,
        field: &str,
        value: Value,
    ) -> Result<bool, BlockTreeError> {
        let key = *self
            .by_id
            .get(id)
            .ok_or_else(|| BlockTreeError::UnknownBlock(id.clone()))?;
        let data = &mut self.arena[key].block.data;
        if data.get(field) == Some(&value) {
            return Ok(false);
        }
        data.insert(field.to_string(), value);
        Ok(true)
    }

    fn insert_node(&mut self, node: BlockNode, parent: Option<(NodeKey, CompactString)>) -> NodeKey {
        let BlockNode { mut block, slots } = node;
        if block.id.as_str().is_empty() || self.by_id.contains_key(&block.id) {
            block.id = self.fresh_id();
        }
        let id = block.id.clone();
        let key = self.arena.insert(Node {
            block,
            parent,
            slots: BTreeMap::new(),
        });
        self.by_id.insert(id, key);

        for (slot, children) in slots {
            let mut keys = Vec::with_capacity(children.len());
            for child in children {
                keys.push(self.insert_node(child, Some((key, slot.clone()))));
            }
            self.arena[key].slots.insert(slot, keys);
        }
        key
    }

    fn node_to_owned(&self, key: NodeKey) -> BlockNode {
        let node = &self.arena[key];
        BlockNode {
            block: node.block.clone(),
            slots: node
                .slots
                .iter()
                .map(|(slot, keys)| {
                    (
                        slot.clone(),
                        keys.iter().map(|&k| self.node_to_owned(k)).collect(),
                    )
                })
                .collect(),
        }
    }

    fn reassign_ids(&mut self, node: &mut BlockNode) {
        node.block.id = self.fresh_id();
        for children in node.slots.values_mut() {
            for child in children {
                self.reassign_ids(child);
            }
        }
    }

    fn siblings_mut(&mut self, parent: Option<&(NodeKey, CompactString)>) -> &mut Vec<NodeKey> {
        match parent {
            None => &mut self.roots,
            Some((key, slot)) => self.arena[*key].slots.entry(slot.clone()).or_default(),
        }
    }

    fn ids_of(&self, keys: &[NodeKey]) -> Vec<BlockId> {
        keys.iter()
            .filter_map(|k| self.arena.get(*k))
            .map(|n| n.block.id.clone())
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/block_tree.rs"]
mod tests;
