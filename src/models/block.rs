//! Block 数据模型：标识、类型标签与字段数据

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Identity of a block, stable for the block's lifetime and unique across the tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(CompactString);

impl BlockId {
    pub fn new(id: impl Into<CompactString>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub id: BlockId,
    /// Type tag, resolved against the definition registry.
    pub kind: CompactString,
    /// Scalar field values. Child blocks live in the tree's slots, not here.
    pub data: Map<String, Value>,
}

impl Block {
    pub fn new(id: BlockId, kind: impl Into<CompactString>) -> Self {
        Self {
            id,
            kind: kind.into(),
            data: Map::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.data.insert(name.into(), value);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathStep {
    pub slot: CompactString,
    pub index: usize,
}

/// Position of a block in the tree: a root index followed by `(slot, index)` steps.
///
/// Rendered as `2` or `2.items.0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockPath {
    pub root: usize,
    pub steps: Vec<PathStep>,
}

impl BlockPath {
    pub fn root(index: usize) -> Self {
        Self {
            root: index,
            steps: Vec::new(),
        }
    }

    pub fn child(&self, slot: &str, index: usize) -> Self {
        let mut steps = self.steps.clone();
        steps.push(PathStep {
            slot: slot.into(),
            index,
        });
        Self {
            root: self.root,
            steps,
        }
    }

    pub fn depth(&self) -> usize {
        self.steps.len()
    }
}

impl fmt::Display for BlockPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for step in &self.steps {
            write!(f, ".{}.{}", step.slot, step.index)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePathError(String);

impl fmt::Display for ParsePathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid block path: {:?}", self.0)
    }
}

impl std::error::Error for ParsePathError {}

impl FromStr for BlockPath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePathError(s.to_string());
        let mut parts = s.split('.');
        let root = parts
            .next()
            .and_then(|p| p.parse::<usize>().ok())
            .ok_or_else(err)?;

        let mut steps = Vec::new();
        while let Some(slot) = parts.next() {
            if slot.is_empty() || slot.parse::<usize>().is_ok() {
                return Err(err());
            }
            let index = parts
                .next()
                .and_then(|p| p.parse::<usize>().ok())
                .ok_or_else(err)?;
            steps.push(PathStep {
                slot: slot.into(),
                index,
            });
        }

        Ok(Self { root, steps })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/block.rs"]
mod tests;
