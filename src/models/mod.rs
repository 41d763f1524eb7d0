//! 数据模型层
//!
//! - block: Block / BlockId / BlockPath
//! - block_tree: 可重排的嵌套块树
//! - definition: 块类型定义注册表
//! - document: 页面文档的 JSON 编解码

pub mod block;
pub mod block_tree;
pub mod definition;
pub mod document;

pub use block::{Block, BlockId, BlockPath, ParsePathError, PathStep};
pub use block_tree::{BlockNode, BlockTree, BlockTreeError, NodeKey, SlotRef};
pub use definition::{
    BlockTypeDefinition, DefinitionRegistry, DefinitionsError, FieldDescriptor, FieldKind,
};
pub use document::{parse_document, serialize_document, DocumentError};
