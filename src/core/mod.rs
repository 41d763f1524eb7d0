//! 核心框架模块
//!
//! - Event: 统一事件定义（与终端库无关）
//! - Command: 语义命令
//! - View: 视图 trait

pub mod command;
pub mod event;
pub mod view;

pub use command::Command;
pub use event::{InputEvent, Key};
pub use view::{EventResult, View};
