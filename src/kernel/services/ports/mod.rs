//! Service ports: traits + data contracts.

pub mod blocks;
pub mod settings;

pub use blocks::{BlockCommands, BlockQueries, FieldCommands, ReorderCommands};
pub use settings::{KeybindingRule, Settings, SidebarSettings, ThemeSettings};
