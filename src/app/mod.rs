//! 应用层：组合 kernel、views 与 ui，负责输入路由、渲染和主循环节拍。

pub mod theme;
pub mod workbench;

pub use theme::UiTheme;
pub use workbench::Workbench;
