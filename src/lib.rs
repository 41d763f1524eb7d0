//! zbloc - 终端页面搭建器库
//!
//! 模块结构：
//! - core: 核心框架（Event, Command, View）
//! - models: 数据模型（Block, BlockTree, 定义注册表, 文档编解码）
//! - kernel: 状态/动作/副作用，以及 services（ports + adapters）
//! - ui: 几何、绘制命令、命中测试与后端
//! - views: 视图层（侧边栏与 BlockRow）
//! - app: 应用层（Workbench, 主题）
//! - tui: 终端集成（crossterm, 终端守卫）

pub mod app;
pub mod core;
pub mod kernel;
pub mod models;
#[cfg(feature = "tui")]
pub mod tui;
pub mod ui;
pub mod views;
