//! 视图层模块
//!
//! - SidebarView: 块侧边栏（每个可见块一行，可折叠、可拖拽排序）

pub mod sidebar;

pub use sidebar::{
    derive_label, extract_plain_text, looks_like_markup, BlockActions, BlockRow,
    CollapseController, CollapseState, FocusSync, FocusTransition, SidebarHit, SidebarLine,
    SidebarPaintCtx, SidebarView,
};
