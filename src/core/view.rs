//! 视图系统：View trait 定义
//!
//! 主循环只通过这个 trait 驱动顶层视图：输入、绘制、以及按时间推进的动画。

use std::time::Instant;

use super::event::InputEvent;
use crate::ui::backend::Backend;
use crate::ui::core::geom::Rect;

pub trait View {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult;

    fn render(&mut self, backend: &mut dyn Backend, area: Rect);

    /// Advances time-based state to `now`. Returns true if a redraw is needed.
    fn tick(&mut self, _now: Instant) -> bool {
        false
    }

    /// When `tick` next has work to do. `None` means the view is idle.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
    Quit,
}

impl EventResult {
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }

    pub fn is_ignored(self) -> bool {
        self == EventResult::Ignored
    }

    pub fn is_quit(self) -> bool {
        self == EventResult::Quit
    }

    /// Keeps the stronger of two results: `Quit` over `Consumed` over `Ignored`.
    pub fn or(self, other: EventResult) -> EventResult {
        match (self, other) {
            (EventResult::Quit, _) | (_, EventResult::Quit) => EventResult::Quit,
            (EventResult::Consumed, _) | (_, EventResult::Consumed) => EventResult::Consumed,
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/view.rs"]
mod tests;
