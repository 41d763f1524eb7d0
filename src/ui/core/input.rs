//! Pointer gestures recognised by [`super::runtime::UiRuntime`] from raw mouse input.

use super::geom::Pos;
use super::id::Id;
use crate::core::event::MouseButton;

/// What is being dragged. Block rows carry a sidebar-local token, resolved back to the block
/// with `SidebarView::block_for_token`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragPayload {
    Block { token: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    HoverChanged {
        from: Option<Id>,
        to: Option<Id>,
        pos: Pos,
    },
    /// Press and release on the same clickable node.
    Click {
        id: Id,
        button: MouseButton,
        pos: Pos,
    },
    /// Wheel over a scrollable node. Negative is up.
    Scroll {
        id: Id,
        delta: i16,
        pos: Pos,
    },
    DragStart {
        id: Id,
        pos: Pos,
    },
    DragMove {
        id: Id,
        pos: Pos,
    },
    /// Emitted after `Drop` when the drag released over an accepting target.
    DragEnd {
        id: Id,
        pos: Pos,
    },
    Drop {
        payload: DragPayload,
        target: Id,
        pos: Pos,
    },
}

impl UiEvent {
    /// The node the gesture is about. Hover changes have none of their own.
    pub fn subject(&self) -> Option<Id> {
        match self {
            UiEvent::HoverChanged { to, .. } => *to,
            UiEvent::Click { id, .. }
            | UiEvent::Scroll { id, .. }
            | UiEvent::DragStart { id, .. }
            | UiEvent::DragMove { id, .. }
            | UiEvent::DragEnd { id, .. } => Some(*id),
            UiEvent::Drop { target, .. } => Some(*target),
        }
    }

    pub fn pos(&self) -> Pos {
        match self {
            UiEvent::HoverChanged { pos, .. }
            | UiEvent::Click { pos, .. }
            | UiEvent::Scroll { pos, .. }
            | UiEvent::DragStart { pos, .. }
            | UiEvent::DragMove { pos, .. }
            | UiEvent::DragEnd { pos, .. }
            | UiEvent::Drop { pos, .. } => *pos,
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/input.rs"]
mod tests;
