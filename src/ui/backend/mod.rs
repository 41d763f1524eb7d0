//! Rendering backends.
//!
//! Views only emit `PaintCmd`s; a backend turns them into cells. The terminal backend is
//! compiled with the `tui` feature, the headless one always.

use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::painter::{BorderKind, PaintCmd};

pub trait Backend {
    fn draw(&mut self, area: Rect, cmds: &[PaintCmd]);

    fn set_cursor(&mut self, pos: Option<Pos>);
}

/// Corner and edge glyphs: `(top_left, top_right, bottom_left, bottom_right, horizontal, vertical)`.
pub(crate) fn border_glyphs(kind: BorderKind) -> (char, char, char, char, char, char) {
    match kind {
        BorderKind::Plain => ('┌', '┐', '└', '┘', '─', '│'),
        BorderKind::Rounded => ('╭', '╮', '╰', '╯', '─', '│'),
    }
}

#[cfg(feature = "tui")]
#[path = "ratatui.rs"]
pub mod terminal;
