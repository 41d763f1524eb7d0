use super::geom::{Pos, Rect};
use super::style::Style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderKind {
    Plain,
    Rounded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaintCmd {
    FillRect { rect: Rect, style: Style },
    /// Restyles existing cells, keeping their symbols.
    StyleRect { rect: Rect, style: Style },
    /// Column of `ch` running down from `pos`.
    VLine {
        pos: Pos,
        len: u16,
        ch: char,
        style: Style,
    },
    Text {
        pos: Pos,
        text: String,
        style: Style,
        clip: Option<Rect>,
    },
    Border {
        rect: Rect,
        style: Style,
        kind: BorderKind,
    },
}

/// Records paint commands for a `Backend` to replay. Text drawn inside a [`Painter::clipped`]
/// scope is clipped to that scope unless it brings its own clip.
#[derive(Debug, Default)]
pub struct Painter {
    cmds: Vec<PaintCmd>,
    clip: Option<Rect>,
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
        self.clip = None;
    }

    /// Runs `f` with text clipped to `clip`, nested inside any enclosing scope.
    pub fn clipped<R>(&mut self, clip: Rect, f: impl FnOnce(&mut Painter) -> R) -> R {
        let outer = self.clip;
        self.clip = Some(outer.map_or(clip, |o| o.intersect(clip)));
        let out = f(self);
        self.clip = outer;
        out
    }

    pub fn cmds(&self) -> &[PaintCmd] {
        &self.cmds
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn fill_rect(&mut self, rect: Rect, style: Style) {
        self.cmds.push(PaintCmd::FillRect { rect, style });
    }

    pub fn style_rect(&mut self, rect: Rect, style: Style) {
        self.cmds.push(PaintCmd::StyleRect { rect, style });
    }

    pub fn vline(&mut self, pos: Pos, len: u16, ch: char, style: Style) {
        if len > 0 {
            self.cmds.push(PaintCmd::VLine { pos, len, ch, style });
        }
    }

    pub fn text(&mut self, pos: Pos, text: impl Into<String>, style: Style) {
        self.cmds.push(PaintCmd::Text {
            pos,
            text: text.into(),
            style,
            clip: self.clip,
        });
    }

    pub fn text_clipped(&mut self, pos: Pos, text: impl Into<String>, style: Style, clip: Rect) {
        self.cmds.push(PaintCmd::Text {
            pos,
            text: text.into(),
            style,
            clip: Some(clip),
        });
    }

    pub fn border(&mut self, rect: Rect, style: Style, kind: BorderKind) {
        self.cmds.push(PaintCmd::Border { rect, style, kind });
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/painter.rs"]
mod tests;
