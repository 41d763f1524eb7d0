//! Terminal backend over `ratatui`.

use crate::ui::backend::{border_glyphs, Backend};
use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::painter::{BorderKind, PaintCmd};
use crate::ui::core::style::{Color, Mod, Style};
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect as RRect;
use ratatui::style::{Color as RColor, Modifier as RModifier, Style as RStyle};
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;
use std::io;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub struct RatatuiBackend<'a, 'f> {
    frame: &'a mut Frame<'f>,
    cursor: Option<Pos>,
}

impl<'a, 'f> RatatuiBackend<'a, 'f> {
    pub fn new(frame: &'a mut Frame<'f>) -> Self {
        Self { frame, cursor: None }
    }
}

impl Drop for RatatuiBackend<'_, '_> {
    fn drop(&mut self) {
        // Without an explicit position ratatui hides the cursor for this frame.
        if let Some(pos) = self.cursor {
            self.frame.set_cursor_position((pos.x, pos.y));
        }
    }
}

impl From<RRect> for Rect {
    fn from(r: RRect) -> Self {
        Rect::new(r.x, r.y, r.width, r.height)
    }
}

impl From<Rect> for RRect {
    fn from(r: Rect) -> Self {
        RRect::new(r.x, r.y, r.w, r.h)
    }
}

impl Backend for RatatuiBackend<'_, '_> {
    fn draw(&mut self, area: Rect, cmds: &[PaintCmd]) {
        self.frame.render_widget(PaintWidget { cmds }, area.into());
    }

    fn set_cursor(&mut self, pos: Option<Pos>) {
        self.cursor = pos;
    }
}

/// Keeps `ratatui` types out of the rest of the crate.
pub struct RatatuiTerminal {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl RatatuiTerminal {
    pub fn new(stdout: io::Stdout) -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    pub fn size(&self) -> io::Result<Rect> {
        let size = self.terminal.size()?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }

    pub fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut dyn Backend, Rect),
    {
        self.terminal.draw(|frame| {
            let area: Rect = frame.area().into();
            let mut backend = RatatuiBackend::new(frame);
            f(&mut backend, area);
        })?;
        Ok(())
    }
}

struct PaintWidget<'a> {
    cmds: &'a [PaintCmd],
}

impl Widget for PaintWidget<'_> {
    fn render(self, _area: RRect, buf: &mut Buffer) {
        for cmd in self.cmds {
            match cmd {
                PaintCmd::FillRect { rect, style } => {
                    let style = to_ratatui_style(*style);
                    for_each_cell(buf, *rect, |cell| {
                        cell.set_char(' ').set_style(style);
                    });
                }
                PaintCmd::StyleRect { rect, style } => {
                    let style = to_ratatui_style(*style);
                    for_each_cell(buf, *rect, |cell| {
                        cell.set_style(style);
                    });
                }
                PaintCmd::VLine { pos, len, ch, style } => {
                    let style = to_ratatui_style(*style);
                    for_each_cell(buf, Rect::new(pos.x, pos.y, 1, *len), |cell| {
                        cell.set_char(*ch).set_style(style);
                    });
                }
                PaintCmd::Text {
                    pos,
                    text,
                    style,
                    clip,
                } => draw_text(buf, *pos, text, *style, *clip),
                PaintCmd::Border { rect, style, kind } => draw_border(buf, *rect, *style, *kind),
            }
        }
    }
}

fn buffer_area(buf: &Buffer) -> Rect {
    Rect::new(buf.area.x, buf.area.y, buf.area.width, buf.area.height)
}

fn for_each_cell(buf: &mut Buffer, rect: Rect, mut f: impl FnMut(&mut Cell)) {
    let clip = rect.intersect(buffer_area(buf));
    for y in clip.y..clip.bottom() {
        for x in clip.x..clip.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                f(cell);
            }
        }
    }
}

fn to_ratatui_style(s: Style) -> RStyle {
    let mut out = RStyle::default().add_modifier(to_ratatui_mods(s.mods));
    if let Some(fg) = s.fg {
        out = out.fg(to_ratatui_color(fg));
    }
    if let Some(bg) = s.bg {
        out = out.bg(to_ratatui_color(bg));
    }
    out
}

fn to_ratatui_color(c: Color) -> RColor {
    match c {
        Color::Reset => RColor::Reset,
        Color::Rgb(r, g, b) => RColor::Rgb(r, g, b),
        Color::Indexed(i) => RColor::Indexed(i),
    }
}

fn to_ratatui_mods(m: Mod) -> RModifier {
    [
        (Mod::BOLD, RModifier::BOLD),
        (Mod::DIM, RModifier::DIM),
        (Mod::ITALIC, RModifier::ITALIC),
        (Mod::UNDERLINE, RModifier::UNDERLINED),
        (Mod::REVERSE, RModifier::REVERSED),
    ]
    .into_iter()
    .filter(|(ours, _)| m.contains(*ours))
    .fold(RModifier::empty(), |acc, (_, theirs)| acc | theirs)
}

fn draw_text(buf: &mut Buffer, pos: Pos, text: &str, style: Style, clip: Option<Rect>) {
    let style = to_ratatui_style(style);
    let clip = clip
        .unwrap_or_else(|| buffer_area(buf))
        .intersect(buffer_area(buf));
    let y = pos.y;
    if clip.is_empty() || y < clip.y || y >= clip.bottom() {
        return;
    }

    let mut x = pos.x;
    for g in text.graphemes(true) {
        let w = UnicodeWidthStr::width(g) as u16;
        if w == 0 {
            continue;
        }
        if x >= clip.right() {
            break;
        }
        // Wide glyphs are never split at the clip edge.
        if w > 1 && x.saturating_add(w).saturating_sub(1) >= clip.right() {
            break;
        }
        if !clip.contains(Pos::new(x, y)) {
            x = x.saturating_add(w);
            continue;
        }

        let Some(cell) = buf.cell_mut((x, y)) else {
            break;
        };
        cell.set_symbol(g).set_style(style);

        for dx in 1..w {
            let Some(cell) = buf.cell_mut((x.saturating_add(dx), y)) else {
                break;
            };
            cell.set_char(' ').set_style(style);
        }
        x = x.saturating_add(w);
    }
}

fn draw_border(buf: &mut Buffer, rect: Rect, style: Style, kind: BorderKind) {
    let rect = rect.intersect(buffer_area(buf));
    if rect.w < 2 || rect.h < 2 {
        return;
    }

    let style = to_ratatui_style(style);
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;
    let (tl, tr, bl, br, h, v) = border_glyphs(kind);

    let mut put = |x: u16, y: u16, ch: char| {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(ch).set_style(style);
        }
    };

    put(rect.x, rect.y, tl);
    put(right, rect.y, tr);
    put(rect.x, bottom, bl);
    put(right, bottom, br);
    for x in rect.x + 1..right {
        put(x, rect.y, h);
        put(x, bottom, h);
    }
    for y in rect.y + 1..bottom {
        put(rect.x, y, v);
        put(right, y, v);
    }
}
