//! 渲染：侧边栏 | 分隔线 | 检查器，底部状态栏。

use super::{Workbench, STATUS_HEIGHT};
use crate::app::theme::UiTheme;
use crate::kernel::services::ports::SidebarSettings;
use crate::kernel::AppState;
use crate::ui::backend::Backend;
use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::painter::{BorderKind, Painter};
use crate::ui::core::style::{Mod, Style};
use crate::views::SidebarPaintCtx;
use unicode_width::UnicodeWidthStr;

pub(super) fn render(workbench: &mut Workbench, backend: &mut dyn Backend, area: Rect) {
    workbench.last_render_area = Some(area);
    workbench.ui_tree.clear();
    let mut painter = Painter::new();

    let (main, status) = area.split_bottom(STATUS_HEIGHT);
    let sidebar_w = sidebar_width(main.w, &workbench.settings.sidebar);
    let (sidebar_area, rest) = main.split_left(sidebar_w);
    let (separator, inspector) = rest.split_left(1);

    let ctx = SidebarPaintCtx {
        state: workbench.store.state(),
        theme: &workbench.theme,
        hovered: workbench.ui_runtime.hovered(),
        drag_over: workbench.ui_runtime.drag_over(),
    };
    workbench
        .sidebar
        .paint(&mut painter, &mut workbench.ui_tree, sidebar_area, &ctx);

    paint_separator(&mut painter, separator, &workbench.theme);
    paint_inspector(
        &mut painter,
        inspector,
        workbench.store.state(),
        &workbench.theme,
    );
    let last_log = workbench.logs.back().map(String::as_str);
    paint_status(
        &mut painter,
        status,
        workbench.store.state(),
        last_log,
        &workbench.theme,
    );

    backend.draw(area, painter.cmds());
    backend.set_cursor(None);
}

/// Sidebar columns for a main area `total` columns wide.
pub(super) fn sidebar_width(total: u16, settings: &SidebarSettings) -> u16 {
    let percent = settings.width_percent.min(100) as u32;
    let by_percent = (total as u32 * percent / 100) as u16;
    by_percent.max(settings.min_width).min(total)
}

fn paint_separator(painter: &mut Painter, area: Rect, theme: &UiTheme) {
    if area.is_empty() {
        return;
    }
    painter.vline(Pos::new(area.x, area.y), area.h, '│', Style::default().fg(theme.separator));
}

fn paint_inspector(painter: &mut Painter, area: Rect, state: &AppState, theme: &UiTheme) {
    if area.w < 3 || area.h < 3 {
        return;
    }
    painter.border(
        area,
        Style::default().fg(theme.separator),
        BorderKind::Rounded,
    );
    painter.text_clipped(
        Pos::new(area.x + 2, area.y),
        " Inspector ",
        Style::default().fg(theme.header_fg).add_mod(Mod::BOLD),
        area,
    );

    let inner = Rect::new(area.x + 1, area.y + 1, area.w - 2, area.h - 2);
    painter.clipped(inner, |p| paint_inspector_body(p, inner, state, theme));
}

fn paint_inspector_body(painter: &mut Painter, inner: Rect, state: &AppState, theme: &UiTheme) {
    let muted = Style::default().fg(theme.muted_fg);
    let at = |dy: u16| Pos::new(inner.x + 1, inner.y + dy);

    if !state.loaded {
        painter.text(at(0), "Loading…", muted);
        return;
    }

    let focused = state
        .focus
        .as_ref()
        .and_then(|id| state.tree.get(id).map(|block| (id, block)));
    let Some((id, block)) = focused else {
        painter.text(
            at(0),
            "Click a block header to focus it.",
            muted.add_mod(Mod::ITALIC),
        );
        return;
    };

    let title = state
        .definitions
        .resolve(&block.kind)
        .map(|def| def.title.as_str())
        .unwrap_or(block.kind.as_str());
    let path = state
        .tree
        .path_of(id)
        .map(|p| p.to_string())
        .unwrap_or_default();

    painter.text(
        at(0),
        title,
        Style::default().fg(theme.accent_fg).add_mod(Mod::BOLD),
    );
    let title_w = UnicodeWidthStr::width(title) as u16;
    painter.text(
        Pos::new(inner.x + 2 + title_w, inner.y),
        format!("{path}  #{id}"),
        muted,
    );

    let data = serde_json::to_string_pretty(&block.data).unwrap_or_default();
    let text = Style::default().fg(theme.text_fg);
    for (dy, line) in data.lines().enumerate().take(inner.h.saturating_sub(2) as usize) {
        painter.text(at(2 + dy as u16), line, text);
    }
}

fn paint_status(
    painter: &mut Painter,
    area: Rect,
    state: &AppState,
    last_log: Option<&str>,
    theme: &UiTheme,
) {
    if area.is_empty() {
        return;
    }
    let style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
    painter.fill_rect(area, style);

    let right = format!(
        "{}{} ",
        state.document_path.display(),
        if state.dirty { " [+]" } else { "" }
    );
    let right_w = UnicodeWidthStr::width(right.as_str()) as u16;
    let right_x = area.right().saturating_sub(right_w).max(area.x);

    let left = state.ui.status.as_deref().or(last_log).unwrap_or("");
    let left_clip = Rect::new(area.x, area.y, right_x.saturating_sub(area.x + 1), 1);
    painter.text_clipped(Pos::new(area.x + 1, area.y), left, style, left_clip);
    painter.text_clipped(Pos::new(right_x, area.y), right, style, area);
}
