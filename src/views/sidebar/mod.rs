//! 侧边栏视图：把块树展开成可滚动的行列表（纯渲染 + 命中测试）。
//!
//! Every visible block gets a [`BlockRow`] keyed by its id. Root blocks are always visible;
//! children only while their parent row is expanded. `sync` reconciles rows with the store,
//! `paint` draws the current lines and registers hit nodes, and the `handle_*` methods turn
//! runtime events into store commands.

pub mod actions;
pub mod collapse;
pub mod fields;
pub mod focus_sync;
pub mod label;
pub mod row;
pub mod scroll;

pub use actions::BlockActions;
pub use collapse::{CollapseController, CollapseState};
pub use fields::{display_value, field_lines, FieldLine};
pub use focus_sync::{FocusSync, FocusTransition};
pub use label::{derive_label, extract_plain_text, looks_like_markup, LabelCache};
pub use row::{BlockRow, RowState};
pub use scroll::{ScrollAnchor, ScrollRequest, ScrollScheduler, SmoothScroll};

use std::time::{Duration, Instant};

use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

use crate::app::theme::UiTheme;
use crate::kernel::services::ports::{
    BlockCommands, BlockQueries, FieldCommands, ReorderCommands, SidebarSettings,
};
use crate::kernel::AppState;
use crate::models::{BlockId, BlockPath, FieldKind, SlotRef};
use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::id::{Id, IdPath};
use crate::ui::core::input::DragPayload;
use crate::ui::core::painter::Painter;
use crate::ui::core::runtime::DragDropRules;
use crate::ui::core::style::{Mod, Style};
use crate::ui::core::tree::{Node, NodeKind, Sense, UiTree};

const INDENT: u16 = 2;
/// Columns reserved at the right edge of a header for the duplicate and remove actions.
const ACTIONS_WIDTH: u16 = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum SidebarLine {
    Header {
        id: BlockId,
        depth: u16,
    },
    /// A block whose type has no definition.
    Placeholder {
        id: BlockId,
        kind: String,
        depth: u16,
    },
    Field {
        id: BlockId,
        depth: u16,
        line: FieldLine,
    },
    SlotHeader {
        label: String,
        count: usize,
        depth: u16,
    },
    Add {
        at: SlotRef,
        kinds: Vec<String>,
        depth: u16,
    },
}

/// What a click on a sidebar hit node means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarHit {
    Header(BlockId),
    Toggle(BlockId),
    Duplicate(BlockId),
    Remove(BlockId),
    FieldToggle { id: BlockId, field: String },
    Add { at: SlotRef, kind: String },
}

impl SidebarHit {
    /// Stable hit id, equal across frames.
    pub fn id(&self) -> Id {
        let root = IdPath::root("sidebar");
        let path = match self {
            SidebarHit::Header(b) => root.push_str(b.as_str()).push_str("header"),
            SidebarHit::Toggle(b) => root.push_str(b.as_str()).push_str("toggle"),
            SidebarHit::Duplicate(b) => root.push_str(b.as_str()).push_str("duplicate"),
            SidebarHit::Remove(b) => root.push_str(b.as_str()).push_str("remove"),
            SidebarHit::FieldToggle { id, field } => {
                root.push_str(id.as_str()).push_str("field").push_str(field)
            }
            SidebarHit::Add { at, kind } => {
                let root = root.push_str("add");
                let root = match at {
                    SlotRef::Root => root.push_str(""),
                    SlotRef::Child { parent, slot } => {
                        root.push_str(parent.as_str()).push_str(slot)
                    }
                };
                root.push_str(kind)
            }
        };
        path.finish()
    }

    pub fn block_id(&self) -> Option<&BlockId> {
        match self {
            SidebarHit::Header(b)
            | SidebarHit::Toggle(b)
            | SidebarHit::Duplicate(b)
            | SidebarHit::Remove(b) => Some(b),
            SidebarHit::FieldToggle { id, .. } => Some(id),
            SidebarHit::Add { .. } => None,
        }
    }
}

pub fn sidebar_id() -> Id {
    IdPath::root("sidebar").finish()
}

pub struct SidebarPaintCtx<'a> {
    pub state: &'a AppState,
    pub theme: &'a UiTheme,
    pub hovered: Option<Id>,
    pub drag_over: Option<Id>,
}

pub struct SidebarView {
    rows: FxHashMap<BlockId, BlockRow>,
    lines: Vec<SidebarLine>,
    scroll: SmoothScroll,
    scheduler: ScrollScheduler,
    scroll_lines: u16,
    viewport_height: u16,
    area: Option<Rect>,
    hits: FxHashMap<Id, SidebarHit>,
    tokens: FxHashMap<u64, BlockId>,
    token_of: FxHashMap<BlockId, u64>,
    next_token: u64,
}

impl SidebarView {
    pub fn new(settings: &SidebarSettings) -> Self {
        Self {
            rows: FxHashMap::default(),
            lines: Vec::new(),
            scroll: SmoothScroll::new(settings.smooth_scroll),
            scheduler: ScrollScheduler::new(Duration::from_millis(settings.scroll_delay_ms)),
            scroll_lines: settings.scroll_lines.max(1),
            viewport_height: 0,
            area: None,
            hits: FxHashMap::default(),
            tokens: FxHashMap::default(),
            token_of: FxHashMap::default(),
            next_token: 0,
        }
    }

    pub fn apply_settings(&mut self, settings: &SidebarSettings) {
        self.scroll.set_smooth(settings.smooth_scroll);
        self.scheduler
            .set_delay(Duration::from_millis(settings.scroll_delay_ms));
        self.scroll_lines = settings.scroll_lines.max(1);
    }

    pub fn row(&self, id: &BlockId) -> Option<&BlockRow> {
        self.rows.get(id)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn lines(&self) -> &[SidebarLine] {
        &self.lines
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll.offset()
    }

    pub fn scheduler(&self) -> &ScrollScheduler {
        &self.scheduler
    }

    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.area.is_some_and(|a| a.contains(pos))
    }

    pub fn hit(&self, id: Id) -> Option<&SidebarHit> {
        self.hits.get(&id)
    }

    pub fn block_for_token(&self, token: u64) -> Option<&BlockId> {
        self.tokens.get(&token)
    }

    /// Earliest pending scroll, for the event loop's poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    fn max_offset(&self) -> usize {
        self.lines
            .len()
            .saturating_sub(self.viewport_height as usize)
    }

    /// Reconciles rows with the store: mounts newly visible blocks, feeds focus to existing
    /// rows, refreshes paths and labels, and drops rows that are no longer visible.
    pub fn sync(&mut self, state: &AppState, now: Instant) {
        let mut lines = Vec::new();
        let mut seen = FxHashSet::default();
        for (index, id) in state.tree.root_ids().iter().enumerate() {
            self.sync_block(state, id, BlockPath::root(index), 0, now, &mut seen, &mut lines);
        }
        lines.push(SidebarLine::Add {
            at: SlotRef::Root,
            kinds: state.definitions.kinds().map(str::to_string).collect(),
            depth: 0,
        });

        let before = self.rows.len();
        self.rows.retain(|id, _| seen.contains(id));
        if self.rows.len() != before {
            tracing::debug!(dropped = before - self.rows.len(), "sidebar rows unmounted");
        }
        self.token_of.retain(|id, _| seen.contains(id));
        self.tokens.retain(|_, id| seen.contains(id));

        for (index, line) in lines.iter().enumerate() {
            if let SidebarLine::Header { id, .. } | SidebarLine::Placeholder { id, .. } = line {
                if let Some(row) = self.rows.get(id) {
                    row.anchor().set_line(Some(index));
                }
            }
        }
        self.lines = lines;
        let max = self.max_offset();
        self.scroll.clamp(max);
    }

    #[allow(clippy::too_many_arguments)]
    fn sync_block(
        &mut self,
        state: &AppState,
        id: &BlockId,
        path: BlockPath,
        depth: u16,
        now: Instant,
        seen: &mut FxHashSet<BlockId>,
        lines: &mut Vec<SidebarLine>,
    ) {
        let Some(block) = state.tree.get(id) else {
            return;
        };
        seen.insert(id.clone());
        self.token_for(id);

        let resolvable = state.resolve_definition(&block.kind).is_some();
        match self.rows.get_mut(id) {
            Some(row) if row.is_missing() != resolvable => {
                row.set_path(path.clone());
                row.refresh(block, state);
                row.observe_focus(state.is_focused(id), &mut self.scheduler, now);
            }
            _ => {
                tracing::debug!(block = %id, kind = %block.kind, "row mounted");
                self.rows
                    .insert(id.clone(), BlockRow::mount(block, path.clone(), state));
            }
        }

        let Some(row) = self.rows.get(id) else {
            return;
        };
        if row.is_missing() {
            lines.push(SidebarLine::Placeholder {
                id: id.clone(),
                kind: block.kind.to_string(),
                depth,
            });
            return;
        }
        lines.push(SidebarLine::Header {
            id: id.clone(),
            depth,
        });
        if !row.is_expanded() {
            return;
        }
        let Some(definition) = state.resolve_definition(&block.kind) else {
            return;
        };

        for line in field_lines(definition, block) {
            match line {
                FieldLine::Slot {
                    field,
                    label,
                    allowed,
                } => {
                    let children = state.tree.children(id, &field);
                    lines.push(SidebarLine::SlotHeader {
                        label,
                        count: children.len(),
                        depth: depth + 1,
                    });
                    for (index, child) in children.iter().enumerate() {
                        let child_path = path.child(&field, index);
                        self.sync_block(state, child, child_path, depth + 2, now, seen, lines);
                    }
                    let kinds = if allowed.is_empty() {
                        state.definitions.kinds().map(str::to_string).collect()
                    } else {
                        allowed
                    };
                    lines.push(SidebarLine::Add {
                        at: SlotRef::Child {
                            parent: id.clone(),
                            slot: field.as_str().into(),
                        },
                        kinds,
                        depth: depth + 2,
                    });
                }
                scalar => lines.push(SidebarLine::Field {
                    id: id.clone(),
                    depth: depth + 1,
                    line: scalar,
                }),
            }
        }
    }

    fn token_for(&mut self, id: &BlockId) -> u64 {
        if let Some(&token) = self.token_of.get(id) {
            return token;
        }
        self.next_token += 1;
        let token = self.next_token;
        self.token_of.insert(id.clone(), token);
        self.tokens.insert(token, id.clone());
        token
    }

    /// Fires due scroll requests and advances smooth scrolling. Returns whether a redraw is
    /// needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.scroll.offset();
        let max = self.max_offset();
        if let Some(line) = self.scheduler.poll(now) {
            tracing::debug!(line, "scrolling focused row into view");
            self.scroll.scroll_to(line, max);
        }
        self.scroll.step();
        self.scroll.offset() != before || self.scroll.is_animating()
    }

    pub fn handle_scroll(&mut self, delta: i16) {
        let lines = delta as isize * self.scroll_lines as isize;
        let max = self.max_offset();
        self.scroll.scroll_by(lines, max);
    }

    /// Routes a click on one of the sidebar's hit nodes. Returns whether the click was ours.
    pub fn handle_click<C>(&mut self, id: Id, state: &AppState, commands: &mut C) -> bool
    where
        C: BlockCommands + FieldCommands + ?Sized,
    {
        let Some(hit) = self.hits.get(&id).cloned() else {
            return false;
        };
        match hit {
            SidebarHit::Header(block) => {
                if let Some(row) = self.rows.get_mut(&block) {
                    row.click_header(commands);
                }
            }
            SidebarHit::Toggle(block) => {
                if let Some(row) = self.rows.get_mut(&block) {
                    row.click_toggle();
                }
            }
            SidebarHit::Duplicate(block) => {
                if let (Some(row), Some(data)) = (self.rows.get(&block), state.tree.get(&block)) {
                    row.duplicate(data, commands);
                }
            }
            SidebarHit::Remove(block) => {
                if let (Some(row), Some(data)) = (self.rows.get(&block), state.tree.get(&block)) {
                    row.remove(data, commands);
                }
            }
            SidebarHit::FieldToggle { id, field } => {
                let current = state
                    .tree
                    .get(&id)
                    .and_then(|b| b.field(&field))
                    .is_some_and(fields::is_truthy);
                commands.set_field(&id, &field, Value::Bool(!current));
            }
            SidebarHit::Add { at, kind } => commands.insert_block(at, &kind),
        }
        true
    }

    /// Persists a drop of one row onto another as "move before the target".
    pub fn handle_drop<C: ReorderCommands + ?Sized>(
        &self,
        payload: &DragPayload,
        target: &Node,
        commands: &mut C,
    ) -> bool {
        let DragPayload::Block { token } = payload;
        let NodeKind::BlockRow {
            token: target_token,
        } = target.kind
        else {
            return false;
        };
        let (Some(id), Some(before)) = (self.tokens.get(token), self.tokens.get(&target_token))
        else {
            return false;
        };
        if id == before {
            return false;
        }
        commands.move_block(id, before);
        true
    }

    pub fn paint(
        &mut self,
        painter: &mut Painter,
        tree: &mut UiTree,
        area: Rect,
        ctx: &SidebarPaintCtx<'_>,
    ) {
        let hovered_block = ctx
            .hovered
            .and_then(|id| self.hits.get(&id))
            .and_then(SidebarHit::block_id)
            .cloned();

        self.area = Some(area);
        self.viewport_height = area.h;
        self.hits.clear();
        let max = self.max_offset();
        self.scroll.clamp(max);

        painter.fill_rect(area, Style::default());
        tree.push(Node::new(
            sidebar_id(),
            area,
            Sense::HOVER | Sense::SCROLL,
            NodeKind::Sidebar,
        ));
        if area.is_empty() {
            return;
        }

        let lines = std::mem::take(&mut self.lines);
        let offset = self.scroll.offset();
        for (dy, line) in lines.iter().skip(offset).take(area.h as usize).enumerate() {
            let rect = area.row(dy as u16);
            match line {
                SidebarLine::Header { id, depth } => {
                    let hovered = hovered_block.as_ref() == Some(id);
                    self.paint_header(painter, tree, rect, id, *depth, hovered, ctx);
                }
                SidebarLine::Placeholder { kind, depth, .. } => {
                    let x = indent_x(rect, *depth);
                    painter.text_clipped(
                        Pos::new(x, rect.y),
                        format!("? Unknown block type \"{kind}\""),
                        Style::default()
                            .fg(ctx.theme.muted_fg)
                            .add_mod(Mod::ITALIC),
                        rect,
                    );
                }
                SidebarLine::Field { id, depth, line } => {
                    self.paint_field(painter, tree, rect, id, *depth, line, ctx.theme);
                }
                SidebarLine::SlotHeader {
                    label,
                    count,
                    depth,
                } => {
                    let x = indent_x(rect, *depth);
                    painter.text_clipped(
                        Pos::new(x, rect.y),
                        format!("{label} ({count})"),
                        Style::default().fg(ctx.theme.muted_fg).add_mod(Mod::BOLD),
                        rect,
                    );
                }
                SidebarLine::Add { at, kinds, depth } => {
                    self.paint_add(painter, tree, rect, at, kinds, *depth, ctx.theme);
                }
            }
        }
        self.lines = lines;
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_header(
        &mut self,
        painter: &mut Painter,
        tree: &mut UiTree,
        rect: Rect,
        id: &BlockId,
        depth: u16,
        hovered: bool,
        ctx: &SidebarPaintCtx<'_>,
    ) {
        let Some(row) = self.rows.get(id) else {
            return;
        };
        let theme = ctx.theme;
        let header = SidebarHit::Header(id.clone());
        let header_id = header.id();
        let drop_target = ctx.drag_over == Some(header_id);

        let bg = if ctx.state.focus.as_ref() == Some(id) {
            Some(theme.focused_bg)
        } else if hovered || drop_target {
            Some(theme.hover_bg)
        } else {
            None
        };
        let base = match bg {
            Some(bg) => {
                painter.fill_rect(rect, Style::default().bg(bg));
                Style::default().bg(bg)
            }
            None => Style::default(),
        };

        let x0 = indent_x(rect, depth);
        let text_clip = Rect::new(rect.x, rect.y, rect.w.saturating_sub(ACTIONS_WIDTH), 1);
        let glyph = if row.is_expanded() { "▾" } else { "▸" };
        painter.text_clipped(
            Pos::new(x0, rect.y),
            glyph,
            base.fg(theme.accent_fg),
            text_clip,
        );

        let title = row.title().unwrap_or_default();
        let title_x = x0.saturating_add(2);
        painter.text_clipped(
            Pos::new(title_x, rect.y),
            title,
            base.fg(theme.header_fg).add_mod(Mod::BOLD),
            text_clip,
        );
        if let Some(label) = row.label() {
            let label_x = title_x.saturating_add(title.width() as u16 + 2);
            painter.text_clipped(
                Pos::new(label_x, rect.y),
                label,
                base.fg(theme.muted_fg).add_mod(Mod::ITALIC),
                text_clip,
            );
        }
        if drop_target {
            painter.style_rect(rect, Style::default().add_mod(Mod::UNDERLINE));
        }

        let token = self.token_of.get(id).copied().unwrap_or_default();
        tree.push(Node::new(
            header_id,
            rect,
            Sense::HOVER | Sense::CLICK | Sense::DRAG_SOURCE | Sense::DROP_TARGET,
            NodeKind::BlockRow { token },
        ));
        self.hits.insert(header_id, header);

        let toggle = SidebarHit::Toggle(id.clone());
        let toggle_rect = Rect::new(x0, rect.y, 1, 1).intersect(text_clip);
        tree.push(Node::new(
            toggle.id(),
            toggle_rect,
            Sense::HOVER | Sense::CLICK,
            NodeKind::Button,
        ));
        self.hits.insert(toggle.id(), toggle);

        if rect.w < ACTIONS_WIDTH * 2 {
            return;
        }
        let (duplicate_style, remove_style) = if hovered {
            (base.fg(theme.accent_fg), base.fg(theme.danger_fg))
        } else {
            (base.fg(theme.muted_fg), base.fg(theme.muted_fg))
        };
        let actions = [
            (SidebarHit::Duplicate(id.clone()), "⧉", 4, duplicate_style),
            (SidebarHit::Remove(id.clone()), "✕", 2, remove_style),
        ];
        for (hit, glyph, from_right, style) in actions {
            let x = rect.right() - from_right;
            painter.text(Pos::new(x, rect.y), glyph, style);
            tree.push(Node::new(
                hit.id(),
                Rect::new(x, rect.y, 1, 1),
                Sense::HOVER | Sense::CLICK,
                NodeKind::Button,
            ));
            self.hits.insert(hit.id(), hit);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_field(
        &mut self,
        painter: &mut Painter,
        tree: &mut UiTree,
        rect: Rect,
        id: &BlockId,
        depth: u16,
        line: &FieldLine,
        theme: &UiTheme,
    ) {
        let FieldLine::Scalar {
            field,
            label,
            value,
            kind,
        } = line
        else {
            return;
        };
        let x = indent_x(rect, depth);
        let pos = Pos::new(x, rect.y);

        if *kind == FieldKind::Checkbox {
            let text = format!("{value} {label}");
            painter.text_clipped(pos, text.as_str(), Style::default().fg(theme.text_fg), rect);
            let hit = SidebarHit::FieldToggle {
                id: id.clone(),
                field: field.clone(),
            };
            let hit_rect = Rect::new(x, rect.y, text.width() as u16, 1).intersect(rect);
            tree.push(Node::new(
                hit.id(),
                hit_rect,
                Sense::HOVER | Sense::CLICK,
                NodeKind::Button,
            ));
            self.hits.insert(hit.id(), hit);
            return;
        }

        let prefix = format!("{label}: ");
        painter.text_clipped(pos, prefix.as_str(), Style::default().fg(theme.muted_fg), rect);
        painter.text_clipped(
            Pos::new(x.saturating_add(prefix.width() as u16), rect.y),
            value.as_str(),
            Style::default().fg(theme.text_fg),
            rect,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_add(
        &mut self,
        painter: &mut Painter,
        tree: &mut UiTree,
        rect: Rect,
        at: &SlotRef,
        kinds: &[String],
        depth: u16,
        theme: &UiTheme,
    ) {
        let mut x = indent_x(rect, depth);
        for kind in kinds {
            if x >= rect.right() {
                break;
            }
            let text = format!("+ {kind}");
            let w = text.width() as u16;
            painter.text_clipped(
                Pos::new(x, rect.y),
                text,
                Style::default().fg(theme.accent_fg),
                rect,
            );
            let hit = SidebarHit::Add {
                at: at.clone(),
                kind: kind.clone(),
            };
            tree.push(Node::new(
                hit.id(),
                Rect::new(x, rect.y, w, 1).intersect(rect),
                Sense::HOVER | Sense::CLICK,
                NodeKind::Button,
            ));
            self.hits.insert(hit.id(), hit);
            x = x.saturating_add(w + 2);
        }
    }
}

fn indent_x(rect: Rect, depth: u16) -> u16 {
    rect.x
        .saturating_add(depth.saturating_mul(INDENT))
        .min(rect.right())
}

impl DragDropRules for SidebarView {
    fn payload_for_source(&self, source: &Node) -> Option<DragPayload> {
        match source.kind {
            NodeKind::BlockRow { token } if self.tokens.contains_key(&token) => {
                Some(DragPayload::Block { token })
            }
            _ => None,
        }
    }

    fn can_drop(&self, payload: &DragPayload, target: &Node) -> bool {
        let DragPayload::Block { token } = payload;
        matches!(target.kind, NodeKind::BlockRow { token: t } if t != *token)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/sidebar/mod.rs"]
mod tests;
