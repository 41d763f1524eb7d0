//! 单个块的侧边栏行：折叠、焦点同步、标签与块操作的组合。

use std::rc::Rc;
use std::time::Instant;

use crate::kernel::services::ports::{BlockCommands, BlockQueries};
use crate::models::{Block, BlockId, BlockPath};

use super::actions::BlockActions;
use super::collapse::{CollapseController, CollapseState};
use super::focus_sync::{FocusSync, FocusTransition};
use super::label::LabelCache;
use super::scroll::{ScrollAnchor, ScrollScheduler};

#[derive(Debug)]
pub struct ReadyRow {
    title: String,
    collapse: CollapseController,
    focus: FocusSync,
    label_cache: LabelCache,
    label: Option<String>,
}

/// A row either has a definition for its block type or is a bare placeholder.
#[derive(Debug)]
pub enum RowState {
    Ready(ReadyRow),
    Missing,
}

#[derive(Debug)]
pub struct BlockRow {
    id: BlockId,
    kind: String,
    path: BlockPath,
    anchor: Rc<ScrollAnchor>,
    state: RowState,
}

impl BlockRow {
    /// Mounts a row. The collapse state is taken from the focus value seen now, and that value
    /// primes focus sync without firing a transition.
    pub fn mount<Q: BlockQueries + ?Sized>(block: &Block, path: BlockPath, queries: &Q) -> Self {
        let state = match queries.resolve_definition(&block.kind) {
            Some(definition) => {
                let focused = queries.is_focused(&block.id);
                let mut focus = FocusSync::new();
                focus.observe(focused);
                let mut label_cache = LabelCache::new();
                let label = label_cache.derive(block, Some(definition));
                RowState::Ready(ReadyRow {
                    title: definition.title.clone(),
                    collapse: CollapseController::new(focused),
                    focus,
                    label_cache,
                    label,
                })
            }
            None => RowState::Missing,
        };
        Self {
            id: block.id.clone(),
            kind: block.kind.to_string(),
            path,
            anchor: ScrollAnchor::new(),
            state,
        }
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn path(&self) -> &BlockPath {
        &self.path
    }

    /// Rows are keyed by identity; the reorder container may move them at any time.
    pub fn set_path(&mut self, path: BlockPath) {
        self.path = path;
    }

    pub fn anchor(&self) -> &Rc<ScrollAnchor> {
        &self.anchor
    }

    pub fn state(&self) -> &RowState {
        &self.state
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.state, RowState::Missing)
    }

    /// `None` for placeholder rows.
    pub fn collapse_state(&self) -> Option<CollapseState> {
        match &self.state {
            RowState::Ready(row) => Some(row.collapse.state()),
            RowState::Missing => None,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.collapse_state() == Some(CollapseState::Expanded)
    }

    pub fn title(&self) -> Option<&str> {
        match &self.state {
            RowState::Ready(row) => Some(&row.title),
            RowState::Missing => None,
        }
    }

    /// The derived label, shown only while collapsed.
    pub fn label(&self) -> Option<&str> {
        match &self.state {
            RowState::Ready(row) if row.collapse.is_collapsed() => row.label.as_deref(),
            _ => None,
        }
    }

    /// Re-derives title and label from the current block data.
    pub fn refresh<Q: BlockQueries + ?Sized>(&mut self, block: &Block, queries: &Q) {
        let RowState::Ready(row) = &mut self.state else {
            return;
        };
        if let Some(definition) = queries.resolve_definition(&block.kind) {
            if row.title != definition.title {
                row.title = definition.title.clone();
            }
            row.label = row.label_cache.derive(block, Some(definition));
        }
    }

    /// Feeds the current focus value. Gaining focus expands the row and schedules a scroll to
    /// its header; losing it collapses the row.
    pub fn observe_focus(
        &mut self,
        focused: bool,
        scroll: &mut ScrollScheduler,
        now: Instant,
    ) -> Option<FocusTransition> {
        let RowState::Ready(row) = &mut self.state else {
            return None;
        };
        let transition = row.focus.sync(focused, &mut row.collapse)?;
        tracing::debug!(block = %self.id, ?transition, "row focus transition");
        if transition == FocusTransition::Gained {
            scroll.schedule(now, &self.anchor);
        }
        Some(transition)
    }

    /// Header click: a collapsed row asks for focus first, then toggles.
    pub fn click_header<C: BlockCommands + ?Sized>(&mut self, commands: &mut C) {
        let RowState::Ready(row) = &mut self.state else {
            return;
        };
        if row.collapse.is_collapsed() {
            commands.request_focus(&self.path);
        }
        row.collapse.toggle();
    }

    /// Toggle glyph click: toggles without touching focus.
    pub fn click_toggle(&mut self) {
        if let RowState::Ready(row) = &mut self.state {
            row.collapse.toggle();
        }
    }

    pub fn remove<C: BlockCommands + ?Sized>(&self, block: &Block, commands: &mut C) {
        if !self.is_missing() {
            BlockActions::new(commands).remove(block);
        }
    }

    pub fn duplicate<C: BlockCommands + ?Sized>(&self, block: &Block, commands: &mut C) {
        if !self.is_missing() {
            BlockActions::new(commands).duplicate(block);
        }
    }

    /// Markup extractions performed for this row's label.
    pub fn label_extractions(&self) -> usize {
        match &self.state {
            RowState::Ready(row) => row.label_cache.extractions(),
            RowState::Missing => 0,
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/sidebar/row.rs"]
mod tests;
