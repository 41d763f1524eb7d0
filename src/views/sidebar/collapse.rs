/// Whether a row's field body is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseState {
    Collapsed,
    Expanded,
}

/// Sole owner of a row's collapse flag.
#[derive(Debug, Clone)]
pub struct CollapseController {
    collapsed: bool,
}

impl CollapseController {
    /// A row that is focused at mount starts expanded.
    pub fn new(is_focused: bool) -> Self {
        Self {
            collapsed: !is_focused,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn state(&self) -> CollapseState {
        if self.collapsed {
            CollapseState::Collapsed
        } else {
            CollapseState::Expanded
        }
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn force_set(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/sidebar/collapse.rs"]
mod tests;
