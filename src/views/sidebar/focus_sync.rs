//! 焦点同步：只在外部焦点布尔值发生变化时驱动折叠状态。

use super::collapse::CollapseController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTransition {
    Gained,
    Lost,
}

/// Remembers the last observed focus value. The first observation only primes it.
#[derive(Debug, Clone, Default)]
pub struct FocusSync {
    previous: Option<bool>,
}

impl FocusSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_primed(&self) -> bool {
        self.previous.is_some()
    }

    pub fn observe(&mut self, focused: bool) -> Option<FocusTransition> {
        let previous = self.previous.replace(focused)?;
        match (previous, focused) {
            (false, true) => Some(FocusTransition::Gained),
            (true, false) => Some(FocusTransition::Lost),
            _ => None,
        }
    }

    /// Observes `focused` and applies the resulting transition to `collapse`.
    /// The caller schedules the scroll on `Gained`.
    pub fn sync(
        &mut self,
        focused: bool,
        collapse: &mut CollapseController,
    ) -> Option<FocusTransition> {
        let transition = self.observe(focused)?;
        match transition {
            FocusTransition::Gained => collapse.force_set(false),
            FocusTransition::Lost => collapse.force_set(true),
        }
        Some(transition)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/sidebar/focus_sync.rs"]
mod tests;
