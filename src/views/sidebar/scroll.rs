//! Delayed scroll-into-view.
//!
//! A row owns an [`ScrollAnchor`] that layout keeps pointed at the row's header line. Pending
//! requests only hold a weak handle, so a row dropped before its request is due simply makes the
//! request a no-op.

use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct ScrollAnchor {
    line: Cell<Option<usize>>,
}

impl ScrollAnchor {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Content line of the header, `None` while the row is not laid out.
    pub fn line(&self) -> Option<usize> {
        self.line.get()
    }

    pub fn set_line(&self, line: Option<usize>) {
        self.line.set(line);
    }
}

#[derive(Debug, Clone)]
pub struct ScrollRequest {
    due: Instant,
    anchor: Weak<ScrollAnchor>,
}

impl ScrollRequest {
    pub fn due(&self) -> Instant {
        self.due
    }

    pub fn is_live(&self) -> bool {
        self.anchor.strong_count() > 0
    }
}

#[derive(Debug)]
pub struct ScrollScheduler {
    delay: Duration,
    pending: Vec<ScrollRequest>,
}

impl ScrollScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Vec::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn schedule(&mut self, now: Instant, anchor: &Rc<ScrollAnchor>) {
        self.pending.push(ScrollRequest {
            due: now + self.delay,
            anchor: Rc::downgrade(anchor),
        });
    }

    pub fn pending(&self) -> &[ScrollRequest] {
        &self.pending
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|r| r.due).min()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Fires every request due at `now` and returns the header line to scroll to, taken from
    /// the most recently scheduled live request.
    pub fn poll(&mut self, now: Instant) -> Option<usize> {
        let mut target = None;
        let mut kept = Vec::with_capacity(self.pending.len());
        for request in self.pending.drain(..) {
            if request.due > now {
                kept.push(request);
                continue;
            }
            match request.anchor.upgrade() {
                Some(anchor) => {
                    if let Some(line) = anchor.line() {
                        target = Some(line);
                    }
                }
                None => tracing::debug!("scroll target dropped before it was due"),
            }
        }
        self.pending = kept;
        target
    }
}

/// Vertical scroll offset of the sidebar, optionally eased toward a target.
#[derive(Debug, Clone, Default)]
pub struct SmoothScroll {
    offset: usize,
    target: Option<usize>,
    smooth: bool,
}

impl SmoothScroll {
    pub fn new(smooth: bool) -> Self {
        Self {
            smooth,
            ..Self::default()
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn set_smooth(&mut self, smooth: bool) {
        self.smooth = smooth;
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Aligns `line` with the top of the viewport.
    pub fn scroll_to(&mut self, line: usize, max_offset: usize) {
        let line = line.min(max_offset);
        if self.smooth && line != self.offset {
            self.target = Some(line);
        } else {
            self.offset = line;
            self.target = None;
        }
    }

    /// Immediate relative scroll, e.g. from the mouse wheel. Cancels any animation.
    pub fn scroll_by(&mut self, delta: isize, max_offset: usize) {
        self.target = None;
        self.offset = self.offset.saturating_add_signed(delta).min(max_offset);
    }

    pub fn clamp(&mut self, max_offset: usize) {
        self.offset = self.offset.min(max_offset);
        if let Some(target) = self.target.as_mut() {
            *target = (*target).min(max_offset);
        }
    }

    /// Moves half of the remaining distance (at least one line). Returns whether the offset
    /// changed.
    pub fn step(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let distance = target.abs_diff(self.offset);
        let stride = distance.div_ceil(2).max(1);
        if target > self.offset {
            self.offset += stride.min(distance);
        } else {
            self.offset -= stride.min(distance);
        }
        if self.offset == target {
            self.target = None;
        }
        distance > 0
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/sidebar/scroll.rs"]
mod tests;
