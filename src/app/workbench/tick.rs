use super::{Workbench, MAX_LOG_DRAIN_PER_TICK};
use std::sync::mpsc::TryRecvError;
use std::time::Instant;

/// 收日志、同步侧边栏、执行到期的滚动请求。
pub(super) fn tick(workbench: &mut Workbench, now: Instant) -> bool {
    let logs_changed = drain_logs(workbench);
    workbench.sidebar.sync(workbench.store.state(), now);
    let scrolled = workbench.sidebar.tick(now);
    logs_changed || scrolled
}

pub(super) fn next_deadline(workbench: &Workbench) -> Option<Instant> {
    workbench.sidebar.next_deadline()
}

/// Moves pending tracing lines into the status buffer, at most a fixed batch per tick.
/// A disconnected channel is dropped for good.
fn drain_logs(workbench: &mut Workbench) -> bool {
    let Some(rx) = workbench.log_rx.as_ref() else {
        return false;
    };

    let mut lines = Vec::new();
    let mut closed = false;
    while lines.len() < MAX_LOG_DRAIN_PER_TICK {
        match rx.try_recv() {
            Ok(line) => lines.push(line),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                closed = true;
                break;
            }
        }
    }

    if closed {
        workbench.log_rx = None;
    }
    let changed = !lines.is_empty();
    for line in lines {
        workbench.push_log_line(line);
    }
    changed
}
