//! 终端模式守卫：进入 raw/alternate screen，退出（含 panic、信号）时恢复。

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub trait TerminalOps: Send + Sync + 'static {
    fn setup(&self) -> io::Result<()>;
    fn restore(&self) -> io::Result<()>;
}

/// Optional terminal reporting modes, enabled on setup and disabled on restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalFeatures {
    pub mouse: bool,
    pub focus_events: bool,
    pub bracketed_paste: bool,
}

impl Default for TerminalFeatures {
    fn default() -> Self {
        Self {
            mouse: true,
            focus_events: true,
            bracketed_paste: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct CrosstermTerminalOps {
    features: TerminalFeatures,
}

impl CrosstermTerminalOps {
    pub fn new(features: TerminalFeatures) -> Self {
        Self { features }
    }
}

impl TerminalOps for CrosstermTerminalOps {
    fn setup(&self) -> io::Result<()> {
        use crossterm::event::{EnableBracketedPaste, EnableFocusChange, EnableMouseCapture};
        use crossterm::terminal::{enable_raw_mode, EnterAlternateScreen};
        use crossterm::{cursor, execute};

        enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        if self.features.mouse {
            execute!(out, EnableMouseCapture)?;
        }
        if self.features.focus_events {
            execute!(out, EnableFocusChange)?;
        }
        if self.features.bracketed_paste {
            execute!(out, EnableBracketedPaste)?;
        }
        Ok(())
    }

    fn restore(&self) -> io::Result<()> {
        use crossterm::event::{DisableBracketedPaste, DisableFocusChange, DisableMouseCapture};
        use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};
        use crossterm::{cursor, execute};

        // Every step runs even after a failure; the first error is reported.
        let mut out = io::stdout();
        let steps = [
            self.features
                .bracketed_paste
                .then(|| execute!(out, DisableBracketedPaste)),
            self.features
                .focus_events
                .then(|| execute!(out, DisableFocusChange)),
            self.features
                .mouse
                .then(|| execute!(out, DisableMouseCapture)),
            Some(execute!(out, LeaveAlternateScreen, cursor::Show)),
            Some(disable_raw_mode()),
        ];
        steps.into_iter().flatten().collect::<io::Result<Vec<()>>>()?;
        Ok(())
    }
}

/// Restores the terminal at most once, from whichever path gets there first.
#[derive(Clone)]
pub struct TerminalRestorer {
    restored: Arc<AtomicBool>,
    ops: Arc<dyn TerminalOps>,
}

impl TerminalRestorer {
    pub fn restore(&self) -> io::Result<()> {
        if self.restored.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.ops.restore()
    }

    pub fn is_restored(&self) -> bool {
        self.restored.load(Ordering::SeqCst)
    }
}

pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_ops(Arc::new(CrosstermTerminalOps::default()))
    }

    pub fn with_ops(ops: Arc<dyn TerminalOps>) -> io::Result<Self> {
        ops.setup()?;
        Ok(Self {
            restorer: TerminalRestorer {
                restored: Arc::new(AtomicBool::new(false)),
                ops,
            },
        })
    }

    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restorer.restore() {
            tracing::error!(error = %e, "terminal restore failed");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
}

impl TerminationSignal {
    pub fn exit_code(self) -> i32 {
        match self {
            TerminationSignal::SigInt => 130,
            TerminationSignal::SigTerm => 143,
        }
    }
}

/// Forwards SIGINT/SIGTERM to the main loop. If the loop has not exited after a grace period
/// the terminal is restored here and the process exits.
#[cfg(unix)]
pub fn install_termination_signals(
    restorer: TerminalRestorer,
    tx: std::sync::mpsc::Sender<TerminationSignal>,
) -> io::Result<std::thread::JoinHandle<()>> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use std::time::Duration;

    const GRACE: Duration = Duration::from_secs(2);

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    Ok(std::thread::spawn(move || {
        let Some(signal) = signals.forever().find_map(|sig| match sig {
            SIGINT => Some(TerminationSignal::SigInt),
            SIGTERM => Some(TerminationSignal::SigTerm),
            _ => None,
        }) else {
            return;
        };

        tracing::info!(?signal, "termination signal received");
        let _ = tx.send(signal);

        std::thread::sleep(GRACE);
        let _ = restorer.restore();
        std::process::exit(signal.exit_code());
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
