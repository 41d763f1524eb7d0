//! tracing 初始化：滚动日志文件 + 状态栏用的日志通道。

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "zbloc.log";
const DEFAULT_FILTER: &str = "zbloc=info";

pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
    log_rx: Option<Receiver<String>>,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn take_log_rx(&mut self) -> Option<Receiver<String>> {
        self.log_rx.take()
    }
}

/// Buffers one formatted event and sends its lines to the status bar channel on drop.
struct StatusLineWriter {
    buf: Vec<u8>,
    tx: Sender<String>,
}

impl Write for StatusLineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for StatusLineWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buf);
        for line in text.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            let _ = self.tx.send(line.to_string());
        }
    }
}

#[derive(Clone)]
struct StatusMakeWriter {
    tx: Sender<String>,
}

impl<'a> MakeWriter<'a> for StatusMakeWriter {
    type Writer = StatusLineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        StatusLineWriter {
            buf: Vec::with_capacity(128),
            tx: self.tx.clone(),
        }
    }
}

fn resolve_log_dir() -> io::Result<PathBuf> {
    zbloc::kernel::services::adapters::ensure_log_dir().or_else(|_| -> io::Result<PathBuf> {
        let dir = std::env::temp_dir().join("zbloc").join("logs");
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    })
}

/// Installs the global subscriber. Returns `None` if no log directory is usable or a
/// subscriber is already set.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = resolve_log_dir().ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let (log_tx, log_rx) = mpsc::channel::<String>();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // The status bar gets one short line per event, info and above.
    let status_layer = tracing_subscriber::fmt::layer()
        .with_writer(StatusMakeWriter { tx: log_tx })
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .compact()
        .with_filter(LevelFilter::INFO);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(status_layer);

    if subscriber.try_init().is_err() {
        return None;
    }

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
        log_rx: Some(log_rx),
    })
}

/// Logs panics, then hands over to `next` (typically the terminal restorer).
pub fn install_panic_hook(next: impl Fn() + Send + Sync + 'static) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "panic");
        next();
        default_hook(info);
    }));
}
