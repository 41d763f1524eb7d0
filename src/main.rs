use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use zbloc::app::Workbench;
use zbloc::core::view::View;
use zbloc::kernel::services::adapters::{ensure_settings_file, get_settings_path, load_settings_from};
use zbloc::kernel::services::adapters::AsyncRuntime;
use zbloc::kernel::services::ports::Settings;
use zbloc::models::DefinitionRegistry;
use zbloc::tui::poll_input;
use zbloc::tui::terminal_guard::{TerminalGuard, TerminationSignal};
use zbloc::ui::backend::terminal::RatatuiTerminal;

mod logging;

const FRAME_TIMEOUT: Duration = Duration::from_millis(16);
const USAGE: &str = "usage: zbloc <document.json> [--definitions=<path>]";

#[derive(Debug, PartialEq, Eq)]
struct Startup {
    document: PathBuf,
    definitions: Option<PathBuf>,
}

/// Resolves CLI arguments against `cwd`. The document may not exist yet (it is created on
/// save) but its directory must; a definitions file must exist.
fn resolve_startup_paths<I, S>(cwd: &Path, args: I) -> io::Result<Startup>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut document = None;
    let mut definitions = None;
    for arg in args {
        let arg = arg.as_ref();
        if let Some(path) = arg.strip_prefix("--definitions=") {
            definitions = Some(cwd.join(path));
        } else if arg.starts_with("--") || document.is_some() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, USAGE));
        } else {
            document = Some(cwd.join(arg));
        }
    }

    let document =
        document.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, USAGE))?;
    let parent = document.parent().unwrap_or(cwd);
    if !parent.as_os_str().is_empty() && !parent.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("directory not found: {}", parent.display()),
        ));
    }
    if let Some(path) = definitions.as_ref().filter(|p| !p.is_file()) {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("definitions not found: {}", path.display()),
        ));
    }

    Ok(Startup {
        document,
        definitions,
    })
}

fn load_definitions(path: Option<&Path>) -> io::Result<DefinitionRegistry> {
    let Some(path) = path else {
        return Ok(DefinitionRegistry::builtin());
    };
    DefinitionRegistry::load(path).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{}: {e}", path.display()),
        )
    })
}

fn load_user_settings() -> Settings {
    let path = match ensure_settings_file() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!(error = %e, "cannot create settings file");
            get_settings_path()
        }
    };
    path.and_then(|path| load_settings_from(&path))
        .unwrap_or_default()
}

fn main() -> io::Result<()> {
    let cwd = std::env::current_dir()?;
    let startup = match resolve_startup_paths(&cwd, std::env::args().skip(1)) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("zbloc: {e}");
            std::process::exit(2);
        }
    };

    let mut log_guard = logging::init();
    let log_rx = log_guard.as_mut().and_then(|guard| guard.take_log_rx());

    let definitions = load_definitions(startup.definitions.as_deref())?;
    let settings = load_user_settings();

    let (msg_tx, msg_rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(msg_tx)?;
    let mut workbench = Workbench::new(startup.document, definitions, runtime, log_rx, settings);

    let guard = TerminalGuard::new()?;
    let restorer = guard.restorer();
    logging::install_panic_hook(move || {
        let _ = restorer.restore();
    });

    let (signal_tx, signal_rx) = mpsc::channel::<TerminationSignal>();
    #[cfg(unix)]
    let _signals =
        zbloc::tui::terminal_guard::install_termination_signals(guard.restorer(), signal_tx)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let mut terminal = RatatuiTerminal::new(io::stdout())?;
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|backend, area| workbench.render(backend, area))?;
            dirty = false;
        }

        if let Ok(signal) = signal_rx.try_recv() {
            tracing::info!(?signal, "shutting down");
            break;
        }

        let timeout = workbench
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .map_or(FRAME_TIMEOUT, |until| until.min(FRAME_TIMEOUT));

        if let Some(event) = poll_input(timeout)? {
            if workbench.handle_input(&event).is_quit() {
                break;
            }
            dirty = true;
        }

        while let Ok(msg) = msg_rx.try_recv() {
            dirty |= workbench.handle_message(msg);
        }

        dirty |= workbench.tick(Instant::now());
        if workbench.should_quit() {
            break;
        }
    }

    drop(terminal);
    drop(guard);
    drop(log_guard);
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/cli_startup_paths.rs"]
mod tests;
