//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod keybinding;
pub mod runtime;
pub mod settings;

pub use keybinding::KeybindingService;
pub use runtime::{AppMessage, AsyncRuntime};
pub use settings::{
    ensure_log_dir, ensure_settings_file, get_log_dir, get_settings_path, load_settings,
    load_settings_from, parse_keybinding,
};
