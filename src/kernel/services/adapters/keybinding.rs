//! 快捷键：按键 → 命令

use crate::core::event::{Key, KeyCode};
use crate::core::Command;
use crate::kernel::services::ports::KeybindingRule;
use rustc_hash::FxHashMap;

use super::settings::parse_keybinding;

pub struct KeybindingService {
    bindings: FxHashMap<Key, Command>,
}

impl KeybindingService {
    pub fn new() -> Self {
        Self::with_defaults()
    }

    pub fn with_defaults() -> Self {
        Self {
            bindings: default_keybindings(),
        }
    }

    pub fn resolve(&self, key: &Key) -> Option<&Command> {
        self.bindings.get(key)
    }

    pub fn bindings(&self) -> &FxHashMap<Key, Command> {
        &self.bindings
    }

    pub fn bind(&mut self, key: Key, command: Command) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: &Key) -> Option<Command> {
        self.bindings.remove(key)
    }

    /// Applies user rules on top of the current bindings. An empty command unbinds the key.
    pub fn apply_rules(&mut self, rules: &[KeybindingRule]) {
        for rule in rules {
            let Some(key) = parse_keybinding(&rule.key) else {
                tracing::warn!(key = %rule.key, "ignoring unparsable keybinding");
                continue;
            };
            if rule.command.trim().is_empty() {
                let _ = self.unbind(&key);
            } else {
                self.bind(key, Command::from_name(rule.command.trim()));
            }
        }
    }
}

impl Default for KeybindingService {
    fn default() -> Self {
        Self::new()
    }
}

fn default_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(8);

    bindings.insert(Key::ctrl(KeyCode::Char('s')), Command::Save);
    bindings.insert(Key::ctrl(KeyCode::Char('q')), Command::Quit);
    bindings.insert(Key::simple(KeyCode::Esc), Command::ClearFocus);
    bindings.insert(Key::simple(KeyCode::PageUp), Command::ScrollUp);
    bindings.insert(Key::simple(KeyCode::PageDown), Command::ScrollDown);

    bindings
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/keybinding.rs"]
mod tests;
