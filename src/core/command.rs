//! 命令系统：语义命令定义
//!
//! Command 只描述意图，不关心具体按键；按键映射见 `KeybindingService`。

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    Save,
    Quit,
    ClearFocus,
    ScrollUp,
    ScrollDown,

    Custom(String),
}

impl Command {
    pub fn name(&self) -> &str {
        match self {
            Command::Save => "save",
            Command::Quit => "quit",
            Command::ClearFocus => "clearFocus",
            Command::ScrollUp => "scrollUp",
            Command::ScrollDown => "scrollDown",
            Command::Custom(name) => name,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "save" => Command::Save,
            "quit" => Command::Quit,
            "clearFocus" => Command::ClearFocus,
            "scrollUp" => Command::ScrollUp,
            "scrollDown" => Command::ScrollDown,
            other => Command::Custom(other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
