use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub keybindings: Vec<KeybindingRule>,
    #[serde(default)]
    pub theme: ThemeSettings,
    #[serde(default)]
    pub sidebar: SidebarSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingRule {
    pub key: String,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focused_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_fg: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            accent_fg: Some("yellow".to_string()),
            header_fg: Some("cyan".to_string()),
            focused_bg: Some("#1f2a38".to_string()),
            hover_bg: Some("dark_gray".to_string()),
            muted_fg: Some("dark_gray".to_string()),
            danger_fg: Some("red".to_string()),
            separator: Some("dark_gray".to_string()),
            status_bg: None,
            status_fg: Some("white".to_string()),
        }
    }
}

/// Sidebar behaviour. Missing keys fall back to the defaults one by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarSettings {
    /// Delay between gaining focus and scrolling the row into view.
    pub scroll_delay_ms: u64,
    pub smooth_scroll: bool,
    /// Lines per mouse-wheel step.
    pub scroll_lines: u16,
    pub width_percent: u16,
    pub min_width: u16,
}

impl Default for SidebarSettings {
    fn default() -> Self {
        Self {
            scroll_delay_ms: 100,
            smooth_scroll: true,
            scroll_lines: 3,
            width_percent: 40,
            min_width: 32,
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
