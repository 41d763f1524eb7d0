//! UI 主题：把可配置的颜色集中管理，避免散落在渲染代码里。

use crate::kernel::services::ports::ThemeSettings;
use crate::ui::core::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiTheme {
    pub text_fg: Color,
    pub accent_fg: Color,
    pub header_fg: Color,
    pub focused_bg: Color,
    pub hover_bg: Color,
    pub muted_fg: Color,
    pub danger_fg: Color,
    pub separator: Color,
    pub status_bg: Color,
    pub status_fg: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorSupport {
    TrueColor,
    Ansi256,
    Ansi16,
}

pub fn detect_terminal_color_support() -> TerminalColorSupport {
    if let Ok(value) = std::env::var("ZBLOC_COLOR_SUPPORT") {
        match value.trim().to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" | "rgb" => return TerminalColorSupport::TrueColor,
            "256" | "ansi256" => return TerminalColorSupport::Ansi256,
            "16" | "ansi16" | "basic" => return TerminalColorSupport::Ansi16,
            _ => {}
        }
    }

    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    let term = std::env::var("TERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    let truecolor = ["truecolor", "24bit", "direct"]
        .iter()
        .any(|tag| colorterm.contains(tag) || term.contains(tag));
    if truecolor {
        return TerminalColorSupport::TrueColor;
    }
    if term.contains("256color") {
        return TerminalColorSupport::Ansi256;
    }
    TerminalColorSupport::Ansi16
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            text_fg: Color::Reset,
            accent_fg: Color::Indexed(3),           // Yellow
            header_fg: Color::Indexed(6),           // Cyan
            focused_bg: Color::Rgb(0x1F, 0x2A, 0x38),
            hover_bg: Color::Indexed(8),            // DarkGray
            muted_fg: Color::Indexed(8),            // DarkGray
            danger_fg: Color::Indexed(1),           // Red
            separator: Color::Indexed(8),           // DarkGray
            status_bg: Color::Reset,
            status_fg: Color::Indexed(15),          // White
        }
    }
}

impl UiTheme {
    pub fn adapt_to_terminal_capabilities(&mut self) {
        self.apply_color_support(detect_terminal_color_support());
    }

    fn apply_color_support(&mut self, support: TerminalColorSupport) {
        if support == TerminalColorSupport::TrueColor {
            return;
        }
        for color in self.colors_mut() {
            *color = map_color_for_support(*color, support);
        }
    }

    fn colors_mut(&mut self) -> [&mut Color; 10] {
        [
            &mut self.text_fg,
            &mut self.accent_fg,
            &mut self.header_fg,
            &mut self.focused_bg,
            &mut self.hover_bg,
            &mut self.muted_fg,
            &mut self.danger_fg,
            &mut self.separator,
            &mut self.status_bg,
            &mut self.status_fg,
        ]
    }

    /// Overrides colors named in settings. Unparsable values keep the current color.
    pub fn apply_settings(&mut self, settings: &ThemeSettings) {
        let pairs = [
            (&settings.accent_fg, &mut self.accent_fg),
            (&settings.header_fg, &mut self.header_fg),
            (&settings.focused_bg, &mut self.focused_bg),
            (&settings.hover_bg, &mut self.hover_bg),
            (&settings.muted_fg, &mut self.muted_fg),
            (&settings.danger_fg, &mut self.danger_fg),
            (&settings.separator, &mut self.separator),
            (&settings.status_bg, &mut self.status_bg),
            (&settings.status_fg, &mut self.status_fg),
        ];
        for (value, slot) in pairs {
            if let Some(c) = value.as_deref().and_then(parse_color) {
                *slot = c;
            }
        }
    }
}

fn map_color_for_support(color: Color, support: TerminalColorSupport) -> Color {
    match (color, support) {
        (_, TerminalColorSupport::TrueColor) => color,
        (Color::Rgb(r, g, b), TerminalColorSupport::Ansi256) => {
            Color::Indexed(rgb_to_ansi256_index(r, g, b))
        }
        (Color::Rgb(r, g, b), TerminalColorSupport::Ansi16) => {
            Color::Indexed(rgb_to_ansi16_index(r, g, b))
        }
        (Color::Indexed(index), TerminalColorSupport::Ansi16) if index > 15 => {
            let (r, g, b) = ansi256_index_to_rgb(index);
            Color::Indexed(rgb_to_ansi16_index(r, g, b))
        }
        _ => color,
    }
}

fn rgb_to_ansi256_index(r: u8, g: u8, b: u8) -> u8 {
    let mut best_index = 16u8;
    let mut best_distance = u32::MAX;
    for index in 16u16..=255 {
        let index_u8 = index as u8;
        let (pr, pg, pb) = ansi256_index_to_rgb(index_u8);
        let distance = color_distance_sq(r, g, b, pr, pg, pb);
        if distance < best_distance {
            best_distance = distance;
            best_index = index_u8;
        }
    }
    best_index
}

fn rgb_to_ansi16_index(r: u8, g: u8, b: u8) -> u8 {
    let mut best_index = 0u8;
    let mut best_distance = u32::MAX;
    for (index, (pr, pg, pb)) in ANSI16_RGB.iter().copied().enumerate() {
        let distance = color_distance_sq(r, g, b, pr, pg, pb);
        if distance < best_distance {
            best_distance = distance;
            best_index = index as u8;
        }
    }
    best_index
}

fn ansi256_index_to_rgb(index: u8) -> (u8, u8, u8) {
    if index <= 15 {
        return ANSI16_RGB[index as usize];
    }
    if (16..=231).contains(&index) {
        let level = [0u8, 95, 135, 175, 215, 255];
        let offset = index - 16;
        return (
            level[(offset / 36) as usize],
            level[((offset / 6) % 6) as usize],
            level[(offset % 6) as usize],
        );
    }
    let gray = 8u8.saturating_add((index - 232).saturating_mul(10));
    (gray, gray, gray)
}

fn color_distance_sq(r1: u8, g1: u8, b1: u8, r2: u8, g2: u8, b2: u8) -> u32 {
    let dr = i32::from(r1) - i32::from(r2);
    let dg = i32::from(g1) - i32::from(g2);
    let db = i32::from(b1) - i32::from(b2);
    (dr * dr + dg * dg + db * db) as u32
}

const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

pub fn parse_color(value: &str) -> Option<Color> {
    let v = value.trim();
    if let Some(hex) = v.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    let c = match v.to_ascii_lowercase().as_str() {
        "reset" => Color::Reset,
        "black" => Color::Indexed(0),
        "red" => Color::Indexed(1),
        "green" => Color::Indexed(2),
        "yellow" => Color::Indexed(3),
        "blue" => Color::Indexed(4),
        "magenta" => Color::Indexed(5),
        "cyan" => Color::Indexed(6),
        "gray" | "grey" => Color::Indexed(7),
        "dark_gray" | "darkgrey" => Color::Indexed(8),
        "light_red" => Color::Indexed(9),
        "light_green" => Color::Indexed(10),
        "light_yellow" => Color::Indexed(11),
        "light_blue" => Color::Indexed(12),
        "light_magenta" => Color::Indexed(13),
        "light_cyan" => Color::Indexed(14),
        "white" => Color::Indexed(15),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/app/theme.rs"]
mod tests;
