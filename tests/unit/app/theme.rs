use super::*;

#[test]
fn parse_color_accepts_hex_and_names() {
    assert_eq!(parse_color("#1f2A38"), Some(Color::Rgb(0x1F, 0x2A, 0x38)));
    assert_eq!(parse_color(" Cyan "), Some(Color::Indexed(6)));
    assert_eq!(parse_color("dark_gray"), Some(Color::Indexed(8)));
    assert_eq!(parse_color("#12345"), None);
    assert_eq!(parse_color("#zzzzzz"), None);
    assert_eq!(parse_color("chartreuse"), None);
    assert_eq!(parse_color(""), None);
}

#[test]
fn apply_settings_overrides_valid_colors_only() {
    let mut theme = UiTheme::default();
    let settings = ThemeSettings {
        accent_fg: Some("green".to_string()),
        danger_fg: Some("not-a-color".to_string()),
        status_bg: None,
        ..ThemeSettings::default()
    };
    theme.apply_settings(&settings);
    assert_eq!(theme.accent_fg, Color::Indexed(2));
    assert_eq!(theme.danger_fg, UiTheme::default().danger_fg);
    assert_eq!(theme.status_bg, Color::Reset);
}

#[test]
fn default_settings_reproduce_default_theme() {
    let mut theme = UiTheme::default();
    theme.apply_settings(&ThemeSettings::default());
    assert_eq!(theme, UiTheme::default());
}

#[test]
fn ansi256_fallback_converts_rgb_to_indexed_colors() {
    let mut theme = UiTheme::default();
    theme.apply_color_support(TerminalColorSupport::Ansi256);
    assert!(matches!(theme.focused_bg, Color::Indexed(i) if i >= 16));
    assert_eq!(theme.accent_fg, Color::Indexed(3));
}

#[test]
fn ansi16_fallback_converts_rgb_to_basic_colors() {
    let mut theme = UiTheme::default();
    theme.focused_bg = Color::Indexed(200);
    theme.header_fg = Color::Rgb(250, 5, 5);
    theme.apply_color_support(TerminalColorSupport::Ansi16);
    assert!(matches!(theme.focused_bg, Color::Indexed(i) if i <= 15));
    assert_eq!(theme.header_fg, Color::Indexed(9));
}
