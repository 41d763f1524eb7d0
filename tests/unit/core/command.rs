use super::*;

#[test]
fn test_command_names() {
    assert_eq!(Command::Save.name(), "save");
    assert_eq!(Command::ClearFocus.name(), "clearFocus");
    assert_eq!(Command::Custom("myCommand".to_string()).name(), "myCommand");
}

#[test]
fn test_from_name_round_trips_known_commands() {
    for cmd in [
        Command::Save,
        Command::Quit,
        Command::ClearFocus,
        Command::ScrollUp,
        Command::ScrollDown,
    ] {
        assert_eq!(Command::from_name(cmd.name()), cmd);
    }
}

#[test]
fn test_from_name_keeps_unknown_as_custom() {
    assert_eq!(
        Command::from_name("openPalette"),
        Command::Custom("openPalette".to_string())
    );
}
