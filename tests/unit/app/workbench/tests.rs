use super::*;
use crate::core::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crate::core::view::{EventResult, View};
use crate::models::BlockId;
use crate::ui::backend::test::TestBackend;
use std::sync::mpsc;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

const PAGE: &str = r#"{
    "blocks": [
        { "_id": "a", "_name": "hero", "title": "<b>Hello</b>", "subtitle": "", "dark": false },
        { "_id": "b", "_name": "text", "content": "<p>Body copy</p>" },
        { "_id": "c", "_name": "text", "content": "Closing words" }
    ]
}"#;

fn open(doc: &str) -> (TempDir, Workbench, mpsc::Receiver<AppMessage>) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("page.json");
    std::fs::write(&path, doc).unwrap();

    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx).unwrap();
    let mut workbench = Workbench::new(
        path,
        DefinitionRegistry::builtin(),
        runtime,
        None,
        Settings::default(),
    );
    let msg = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    workbench.handle_message(msg);
    (dir, workbench, rx)
}

fn draw(workbench: &mut Workbench, w: u16, h: u16) -> TestBackend {
    let mut backend = TestBackend::new(w, h);
    let area = backend.area();
    workbench.render(&mut backend, area);
    backend
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> InputEvent {
    InputEvent::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn click(workbench: &mut Workbench, x: u16, y: u16) -> EventResult {
    let _ = workbench.handle_input(&mouse(MouseEventKind::Down(MouseButton::Left), x, y));
    workbench.handle_input(&mouse(MouseEventKind::Up(MouseButton::Left), x, y))
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> InputEvent {
    InputEvent::Key(KeyEvent::press(code, modifiers))
}

fn id(s: &str) -> BlockId {
    BlockId::from(s)
}

#[test]
fn test_loaded_document_renders_collapsed_rows_with_labels() {
    let (_dir, mut workbench, _rx) = open(PAGE);
    assert!(workbench.state().loaded);
    assert_eq!(workbench.sidebar().row_count(), 3);

    let backend = draw(&mut workbench, 80, 20);
    let buf = backend.buffer();
    let hero = buf.find_row("▸ Hero").unwrap();
    assert!(buf.row_text(hero).contains("Hello"));
    assert!(buf.find_row("Body copy").is_some());
    assert!(buf.find_row("Click a block header to focus it.").is_some());
    assert!(buf.row_text(19).contains("Loaded"));
}

#[test]
fn test_click_header_focuses_and_expands() {
    let (_dir, mut workbench, _rx) = open(PAGE);
    let backend = draw(&mut workbench, 80, 20);
    let y = backend.buffer().find_row("▸ Hero").unwrap();

    assert!(click(&mut workbench, 4, y).is_consumed());
    assert_eq!(workbench.state().focus, Some(id("a")));
    assert!(workbench.sidebar().row(&id("a")).unwrap().is_expanded());

    let backend = draw(&mut workbench, 80, 20);
    let buf = backend.buffer();
    let header = buf.find_row("▾ Hero").unwrap();
    // Expanded rows show fields instead of the label.
    assert!(!buf.row_text(header).contains("Hello"));
    assert!(buf.find_row("title: <b>Hello</b>").is_some());
    assert!(buf.find_row("[ ] dark").is_some());
    assert!(buf.find_row("\"title\": \"<b>Hello</b>\"").is_some());
}

#[test]
fn test_toggle_glyph_expands_without_focus() {
    let (_dir, mut workbench, _rx) = open(PAGE);
    let backend = draw(&mut workbench, 80, 20);
    let y = backend.buffer().find_row("▸ Text  Body copy").unwrap();

    click(&mut workbench, 0, y);
    assert_eq!(workbench.state().focus, None);
    assert!(workbench.sidebar().row(&id("b")).unwrap().is_expanded());
}

#[test]
fn test_remove_action_drops_block_and_marks_dirty() {
    let (_dir, mut workbench, _rx) = open(PAGE);
    let backend = draw(&mut workbench, 80, 20);
    let y = backend.buffer().find_row("▸ Hero").unwrap();

    // The sidebar is 32 columns wide; remove sits two columns from its right edge.
    click(&mut workbench, 30, y);
    assert!(!workbench.state().tree.contains(&id("a")));
    assert!(workbench.state().dirty);
    assert!(workbench.sidebar().row(&id("a")).is_none());

    let backend = draw(&mut workbench, 80, 20);
    assert!(backend.buffer().row_text(19).ends_with("[+]"));
}

#[test]
fn test_duplicate_action_inserts_copy_after_original() {
    let (_dir, mut workbench, _rx) = open(PAGE);
    let backend = draw(&mut workbench, 80, 20);
    let y = backend.buffer().find_row("Closing words").unwrap();

    click(&mut workbench, 28, y);
    let roots = workbench.state().tree.root_ids();
    assert_eq!(roots.len(), 4);
    assert_eq!(roots[2], id("c"));
    assert_eq!(workbench.sidebar().row_count(), 4);
}

#[test]
fn test_drag_header_reorders_blocks() {
    let (_dir, mut workbench, _rx) = open(PAGE);
    let backend = draw(&mut workbench, 80, 20);
    let from = backend.buffer().find_row("Closing words").unwrap();
    let to = backend.buffer().find_row("▸ Hero").unwrap();

    let _ = workbench.handle_input(&mouse(MouseEventKind::Down(MouseButton::Left), 4, from));
    let _ = workbench.handle_input(&mouse(MouseEventKind::Drag(MouseButton::Left), 4, to));
    let _ = workbench.handle_input(&mouse(MouseEventKind::Up(MouseButton::Left), 4, to));

    assert_eq!(
        workbench.state().tree.root_ids(),
        vec![id("c"), id("a"), id("b")]
    );
}

#[test]
fn test_save_writes_document_and_clears_dirty() {
    let (dir, mut workbench, rx) = open(PAGE);
    let backend = draw(&mut workbench, 80, 20);
    let y = backend.buffer().find_row("Body copy").unwrap();
    click(&mut workbench, 30, y);
    assert!(workbench.state().dirty);

    let result = workbench.handle_input(&key(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert!(result.is_consumed());
    let msg = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    workbench.handle_message(msg);

    assert!(!workbench.state().dirty);
    let saved = std::fs::read_to_string(dir.path().join("page.json")).unwrap();
    assert!(saved.contains("\"_id\": \"a\""));
    assert!(!saved.contains("Body copy"));
}

#[test]
fn test_escape_clears_focus_and_quit_ends_session() {
    let (_dir, mut workbench, _rx) = open(PAGE);
    let backend = draw(&mut workbench, 80, 20);
    let y = backend.buffer().find_row("▸ Hero").unwrap();
    click(&mut workbench, 4, y);
    assert!(workbench.state().focus.is_some());

    let result = workbench.handle_input(&key(KeyCode::Esc, KeyModifiers::NONE));
    assert!(result.is_consumed());
    assert_eq!(workbench.state().focus, None);
    assert!(!workbench.sidebar().row(&id("a")).unwrap().is_expanded());

    // Nothing left to clear.
    let result = workbench.handle_input(&key(KeyCode::Esc, KeyModifiers::NONE));
    assert!(result.is_ignored());

    let result = workbench.handle_input(&key(KeyCode::Char('q'), KeyModifiers::CONTROL));
    assert!(result.is_quit());
    assert!(workbench.should_quit());
}

#[test]
fn test_missing_document_opens_empty_page() {
    let dir = tempdir().unwrap();
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx).unwrap();
    let mut workbench = Workbench::new(
        dir.path().join("missing.json"),
        DefinitionRegistry::builtin(),
        runtime,
        None,
        Settings::default(),
    );
    let msg = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    workbench.handle_message(msg);

    assert!(workbench.state().loaded);
    assert_eq!(workbench.sidebar().row_count(), 0);
    let backend = draw(&mut workbench, 80, 10);
    assert!(backend.buffer().row_text(9).contains("Open failed"));
}

#[test]
fn test_mouse_wheel_scrolls_sidebar() {
    let blocks: Vec<String> = (0..30)
        .map(|i| format!(r#"{{ "_id": "t{i}", "_name": "text", "content": "row {i}" }}"#))
        .collect();
    let doc = format!(r#"{{ "blocks": [{}] }}"#, blocks.join(","));
    let (_dir, mut workbench, _rx) = open(&doc);
    draw(&mut workbench, 80, 10);

    let _ = workbench.handle_input(&mouse(MouseEventKind::ScrollDown, 2, 2));
    assert_eq!(workbench.sidebar().scroll_offset(), 3);
    let _ = workbench.handle_input(&mouse(MouseEventKind::ScrollUp, 2, 2));
    assert_eq!(workbench.sidebar().scroll_offset(), 0);
}

#[test]
fn test_tick_drains_log_channel() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("page.json");
    std::fs::write(&path, PAGE).unwrap();
    let (tx, _rx) = mpsc::channel();
    let (log_tx, log_rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx).unwrap();
    let mut workbench = Workbench::new(
        path,
        DefinitionRegistry::builtin(),
        runtime,
        Some(log_rx),
        Settings::default(),
    );

    log_tx.send("first".to_string()).unwrap();
    log_tx.send("second".to_string()).unwrap();
    assert!(workbench.tick(Instant::now()));
    assert_eq!(workbench.logs().collect::<Vec<_>>(), vec!["first", "second"]);
    assert!(!workbench.tick(Instant::now()));
}

#[test]
fn test_sidebar_width_respects_minimum() {
    let settings = crate::kernel::services::ports::SidebarSettings::default();
    assert_eq!(render::sidebar_width(100, &settings), 40);
    assert_eq!(render::sidebar_width(60, &settings), 32);
    assert_eq!(render::sidebar_width(20, &settings), 20);
}
