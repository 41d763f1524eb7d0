//! 工作台模块：统一管理侧边栏、检查器面板和输入分发

use super::theme::UiTheme;
use crate::core::event::InputEvent;
use crate::core::view::{EventResult, View};
use crate::kernel::services::adapters::{AppMessage, AsyncRuntime, KeybindingService};
use crate::kernel::services::ports::Settings;
use crate::kernel::{Action as KernelAction, AppState, Store};
use crate::models::DefinitionRegistry;
use crate::ui::backend::Backend;
use crate::ui::core::geom::Rect;
use crate::ui::core::runtime::UiRuntime;
use crate::ui::core::tree::UiTree;
use crate::views::SidebarView;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::Instant;

mod bridge;
mod input;
mod render;
#[cfg(test)]
#[path = "../../../tests/unit/app/workbench/tests.rs"]
mod tests;
mod tick;

const STATUS_HEIGHT: u16 = 1;
const LOG_BUFFER_CAP: usize = 200;
const MAX_LOG_DRAIN_PER_TICK: usize = 256;

pub struct Workbench {
    store: Store,
    sidebar: SidebarView,
    ui_runtime: UiRuntime,
    ui_tree: UiTree,
    keybindings: KeybindingService,
    theme: UiTheme,
    settings: Settings,
    runtime: AsyncRuntime,
    log_rx: Option<Receiver<String>>,
    logs: VecDeque<String>,
    last_render_area: Option<Rect>,
}

impl Workbench {
    pub fn new(
        document_path: PathBuf,
        definitions: DefinitionRegistry,
        runtime: AsyncRuntime,
        log_rx: Option<Receiver<String>>,
        settings: Settings,
    ) -> Self {
        let mut keybindings = KeybindingService::new();
        keybindings.apply_rules(&settings.keybindings);

        let mut theme = UiTheme::default();
        theme.apply_settings(&settings.theme);
        if !cfg!(test) {
            theme.adapt_to_terminal_capabilities();
        }

        let store = Store::new(AppState::new(document_path.clone(), definitions));
        let sidebar = SidebarView::new(&settings.sidebar);

        tracing::info!(path = %document_path.display(), "opening document");
        runtime.load_document(document_path);

        Self {
            store,
            sidebar,
            ui_runtime: UiRuntime::new(),
            ui_tree: UiTree::new(),
            keybindings,
            theme,
            settings,
            runtime,
            log_rx,
            logs: VecDeque::with_capacity(LOG_BUFFER_CAP.min(64)),
            last_render_area: None,
        }
    }

    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        let changed = match msg {
            AppMessage::DocumentLoaded { path, blocks } => {
                self.dispatch_kernel(KernelAction::DocumentLoaded { path, blocks })
            }
            AppMessage::DocumentLoadError { path, error } => {
                self.dispatch_kernel(KernelAction::DocumentLoadFailed { path, error })
            }
            AppMessage::DocumentSaved { path, success } => {
                self.dispatch_kernel(KernelAction::DocumentSaved { path, success })
            }
            AppMessage::FsOpError { op, path, error } => {
                self.push_log_line(format!("[fs:{op}] {}: {error}", path.display()));
                true
            }
        };
        self.sidebar.sync(self.store.state(), Instant::now());
        changed
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn sidebar(&self) -> &SidebarView {
        &self.sidebar
    }

    pub fn theme(&self) -> &UiTheme {
        &self.theme
    }

    pub fn runtime(&self) -> &AsyncRuntime {
        &self.runtime
    }

    pub fn should_quit(&self) -> bool {
        self.store.state().ui.should_quit
    }

    pub fn logs(&self) -> impl Iterator<Item = &str> {
        self.logs.iter().map(String::as_str)
    }

    pub fn last_render_area(&self) -> Option<Rect> {
        self.last_render_area
    }

    fn push_log_line(&mut self, line: String) {
        self.logs.push_back(line);
        while self.logs.len() > LOG_BUFFER_CAP {
            self.logs.pop_front();
        }
    }
}

impl View for Workbench {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        input::handle_input(self, event)
    }

    fn render(&mut self, backend: &mut dyn Backend, area: Rect) {
        render::render(self, backend, area);
    }

    fn tick(&mut self, now: Instant) -> bool {
        tick::tick(self, now)
    }

    fn next_deadline(&self) -> Option<Instant> {
        tick::next_deadline(self)
    }
}
