use super::bridge::CommandQueue;
use super::Workbench;
use crate::core::event::{InputEvent, Key, KeyEventKind, MouseButton};
use crate::core::view::EventResult;
use crate::core::Command;
use crate::kernel::Action as KernelAction;
use crate::ui::core::input::UiEvent;
use crate::views::sidebar::sidebar_id;
use std::time::Instant;

pub(super) fn handle_input(workbench: &mut Workbench, event: &InputEvent) -> EventResult {
    let result = match event {
        InputEvent::Key(key_event) => {
            if key_event.kind == KeyEventKind::Release {
                return EventResult::Ignored;
            }
            let key = Key::from(*key_event);
            match workbench.keybindings.resolve(&key).cloned() {
                Some(command) => workbench.run_command(command),
                None => EventResult::Ignored,
            }
        }
        InputEvent::Mouse(_) => handle_mouse(workbench, event),
        InputEvent::Resize(..) => EventResult::Consumed,
        InputEvent::FocusLost => {
            workbench.ui_runtime.reset_pointer_state();
            EventResult::Ignored
        }
        InputEvent::FocusGained | InputEvent::Paste(_) => EventResult::Ignored,
    };

    workbench
        .sidebar
        .sync(workbench.store.state(), Instant::now());

    if workbench.should_quit() {
        EventResult::Quit
    } else {
        result
    }
}

fn handle_mouse(workbench: &mut Workbench, event: &InputEvent) -> EventResult {
    let out = workbench
        .ui_runtime
        .on_input(event, &workbench.ui_tree, &workbench.sidebar);

    let mut changed = out.needs_redraw;
    let mut queue = CommandQueue::default();

    for ui_event in out.events {
        match ui_event {
            UiEvent::Click {
                id,
                button: MouseButton::Left,
                ..
            } => {
                changed |= workbench
                    .sidebar
                    .handle_click(id, workbench.store.state(), &mut queue);
            }
            UiEvent::Scroll { id, delta, .. } if id == sidebar_id() => {
                workbench.sidebar.handle_scroll(delta);
                changed = true;
            }
            UiEvent::Drop {
                payload, target, ..
            } => {
                if let Some(node) = workbench.ui_tree.node(target) {
                    changed |= workbench.sidebar.handle_drop(&payload, node, &mut queue);
                }
            }
            _ => {}
        }
    }

    if !queue.is_empty() {
        changed |= workbench.apply_queue(queue);
    }

    if changed {
        EventResult::Consumed
    } else {
        EventResult::Ignored
    }
}

impl Workbench {
    pub(super) fn run_command(&mut self, command: Command) -> EventResult {
        match command {
            Command::ScrollUp => {
                self.sidebar.handle_scroll(-1);
                EventResult::Consumed
            }
            Command::ScrollDown => {
                self.sidebar.handle_scroll(1);
                EventResult::Consumed
            }
            Command::Custom(name) => {
                tracing::debug!(command = %name, "unknown command");
                EventResult::Ignored
            }
            command => {
                if self.dispatch_kernel(KernelAction::RunCommand(command)) {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
        }
    }
}
