use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use crate::api::MailBackend;
use crate::compose::{ComposeField, ComposeForm};
use crate::terminal::state::{AppState, Focus, InputKind, Page, TextInput};

/// Returns `Ok(true)` when the app should quit.
pub fn handle_key(key: KeyEvent, state: &mut AppState, backend: &dyn MailBackend) -> Result<bool> {
    if state.alert.is_some() {
        state.alert = None;
        return Ok(false);
    }

    if state.input.is_some() {
        handle_input_keys(key, state);
        return Ok(false);
    }

    if state.folder_picker.is_some() {
        handle_picker_keys(key, state, backend);
        return Ok(false);
    }

    match state.focus {
        Focus::Sidebar => handle_sidebar_keys(key, state, backend),
        Focus::Content => match state.page {
            Page::Compose(_) => handle_compose_keys(key, state, backend),
            Page::Mailbox(_) => handle_mailbox_keys(key, state, backend),
            Page::Folders => handle_folder_keys(key, state, backend),
        },
    }
}

fn handle_sidebar_keys(
    key: KeyEvent,
    state: &mut AppState,
    backend: &dyn MailBackend,
) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
        KeyCode::Down | KeyCode::Char('j') => state.move_sidebar(1),
        KeyCode::Up | KeyCode::Char('k') => state.move_sidebar(-1),
        KeyCode::Enter => {
            let section = state.section();
            state.navigate(section, backend);
        }
        KeyCode::Tab => state.focus = Focus::Content,
        _ => {}
    }
    Ok(false)
}

fn handle_compose_keys(
    key: KeyEvent,
    state: &mut AppState,
    backend: &dyn MailBackend,
) -> Result<bool> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('s') {
        state.submit_compose(backend);
        return Ok(false);
    }
    if key.code == KeyCode::Esc {
        state.focus = Focus::Sidebar;
        return Ok(false);
    }

    let Page::Compose(form) = &mut state.page else {
        return Ok(false);
    };

    match key.code {
        KeyCode::Tab => form.focus = form.focus.next(),
        KeyCode::BackTab => form.focus = form.focus.prev(),
        KeyCode::Enter => match form.focus {
            ComposeField::Receiver => form.add_recipient(),
            ComposeField::Body => form.body.push('\n'),
            ComposeField::Attachments => {
                if let Err(e) = attach_from_input(form) {
                    log::error!("{e:#}");
                    state.status = format!("{e:#}");
                }
            }
            _ => {}
        },
        KeyCode::Left | KeyCode::Up if form.focus == ComposeField::Priority => {
            form.set_priority(form.priority.prev())
        }
        KeyCode::Right | KeyCode::Down if form.focus == ComposeField::Priority => {
            form.set_priority(form.priority.next())
        }
        KeyCode::Up if form.focus == ComposeField::Attachments => {
            form.selected_attachment = form.selected_attachment.saturating_sub(1);
        }
        KeyCode::Down if form.focus == ComposeField::Attachments => {
            if form.selected_attachment + 1 < form.attachments.len() {
                form.selected_attachment += 1;
            }
        }
        KeyCode::Delete if form.focus == ComposeField::Attachments => {
            let idx = form.selected_attachment;
            form.delete_attachment(idx);
        }
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !ctrl => form.input_char(c),
        _ => {}
    }
    Ok(false)
}

fn attach_from_input(form: &mut ComposeForm) -> Result<()> {
    let path = form.attachment_path.trim();
    if path.is_empty() {
        return Ok(());
    }
    let path = PathBuf::from(path);
    form.attach_file(&path)?;
    form.attachment_path.clear();
    form.selected_attachment = form.attachments.len() - 1;
    Ok(())
}

fn handle_mailbox_keys(
    key: KeyEvent,
    state: &mut AppState,
    backend: &dyn MailBackend,
) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Esc => {
            if state.card_open {
                state.card_open = false;
            } else {
                state.focus = Focus::Sidebar;
            }
            return Ok(false);
        }
        KeyCode::Tab => {
            state.focus = Focus::Sidebar;
            return Ok(false);
        }
        KeyCode::Enter => {
            state.card_open = !state.card_open;
            return Ok(false);
        }
        // Query edits wait for an explicit apply.
        KeyCode::Char('s') => {
            state.query.sort = state.query.sort.next();
            return Ok(false);
        }
        KeyCode::Char('f') => {
            state.query.filter = state.query.filter.next();
            return Ok(false);
        }
        KeyCode::Char('/') => {
            state.input = Some(TextInput {
                kind: InputKind::Search,
                buffer: state.query.substring.clone(),
            });
            return Ok(false);
        }
        KeyCode::Char('a') => {
            let query = state.query.clone();
            if let Some(lv) = state.list_view_mut() {
                lv.apply(&query, backend);
            }
            return Ok(false);
        }
        KeyCode::Char('m') => {
            let can_move = state.list_view_mut().is_some_and(|lv| lv.can_move());
            if !can_move {
                state.status = "Move to folder is only available in the inbox".into();
            } else if state.folders.list().is_empty() {
                state.status = "No folders yet".into();
            } else {
                let mut picker = ListState::default();
                picker.select(Some(0));
                state.folder_picker = Some(picker);
            }
            return Ok(false);
        }
        _ => {}
    }

    let Some(lv) = state.list_view_mut() else {
        return Ok(false);
    };
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => lv.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => lv.move_selection(-1),
        KeyCode::Home => lv.list_state.select(if lv.items.is_empty() { None } else { Some(0) }),
        KeyCode::End => {
            if !lv.items.is_empty() {
                lv.list_state.select(Some(lv.items.len() - 1));
            }
        }
        KeyCode::Char(' ') => lv.toggle_selected(),
        KeyCode::Char('d') => lv.delete_checked(backend),
        _ => {}
    }
    Ok(false)
}

fn handle_folder_keys(
    key: KeyEvent,
    state: &mut AppState,
    backend: &dyn MailBackend,
) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Esc | KeyCode::Tab => state.focus = Focus::Sidebar,
        KeyCode::Down | KeyCode::Char('j') => state.move_folder_selection(1),
        KeyCode::Up | KeyCode::Char('k') => state.move_folder_selection(-1),
        KeyCode::Char('n') => {
            state.input = Some(TextInput {
                kind: InputKind::NewFolder,
                buffer: String::new(),
            });
        }
        KeyCode::Char('x') => {
            if let Some(name) = state.selected_folder() {
                state.folders.remove(&name);
                state.move_folder_selection(0);
            }
        }
        KeyCode::Enter => {
            if let Some(name) = state.selected_folder() {
                state.open_folder(&name, backend);
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_input_keys(key: KeyEvent, state: &mut AppState) {
    let Some(input) = state.input.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => state.input = None,
        KeyCode::Backspace => {
            input.buffer.pop();
        }
        KeyCode::Char(c) => input.buffer.push(c),
        KeyCode::Enter => {
            let TextInput { kind, buffer } = input.clone();
            state.input = None;
            match kind {
                InputKind::Search => state.query.substring = buffer,
                InputKind::NewFolder => {
                    if state.folders.add(&buffer) {
                        state.move_folder_selection(0);
                    } else {
                        state.status = format!("Folder '{}' not added", buffer.trim());
                    }
                }
            }
        }
        _ => {}
    }
}

fn handle_picker_keys(key: KeyEvent, state: &mut AppState, backend: &dyn MailBackend) {
    let folders = state.folders.list();
    let Some(picker) = state.folder_picker.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => state.folder_picker = None,
        KeyCode::Down | KeyCode::Char('j') => {
            let cur = picker.selected().unwrap_or(0);
            if cur + 1 < folders.len() {
                picker.select(Some(cur + 1));
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            let cur = picker.selected().unwrap_or(0);
            picker.select(Some(cur.saturating_sub(1)));
        }
        KeyCode::Enter => {
            let chosen = picker.selected().and_then(|i| folders.get(i).cloned());
            state.folder_picker = None;
            if let (Some(folder), Some(lv)) = (chosen, state.list_view_mut()) {
                lv.select_folder(folder);
                lv.move_checked(backend);
            }
        }
        _ => {}
    }
}

/// Keys the current screen responds to, for the footer.
pub fn hints(state: &AppState) -> &'static [(&'static str, &'static str)] {
    if state.alert.is_some() {
        return &[("any key", "dismiss")];
    }
    if state.input.is_some() {
        return &[("Enter", "confirm"), ("Esc", "cancel")];
    }
    if state.folder_picker.is_some() {
        return &[("j/k", "choose"), ("Enter", "move"), ("Esc", "cancel")];
    }
    match (state.focus, &state.page) {
        (Focus::Sidebar, _) => &[("j/k", "move"), ("Enter", "open"), ("q", "quit")],
        (Focus::Content, Page::Compose(_)) => &[
            ("Tab", "next field"),
            ("Enter", "add"),
            ("←/→", "priority"),
            ("Del", "drop attachment"),
            ("Ctrl+S", "send"),
            ("Esc", "menu"),
        ],
        (Focus::Content, Page::Mailbox(_)) => &[
            ("Space", "check"),
            ("Enter", "card"),
            ("s/f", "sort/filter"),
            ("/", "search"),
            ("a", "apply"),
            ("d", "delete"),
            ("m", "move"),
            ("Esc", "menu"),
        ],
        (Focus::Content, Page::Folders) => &[
            ("Enter", "open"),
            ("n", "new"),
            ("x", "remove"),
            ("Esc", "menu"),
        ],
    }
}
