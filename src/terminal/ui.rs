use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::compose::{ComposeField, ComposeForm};
use crate::domain::email::Priority;
use crate::mailbox::ListView;
use crate::terminal::card;
use crate::terminal::events::hints;
use crate::terminal::state::{AppState, Focus, InputKind, Page, Section};

pub fn render(f: &mut Frame, state: &AppState) {
    let [top, middle, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_navbar(f, top, state);

    let [left, right] =
        Layout::horizontal([Constraint::Length(18), Constraint::Min(0)]).areas(middle);
    render_sidebar(f, left, state);

    match &state.page {
        Page::Mailbox(lv) => render_mailbox(f, right, state, lv),
        Page::Folders => render_folders(f, right, state),
        Page::Compose(form) => render_compose(f, right, state, form),
    }

    render_footer(f, footer, state);

    if let Some(input) = &state.input {
        let title = match input.kind {
            InputKind::Search => " Search recipients ",
            InputKind::NewFolder => " New folder ",
        };
        let area = popup(f.area(), 50, 3);
        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(format!("{}_", input.buffer)).block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            ),
            area,
        );
    }

    if let Some(picker) = &state.folder_picker {
        render_folder_dropdown(f, state, picker);
    }

    if let Some(msg) = &state.alert {
        let area = popup(f.area(), 50, 5);
        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(msg.as_str()).wrap(Wrap { trim: true }).block(
                Block::default()
                    .title(" Alert ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            ),
            area,
        );
    }
}

fn popup(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn border(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_navbar(f: &mut Frame, area: Rect, state: &AppState) {
    let line = Line::from(vec![
        Span::styled(" webmail ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" | "),
        Span::styled(
            state.account.display_name.clone(),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(format!(" <{}>", state.account.address)),
    ]);
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_sidebar(f: &mut Frame, area: Rect, state: &AppState) {
    let items: Vec<ListItem> = Section::ALL
        .iter()
        .map(|s| ListItem::from(s.label()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border(state.focus == Focus::Sidebar)),
        )
        .highlight_symbol("➜ ")
        .highlight_style(Style::default().fg(Color::Green));
    f.render_stateful_widget(list, area, &mut state.sidebar.clone());
}

fn render_mailbox(f: &mut Frame, area: Rect, state: &AppState, lv: &ListView) {
    let [controls, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let q = &state.query;
    let mut spans = vec![
        Span::raw(format!(" sort: {}  filter: {}  search: ", q.sort.as_str(), q.filter.as_str())),
        Span::styled(format!("\"{}\"", q.substring), Style::default().fg(Color::Cyan)),
        Span::raw(format!("  checked: {}", lv.checked.len())),
    ];
    if let Some(folder) = &lv.target_folder {
        spans.push(Span::raw(format!("  folder: {folder}")));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), controls);

    let active = state.focus == Focus::Content;
    if state.card_open
        && let Some(e) = lv.selected()
    {
        card::render_card(f, body, e);
        return;
    }

    let title = format!(" {} ({}) ", lv.view.title(), lv.items.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border(active));

    if lv.items.is_empty() {
        f.render_widget(Paragraph::new("No emails.").block(block), body);
        return;
    }

    let items: Vec<ListItem> = lv
        .items
        .iter()
        .map(|e| card::list_item(e, lv.checked.contains(&e.id)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_symbol("➜ ")
        .highlight_style(Style::default().fg(Color::Green));
    f.render_stateful_widget(list, body, &mut lv.list_state.clone());
}

fn render_folders(f: &mut Frame, area: Rect, state: &AppState) {
    let folders = state.folders.list();
    let block = Block::default()
        .title(" Folders ")
        .borders(Borders::ALL)
        .border_style(border(state.focus == Focus::Content));
    if folders.is_empty() {
        f.render_widget(Paragraph::new("No folders. Press n to add one.").block(block), area);
        return;
    }
    let list = List::new(folders.into_iter().map(ListItem::from))
        .block(block)
        .highlight_symbol("➜ ")
        .highlight_style(Style::default().fg(Color::Green));
    f.render_stateful_widget(list, area, &mut state.folder_list.clone());
}

fn render_folder_dropdown(f: &mut Frame, state: &AppState, picker: &ListState) {
    let folders = state.folders.list();
    let area = popup(f.area(), 30, folders.len() as u16 + 2);
    f.render_widget(Clear, area);
    let list = List::new(folders.into_iter().map(ListItem::from))
        .block(
            Block::default()
                .title(" Move to ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_symbol("➜ ")
        .highlight_style(Style::default().fg(Color::Green));
    f.render_stateful_widget(list, area, &mut picker.clone());
}

fn field_block(title: &str, form: &ComposeForm, field: ComposeField, active: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border(active && form.focus == field))
}

fn priority_color(p: Priority) -> Color {
    match p {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

fn render_compose(f: &mut Frame, area: Rect, state: &AppState, form: &ComposeForm) {
    let active = state.focus == Focus::Content;
    let [receiver, subject, body, priority, attachments] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(3),
        Constraint::Length(5),
    ])
    .areas(area);

    let recipients = if form.to_address.is_empty() {
        Line::from(Span::styled("no recipients yet", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(form.to_address.join(", "))
    };
    let receiver_block = field_block(
        "Receiver's Email (Enter adds)",
        form,
        ComposeField::Receiver,
        active,
    );
    f.render_widget(
        Paragraph::new(Text::from(vec![Line::from(form.receiver_email.clone()), recipients]))
            .block(receiver_block),
        receiver,
    );

    f.render_widget(
        Paragraph::new(form.subject.clone())
            .block(field_block("Subject", form, ComposeField::Subject, active)),
        subject,
    );

    f.render_widget(
        Paragraph::new(form.body.clone())
            .wrap(Wrap { trim: false })
            .block(field_block("Email Body", form, ComposeField::Body, active)),
        body,
    );

    let options: Vec<Span> = Priority::ALL
        .iter()
        .map(|p| {
            let label = format!(" {} ", p.as_str());
            if *p == form.priority {
                Span::styled(
                    label,
                    Style::default()
                        .fg(Color::Black)
                        .bg(priority_color(*p))
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(label)
            }
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(options))
            .block(field_block("Email Priority", form, ComposeField::Priority, active)),
        priority,
    );

    let mut lines = vec![Line::from(format!("path: {}", form.attachment_path))];
    for (i, a) in form.attachments.iter().enumerate() {
        let style = if i == form.selected_attachment && form.focus == ComposeField::Attachments {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{} ({}, {} bytes)", a.name, a.mime_type, a.size),
            style,
        )));
    }
    f.render_widget(
        Paragraph::new(lines)
            .block(field_block("Attachments", form, ComposeField::Attachments, active)),
        attachments,
    );
}

fn render_footer(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = Vec::new();
    for (key, what) in hints(state) {
        spans.push(Span::styled(*key, Style::default().add_modifier(Modifier::BOLD)));
        spans.push(Span::raw(format!(" {what}  ")));
    }
    if !state.status.is_empty() {
        spans.push(Span::styled(
            state.status.clone(),
            Style::default().fg(Color::Cyan),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
