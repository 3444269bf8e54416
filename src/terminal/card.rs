use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, ListItem, Paragraph, Wrap},
};

use crate::domain::email::EmailSummary;

/// Border tint for a summary's `color` tag.
pub fn card_color(color: Option<&str>) -> Color {
    match color.map(str::to_ascii_lowercase).as_deref() {
        Some("primary") => Color::Blue,
        Some("success") => Color::Green,
        Some("warning") => Color::Yellow,
        Some("danger") => Color::Red,
        Some("info") => Color::Cyan,
        Some("secondary") => Color::Gray,
        _ => Color::DarkGray,
    }
}

/// Plain text for a body that may be HTML.
pub fn body_text(body: &str, width: usize) -> String {
    let looks_html = body.contains('<') && body.contains('>');
    if looks_html {
        html2text::from_read(body.as_bytes(), width.max(20)).unwrap_or_else(|_| body.to_string())
    } else {
        body.to_string()
    }
}

pub fn normalize_snippet(s: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(line);
        if out.chars().count() >= max_chars {
            break;
        }
    }
    out.chars().take(max_chars).collect()
}

/// Two-line row for the scrollable list.
pub fn list_item(e: &EmailSummary, checked: bool) -> ListItem<'static> {
    let mark = if checked { "[x] " } else { "[ ] " };
    let subject = if e.subject.is_empty() {
        "(no subject)".to_string()
    } else {
        e.subject.clone()
    };
    let head = Line::from(vec![
        Span::raw(mark),
        Span::styled(subject, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}", e.from_address),
            Style::default().fg(card_color(e.color.as_deref())),
        ),
    ]);
    let snip = Span::styled(
        format!("    {}", normalize_snippet(&body_text(&e.body, 120), 100)),
        Style::default().fg(Color::Gray),
    );
    ListItem::new(Text::from(vec![head, Line::from(snip)]))
}

pub fn render_card(f: &mut Frame, area: Rect, e: &EmailSummary) {
    let block = Block::default()
        .title(format!(" {} ", e.subject))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(card_color(e.color.as_deref())));

    let mut lines = vec![
        Line::from(vec![
            Span::styled("From: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(e.from_address.clone()),
        ]),
        Line::from(vec![
            Span::styled("To: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(e.to_address.join(", ")),
        ]),
        Line::from(vec![
            Span::styled("Time: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(e.time.clone()),
        ]),
    ];
    if !e.attachments.is_empty() {
        let names: Vec<&str> = e.attachments.iter().map(|a| a.name.as_str()).collect();
        lines.push(Line::from(vec![
            Span::styled("Attachments: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(names.join(", ")),
        ]));
    }
    lines.push(Line::from(""));
    let width = area.width.saturating_sub(2) as usize;
    lines.extend(body_text(&e.body, width).lines().map(|l| Line::from(l.to_string())));

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(p, area);
}
