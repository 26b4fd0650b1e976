use dispatcher_core::{AppViewModel, ContactRowView, FormField, Panel, SendStatus, Severity};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, TableState},
    Frame,
};
use tui_input::Input;

use super::inputs::{EditTarget, InputFields};

const EMPTY_LIST: &str = "No contacts yet. Press i to import a file or a to add one manually.";

const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Percentage(30),
    Constraint::Percentage(20),
    Constraint::Length(16),
    Constraint::Percentage(17),
    Constraint::Percentage(17),
];

pub fn draw<B: Backend>(
    frame: &mut Frame<B>,
    view: &AppViewModel,
    inputs: &InputFields,
    table: &mut TableState,
) {
    let size = frame.size();
    let endpoint_height = if view.panel == Panel::Endpoint { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),               // Header
            Constraint::Length(endpoint_height), // Endpoint editor
            Constraint::Length(3),               // Stats
            Constraint::Length(3),               // Progress
            Constraint::Min(3),                  // Contacts
            Constraint::Length(1),               // Toolbar
            Constraint::Length(1),               // Notice
        ])
        .split(size);

    draw_header(frame, view, chunks[0]);
    if view.panel == Panel::Endpoint {
        draw_input(
            frame,
            inputs.get(EditTarget::Endpoint),
            " Webhook URL (Enter or Esc to close) ",
            chunks[1],
            true,
        );
    }
    draw_stats(frame, view, chunks[2]);
    draw_progress(frame, view, chunks[3]);
    draw_contacts(frame, &view.rows, chunks[4], table);
    draw_toolbar(frame, view, chunks[5]);
    draw_notice(frame, view, chunks[6]);

    match view.panel {
        Panel::ImportPrompt => draw_import_prompt(frame, inputs, size),
        Panel::ManualForm => draw_manual_form(frame, view, inputs, size),
        Panel::List | Panel::Endpoint => {}
    }
}

fn draw_header<B: Backend>(frame: &mut Frame<B>, view: &AppViewModel, area: Rect) {
    let endpoint = if view.endpoint.trim().is_empty() {
        Span::styled("(not configured)", Style::default().fg(Color::Red))
    } else {
        Span::styled(view.endpoint.as_str(), Style::default().fg(Color::Cyan))
    };
    let header = Line::from(vec![
        Span::styled(
            "Contact dispatcher",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("  webhook: ", Style::default().fg(Color::Gray)),
        endpoint,
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn draw_stats<B: Backend>(frame: &mut Frame<B>, view: &AppViewModel, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let stats = view.stats;
    let blocks = [
        ("Total", stats.total, Color::White),
        ("Pending", stats.pending, Color::Yellow),
        ("Sent", stats.success, Color::Green),
        ("Errors", stats.error, Color::Red),
    ];
    for (chunk, (title, value, color)) in chunks.iter().zip(blocks) {
        let widget = Paragraph::new(value.to_string())
            .alignment(Alignment::Center)
            .style(Style::default().fg(color))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(widget, *chunk);
    }
}

fn draw_progress<B: Backend>(frame: &mut Frame<B>, view: &AppViewModel, area: Rect) {
    let stats = view.stats;
    let label = format!(
        "{}% ({}/{})",
        view.progress_percent,
        stats.success + stats.error,
        stats.total
    );
    let color = if view.busy { Color::Blue } else { Color::Green };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!(" {} ", view.send.label))
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(color))
        .percent(u16::from(view.progress_percent.min(100)))
        .label(label);
    frame.render_widget(gauge, area);
}

fn status_style(status: SendStatus) -> Style {
    match status {
        SendStatus::Idle => Style::default().fg(Color::Gray),
        SendStatus::Sending => Style::default().fg(Color::Blue),
        SendStatus::Success => Style::default().fg(Color::Green),
        SendStatus::Error => Style::default().fg(Color::Red),
    }
}

fn contact_row(row: &ContactRowView) -> Row<'_> {
    let mut status_lines = vec![Line::from(Span::styled(
        row.status.label(),
        status_style(row.status).add_modifier(Modifier::BOLD),
    ))];
    if let Some(message) = &row.error_message {
        status_lines.push(Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    let height = status_lines.len() as u16;

    Row::new(vec![
        Cell::from(Text::from(status_lines)),
        Cell::from(row.name.as_str()),
        Cell::from(row.phone.as_str()),
        Cell::from(row.campaign.as_str()),
        Cell::from(row.template.as_str()),
    ])
    .height(height)
}

fn draw_contacts<B: Backend>(
    frame: &mut Frame<B>,
    rows: &[ContactRowView],
    area: Rect,
    table: &mut TableState,
) {
    let block = Block::default()
        .title(format!(" Contacts ({}) ", rows.len()))
        .borders(Borders::ALL);

    if rows.is_empty() {
        let placeholder = Paragraph::new(EMPTY_LIST)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let header = Row::new(vec!["Status", "Name", "Phone", "Campaign", "Template"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);
    let widget = Table::new(rows.iter().map(contact_row))
        .header(header)
        .block(block)
        .widths(&COLUMN_WIDTHS)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    frame.render_stateful_widget(widget, area, table);
}

fn hint(key: &'static str, label: &'static str, enabled: bool) -> Vec<Span<'static>> {
    let (key_style, label_style) = if enabled {
        (
            Style::default().fg(Color::Yellow),
            Style::default().fg(Color::Gray),
        )
    } else {
        let dim = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM);
        (dim, dim)
    };
    vec![
        Span::styled(key, key_style),
        Span::styled(format!(" {label}  "), label_style),
    ]
}

fn draw_toolbar<B: Backend>(frame: &mut Frame<B>, view: &AppViewModel, area: Rect) {
    let spans: Vec<Span> = [
        hint("i", "import", view.editing_enabled()),
        hint("a", "add", view.editing_enabled()),
        hint("x", "clear", view.clear_enabled()),
        hint("s", view.send.label, view.send.enabled),
        hint("e", "webhook", true),
        hint("q", "quit", true),
    ]
    .into_iter()
    .flatten()
    .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_notice<B: Backend>(frame: &mut Frame<B>, view: &AppViewModel, area: Rect) {
    let Some(notice) = &view.notice else {
        return;
    };
    let color = match notice.severity {
        Severity::Info => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    };
    let line = Line::from(vec![
        Span::styled(notice.text.as_str(), Style::default().fg(color)),
        Span::styled("  (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Single-line editor with a border. The focused editor owns the cursor.
fn draw_input<B: Backend>(frame: &mut Frame<B>, input: &Input, title: &str, area: Rect, focused: bool) {
    let width = area.width.saturating_sub(2) as usize;
    let scroll = input.visual_scroll(width);
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Blue)
    };
    let widget = Paragraph::new(input.value())
        .scroll((0, scroll as u16))
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    frame.render_widget(widget, area);

    if focused {
        let offset = input.visual_cursor().saturating_sub(scroll) as u16;
        frame.set_cursor(area.x + 1 + offset, area.y + 1);
    }
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_import_prompt<B: Backend>(frame: &mut Frame<B>, inputs: &InputFields, area: Rect) {
    let popup = popup_area(area, 70, 8);
    let block = Block::default()
        .title(" Import contacts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let inner = popup.inner(&Margin {
        vertical: 1,
        horizontal: 2,
    });
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new("File with a header row, then name,phone[,campaign][,template]"),
        chunks[0],
    );
    draw_input(
        frame,
        inputs.get(EditTarget::ImportPath),
        " Path ",
        chunks[1],
        true,
    );
    frame.render_widget(
        Paragraph::new("Enter import | Esc cancel").style(Style::default().fg(Color::Gray)),
        chunks[2],
    );
}

fn draw_manual_form<B: Backend>(
    frame: &mut Frame<B>,
    view: &AppViewModel,
    inputs: &InputFields,
    area: Rect,
) {
    let popup = popup_area(area, 60, 17);
    let block = Block::default()
        .title(" Add contact ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let inner = popup.inner(&Margin {
        vertical: 1,
        horizontal: 2,
    });
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    for (chunk, field) in chunks.iter().zip(FormField::ALL) {
        draw_input(
            frame,
            inputs.get(EditTarget::Form(field)),
            field.label(),
            *chunk,
            view.form.focus == field,
        );
    }
    frame.render_widget(
        Paragraph::new("Tab next field | Enter add | Esc close")
            .style(Style::default().fg(Color::Gray)),
        chunks[4],
    );
}
