//! TUI rendering using ratatui.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::app::App;

/// Render the checklist view.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(3),    // checklist
            Constraint::Length(1), // key help
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_checklist(f, app, chunks[1]);
    render_help(f, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.checklist() {
        Some(checklist) => format!(
            " {} | {} | {}/{} done",
            app.variant,
            app.request,
            checklist.done_count(),
            checklist.item_count(),
        ),
        None => format!(" {} | {}", app.variant, app.request),
    };
    let header = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Checklist "),
    );
    f.render_widget(header, area);
}

fn render_checklist(f: &mut Frame, app: &App, area: Rect) {
    let Some(checklist) = app.checklist() else {
        let empty = Paragraph::new("No checklist items to display.")
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    };

    let selected = app.selected();
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_row = 0usize;

    for (g, group) in checklist.groups.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            group.key.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        if group.items.is_empty() {
            lines.push(Line::from(Span::styled(
                "  (no items)",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (i, item) in group.items.iter().enumerate() {
            let mark = if item.done { "[x]" } else { "[ ]" };
            let mut text = format!("  {mark} {}  {}", item.id, item.name);
            if let Some(meta) = metadata_summary(item) {
                text.push_str("  -- ");
                text.push_str(&meta);
            }

            let style = if selected == Some((g, i)) {
                cursor_row = lines.len();
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else if item.done {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(text, style)));
        }
    }

    // Keep the cursor row visible.
    let visible = area.height.saturating_sub(2) as usize;
    let offset = if visible == 0 {
        0
    } else {
        cursor_row.saturating_sub(visible.saturating_sub(1))
    };

    let list = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .scroll((offset as u16, 0));
    f.render_widget(list, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(" j/k move  space toggle  q quit")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}

/// One-line metadata summary for an item, if it has any.
fn metadata_summary(item: &checkgen_core::Item) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(importance) = item.importance {
        parts.push(importance.to_string());
    }
    if let Some(quantity) = &item.quantity {
        parts.push(format!("qty {quantity}"));
    }
    if let Some(timeline) = &item.timeline {
        parts.push(timeline.clone());
    }
    if let Some(deadline) = &item.deadline {
        parts.push(format!("by {deadline}"));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
