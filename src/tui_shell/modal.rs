use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::model::{RefCatalog, RefGroup};
use crate::picker::RefPicker;

const NO_RESULTS: &str = "No results found.";

fn centered(area: Rect) -> Rect {
    let w = area.width.saturating_sub(6).clamp(20, 72);
    let h = area.height.saturating_sub(6).clamp(8, 22);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w.min(area.width),
        height: h.min(area.height),
    }
}

/// Lines for the result list: a heading per group, then its entries.
/// Returns the lines plus the line index of the highlighted entry.
fn picker_lines(
    picker: &RefPicker,
    catalog: &RefCatalog,
) -> (Vec<Line<'static>>, Option<usize>) {
    let items = picker.filtered_entries(catalog);
    if items.is_empty() {
        return (
            vec![Line::from(Span::styled(
                NO_RESULTS,
                Style::default().fg(Color::DarkGray),
            ))],
            None,
        );
    }

    let mut lines = Vec::new();
    let mut selected_line = None;
    let mut current: Option<RefGroup> = None;
    for (idx, item) in items.iter().enumerate() {
        if current != Some(item.group) {
            current = Some(item.group);
            lines.push(Line::from(Span::styled(
                item.group.heading(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        let selected = picker.highlight() == Some(idx);
        if selected {
            selected_line = Some(lines.len());
        }
        let marker = if selected { "> " } else { "  " };
        let style = if selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{}", item.entry.name), style),
            Span::styled(
                format!("  {}", crate::refs::short_ref(&item.entry.commit_hash)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    (lines, selected_line)
}

pub(in crate::tui_shell) fn draw_picker(
    frame: &mut ratatui::Frame,
    picker: &RefPicker,
    catalog: Option<&RefCatalog>,
    note: Option<&str>,
) {
    let box_area = centered(frame.area());
    frame.render_widget(Clear, box_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} ref", picker.side().label()));
    frame.render_widget(block.clone(), box_area);
    let inner = block.inner(box_area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    let input = if picker.input_text().is_empty() {
        Span::styled(
            super::app::PICKER_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(picker.input_text().to_string())
    };
    frame.render_widget(
        Paragraph::new(Line::from(input)).block(Block::default().borders(Borders::ALL)),
        parts[0],
    );

    match catalog {
        Some(catalog) => {
            let (lines, selected) = picker_lines(picker, catalog);
            let height = parts[1].height as usize;
            let scroll = match selected {
                Some(line) if height > 0 && line >= height => line + 1 - height,
                _ => 0,
            };
            frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), parts[1]);
        }
        None => {
            let msg = note.unwrap_or("loading refs...");
            frame.render_widget(
                Paragraph::new(Span::styled(msg.to_string(), Style::default().fg(Color::Gray)))
                    .wrap(Wrap { trim: false }),
                parts[1],
            );
        }
    }
}
