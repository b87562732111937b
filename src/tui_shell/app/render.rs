use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::*;
use crate::refs::title_for;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let ctx = RenderCtx {
        now: OffsetDateTime::now_utc(),
    };

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, app, parts[0]);
    draw_selectors(frame, app, parts[1]);
    draw_body(frame, app, parts[2], &ctx);
    draw_footer(frame, app, parts[3]);

    if let Some(picker) = app.open_picker() {
        super::super::modal::draw_picker(frame, picker, app.catalog(), app.catalog_note.as_deref());
    }
}

fn draw_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        app.dashboard.location().share_url(),
        Style::default().fg(Color::Cyan),
    )];
    if let Some(note) = &app.catalog_note {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(note.clone(), Style::default().fg(Color::Red)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    app.kind().title(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
        ),
        area,
    );
}

fn selector_box<'a>(title: String, value: String, placeholder: bool) -> Paragraph<'a> {
    let style = if placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    Paragraph::new(Span::styled(value, style))
        .block(Block::default().borders(Borders::ALL).title(title))
}

fn draw_selectors(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let params = app.dashboard.params();
    let mut boxes: Vec<Paragraph> = Vec::new();

    for picker in [&app.old_picker, &app.new_picker] {
        let side = picker.side();
        if !app.picker_visible(side) {
            continue;
        }
        let chord = app
            .shortcuts
            .chord(side)
            .map(|c| format!(" ({})", c.label()))
            .unwrap_or_default();
        let label = picker.display_label(app.catalog(), PICKER_PLACEHOLDER);
        let is_placeholder = picker.canonical_value().is_empty() && picker.resolved_label().is_empty();
        boxes.push(selector_box(
            format!("{}{}", side.label(), chord),
            label,
            is_placeholder,
        ));
    }

    if app.kind().uses_workloads() {
        for (title, value) in [
            ("Old workload (w)", &params.old_workload),
            ("New workload (W)", &params.new_workload),
        ] {
            let empty = value.is_empty();
            let shown = if empty { "(any)".to_string() } else { value.clone() };
            boxes.push(selector_box(title.to_string(), shown, empty));
        }
    }

    let n = boxes.len().max(1) as u32;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..n).map(|_| Constraint::Ratio(1, n)).collect::<Vec<_>>())
        .split(area);
    for (b, col) in boxes.into_iter().zip(cols.iter()) {
        frame.render_widget(b, *col);
    }
}

fn ref_title(app: &App, value: &str) -> String {
    if value.is_empty() {
        return "N/A".to_string();
    }
    match app.catalog() {
        Some(c) => title_for(value, c),
        None => crate::refs::short_ref(value),
    }
}

fn draw_body(frame: &mut ratatui::Frame, app: &App, area: Rect, ctx: &RenderCtx) {
    let params = app.dashboard.params();
    let title = match app.kind() {
        ComparisonKind::ForeignKeys => ref_title(app, &params.old_ref),
        ComparisonKind::Macrobench => format!(
            "{} -> {}",
            ref_title(app, &params.old_ref),
            ref_title(app, &params.new_ref)
        ),
    };
    let inner = super::super::render_view_chrome(frame, &title, app.updated_at.as_deref(), ctx, area);

    match app.state() {
        ComparisonState::NotReady => {
            let hint = match app.kind() {
                ComparisonKind::ForeignKeys => "Pick a commit or release to see its results.",
                ComparisonKind::Macrobench => "Pick an old and a new ref to compare them.",
            };
            frame.render_widget(
                Paragraph::new(Span::styled(hint, Style::default().fg(Color::Gray))),
                inner,
            );
        }
        ComparisonState::Loading => {
            let rows = inner.height as usize;
            let width = inner.width.saturating_sub(2) as usize;
            let skeleton: Vec<Line> = (0..rows)
                .map(|i| {
                    if i % 2 == 0 {
                        Line::from(Span::styled(
                            "░".repeat(width),
                            Style::default().fg(Color::DarkGray),
                        ))
                    } else {
                        Line::from("")
                    }
                })
                .collect();
            frame.render_widget(Paragraph::new(skeleton), inner);
        }
        ComparisonState::Error(msg) => {
            frame.render_widget(
                Paragraph::new(Span::styled(msg.clone(), Style::default().fg(Color::Red)))
                    .wrap(Wrap { trim: false }),
                inner,
            );
        }
        ComparisonState::Ready(formatted) => {
            let links = commit_links(app);
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(links.len() as u16), Constraint::Min(0)])
                .split(inner);
            frame.render_widget(Paragraph::new(links), parts[0]);
            super::super::views::render_comparison(frame, formatted, app.scroll, parts[1]);
        }
    }
}

/// One commit link per ref the comparison sends.
fn commit_links(app: &App) -> Vec<Line<'static>> {
    let params = app.dashboard.params();
    let mut refs = vec![("old", params.old_ref.as_str())];
    if app.kind().uses_new_ref() {
        refs.push(("new", params.new_ref.as_str()));
    }
    refs.into_iter()
        .map(|(side, value)| {
            Line::from(vec![
                Span::styled(format!("{side}: "), Style::default().fg(Color::Gray)),
                Span::styled(
                    app.config.commit_url(value),
                    Style::default().fg(Color::Blue),
                ),
            ])
        })
        .collect()
}

fn draw_footer(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut hints: Vec<String> = Vec::new();
    for side in [PickerSide::Old, PickerSide::New] {
        if let Some(chord) = app.shortcuts.chord(side) {
            hints.push(format!("{}: {} ref", chord.label(), side.label().to_lowercase()));
        }
    }
    if app.kind().uses_workloads() {
        hints.push("w/W: workloads".to_string());
    }
    hints.push("r: reload".to_string());
    hints.push("R: refs".to_string());
    hints.push("q: quit".to_string());
    frame.render_widget(
        Paragraph::new(Span::styled(
            hints.join("  "),
            Style::default().fg(Color::DarkGray),
        )),
        area,
    );
}
