use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::format::{fmt_value, header_or};
use crate::model::{FormattedComparisonResult, FormattedRow, Trend};

const LABEL_WIDTH: usize = 28;
const VALUE_WIDTH: usize = 14;

fn trend_style(trend: Trend) -> Style {
    match trend {
        Trend::Better => Style::default().fg(Color::Green),
        Trend::Worse => Style::default().fg(Color::Red),
        Trend::Unchanged => Style::default().fg(Color::Gray),
    }
}

fn row_line(row: &FormattedRow) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("  {:<LABEL_WIDTH$}", row.label)),
        Span::raw(format!("{:>VALUE_WIDTH$}", fmt_value(row.old))),
        Span::raw(format!("{:>VALUE_WIDTH$}", fmt_value(row.new))),
        Span::styled(
            format!("{:>VALUE_WIDTH$}", row.delta.display()),
            trend_style(row.trend),
        ),
    ])
}

fn comparison_lines(
    formatted: &FormattedComparisonResult,
) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(formatted.row_count() + formatted.groups.len() * 2 + 1);
    let header = Style::default().fg(Color::Gray);
    lines.push(Line::from(vec![
        Span::styled(format!("  {:<LABEL_WIDTH$}", "Metric"), header),
        Span::styled(
            format!("{:>VALUE_WIDTH$}", header_or(&formatted.old_workload, "Old")),
            header,
        ),
        Span::styled(
            format!("{:>VALUE_WIDTH$}", header_or(&formatted.new_workload, "New")),
            header,
        ),
        Span::styled(format!("{:>VALUE_WIDTH$}", "Delta"), header),
    ]));

    if formatted.groups.is_empty() {
        lines.push(Line::from(Span::styled(
            "  no metrics in this result",
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    for group in &formatted.groups {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            group.title.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.extend(group.rows.iter().map(row_line));
    }
    lines
}

pub(in crate::tui_shell) fn render_comparison(
    frame: &mut ratatui::Frame,
    formatted: &FormattedComparisonResult,
    scroll: usize,
    area: Rect,
) {
    let lines = comparison_lines(formatted);
    let max_scroll = lines.len().saturating_sub(area.height as usize);
    let scroll = scroll.min(max_scroll) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}
