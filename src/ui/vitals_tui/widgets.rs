use ratatui::prelude::*;

use crate::core::{MetricStatus, Severity};

/// Indicator color for a severity bucket
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Unmeasured => Color::DarkGray,
        Severity::Good => Color::Green,
        Severity::NeedsImprovement => Color::Yellow,
        Severity::Poor => Color::Red,
    }
}

/// Colored status dot
pub fn severity_dot(severity: Severity) -> Span<'static> {
    Span::styled("●", Style::default().fg(severity_color(severity)))
}

/// One metric line: name, value with unit, dot.
pub fn metric_line(status: &MetricStatus, selected: bool, width: usize) -> Line<'static> {
    let name = status.key.report_name();
    let value = status.display.clone();

    let marker = if selected { "▸ " } else { "  " };
    // marker + name + padding + value + space + dot
    let used = marker.chars().count() + name.len() + value.len() + 2;
    let padding = " ".repeat(width.saturating_sub(used));

    let name_style = if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::styled(name, name_style),
        Span::raw(padding),
        Span::styled(value, Style::default().fg(Color::Gray)),
        Span::raw(" "),
        severity_dot(status.severity),
    ])
}
