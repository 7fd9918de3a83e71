use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::VitalsApp;
use super::event_handler::SLOW_BUTTONS_MS;
use super::widgets::{metric_line, severity_dot};
use crate::ui::panel::{Anchor, MetricInfo, MetricsPanel, PanelViewState};

const EXPANDED_WIDTH: u16 = 34;
const COLLAPSED_WIDTH: u16 = 9;
const HIDDEN_WIDTH: u16 = 10;
const HIDDEN_HEIGHT: u16 = 3;
const INFO_WIDTH: u16 = 44;

/// Main render function
pub fn render_ui(frame: &mut Frame, app: &VitalsApp) {
    let area = frame.area();

    render_page(frame, area, app);
    render_panel(frame, area, &app.panel);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

/// Demo page behind the floating panel
fn render_page(frame: &mut Frame, area: Rect, app: &VitalsApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Demos
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let title = Paragraph::new("Web Vitals Demo")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    let demos = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_image_demo(frame, demos[0], app);
    render_inp_demo(frame, demos[1], app);

    let footer = Paragraph::new(
        " q quit │ ? help │ e expand │ x hide/show │ d dismiss │ ↑↓ select │ i info │ 1-3 slow buttons ",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[2]);
}

/// Delayed image: content below it shifts unless a skeleton holds its place
fn render_image_demo(frame: &mut Frame, area: Rect, app: &VitalsApp) {
    let block = Block::default()
        .title(" CLS & LCP Demo ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let image_height = (inner.height / 2).max(1);
    let reserve = app.image_loaded() || app.simulation.skeleton;

    let constraints = if reserve {
        vec![Constraint::Length(image_height), Constraint::Min(1)]
    } else {
        vec![Constraint::Length(0), Constraint::Min(1)]
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    if app.image_loaded() {
        let image = Paragraph::new("[ hero image ]")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Black).bg(Color::LightBlue));
        frame.render_widget(image, rows[0]);
    } else if app.simulation.skeleton {
        let skeleton = Block::default().style(Style::default().bg(Color::DarkGray));
        frame.render_widget(skeleton, rows[0]);
    }

    let text = vec![
        Line::from(format!("Image delay: {}ms", app.simulation.image_delay_ms)),
        Line::from(format!(
            "Skeleton placeholder: {}",
            if app.simulation.skeleton { "on" } else { "off" }
        )),
        Line::from(""),
        Line::from("Text below the image moves when it loads.").style(Style::default().fg(Color::Gray)),
    ];
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), rows[1]);
}

fn render_inp_demo(frame: &mut Frame, area: Rect, app: &VitalsApp) {
    let block = Block::default()
        .title(" INP Demo ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let labels = ["Good INP", "Needs Improvement INP", "Poor INP"];
    let colors = [Color::Green, Color::Yellow, Color::Red];

    let mut lines: Vec<Line> = SLOW_BUTTONS_MS
        .iter()
        .zip(labels.iter().zip(colors))
        .enumerate()
        .map(|(i, (ms, (label, color)))| {
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", i + 1),
                    Style::default().fg(Color::Black).bg(color),
                ),
                Span::raw(format!(" {} ({}ms)", label, ms)),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    if let Some(note) = app.click_note() {
        lines.push(Line::from(note).style(Style::default().fg(Color::Green)));
    } else {
        lines.push(
            Line::from("These buttons freeze the UI for the given duration before responding.")
                .style(Style::default().fg(Color::Gray)),
        );
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

/// Vertical placement of a floating box of `height` rows.
fn anchored_rect(area: Rect, width: u16, height: u16, anchor: Anchor) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width - width;
    let y = match anchor {
        Anchor::Centered => area.y + (area.height - height) / 2,
        Anchor::Bottom => area.y + area.height - height,
    };
    Rect::new(x, y, width, height)
}

/// Floating metrics panel on the right edge
pub fn render_panel(frame: &mut Frame, area: Rect, panel: &MetricsPanel) {
    let view = panel.view();

    if !view.visible {
        render_reopen_tab(frame, area, view);
        return;
    }

    let rows = panel.rows();

    if !view.expanded {
        // Tab strip: key names and dots only
        let height = rows.len() as u16 + 2;
        let rect = anchored_rect(area, COLLAPSED_WIDTH, height, view.anchor);
        let lines: Vec<Line> = rows
            .iter()
            .map(|row| {
                Line::from(vec![
                    Span::raw(format!("{:<5}", row.key.report_name())),
                    severity_dot(row.severity),
                ])
            })
            .collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(lines).block(block), rect);
        return;
    }

    // Header + description + blank + metrics + blank + hint, inside borders
    let height = rows.len() as u16 + 7;
    let rect = anchored_rect(area, EXPANDED_WIDTH, height, view.anchor);
    let inner_width = rect.width.saturating_sub(2) as usize;

    let mut lines = vec![
        Line::from("Core Web Vitals measure the user").style(Style::default().fg(Color::Gray)),
        Line::from("experience of web pages.").style(Style::default().fg(Color::Gray)),
        Line::from(""),
    ];
    lines.extend(
        rows.iter()
            .map(|row| metric_line(row, row.key == panel.selected(), inner_width)),
    );
    lines.push(Line::from(""));
    lines.push(
        Line::from("i: about the selected metric").style(Style::default().fg(Color::DarkGray)),
    );

    let block = Block::default()
        .title(" Web Vitals ")
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .style(Style::default().bg(Color::Black));

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);

    if let Some(info) = panel.info() {
        render_info_popover(frame, area, rect, info);
    }
}

/// Small button that brings the panel back
fn render_reopen_tab(frame: &mut Frame, area: Rect, view: PanelViewState) {
    let rect = anchored_rect(area, HIDDEN_WIDTH, HIDDEN_HEIGHT, view.anchor);
    let button = Paragraph::new("≡ vitals")
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
    frame.render_widget(Clear, rect);
    frame.render_widget(button, rect);
}

/// Popover with the selected metric's description, left of the panel
fn render_info_popover(frame: &mut Frame, area: Rect, panel_rect: Rect, info: &MetricInfo) {
    let width = INFO_WIDTH.min(panel_rect.x.saturating_sub(area.x));
    if width < 12 {
        return;
    }
    let height = panel_rect.height.max(10).min(area.height);
    let x = panel_rect.x - width;
    let y = panel_rect.y.min(area.y + area.height - height);
    let rect = Rect::new(x, y, width, height);

    let text = vec![
        Line::from(info.name).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(info.description),
        Line::from(""),
        Line::from("How it's reported:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(info.reporting),
    ];

    let popover = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Black).bg(Color::White));

    frame.render_widget(Clear, rect);
    frame.render_widget(popover, rect);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = r#"
    Web Vitals Demo - Help

    Keyboard Shortcuts:
    ─────────────────────────────────────
    q / Esc     Quit the application
    ? / h       Toggle this help screen
    e           Collapse / expand the panel
    x           Hide / show the panel
    d           Dismiss the panel
    ↑ / ↓       Select a metric
    i           About the selected metric
    1 / 2 / 3   Slow buttons (50 / 300 / 600 ms)
    "#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::DarkGray));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(paragraph, popup_area);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
