//! TUI views and rendering
//!
//! Pure functions from AppState to widgets. Four result panels mirror the
//! request phases: help text when idle, progress while loading, activity
//! cards (or verbatim text) on success, and an error panel with optional
//! technical details on failure.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use planclient::GeneratedPlan;

use super::state::{AppState, FailureDetail, Field, Phase};
use crate::plan::parse_plan;

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(8), // Form
            Constraint::Min(0),    // Result
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);
    render_form(state, frame, chunks[1]);
    render_result(state, frame, chunks[2]);
    render_footer(state, frame, chunks[3]);
}

/// Render the header bar
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let phase_color = match state.phase {
        Phase::Idle => Color::Gray,
        Phase::Loading => Color::Yellow,
        Phase::Success(_) => Color::Green,
        Phase::Error(_) => Color::Red,
    };

    let header = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            "Weekend Planner ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(state.phase.display_name(), Style::default().fg(phase_color)),
    ])])
    .block(Block::default().borders(Borders::ALL).title(" wp "));

    frame.render_widget(header, area);
}

/// Render the two input fields plus any validation messages
fn render_form(state: &AppState, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Location
            Constraint::Length(3), // Ages
            Constraint::Min(0),    // Validation messages
        ])
        .split(area);

    render_input(
        frame,
        chunks[0],
        " Location or zip ",
        &state.location_input,
        state.focus == Field::Location,
        state.field_errors.get("location").is_some(),
    );
    render_input(
        frame,
        chunks[1],
        " Kids' ages (comma-separated, optional) ",
        &state.ages_input,
        state.focus == Field::Ages,
        state.field_errors.get("ages").is_some(),
    );

    let messages: Vec<Line> = state
        .field_errors
        .iter()
        .map(|(_, message)| Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red))))
        .collect();
    if !messages.is_empty() {
        frame.render_widget(Paragraph::new(messages).wrap(Wrap { trim: true }), chunks[2]);
    }
}

/// One bordered single-line input box
fn render_input(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool, has_error: bool) {
    let border_style = if has_error {
        Style::default().fg(Color::Red)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input = Paragraph::new(value).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(input, area);

    if focused {
        // Cursor just past the last typed character, inside the border
        let x = area.x + 1 + value.chars().count().min(area.width.saturating_sub(2) as usize) as u16;
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

/// Render the result panel for the current phase
fn render_result(state: &AppState, frame: &mut Frame, area: Rect) {
    match &state.phase {
        Phase::Idle => render_idle(frame, area),
        Phase::Loading => render_loading(state, frame, area),
        Phase::Success(plan) => {
            if state.show_raw {
                render_raw(state, plan, frame, area);
            } else {
                render_plan(state, plan, frame, area);
            }
        }
        Phase::Error(detail) => render_error(state, detail, frame, area),
    }
}

fn render_idle(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Enter a location and press Enter to request a weekend plan.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Ages are optional - the planner uses them to pick kid-friendly activities.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Plan "))
    .wrap(Wrap { trim: true });

    frame.render_widget(help, area);
}

fn render_loading(state: &AppState, frame: &mut Frame, area: Rect) {
    let elapsed = state
        .loading_since
        .map(|since| since.elapsed().as_secs())
        .unwrap_or(0);

    let loading = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Contacting the planner... ", Style::default().fg(Color::Yellow)),
            Span::styled(format!("{}s", elapsed), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            "This can take a little while; the request gives up after the configured deadline.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Plan "))
    .wrap(Wrap { trim: true });

    frame.render_widget(loading, area);
}

/// Success panel: activity cards when the text splits into a list, the
/// verbatim text otherwise, an empty-state line when there was no text at all
fn render_plan(state: &AppState, plan: &GeneratedPlan, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Weekend Plan ")
        .title_bottom(Line::from(" Ctrl+E raw response ").right_aligned());

    let Some(text) = plan.plan_text.as_deref() else {
        let empty = Paragraph::new(Line::from(Span::styled(
            "The planner returned an empty response. Try a different location.",
            Style::default().fg(Color::Yellow),
        )))
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    };

    let lines = match parse_plan(text) {
        Some(parsed) => {
            let mut lines: Vec<Line> = Vec::new();
            for header in &parsed.header {
                lines.push(Line::from(Span::styled(
                    header.clone(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            if !parsed.header.is_empty() {
                lines.push(Line::from(""));
            }
            for (i, activity) in parsed.activities.iter().enumerate() {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::Cyan)),
                    Span::styled(activity.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ]));
                if let Some(description) = &activity.description {
                    lines.push(Line::from(Span::raw(format!("    {}", description))));
                }
                lines.push(Line::from(""));
            }
            if let Some(disclaimer) = &parsed.disclaimer {
                lines.push(Line::from(Span::styled(
                    disclaimer.clone(),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                )));
            }
            lines
        }
        // Not list-shaped; show the text as-is with line breaks preserved
        None => text.lines().map(|line| Line::from(line.to_string())).collect(),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.result_scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Collapsible raw-response viewer: the payload exactly as received
fn render_raw(state: &AppState, plan: &GeneratedPlan, frame: &mut Frame, area: Rect) {
    let pretty = serde_json::to_string_pretty(&plan.raw).unwrap_or_else(|_| plan.raw.to_string());

    let paragraph = Paragraph::new(pretty)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Raw response ({} events) ", plan.events.len()))
                .title_bottom(Line::from(" Ctrl+E plan view │ PgUp/PgDn scroll ").right_aligned()),
        )
        .scroll((state.result_scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Error panel with an expandable technical-details section
fn render_error(state: &AppState, detail: &FailureDetail, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            detail.message.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if state.show_details {
        lines.push(Line::from(Span::styled(
            "Technical details",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )));
        match detail.status_code {
            Some(status) => lines.push(Line::from(format!("Status: {}", status))),
            None => lines.push(Line::from("Status: none (no response received)")),
        }
        match detail.body.as_deref() {
            Some(body) => {
                lines.push(Line::from("Body:"));
                for body_line in body.lines() {
                    lines.push(Line::from(Span::styled(
                        body_line.to_string(),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
            None => lines.push(Line::from("Body: none")),
        }
    } else if detail.status_code.is_some() || detail.body.is_some() {
        lines.push(Line::from(Span::styled(
            "Ctrl+D technical details",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Ctrl+R to try again with the same input.",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.result_scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Render the footer with key hints for the current phase
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let mut hints = vec!["Enter submit", "Tab field"];
    if state.can_retry() {
        hints.push("Ctrl+R retry");
    }
    if matches!(state.phase, Phase::Success(_)) {
        hints.push("Ctrl+E raw");
    }
    if matches!(state.phase, Phase::Error(_)) {
        hints.push("Ctrl+D details");
    }
    hints.push("Esc reset");
    hints.push("Ctrl+C quit");

    let footer = Paragraph::new(Line::from(Span::styled(
        hints.join(" │ "),
        Style::default().fg(Color::DarkGray),
    )))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
