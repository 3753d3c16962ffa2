//! Picker rendering.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Stylize;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};

use taskdeck_core::task::Task;

use crate::app::App;

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App<'_>, results: &[&Task]) {
    let [reco_area, input_area, main_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_recommendations(frame, app, reco_area);
    draw_input(frame, app, input_area);

    let [list_area, preview_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(main_area);
    draw_results(frame, app, results, list_area);
    draw_preview(frame, results.get(app.selected).copied(), preview_area);

    frame.render_widget(
        Line::from(" ↑/↓ select   Enter run   Esc quit ").dim(),
        footer_area,
    );
}

fn draw_recommendations(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let recommendations = app.recommendations();
    if recommendations.is_empty() {
        return;
    }
    let names: Vec<&str> = recommendations.iter().map(|t| t.name.as_str()).collect();
    let line = Line::from(vec![
        Span::raw(" recent here: ").dim(),
        Span::raw(names.join(", ")).italic(),
    ]);
    frame.render_widget(line, area);
}

fn draw_input(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let input = Paragraph::new(app.query.as_str()).block(Block::bordered().title("Search"));
    frame.render_widget(input, area);
    // Cursor sits after the typed query, inside the border.
    frame.set_cursor_position(Position::new(
        area.x + 1 + u16::try_from(app.query.chars().count()).unwrap_or(u16::MAX - 1),
        area.y + 1,
    ));
}

fn draw_results(frame: &mut Frame<'_>, app: &App<'_>, results: &[&Task], area: Rect) {
    let items: Vec<ListItem<'_>> = results.iter().map(|task| result_row(task)).collect();
    let list = List::new(items)
        .block(Block::bordered().title(format!("Tasks ({})", results.len())))
        .highlight_symbol("› ")
        .highlight_style(ratatui::style::Style::new().reversed());
    let mut state = ListState::default().with_selected(if results.is_empty() {
        None
    } else {
        Some(app.selected)
    });
    frame.render_stateful_widget(list, area, &mut state);
}

fn result_row<'t>(task: &'t Task) -> ListItem<'t> {
    ListItem::new(Line::from(vec![
        Span::raw(task.name.as_str()).bold(),
        Span::raw("  "),
        Span::raw(task.cwd.as_str()).dim(),
        Span::raw("  "),
        Span::raw(relative(task.last_run)).dim(),
    ]))
}

fn draw_preview(frame: &mut Frame<'_>, task: Option<&Task>, area: Rect) {
    let block = Block::bordered().title("Details");
    let Some(task) = task else {
        frame.render_widget(
            Paragraph::new("no matching tasks").dim().block(block),
            area,
        );
        return;
    };

    let mut lines = vec![
        Line::from(task.name.as_str()).bold(),
        Line::raw(""),
        field_line("command", task.command.as_str()),
        field_line("cwd", task.cwd.as_str()),
        field_line("last run", relative(task.last_run)),
    ];
    if !task.description.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::raw(task.description.as_str()));
    }
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn field_line<'t>(label: &'static str, value: impl Into<std::borrow::Cow<'t, str>>) -> Line<'t> {
    Line::from(vec![
        Span::raw(format!("{label:>9}  ")).dim(),
        Span::raw(value),
    ])
}

/// Compact relative timestamp for display ("never", "just now", "5m ago").
pub(crate) fn relative(last_run: Option<DateTime<Utc>>) -> String {
    let Some(then) = last_run else {
        return "never".to_string();
    };
    relative_from(Utc::now(), then)
}

fn relative_from(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
