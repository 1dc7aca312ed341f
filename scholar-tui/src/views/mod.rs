//! View rendering dispatch.

pub mod classify;
pub mod helpers;
pub mod robustness;
pub mod search;

use crate::nav::View;
use crate::state::App;
use crate::theme::notification_color;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use scholar_core::ModelType;

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.active_view {
        View::Search => search::render(f, app, layout[1]),
        View::Classify => classify::render(f, app, layout[1]),
        View::Robustness => robustness::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);

    if app.modal.is_some() {
        render_modal(f, app);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let mut tabs = Vec::new();
    for (index, view) in View::all().iter().enumerate() {
        let label = format!(" {} {} ", index + 1, view.title());
        let style = if *view == app.active_view {
            Style::default()
                .fg(app.theme.bg)
                .bg(app.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text_dim)
        };
        tabs.push(Span::styled(label, style));
        tabs.push(Span::raw(" "));
    }

    let documents = app
        .index_stats
        .as_ref()
        .map(|s| format!("Docs: {}", s.total_documents))
        .unwrap_or_else(|| "Docs: ?".to_string());
    let models = match &app.model_info {
        Some(info) => [ModelType::NaiveBayes, ModelType::LogisticRegression]
            .iter()
            .map(|m| {
                let mark = if info.is_trained(*m) { "✓" } else { "✗" };
                format!("{} {}", m.label(), mark)
            })
            .collect::<Vec<_>>()
            .join("  "),
        None => "Models: ?".to_string(),
    };
    let crawl = app
        .crawler_status
        .as_ref()
        .map(|status| status.summary())
        .unwrap_or_else(|| "Crawl: ?".to_string());
    tabs.push(Span::styled(
        format!("│ {} │ {} │ {}", documents, models, crawl),
        Style::default().fg(app.theme.text_dim),
    ));

    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        "SCHOLAR TUI",
        Style::default().fg(app.theme.primary),
    ));
    f.render_widget(Paragraph::new(Line::from(tabs)).block(block), area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = if app.focus.is_text_input() {
        "Enter submit • Esc leave field • Ctrl+U clear field • Ctrl+C quit"
    } else {
        match app.active_view {
            View::Search => "/ search • h/l page • s page size • c clear • ? help • q quit",
            View::Classify => "i edit • m model • Enter classify • c clear • ? help • q quit",
            View::Robustness => "Enter run suite • j/k move • c clear • ? help • q quit",
        }
    };
    let (text, style) = if let Some(note) = app.notifications.last() {
        let color = notification_color(note.level, &app.theme);
        (
            format!(
                "[{}] {}: {}",
                note.created_at.format("%H:%M:%S"),
                note.level.label(),
                note.message
            ),
            Style::default().fg(color),
        )
    } else {
        ("Ready".to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(help))
        .style(style);
    f.render_widget(footer, area);
}

fn render_modal(f: &mut Frame<'_>, app: &App) {
    let Some(modal) = &app.modal else {
        return;
    };
    let area = helpers::centered_rect(60, 60, f.size());
    f.render_widget(Clear, area);
    let widget = Paragraph::new(modal.message.clone())
        .style(Style::default().fg(app.theme.text))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(modal.title.as_str())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focus)),
        );
    f.render_widget(widget, area);
}
