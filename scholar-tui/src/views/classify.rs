//! Classification screen.

use crate::keys::InputFocus;
use crate::state::App;
use crate::theme::confidence_color;
use crate::views::helpers::two_column;
use crate::widgets::{ConfidenceGauge, DetailPanel, StatusIndicator, TextField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let view = &app.classify_view;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let focused = app.focus == InputFocus::ClassifyInput;
    let border = if focused {
        app.theme.border_focus
    } else {
        app.theme.border
    };
    TextField {
        title: "Text to classify [i]",
        value: &view.input,
        placeholder: "Paste an abstract or title…",
        focused,
        style: Style::default().fg(app.theme.text),
        border_style: Style::default().fg(border),
        placeholder_style: Style::default().fg(app.theme.text_muted),
    }
    .render(f, chunks[0]);

    let (status, color) = if view.loading {
        ("Classifying…".to_string(), app.theme.warning)
    } else if let Some(err) = &view.error {
        (err.clone(), app.theme.error)
    } else {
        ("Press Enter to classify.".to_string(), app.theme.text_dim)
    };
    StatusIndicator {
        title: format!("Model [m] │ {}", view.model.label()),
        status,
        style: Style::default().fg(color),
    }
    .render(f, chunks[1]);

    let Some(result) = &view.result else {
        return;
    };

    let (left, right) = two_column(chunks[2], 50);
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(left);

    ConfidenceGauge {
        title: format!("{} │ confidence", result.category),
        confidence: result.confidence,
        style: Style::default().fg(confidence_color(result.confidence, &app.theme)),
    }
    .render(f, left_chunks[0]);

    let items: Vec<ListItem> = result
        .ranked_probabilities()
        .into_iter()
        .map(|(category, p)| ListItem::new(format!("{:>6.2}%  {}", p * 100.0, category)))
        .collect();
    let list = List::new(items).block(Block::default().title("Probabilities").borders(Borders::ALL));
    f.render_widget(list, left_chunks[1]);

    let mut fields = vec![
        ("Category", result.category.clone()),
        ("Confidence", format!("{:.3}", result.confidence)),
    ];
    if let Some(model) = result.model_used {
        fields.push(("Model", model.label().to_string()));
    }
    if let Some(message) = &result.message {
        fields.push(("Message", message.clone()));
    }
    DetailPanel {
        title: "Result",
        fields,
        style: Style::default().fg(app.theme.secondary),
        body: result.explanation.clone(),
    }
    .render(f, right);
}
