//! Robustness screen: runs the classifier suite and shows per-case results.

use crate::state::App;
use crate::views::helpers::{two_column, truncate};
use crate::widgets::{DetailPanel, StatusIndicator};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use scholar_core::robustness::{CaseOutcome, Expectation, RobustnessCase};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let view = &app.robustness_view;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let (status, color) = if view.loading {
        ("Running suite…".to_string(), app.theme.warning)
    } else if let Some(err) = &view.error {
        (err.clone(), app.theme.error)
    } else if let Some(report) = &view.report {
        (
            format!(
                "Accuracy {:.2}% ({}/{} scored) │ Edge cases handled {}/{}",
                report.accuracy_pct,
                report.correct,
                report.total_scored,
                report.edge_cases_handled,
                report.edge_cases_total
            ),
            app.theme.success,
        )
    } else {
        (
            format!("{} cases ready. Press Enter to run.", view.cases.len()),
            app.theme.text_dim,
        )
    };
    StatusIndicator {
        title: "Robustness".to_string(),
        status,
        style: Style::default().fg(color),
    }
    .render(f, chunks[0]);

    let (list_area, detail_area) = two_column(chunks[1], 60);

    let items: Vec<ListItem> = match &view.report {
        Some(report) => report
            .outcomes
            .iter()
            .map(|outcome| {
                let (mark, color) = if outcome.passed {
                    ("✓", app.theme.success)
                } else {
                    ("✗", app.theme.error)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", mark), Style::default().fg(color)),
                    Span::styled(
                        format!("{:<15}", outcome.case.group.title()),
                        Style::default().fg(app.theme.text_dim),
                    ),
                    Span::raw(preview(&outcome.case)),
                ]))
            })
            .collect(),
        None => view
            .cases
            .iter()
            .map(|case| {
                ListItem::new(format!("  {:<15}{}", case.group.title(), preview(case)))
            })
            .collect(),
    };
    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(view.selected.min(items.len() - 1)));
    }
    let list = List::new(items)
        .block(Block::default().title("Cases").borders(Borders::ALL))
        .highlight_style(Style::default().fg(app.theme.primary).bg(app.theme.bg_highlight));
    f.render_stateful_widget(list, list_area, &mut state);

    if let Some(outcome) = view
        .report
        .as_ref()
        .and_then(|r| r.outcomes.get(view.selected))
    {
        DetailPanel {
            title: "Case",
            fields: outcome_fields(outcome),
            style: Style::default().fg(app.theme.secondary),
            body: Some(truncate(&outcome.case.text, 400)),
        }
        .render(f, detail_area);
    }
}

fn preview(case: &RobustnessCase) -> String {
    let flat: String = case
        .text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.trim().is_empty() {
        return "(blank)".to_string();
    }
    truncate(flat.trim(), 48)
}

fn outcome_fields(outcome: &CaseOutcome) -> Vec<(&'static str, String)> {
    let expected = match &outcome.case.expectation {
        Expectation::Category(category) => category.to_string(),
        Expectation::Unknown => "unknown".to_string(),
        Expectation::Mixed => "mixed".to_string(),
        Expectation::Handled { description } => format!("handled ({})", description),
    };
    let mut fields = vec![
        ("Group", outcome.case.group.title().to_string()),
        ("Expected", expected),
    ];
    if let Some(category) = &outcome.category {
        fields.push(("Got", category.clone()));
    }
    if let Some(confidence) = outcome.confidence {
        fields.push(("Confidence", format!("{:.3}", confidence)));
    }
    if let Some(error) = &outcome.error {
        fields.push(("Error", error.clone()));
    }
    fields.push(("Passed", if outcome.passed { "yes" } else { "no" }.to_string()));
    fields
}
