//! Search screen: query field, status line, results and page selector.

use crate::keys::InputFocus;
use crate::state::App;
use crate::theme::{loading_state_color, relevance_color};
use crate::views::helpers::{two_column, truncate};
use crate::widgets::{DetailPanel, PaginationBar, StatusIndicator, TextField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use scholar_core::{LoadingState, SearchSession};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(view) = app.search_view.as_ref() else {
        return;
    };
    let session = &view.session;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let focused = app.focus == InputFocus::QueryField;
    let border = if focused {
        app.theme.border_focus
    } else {
        app.theme.border
    };
    TextField {
        title: "Search [Ctrl+K]",
        value: &view.query_input,
        placeholder: "Search publications…",
        focused,
        style: Style::default().fg(app.theme.text),
        border_style: Style::default().fg(border),
        placeholder_style: Style::default().fg(app.theme.text_muted),
    }
    .render(f, chunks[0]);

    StatusIndicator {
        title: format!("Status │ {} per page", session.page_size()),
        status: status_text(session),
        style: Style::default().fg(loading_state_color(session.loading_state(), &app.theme)),
    }
    .render(f, chunks[1]);

    let (list_area, detail_area) = two_column(chunks[2], 55);
    let items: Vec<ListItem> = session
        .results()
        .iter()
        .map(|publication| {
            let score = publication.relevance_score.unwrap_or(0.0);
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>6.2} ", score),
                    Style::default().fg(relevance_color(score, &app.theme)),
                ),
                Span::raw(truncate(&publication.title, 120)),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    if !session.results().is_empty() {
        state.select(Some(view.selected.min(session.results().len() - 1)));
    }
    let list = List::new(items)
        .block(Block::default().title("Results").borders(Borders::ALL))
        .highlight_style(Style::default().fg(app.theme.primary).bg(app.theme.bg_highlight));
    f.render_stateful_widget(list, list_area, &mut state);

    if let Some(publication) = session.results().get(view.selected) {
        let mut fields = vec![
            ("Title", publication.title.clone()),
            ("Authors", publication.author_line()),
        ];
        if let Some(date) = publication.published_date {
            fields.push(("Published", date.format("%Y-%m-%d").to_string()));
        }
        fields.push(("Link", publication.link.clone()));
        if let Some(score) = publication.relevance_score {
            fields.push(("Relevance", format!("{:.3}", score)));
        }
        DetailPanel {
            title: "Publication",
            fields,
            style: Style::default().fg(app.theme.secondary),
            body: publication.abstract_text.clone(),
        }
        .render(f, detail_area);
    }

    if let (Some(tokens), Some(total_pages)) = (session.page_tokens(), session.total_pages()) {
        PaginationBar {
            tokens: &tokens,
            current_page: session.current_page(),
            total_pages,
            style: Style::default().fg(app.theme.text),
            active_style: Style::default().fg(app.theme.primary),
            disabled: session.is_paging_locked(),
        }
        .render(f, chunks[3]);
    }
}

pub fn status_text(session: &SearchSession) -> String {
    match session.loading_state() {
        LoadingState::Idle => "Enter a query and press Enter.".to_string(),
        LoadingState::Loading => "Searching…".to_string(),
        LoadingState::Success => {
            let total = session.total_results().unwrap_or(0);
            if total == 0 {
                format!("No results for \"{}\".", session.query())
            } else {
                format!(
                    "{} results for \"{}\" in {:.1} ms",
                    total,
                    session.query(),
                    session.search_time_ms()
                )
            }
        }
        LoadingState::Error => session.error_message().unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_core::{PageSize, SearchResponse, SessionError, SEARCH_FAILED_MESSAGE};

    #[test]
    fn test_status_text_follows_loading_state() {
        let mut session = SearchSession::new(PageSize::Ten);
        assert!(status_text(&session).starts_with("Enter a query"));

        let request = session.submit("graphs").unwrap();
        assert_eq!(status_text(&session), "Searching…");

        session.resolve(
            request.epoch,
            Ok(SearchResponse {
                results: Vec::new(),
                total: 0,
                page: Some(1),
                query: "graphs".to_string(),
                search_time_ms: 1.0,
            }),
        );
        assert_eq!(status_text(&session), "No results for \"graphs\".");

        let request = session.submit("graphs").unwrap();
        session.resolve(request.epoch, Err(SessionError::transport("down")));
        assert_eq!(status_text(&session), SEARCH_FAILED_MESSAGE);
    }
}
