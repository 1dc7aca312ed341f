//! Page selector built from pagination tokens.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use scholar_core::PageToken;

pub struct PaginationBar<'a> {
    pub tokens: &'a [PageToken],
    pub current_page: u32,
    pub total_pages: u32,
    pub style: Style,
    pub active_style: Style,
    /// Navigation is disabled while a request is in flight.
    pub disabled: bool,
}

impl<'a> PaginationBar<'a> {
    pub fn spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::with_capacity(self.tokens.len() * 2 + 2);
        let prev_style = if self.current_page <= 1 || self.disabled {
            self.style.add_modifier(Modifier::DIM)
        } else {
            self.style
        };
        spans.push(Span::styled("‹ Prev ", prev_style));

        for token in self.tokens {
            let text = format!(" {} ", token);
            let span = match token.page() {
                Some(page) if page == self.current_page => Span::styled(
                    format!("[{}]", page),
                    self.active_style.add_modifier(Modifier::BOLD),
                ),
                _ => Span::styled(text, self.style),
            };
            spans.push(span);
        }

        let next_style = if self.current_page >= self.total_pages || self.disabled {
            self.style.add_modifier(Modifier::DIM)
        } else {
            self.style
        };
        spans.push(Span::styled(" Next ›", next_style));
        spans
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let title = format!("Page {} of {}", self.current_page, self.total_pages);
        let widget = Paragraph::new(Line::from(self.spans()))
            .block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_core::page_tokens;

    fn rendered(bar: &PaginationBar<'_>) -> String {
        bar.spans().iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_current_page_is_bracketed() {
        let tokens = page_tokens(5, 10);
        let bar = PaginationBar {
            tokens: &tokens,
            current_page: 5,
            total_pages: 10,
            style: Style::default(),
            active_style: Style::default(),
            disabled: false,
        };
        let text = rendered(&bar);
        assert!(text.contains("[5]"));
        assert!(text.contains(" 1 "));
        assert!(text.contains(" … "));
        assert!(text.contains(" 10 "));
    }
}
