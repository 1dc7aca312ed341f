//! Single line text field.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct TextField<'a> {
    pub title: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub focused: bool,
    pub style: Style,
    pub border_style: Style,
    pub placeholder_style: Style,
}

impl<'a> TextField<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let line = if self.value.is_empty() && !self.focused {
            Line::from(Span::styled(self.placeholder, self.placeholder_style))
        } else {
            Line::from(Span::styled(self.value, self.style))
        };
        let widget = Paragraph::new(line).block(
            Block::default()
                .title(self.title)
                .borders(Borders::ALL)
                .border_style(self.border_style),
        );
        f.render_widget(widget, area);

        if self.focused {
            // Inside the border, after the last character.
            let width = self.value.chars().count() as u16;
            let x = area
                .x
                .saturating_add(1)
                .saturating_add(width)
                .min(area.right().saturating_sub(2));
            f.set_cursor(x, area.y.saturating_add(1));
        }
    }
}
