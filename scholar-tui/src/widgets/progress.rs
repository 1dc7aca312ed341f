//! Gauge for classifier confidence.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
    Frame,
};

pub struct ConfidenceGauge {
    pub title: String,
    /// Expected in `[0, 1]`; clamped otherwise.
    pub confidence: f64,
    pub style: Style,
}

impl ConfidenceGauge {
    pub fn ratio(&self) -> f64 {
        if self.confidence.is_finite() {
            self.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let ratio = self.ratio();
        let gauge = Gauge::default()
            .block(Block::default().title(self.title.as_str()).borders(Borders::ALL))
            .gauge_style(self.style)
            .label(format!("{:.1}%", ratio * 100.0))
            .ratio(ratio);
        f.render_widget(gauge, area);
    }
}
