//! Navigation and view switching utilities.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Search,
    Classify,
    Robustness,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Search => "Search",
            View::Classify => "Classify",
            View::Robustness => "Robustness",
        }
    }

    pub fn all() -> &'static [View] {
        &[View::Search, View::Classify, View::Robustness]
    }

    pub fn index(&self) -> usize {
        Self::all()
            .iter()
            .position(|v| v == self)
            .unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> View {
        let idx = self.index();
        let all = Self::all();
        let next = (idx + 1) % all.len();
        all[next]
    }

    pub fn previous(&self) -> View {
        let idx = self.index();
        let all = Self::all();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}
