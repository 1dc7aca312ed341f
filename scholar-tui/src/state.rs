//! Application state and view state definitions.

use crate::config::TuiConfig;
use crate::events::TuiEvent;
use crate::keys::{map_key, Action, InputFocus};
use crate::nav::View;
use crate::notifications::{Notification, NotificationLevel, MAX_NOTIFICATIONS};
use crate::theme::SynthBruteTheme;
use scholar_core::robustness::{self, RobustnessCase, RobustnessReport};
use scholar_core::{
    BatchClassifyResponse, ClassificationResponse, Commit, CrawlerStatus, IndexStats, ModelInfo,
    ModelType, PageSize, SearchRequest, SearchResponse, SearchSession, SessionError,
};

/// Work the event loop must start on behalf of the state.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Search(SearchRequest),
    Classify {
        epoch: u64,
        text: String,
        model: ModelType,
    },
    Robustness {
        epoch: u64,
        texts: Vec<String>,
    },
}

pub struct App {
    pub config: TuiConfig,
    pub theme: SynthBruteTheme,
    pub active_view: View,
    pub focus: InputFocus,

    /// Page size preference, applied to each newly mounted session.
    pub page_size: PageSize,
    /// Present only while the Search screen is mounted.
    pub search_view: Option<SearchViewState>,
    /// Last epoch used by an unmounted search session.
    retired_epoch: u64,
    pub classify_view: ClassifyViewState,
    pub robustness_view: RobustnessViewState,

    pub index_stats: Option<IndexStats>,
    pub model_info: Option<ModelInfo>,
    pub crawler_status: Option<CrawlerStatus>,

    pub notifications: Vec<Notification>,
    pub modal: Option<Modal>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: TuiConfig) -> Self {
        let page_size = config.page_size();
        Self {
            config,
            theme: SynthBruteTheme::synthbrute(),
            active_view: View::Search,
            focus: InputFocus::QueryField,
            page_size,
            search_view: Some(SearchViewState::mount(page_size, 0)),
            retired_epoch: 0,
            classify_view: ClassifyViewState::new(),
            robustness_view: RobustnessViewState::new(),
            index_stats: None,
            model_info: None,
            crawler_status: None,
            notifications: Vec::new(),
            modal: None,
            should_quit: false,
        }
    }

    /// The mounted search session, if the Search screen is showing.
    pub fn session(&self) -> Option<&SearchSession> {
        self.search_view.as_ref().map(|view| &view.session)
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let overflow = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..overflow);
        }
    }

    pub fn set_view(&mut self, view: View) {
        if view == self.active_view {
            return;
        }
        if let Some(unmounted) = self.search_view.take() {
            self.retired_epoch = unmounted.session.epoch();
            tracing::debug!(epoch = self.retired_epoch, "search screen unmounted");
        }
        if view == View::Search {
            self.search_view = Some(SearchViewState::mount(self.page_size, self.retired_epoch));
            tracing::debug!("search screen mounted");
        }
        self.active_view = view;
        self.focus = InputFocus::None;
    }

    /// Fold one loop event into the state.
    pub fn handle_event(&mut self, event: TuiEvent) -> Option<Effect> {
        match event {
            TuiEvent::Input(key) => {
                let action = map_key(key, self.focus)?;
                self.handle_action(action)
            }
            TuiEvent::SearchCompleted { epoch, outcome } => {
                self.apply_search(epoch, outcome);
                None
            }
            TuiEvent::ClassifyCompleted { epoch, outcome } => {
                self.apply_classify(epoch, outcome);
                None
            }
            TuiEvent::RobustnessCompleted { epoch, outcome } => {
                self.apply_robustness(epoch, outcome);
                None
            }
            TuiEvent::IndexStatsLoaded(stats) => {
                self.apply_index_stats(stats);
                None
            }
            TuiEvent::ModelInfoLoaded(info) => {
                self.apply_model_info(info);
                None
            }
            TuiEvent::CrawlerStatusLoaded(status) => {
                self.apply_crawler_status(status);
                None
            }
            TuiEvent::ApiError(message) => {
                tracing::warn!(%message, "service request failed");
                self.notify(NotificationLevel::Warning, message);
                None
            }
            TuiEvent::Resize { .. } | TuiEvent::Tick => None,
        }
    }

    /// Apply one routed key action.
    pub fn handle_action(&mut self, action: Action) -> Option<Effect> {
        if self.modal.is_some() {
            match action {
                Action::Quit => self.should_quit = true,
                Action::Cancel | Action::Confirm | Action::OpenHelp | Action::Blur => {
                    self.modal = None
                }
                _ => {}
            }
            return None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::NextView => {
                self.set_view(self.active_view.next());
                None
            }
            Action::PrevView => {
                self.set_view(self.active_view.previous());
                None
            }
            Action::SwitchView(index) => {
                if let Some(view) = View::from_index(index) {
                    self.set_view(view);
                }
                None
            }
            Action::FocusSearch => {
                self.set_view(View::Search);
                self.focus = InputFocus::QueryField;
                None
            }
            Action::FocusInput => {
                self.focus = match self.active_view {
                    View::Search => InputFocus::QueryField,
                    View::Classify => InputFocus::ClassifyInput,
                    View::Robustness => InputFocus::None,
                };
                None
            }
            Action::Submit => self.submit_search(),
            Action::Blur => {
                self.focus = InputFocus::None;
                None
            }
            Action::InsertChar(c) => {
                if let Some(input) = self.focused_input() {
                    input.push(c);
                }
                None
            }
            Action::DeleteChar => {
                if let Some(input) = self.focused_input() {
                    input.pop();
                }
                None
            }
            Action::ClearInput => {
                if let Some(input) = self.focused_input() {
                    input.clear();
                }
                None
            }
            Action::NextPage => self.on_search(|session| session.next_page()),
            Action::PrevPage => self.on_search(|session| session.previous_page()),
            Action::FirstPage => self.on_search(|session| session.change_page(1)),
            Action::LastPage => self.on_search(|session| {
                let last = session.total_pages()?;
                session.change_page(last)
            }),
            Action::CyclePageSize => {
                let view = self.search_view.as_mut()?;
                let size = view.session.page_size().next();
                let request = view.session.change_page_size(size);
                self.page_size = size;
                self.notify(NotificationLevel::Info, format!("Page size: {}", size));
                self.follow(request)
            }
            Action::ClearSession => {
                match self.active_view {
                    View::Search => {
                        if let Some(view) = self.search_view.as_mut() {
                            view.session.clear();
                            view.query_input.clear();
                            view.selected = 0;
                        }
                    }
                    View::Classify => self.classify_view.clear(),
                    View::Robustness => self.robustness_view.clear(),
                }
                None
            }
            Action::ToggleModel => {
                if self.active_view == View::Classify {
                    self.classify_view.model = self.classify_view.model.toggle();
                }
                None
            }
            Action::MoveUp => {
                self.move_selection(false);
                None
            }
            Action::MoveDown => {
                self.move_selection(true);
                None
            }
            Action::OpenHelp => {
                self.modal = Some(Modal::help());
                None
            }
            Action::Confirm => match self.active_view {
                View::Search => {
                    self.focus = InputFocus::QueryField;
                    None
                }
                View::Classify => self.submit_classify(),
                View::Robustness => self.start_robustness(),
            },
            Action::Cancel => {
                self.focus = InputFocus::None;
                None
            }
        }
    }

    fn submit_search(&mut self) -> Option<Effect> {
        let view = self.search_view.as_mut()?;
        let query = view.query_input.clone();
        match view.session.submit(&query) {
            Ok(request) => {
                tracing::info!(query = %request.query, "search submitted");
                self.focus = InputFocus::None;
                self.follow(Some(request))
            }
            Err(err) => {
                tracing::debug!(error = %err, "search rejected");
                None
            }
        }
    }

    fn submit_classify(&mut self) -> Option<Effect> {
        let (epoch, text, model) = self.classify_view.submit()?;
        if let Some(info) = &self.model_info {
            if !info.is_trained(model) {
                self.notify(
                    NotificationLevel::Warning,
                    format!("{} is not trained on the server", model.label()),
                );
            }
        }
        self.focus = InputFocus::None;
        Some(Effect::Classify { epoch, text, model })
    }

    fn start_robustness(&mut self) -> Option<Effect> {
        let (epoch, texts) = self.robustness_view.start()?;
        self.notify(
            NotificationLevel::Info,
            format!("Running robustness suite ({} inputs)", texts.len()),
        );
        Some(Effect::Robustness { epoch, texts })
    }

    fn on_search<F>(&mut self, op: F) -> Option<Effect>
    where
        F: FnOnce(&mut SearchSession) -> Option<SearchRequest>,
    {
        let view = self.search_view.as_mut()?;
        let request = op(&mut view.session);
        self.follow(request)
    }

    fn follow(&mut self, request: Option<SearchRequest>) -> Option<Effect> {
        let request = request?;
        if request.scroll_to_results {
            if let Some(view) = self.search_view.as_mut() {
                view.selected = 0;
            }
            self.focus = InputFocus::None;
        }
        Some(Effect::Search(request))
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            InputFocus::QueryField => self.search_view.as_mut().map(|v| &mut v.query_input),
            InputFocus::ClassifyInput => Some(&mut self.classify_view.input),
            InputFocus::None => None,
        }
    }

    fn move_selection(&mut self, down: bool) {
        match self.active_view {
            View::Search => {
                if let Some(view) = self.search_view.as_mut() {
                    let len = view.session.results().len();
                    view.selected = step(view.selected, len, down);
                }
            }
            View::Robustness => {
                let len = self
                    .robustness_view
                    .report
                    .as_ref()
                    .map_or(self.robustness_view.cases.len(), |r| r.outcomes.len());
                self.robustness_view.selected = step(self.robustness_view.selected, len, down);
            }
            View::Classify => {}
        }
    }

    // ------------------------------------------------------------------------
    // Completions
    // ------------------------------------------------------------------------

    pub fn apply_search(
        &mut self,
        epoch: u64,
        outcome: Result<SearchResponse, SessionError>,
    ) -> Commit {
        let Some(view) = self.search_view.as_mut() else {
            tracing::debug!(epoch, "search completion after unmount");
            return Commit::Stale;
        };
        let commit = view.session.resolve(epoch, outcome);
        let mut failure = None;
        match commit {
            Commit::Applied => {
                tracing::info!(
                    total = ?view.session.total_results(),
                    page = view.session.current_page(),
                    "search results committed"
                );
                let len = view.session.results().len();
                view.selected = view.selected.min(len.saturating_sub(1));
            }
            Commit::Failed => failure = view.session.error_message().map(str::to_string),
            Commit::Stale => {}
        }
        if let Some(message) = failure {
            self.notify(NotificationLevel::Error, message);
        }
        commit
    }

    pub fn apply_classify(&mut self, epoch: u64, outcome: Result<ClassificationResponse, String>) {
        if let Err(err) = &outcome {
            tracing::warn!(epoch, error = %err, "classification failed");
        }
        self.classify_view.resolve(epoch, outcome);
    }

    pub fn apply_robustness(&mut self, epoch: u64, outcome: Result<BatchClassifyResponse, String>) {
        let Some(report) = self.robustness_view.resolve(epoch, outcome) else {
            return;
        };
        let summary = format!(
            "Accuracy {:.2}% ({}/{}), edge cases {}/{}",
            report.accuracy_pct,
            report.correct,
            report.total_scored,
            report.edge_cases_handled,
            report.edge_cases_total
        );
        self.notify(NotificationLevel::Success, summary);
    }

    pub fn apply_index_stats(&mut self, stats: IndexStats) {
        tracing::debug!(documents = stats.total_documents, "index stats loaded");
        self.index_stats = Some(stats);
    }

    pub fn apply_model_info(&mut self, info: ModelInfo) {
        self.model_info = Some(info);
    }

    pub fn apply_crawler_status(&mut self, status: CrawlerStatus) {
        tracing::debug!(
            running = status.is_running,
            publications = status.total_publications,
            "crawler status loaded"
        );
        if status.is_running {
            self.notify(
                NotificationLevel::Info,
                "A crawl is in progress; search results may change.",
            );
        }
        self.crawler_status = Some(status);
    }
}

fn step(selected: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if down {
        (selected + 1).min(len - 1)
    } else {
        selected.saturating_sub(1)
    }
}

#[derive(Debug, Clone)]
pub struct Modal {
    pub title: String,
    pub message: String,
}

impl Modal {
    pub fn help() -> Self {
        Self {
            title: "Keys".to_string(),
            message: [
                "Ctrl+K or /   focus the search field",
                "Enter         search / classify / run suite",
                "Esc           leave the text field",
                "h l  ← →      previous / next page",
                "g G           first / last page",
                "j k  ↑ ↓      move selection",
                "s             cycle page size (10, 20, 50)",
                "c             clear",
                "i             focus the screen's input",
                "m             toggle classifier model",
                "Tab 1-3       switch screens",
                "q Ctrl+C      quit",
            ]
            .join("\n"),
        }
    }
}

// ============================================================================
// VIEW STATE DEFINITIONS
// ============================================================================

/// Search screen state that lives only while the screen is mounted.
#[derive(Debug, Clone)]
pub struct SearchViewState {
    pub session: SearchSession,
    pub query_input: String,
    pub selected: usize,
}

impl SearchViewState {
    /// `epoch` is the last one used by a previous mount.
    pub fn mount(page_size: PageSize, epoch: u64) -> Self {
        Self {
            session: SearchSession::continuing_from(page_size, epoch),
            query_input: String::new(),
            selected: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassifyViewState {
    pub input: String,
    pub model: ModelType,
    pub result: Option<ClassificationResponse>,
    pub error: Option<String>,
    pub loading: bool,
    epoch: u64,
}

impl ClassifyViewState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            model: ModelType::default(),
            result: None,
            error: None,
            loading: false,
            epoch: 0,
        }
    }

    /// Start a classification of the current input.
    pub fn submit(&mut self) -> Option<(u64, String, ModelType)> {
        let text = self.input.trim();
        if text.is_empty() {
            self.error = Some("Please enter some text to classify.".to_string());
            self.epoch = self.epoch.wrapping_add(1);
            self.loading = false;
            return None;
        }
        let text = text.to_string();
        self.epoch = self.epoch.wrapping_add(1);
        self.loading = true;
        self.error = None;
        Some((self.epoch, text, self.model))
    }

    pub fn resolve(&mut self, epoch: u64, outcome: Result<ClassificationResponse, String>) -> bool {
        if epoch != self.epoch || !self.loading {
            tracing::debug!(epoch, current = self.epoch, "dropping stale classification");
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(response) => {
                self.result = Some(response);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(format!("Classification failed: {}", err));
            }
        }
        true
    }

    pub fn clear(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.input.clear();
        self.result = None;
        self.error = None;
        self.loading = false;
    }
}

#[derive(Debug, Clone)]
pub struct RobustnessViewState {
    pub cases: Vec<RobustnessCase>,
    pub report: Option<RobustnessReport>,
    pub error: Option<String>,
    pub loading: bool,
    pub selected: usize,
    epoch: u64,
}

impl RobustnessViewState {
    pub fn new() -> Self {
        Self {
            cases: robustness::default_suite(),
            report: None,
            error: None,
            loading: false,
            selected: 0,
            epoch: 0,
        }
    }

    /// Begin a run. `None` while one is already in flight.
    pub fn start(&mut self) -> Option<(u64, Vec<String>)> {
        if self.loading {
            return None;
        }
        self.epoch = self.epoch.wrapping_add(1);
        self.loading = true;
        self.error = None;
        Some((self.epoch, robustness::batch_texts(&self.cases)))
    }

    pub fn resolve(
        &mut self,
        epoch: u64,
        outcome: Result<BatchClassifyResponse, String>,
    ) -> Option<&RobustnessReport> {
        if epoch != self.epoch || !self.loading {
            tracing::debug!(epoch, current = self.epoch, "dropping stale robustness run");
            return None;
        }
        self.loading = false;
        match outcome {
            Ok(response) => {
                let sent = self.cases.len().min(robustness::BATCH_LIMIT);
                self.report = Some(robustness::score(&self.cases[..sent], &response));
                self.selected = 0;
                self.report.as_ref()
            }
            Err(err) => {
                tracing::warn!(error = %err, "robustness run failed");
                self.error = Some(format!("Batch classification failed: {}", err));
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.report = None;
        self.error = None;
        self.loading = false;
        self.selected = 0;
    }
}

impl Default for ClassifyViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for RobustnessViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeConfig;
    use scholar_core::{LoadingState, Publication};
    use std::collections::HashMap;

    fn config() -> TuiConfig {
        TuiConfig {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_ms: 5_000,
            tick_rate_ms: 250,
            default_page_size: 10,
            log_path: "scholar-tui.log".into(),
            log_level: "info".to_string(),
            theme: ThemeConfig {
                name: "synthbrute".to_string(),
            },
        }
    }

    fn publication(id: i64) -> Publication {
        Publication {
            id,
            title: format!("Paper {}", id),
            link: format!("https://example.org/{}", id),
            abstract_text: None,
            published_date: None,
            authors: Vec::new(),
            relevance_score: Some(1.5),
        }
    }

    fn response(query: &str, total: u64, count: i64) -> SearchResponse {
        SearchResponse {
            results: (0..count).map(publication).collect(),
            total,
            page: None,
            query: query.to_string(),
            search_time_ms: 3.0,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_action(Action::InsertChar(c));
        }
    }

    fn expect_search(effect: Option<Effect>) -> SearchRequest {
        match effect {
            Some(Effect::Search(request)) => request,
            other => panic!("expected search effect, got {:?}", other),
        }
    }

    #[test]
    fn test_typing_then_enter_submits_page_one() {
        let mut app = App::new(config());
        type_text(&mut app, "neural networks");
        let request = expect_search(app.handle_action(Action::Submit));
        assert_eq!(request.query, "neural networks");
        assert_eq!(request.page, 1);
        assert_eq!(request.size, PageSize::Ten);
        assert_eq!(app.focus, InputFocus::None);
        assert!(app.session().unwrap().is_loading());
    }

    #[test]
    fn test_slash_typed_into_query_field() {
        let mut app = App::new(config());
        type_text(&mut app, "a/b");
        assert_eq!(app.search_view.as_ref().unwrap().query_input, "a/b");
    }

    #[test]
    fn test_blank_submit_shows_validation_error() {
        let mut app = App::new(config());
        type_text(&mut app, "   ");
        assert!(app.handle_action(Action::Submit).is_none());
        assert_eq!(app.session().unwrap().loading_state(), LoadingState::Error);
        assert_eq!(
            app.session().unwrap().error_message(),
            Some("Please enter a search query.")
        );
    }

    #[test]
    fn test_page_change_scrolls_to_results() {
        let mut app = App::new(config());
        type_text(&mut app, "graphs");
        let first = expect_search(app.handle_action(Action::Submit));
        app.apply_search(first.epoch, Ok(response("graphs", 45, 10)));
        app.search_view.as_mut().unwrap().selected = 7;

        let next = expect_search(app.handle_action(Action::NextPage));
        assert_eq!(next.page, 2);
        assert!(next.scroll_to_results);
        assert_eq!(app.search_view.as_ref().unwrap().selected, 0);
    }

    #[test]
    fn test_stale_search_completion_is_ignored() {
        let mut app = App::new(config());
        type_text(&mut app, "graphs");
        let first = expect_search(app.handle_action(Action::Submit));
        app.apply_search(first.epoch, Ok(response("graphs", 45, 10)));

        let page_two = expect_search(app.handle_action(Action::NextPage));
        let page_three = expect_search(app.handle_action(Action::NextPage));
        assert_eq!(page_three.page, 2, "page 2 not committed yet");

        assert_eq!(
            app.apply_search(page_three.epoch, Ok(response("graphs", 45, 10))),
            Commit::Applied
        );
        assert_eq!(
            app.apply_search(page_two.epoch, Ok(response("graphs", 45, 3))),
            Commit::Stale
        );
        assert_eq!(app.session().unwrap().results().len(), 10);
    }

    #[test]
    fn test_failed_search_notifies() {
        let mut app = App::new(config());
        type_text(&mut app, "graphs");
        let request = expect_search(app.handle_action(Action::Submit));
        let commit = app.apply_search(
            request.epoch,
            Err(SessionError::transport("connection refused")),
        );
        assert_eq!(commit, Commit::Failed);
        let last = app.notifications.last().unwrap();
        assert_eq!(last.level, NotificationLevel::Error);
    }

    #[test]
    fn test_search_view_mounts_and_unmounts() {
        let mut app = App::new(config());
        type_text(&mut app, "graphs");
        let done = expect_search(app.handle_action(Action::Submit));
        app.apply_search(done.epoch, Ok(response("graphs", 45, 10)));
        let in_flight = expect_search(app.handle_action(Action::NextPage));

        app.handle_action(Action::SwitchView(1));
        assert!(app.search_view.is_none());
        assert!(app.session().is_none());
        assert_eq!(app.active_view, View::Classify);
        assert_eq!(
            app.apply_search(in_flight.epoch, Ok(response("graphs", 45, 10))),
            Commit::Stale
        );

        app.handle_action(Action::SwitchView(0));
        let view = app.search_view.as_ref().unwrap();
        assert!(view.query_input.is_empty());
        assert_eq!(view.session.loading_state(), LoadingState::Idle);
        assert!(view.session.results().is_empty());

        // A late answer to the old session must not land in the new one.
        assert_eq!(
            app.apply_search(in_flight.epoch, Ok(response("graphs", 45, 10))),
            Commit::Stale
        );
        assert!(app.session().unwrap().total_results().is_none());
    }

    #[test]
    fn test_page_size_preference_survives_remount() {
        let mut app = App::new(config());
        app.focus = InputFocus::None;
        assert!(app.handle_action(Action::CyclePageSize).is_none());
        app.handle_action(Action::SwitchView(1));
        app.handle_action(Action::SwitchView(0));
        assert_eq!(app.session().unwrap().page_size(), PageSize::Twenty);
    }

    #[test]
    fn test_focus_search_from_other_screen() {
        let mut app = App::new(config());
        app.handle_action(Action::SwitchView(2));
        app.handle_action(Action::FocusSearch);
        assert_eq!(app.active_view, View::Search);
        assert_eq!(app.focus, InputFocus::QueryField);
        assert!(app.search_view.is_some());
    }

    #[test]
    fn test_page_keys_ignored_off_search_screen() {
        let mut app = App::new(config());
        app.handle_action(Action::SwitchView(1));
        assert!(app.handle_action(Action::NextPage).is_none());
        assert!(app.handle_action(Action::CyclePageSize).is_none());
        assert_eq!(app.page_size, PageSize::Ten);
    }

    #[test]
    fn test_cycle_page_size_reissues_query() {
        let mut app = App::new(config());
        type_text(&mut app, "graphs");
        let first = expect_search(app.handle_action(Action::Submit));
        app.apply_search(first.epoch, Ok(response("graphs", 45, 10)));

        let request = expect_search(app.handle_action(Action::CyclePageSize));
        assert_eq!(request.size, PageSize::Twenty);
        assert_eq!(request.page, 1);
        assert_eq!(request.query, "graphs");
    }

    #[test]
    fn test_clear_resets_search_screen() {
        let mut app = App::new(config());
        type_text(&mut app, "graphs");
        let request = expect_search(app.handle_action(Action::Submit));
        app.handle_action(Action::ClearSession);
        assert_eq!(app.session().unwrap().loading_state(), LoadingState::Idle);
        assert!(app.search_view.as_ref().unwrap().query_input.is_empty());
        assert_eq!(
            app.apply_search(request.epoch, Ok(response("graphs", 5, 5))),
            Commit::Stale
        );
    }

    #[test]
    fn test_help_modal_swallows_keys() {
        let mut app = App::new(config());
        app.focus = InputFocus::None;
        app.handle_action(Action::OpenHelp);
        assert!(app.modal.is_some());
        assert!(app.handle_action(Action::NextView).is_none());
        assert_eq!(app.active_view, View::Search);
        app.handle_action(Action::Cancel);
        assert!(app.modal.is_none());
    }

    #[test]
    fn test_classify_rejects_empty_text() {
        let mut app = App::new(config());
        app.handle_action(Action::SwitchView(1));
        assert!(app.handle_action(Action::Confirm).is_none());
        assert!(app.classify_view.error.is_some());
    }

    #[test]
    fn test_classify_latest_wins() {
        let mut app = App::new(config());
        app.handle_action(Action::SwitchView(1));
        app.handle_action(Action::FocusInput);
        type_text(&mut app, "deep learning");
        let first = app.handle_action(Action::Confirm);
        let Some(Effect::Classify { epoch: first_epoch, model, .. }) = first else {
            panic!("expected classify effect");
        };
        assert_eq!(model, ModelType::NaiveBayes);

        app.handle_action(Action::ToggleModel);
        let second = app.handle_action(Action::Confirm);
        let Some(Effect::Classify { epoch: second_epoch, model, .. }) = second else {
            panic!("expected classify effect");
        };
        assert_eq!(model, ModelType::LogisticRegression);

        let answer = |category: &str| ClassificationResponse {
            category: category.to_string(),
            confidence: 0.8,
            probabilities: HashMap::new(),
            model_used: None,
            explanation: None,
            message: None,
        };
        app.apply_classify(second_epoch, Ok(answer("Computer Science")));
        app.apply_classify(first_epoch, Ok(answer("Business")));
        assert_eq!(
            app.classify_view.result.as_ref().unwrap().category,
            "Computer Science"
        );
    }

    #[test]
    fn test_robustness_run_is_single_flight() {
        let mut app = App::new(config());
        app.handle_action(Action::SwitchView(2));
        let effect = app.handle_action(Action::Confirm);
        let Some(Effect::Robustness { epoch, texts }) = effect else {
            panic!("expected robustness effect");
        };
        assert!(texts.len() <= robustness::BATCH_LIMIT);
        assert!(app.handle_action(Action::Confirm).is_none());

        app.apply_robustness(epoch, Err("timeout".to_string()));
        assert!(!app.robustness_view.loading);
        assert!(app.robustness_view.error.is_some());
    }

    #[test]
    fn test_page_keys_wait_for_new_query() {
        let mut app = App::new(config());
        type_text(&mut app, "cats");
        let request = expect_search(app.handle_action(Action::Submit));
        app.apply_search(request.epoch, Ok(response("cats", 95, 10)));

        app.handle_action(Action::FocusSearch);
        app.search_view.as_mut().unwrap().query_input = "dogs".to_string();
        let dogs = expect_search(app.handle_action(Action::Submit));
        assert!(app.handle_action(Action::NextPage).is_none());
        assert!(app.handle_action(Action::LastPage).is_none());

        assert_eq!(app.apply_search(dogs.epoch, Ok(response("dogs", 40, 10))), Commit::Applied);
        assert_eq!(app.session().unwrap().query(), "dogs");
        let next = expect_search(app.handle_action(Action::NextPage));
        assert_eq!(next.query, "dogs");
        assert_eq!(next.page, 2);
    }

    #[test]
    fn test_crawler_status_kept_for_header() {
        let mut app = App::new(config());
        let idle: CrawlerStatus = serde_json::from_str(
            r#"{"is_running": false, "total_crawls": 2, "total_publications": 80}"#,
        )
        .unwrap();
        app.handle_event(TuiEvent::CrawlerStatusLoaded(idle));
        assert!(app.notifications.is_empty());
        assert_eq!(app.crawler_status.as_ref().unwrap().total_publications, 80);

        let running: CrawlerStatus = serde_json::from_str(
            r#"{"is_running": true, "total_crawls": 3, "total_publications": 80}"#,
        )
        .unwrap();
        app.handle_event(TuiEvent::CrawlerStatusLoaded(running));
        assert!(app.crawler_status.as_ref().unwrap().is_running);
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].level, NotificationLevel::Info);
    }

    #[test]
    fn test_notifications_are_capped() {
        let mut app = App::new(config());
        for i in 0..(MAX_NOTIFICATIONS + 5) {
            app.notify(NotificationLevel::Info, format!("n{}", i));
        }
        assert_eq!(app.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(app.notifications[0].message, "n5");
    }
}
