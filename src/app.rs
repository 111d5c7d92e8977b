//! Application state management for City Weather
//!
//! This module owns the view state: the search field, the city the current
//! result belongs to, the last weather record, loading and error flags, and
//! the theme. It turns key presses into state changes and lookup requests, and
//! folds finished lookups back in.

use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::advice::Forecast;
use crate::cli::StartupConfig;
use crate::data::WeatherRecord;
use crate::lookup::{LookupOutcome, LookupRequest};
use crate::ui::Theme;

/// Message shown for every failed lookup
pub const LOOKUP_FAILED_MESSAGE: &str = "Unable to retrieve weather data. Please try again.";

/// Where the view is in the lookup lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No lookup has been made yet
    Idle,
    /// A lookup is in flight
    Loading,
    /// The last lookup returned a record
    Success,
    /// The last lookup failed
    Error,
}

/// Reasons a search submission is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Search text is empty after trimming; nothing is sent
    #[error("Search text is empty")]
    EmptyInput,
}

/// Main application struct managing the view state
pub struct App {
    /// Text in the search field, updated on every key press
    pub search_text: String,
    /// City the displayed result (or pending lookup) belongs to
    pub active_city: String,
    /// Last weather record received
    pub weather: Option<WeatherRecord>,
    /// Flag indicating a lookup is in flight
    pub is_loading: bool,
    /// User-facing error text from the last failed lookup
    pub error_message: Option<String>,
    /// Current color theme
    pub theme: Theme,
    /// Generation of the most recent lookup; older outcomes are discarded
    pub generation: u64,
    /// When the displayed record arrived
    pub last_updated: Option<DateTime<Local>>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Pause applied to submitted searches
    pub transition_delay: Duration,
    /// Lookup waiting to be dispatched by the event loop
    pending_lookup: Option<LookupRequest>,
}

impl App {
    /// Creates a new App instance with default state
    pub fn new() -> Self {
        Self::with_startup_config(&StartupConfig::default())
    }

    /// Creates a new App instance from the startup configuration.
    ///
    /// The search field and active city both start as the configured city.
    pub fn with_startup_config(config: &StartupConfig) -> Self {
        Self {
            search_text: config.city.clone(),
            active_city: config.city.clone(),
            weather: None,
            is_loading: false,
            error_message: None,
            theme: config.theme,
            generation: 0,
            last_updated: None,
            show_help: false,
            should_quit: false,
            transition_delay: config.transition_delay,
            pending_lookup: None,
        }
    }

    /// Current lifecycle status, derived from the state fields
    pub fn status(&self) -> Status {
        if self.is_loading {
            Status::Loading
        } else if self.error_message.is_some() {
            Status::Error
        } else if self.weather.is_some() {
            Status::Success
        } else {
            Status::Idle
        }
    }

    /// Record to show on the weather card, if the card should be visible
    pub fn visible_weather(&self) -> Option<&WeatherRecord> {
        match self.status() {
            Status::Success => self.weather.as_ref(),
            _ => None,
        }
    }

    /// Icon and advice for the visible record
    pub fn forecast(&self) -> Option<Forecast> {
        self.visible_weather().map(Forecast::for_record)
    }

    /// Starts the automatic lookup of the startup city.
    ///
    /// Unlike a submitted search this one is sent without a transition delay.
    pub fn begin_initial_lookup(&mut self) -> LookupRequest {
        let city = self.active_city.clone();
        self.start_lookup(city, Duration::ZERO)
    }

    /// Submits the search field.
    ///
    /// # Returns
    /// * `Ok(LookupRequest)` - the lookup to dispatch; previous result and error are cleared
    /// * `Err(SearchError::EmptyInput)` - the field is blank; state is unchanged
    pub fn submit_search(&mut self) -> Result<LookupRequest, SearchError> {
        let city = self.search_text.trim();
        if city.is_empty() {
            return Err(SearchError::EmptyInput);
        }
        let city = city.to_string();
        self.active_city = city.clone();
        Ok(self.start_lookup(city, self.transition_delay))
    }

    fn start_lookup(&mut self, city: String, delay: Duration) -> LookupRequest {
        self.generation += 1;
        self.is_loading = true;
        self.weather = None;
        self.error_message = None;

        info!(generation = self.generation, city = %city, "lookup started");

        LookupRequest {
            generation: self.generation,
            city,
            delay,
        }
    }

    /// Takes the lookup queued by the last key press, if any
    pub fn take_pending_lookup(&mut self) -> Option<LookupRequest> {
        self.pending_lookup.take()
    }

    /// Applies a finished lookup.
    ///
    /// # Returns
    /// `false` if the outcome belongs to a superseded lookup and was dropped
    pub fn apply_outcome(&mut self, outcome: LookupOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(
                stale = outcome.generation,
                current = self.generation,
                city = %outcome.city,
                "discarding stale lookup"
            );
            return false;
        }

        self.is_loading = false;
        match outcome.result {
            Ok(record) => {
                info!(city = %outcome.city, record_city = %record.city, "weather received");
                self.weather = Some(record);
                self.error_message = None;
                self.last_updated = Some(Local::now());
            }
            Err(err) => {
                error!(city = %outcome.city, error = %err, "weather lookup failed");
                self.weather = None;
                self.error_message = Some(LOOKUP_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// Switches between light and dark themes
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        debug!(dark = self.theme.is_dark(), "theme toggled");
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - Printable characters: edit the search field
    /// - `Backspace`: delete the last character
    /// - `Ctrl+U`: clear the search field
    /// - `Enter`: search for the city in the field
    /// - `Ctrl+T` or `F2`: toggle dark theme
    /// - `F1`, or `?` on an empty field: toggle help
    /// - `Esc` or `Ctrl+C`: quit
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        match key_event.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
            }
            KeyCode::Char('t') if ctrl => {
                self.toggle_theme();
            }
            KeyCode::Char('u') if ctrl => {
                self.search_text.clear();
            }
            KeyCode::F(2) => {
                self.toggle_theme();
            }
            KeyCode::F(1) => {
                self.show_help = true;
            }
            KeyCode::Char('?') if self.search_text.is_empty() => {
                self.show_help = true;
            }
            KeyCode::Char(c) if !ctrl => {
                self.search_text.push(c);
            }
            KeyCode::Backspace => {
                self.search_text.pop();
            }
            KeyCode::Enter => match self.submit_search() {
                Ok(request) => self.pending_lookup = Some(request),
                Err(err) => debug!(error = %err, "search ignored"),
            },
            KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::WeatherError;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    /// Helper to create a KeyEvent for testing
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
    }

    fn record(city: &str, description: &str, temperature: f64) -> WeatherRecord {
        WeatherRecord {
            id: 1,
            city: city.to_string(),
            country: None,
            temperature,
            description: None,
            alternate_description: Some(description.to_string()),
            humidity: 40.0,
            wind_speed: 3.0,
            date: String::new(),
        }
    }

    fn success(request: &LookupRequest, record: WeatherRecord) -> LookupOutcome {
        LookupOutcome {
            generation: request.generation,
            city: request.city.clone(),
            result: Ok(record),
        }
    }

    fn failure(request: &LookupRequest) -> LookupOutcome {
        LookupOutcome {
            generation: request.generation,
            city: request.city.clone(),
            result: Err(WeatherError::NoResults),
        }
    }

    // ========================================================================
    // Initial state and startup lookup
    // ========================================================================

    #[test]
    fn test_new_app_defaults() {
        let app = App::new();
        assert_eq!(app.search_text, "Paris");
        assert_eq!(app.active_city, "Paris");
        assert_eq!(app.status(), Status::Idle);
        assert_eq!(app.theme, Theme::Light);
        assert_eq!(app.generation, 0);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_initial_lookup_has_no_delay() {
        let mut app = App::new();
        let request = app.begin_initial_lookup();

        assert_eq!(request.city, "Paris");
        assert_eq!(request.delay, Duration::ZERO);
        assert_eq!(request.generation, 1);
        assert_eq!(app.status(), Status::Loading);
    }

    #[test]
    fn test_startup_config_applied() {
        let config = StartupConfig {
            city: "Tokyo".to_string(),
            theme: Theme::Dark,
            transition_delay: Duration::from_millis(0),
            ..StartupConfig::default()
        };
        let mut app = App::with_startup_config(&config);

        assert_eq!(app.search_text, "Tokyo");
        assert_eq!(app.theme, Theme::Dark);
        assert_eq!(app.begin_initial_lookup().city, "Tokyo");
    }

    // ========================================================================
    // Submission
    // ========================================================================

    #[test]
    fn test_submit_empty_input_leaves_state_untouched() {
        let mut app = App::new();
        let request = app.begin_initial_lookup();
        app.apply_outcome(success(&request, record("Paris", "Clear", 20.0)));

        app.search_text = "   ".to_string();
        assert_eq!(app.submit_search(), Err(SearchError::EmptyInput));

        assert_eq!(app.status(), Status::Success);
        assert_eq!(app.active_city, "Paris");
        assert_eq!(app.generation, 1);
        assert!(app.weather.is_some());
    }

    #[test]
    fn test_submit_clears_previous_result() {
        let mut app = App::new();
        let request = app.begin_initial_lookup();
        app.apply_outcome(success(&request, record("Paris", "Clear", 20.0)));

        app.search_text = "  Lyon ".to_string();
        let request = app.submit_search().unwrap();

        assert_eq!(request.city, "Lyon");
        assert_eq!(request.delay, Duration::from_millis(100));
        assert_eq!(app.active_city, "Lyon");
        assert!(app.weather.is_none());
        assert!(app.error_message.is_none());
        assert_eq!(app.status(), Status::Loading);
        assert!(app.visible_weather().is_none());
    }

    #[test]
    fn test_submit_clears_previous_error() {
        let mut app = App::new();
        let request = app.begin_initial_lookup();
        app.apply_outcome(failure(&request));
        assert_eq!(app.status(), Status::Error);

        app.search_text = "Lyon".to_string();
        app.submit_search().unwrap();

        assert!(app.error_message.is_none());
        assert_eq!(app.status(), Status::Loading);
    }

    // ========================================================================
    // Outcomes
    // ========================================================================

    #[test]
    fn test_success_outcome() {
        let mut app = App::new();
        let request = app.begin_initial_lookup();

        assert!(app.apply_outcome(success(&request, record("Paris", "Cloudy", 14.0))));

        assert_eq!(app.status(), Status::Success);
        assert_eq!(app.visible_weather().unwrap().city, "Paris");
        assert!(app.last_updated.is_some());
        let forecast = app.forecast().unwrap();
        assert_eq!(forecast.description.as_deref(), Some("Cloudy"));
    }

    #[test]
    fn test_failure_outcome_uses_generic_message() {
        let mut app = App::new();
        let request = app.begin_initial_lookup();

        assert!(app.apply_outcome(failure(&request)));

        assert_eq!(app.status(), Status::Error);
        assert_eq!(app.error_message.as_deref(), Some(LOOKUP_FAILED_MESSAGE));
        assert!(app.weather.is_none());
        assert!(app.forecast().is_none());
    }

    #[test]
    fn test_stale_outcome_discarded() {
        let mut app = App::new();
        app.search_text = "Paris".to_string();
        let first = app.submit_search().unwrap();
        app.search_text = "Tokyo".to_string();
        let second = app.submit_search().unwrap();

        // Second lookup finishes first, then the first one arrives late
        assert!(app.apply_outcome(success(&second, record("Tokyo", "Clear", 32.0))));
        assert!(!app.apply_outcome(failure(&first)));

        assert_eq!(app.status(), Status::Success);
        assert_eq!(app.active_city, "Tokyo");
        assert_eq!(app.weather.as_ref().unwrap().city, "Tokyo");
    }

    #[test]
    fn test_stale_outcome_does_not_end_loading() {
        let mut app = App::new();
        let first = app.begin_initial_lookup();
        app.search_text = "Oslo".to_string();
        app.submit_search().unwrap();

        assert!(!app.apply_outcome(success(&first, record("Paris", "Clear", 20.0))));

        assert_eq!(app.status(), Status::Loading);
        assert!(app.weather.is_none());
    }

    // ========================================================================
    // Keyboard handling
    // ========================================================================

    #[test]
    fn test_typing_edits_search_text() {
        let mut app = App::new();
        app.handle_key(ctrl('u'));
        assert_eq!(app.search_text, "");

        type_text(&mut app, "Nicee");
        app.handle_key(key_event(KeyCode::Backspace));

        assert_eq!(app.search_text, "Nice");
    }

    #[test]
    fn test_enter_queues_lookup() {
        let mut app = App::new();
        app.handle_key(ctrl('u'));
        type_text(&mut app, "Tokyo");
        app.handle_key(key_event(KeyCode::Enter));

        let request = app.take_pending_lookup().expect("lookup should be queued");
        assert_eq!(request.city, "Tokyo");
        assert!(app.take_pending_lookup().is_none());
    }

    #[test]
    fn test_enter_on_blank_field_queues_nothing() {
        let mut app = App::new();
        app.handle_key(ctrl('u'));
        type_text(&mut app, "  ");
        app.handle_key(key_event(KeyCode::Enter));

        assert!(app.take_pending_lookup().is_none());
        assert_eq!(app.status(), Status::Idle);
    }

    #[test]
    fn test_theme_toggle_round_trip() {
        let mut app = App::new();
        let original = app.theme;

        app.handle_key(ctrl('t'));
        assert_eq!(app.theme, Theme::Dark);
        app.handle_key(key_event(KeyCode::F(2)));

        assert_eq!(app.theme, original);
        assert_eq!(app.search_text, "Paris");
    }

    #[test]
    fn test_question_mark_is_text_unless_field_empty() {
        let mut app = App::new();
        app.handle_key(key_event(KeyCode::Char('?')));
        assert!(!app.show_help);
        assert_eq!(app.search_text, "Paris?");

        app.handle_key(ctrl('u'));
        app.handle_key(key_event(KeyCode::Char('?')));
        assert!(app.show_help);
    }

    #[test]
    fn test_help_overlay_intercepts_keys() {
        let mut app = App::new();
        app.handle_key(key_event(KeyCode::F(1)));
        assert!(app.show_help);

        app.handle_key(key_event(KeyCode::Char('x')));
        assert_eq!(app.search_text, "Paris");

        app.handle_key(key_event(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.should_quit);

        let mut app = App::new();
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
        assert_eq!(app.search_text, "Paris");
    }
}
