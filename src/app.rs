//! App state and core application logic
//!
//! Owns the search and episode view state, routes keyboard events, and
//! applies completed network results. Display state lives here rather than
//! in module-level globals; the renderers and the API client are handed
//! references by the event loop.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::{Episode, Show};

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Loading State
// =============================================================================

/// Loading state for async operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Idle - no loading in progress
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Error with message
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }
}

// =============================================================================
// List Cursor
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListCursor {
    /// Currently selected index
    pub selected: usize,
    /// Total number of items
    pub len: usize,
}

impl ListCursor {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update length, clamping the selection to the valid range
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// View State
// =============================================================================

/// Search view state
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Search query
    pub query: String,
    /// Cursor position in query
    pub cursor: usize,
    /// Current show list
    pub shows: Vec<Show>,
    /// Show list selection
    pub list: ListCursor,
    /// Loading state
    pub loading: LoadingState,
    /// Generation counter; results from an older generation are discarded
    pub generation: u64,
}

impl SearchState {
    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        self.query.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.query.remove(self.cursor);
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor < self.query.len() {
            self.cursor += 1;
        }
    }

    /// Clear query
    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Replace the show list and reset the selection
    pub fn set_shows(&mut self, shows: Vec<Show>) {
        self.list.set_len(shows.len());
        self.list.first();
        self.shows = shows;
        self.loading = LoadingState::Idle;
    }

    /// Get currently selected show
    pub fn selected_show(&self) -> Option<&Show> {
        self.shows.get(self.list.selected)
    }
}

/// Episode view state
#[derive(Debug, Clone, Default)]
pub struct EpisodeState {
    /// Owning show (id, name); None until an episode view has been requested
    pub show: Option<(u64, String)>,
    /// Current episode list
    pub episodes: Vec<Episode>,
    /// Episode list selection
    pub list: ListCursor,
    /// Loading state
    pub loading: LoadingState,
    /// Whether the episode region is shown
    pub visible: bool,
    /// Generation counter; results from an older generation are discarded
    pub generation: u64,
}

impl EpisodeState {
    /// Replace the episode list and reset the selection
    pub fn set_episodes(&mut self, episodes: Vec<Episode>) {
        self.list.set_len(episodes.len());
        self.list.first();
        self.episodes = episodes;
        self.loading = LoadingState::Idle;
    }
}

// =============================================================================
// Actions and Completion Events
// =============================================================================

/// Work the event loop must start on behalf of a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Run a show search for the given term
    SubmitSearch { term: String, generation: u64 },
    /// Fetch the episode list for the given show
    FetchEpisodes { show_id: u64, generation: u64 },
}

/// Completed network operation delivered back to the event loop
#[derive(Debug)]
pub enum AppEvent {
    ShowsLoaded {
        generation: u64,
        result: Result<Vec<Show>, String>,
    },
    EpisodesLoaded {
        generation: u64,
        result: Result<Vec<Episode>, String>,
    },
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug, Default)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Transient error message shown in the status line
    pub error: Option<String>,

    pub search: SearchState,
    pub episodes: EpisodeState,
}

impl App {
    /// Create a new App instance
    pub fn new() -> Self {
        Self {
            running: true,
            ..Self::default()
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Focus the search input
    pub fn focus_search(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    /// Submit the current query: hide the episode region, mark the search
    /// loading, and hand back the action the event loop must start.
    pub fn submit_search(&mut self) -> AppAction {
        self.episodes.visible = false;
        self.search.generation += 1;
        self.search.loading = LoadingState::Loading;
        self.input_mode = InputMode::Normal;
        AppAction::SubmitSearch {
            term: self.search.query.clone(),
            generation: self.search.generation,
        }
    }

    /// Request episodes for the selected show. The identifier comes straight
    /// off the selected row; no structural lookup is involved.
    pub fn request_episodes(&mut self) -> Option<AppAction> {
        let show = self.search.selected_show()?;
        let (id, name) = (show.id, show.name.clone());

        self.episodes.visible = true;
        self.episodes.show = Some((id, name));
        self.episodes.generation += 1;
        self.episodes.loading = LoadingState::Loading;
        Some(AppAction::FetchEpisodes {
            show_id: id,
            generation: self.episodes.generation,
        })
    }

    /// Apply a completed network operation.
    ///
    /// A result whose generation no longer matches the current one belongs to
    /// a superseded request and is dropped, so a slow response can never
    /// overwrite a newer render. Failures leave the display in its prior
    /// state and surface only as a status-line message.
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ShowsLoaded { generation, result } => {
                if generation != self.search.generation {
                    return;
                }
                match result {
                    Ok(shows) => self.search.set_shows(shows),
                    Err(msg) => {
                        self.search.loading = LoadingState::Error(msg.clone());
                        self.error = Some(msg);
                    }
                }
            }
            AppEvent::EpisodesLoaded { generation, result } => {
                if generation != self.episodes.generation {
                    return;
                }
                match result {
                    Ok(episodes) => self.episodes.set_episodes(episodes),
                    Err(msg) => {
                        self.episodes.loading = LoadingState::Error(msg.clone());
                        self.error = Some(msg);
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle a keyboard event; returns the action the event loop must start,
    /// if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        // Clear error on any keypress
        self.error = None;

        // Global quit shortcut
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                None
            }
            KeyCode::Enter => Some(self.submit_search()),
            KeyCode::Char(c) => {
                self.search.insert(c);
                None
            }
            KeyCode::Backspace => {
                self.search.backspace();
                None
            }
            KeyCode::Left => {
                self.search.cursor_left();
                None
            }
            KeyCode::Right => {
                self.search.cursor_right();
                None
            }
            KeyCode::Home => {
                self.search.cursor = 0;
                None
            }
            KeyCode::End => {
                self.search.cursor = self.search.query.len();
                None
            }
            _ => None,
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                None
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.focus_search();
                None
            }
            KeyCode::Esc => {
                // Close the episode region first; a second Esc clears nothing
                self.episodes.visible = false;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.active_list().up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.active_list().down();
                None
            }
            KeyCode::Home => {
                self.active_list().first();
                None
            }
            KeyCode::End => {
                self.active_list().last();
                None
            }
            KeyCode::Enter => self.request_episodes(),
            _ => None,
        }
    }

    /// The list the navigation keys currently act on
    fn active_list(&mut self) -> &mut ListCursor {
        if self.episodes.visible && !self.episodes.episodes.is_empty() {
            &mut self.episodes.list
        } else {
            &mut self.search.list
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MISSING_IMAGE_URL;

    fn show(id: u64, name: &str) -> Show {
        Show {
            id,
            name: name.to_string(),
            summary: String::new(),
            image: MISSING_IMAGE_URL.to_string(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    // -------------------------------------------------------------------------
    // ListCursor Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_list_cursor_navigation() {
        let mut list = ListCursor::new(3);
        assert_eq!(list.selected, 0);

        list.down();
        list.down();
        assert_eq!(list.selected, 2);

        // Can't go past end
        list.down();
        assert_eq!(list.selected, 2);

        list.up();
        assert_eq!(list.selected, 1);

        list.first();
        assert_eq!(list.selected, 0);

        list.last();
        assert_eq!(list.selected, 2);
    }

    #[test]
    fn test_list_cursor_empty() {
        let mut list = ListCursor::new(0);
        list.down();
        assert_eq!(list.selected, 0);
        list.up();
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_list_cursor_set_len_clamps() {
        let mut list = ListCursor::new(10);
        list.selected = 8;
        list.set_len(5);
        assert_eq!(list.selected, 4);
    }

    // -------------------------------------------------------------------------
    // SearchState Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_search_state_editing() {
        let mut search = SearchState::default();

        for c in "girls".chars() {
            search.insert(c);
        }
        assert_eq!(search.query, "girls");
        assert_eq!(search.cursor, 5);

        search.cursor_left();
        search.cursor_left();
        search.insert('X');
        assert_eq!(search.query, "girXls");

        search.backspace();
        assert_eq!(search.query, "girls");

        search.clear();
        assert_eq!(search.query, "");
        assert_eq!(search.cursor, 0);
    }

    // -------------------------------------------------------------------------
    // Search Submission Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_submit_search_hides_episode_region() {
        let mut app = App::new();
        app.episodes.visible = true;
        app.focus_search();
        app.search.query = "girls".to_string();

        let action = app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            action,
            Some(AppAction::SubmitSearch {
                term: "girls".to_string(),
                generation: 1,
            })
        );
        assert!(!app.episodes.visible);
        assert!(app.search.loading.is_loading());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_empty_term_still_submits() {
        let mut app = App::new();
        app.focus_search();

        let action = app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            action,
            Some(AppAction::SubmitSearch {
                term: String::new(),
                generation: 1,
            })
        );
    }

    #[test]
    fn test_shows_loaded_applies_current_generation() {
        let mut app = App::new();
        app.submit_search();

        app.apply_event(AppEvent::ShowsLoaded {
            generation: 1,
            result: Ok(vec![show(1, "Girls")]),
        });
        assert_eq!(app.search.shows.len(), 1);
        assert!(!app.search.loading.is_loading());
    }

    #[test]
    fn test_stale_shows_result_discarded() {
        let mut app = App::new();
        app.submit_search(); // generation 1
        app.submit_search(); // generation 2

        // Late arrival from the first search must not overwrite anything
        app.apply_event(AppEvent::ShowsLoaded {
            generation: 1,
            result: Ok(vec![show(1, "Stale")]),
        });
        assert!(app.search.shows.is_empty());
        assert!(app.search.loading.is_loading());

        app.apply_event(AppEvent::ShowsLoaded {
            generation: 2,
            result: Ok(vec![show(2, "Fresh")]),
        });
        assert_eq!(app.search.shows[0].name, "Fresh");
    }

    #[test]
    fn test_empty_result_set_renders_zero_shows() {
        let mut app = App::new();
        app.submit_search();
        app.apply_event(AppEvent::ShowsLoaded {
            generation: 1,
            result: Ok(vec![]),
        });
        assert!(app.search.shows.is_empty());
        assert!(!app.search.loading.is_error());
    }

    #[test]
    fn test_failed_search_keeps_prior_shows() {
        let mut app = App::new();
        app.submit_search();
        app.apply_event(AppEvent::ShowsLoaded {
            generation: 1,
            result: Ok(vec![show(1, "Girls")]),
        });

        app.submit_search();
        app.apply_event(AppEvent::ShowsLoaded {
            generation: 2,
            result: Err("Request failed: connection refused".to_string()),
        });

        // Display keeps its prior state; error surfaces in the status line
        assert_eq!(app.search.shows.len(), 1);
        assert!(app.error.is_some());
    }

    // -------------------------------------------------------------------------
    // Episode Trigger Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_episode_trigger_uses_selected_show_id() {
        let mut app = App::new();
        app.search.set_shows(vec![show(1, "A"), show(42, "B")]);
        app.search.list.down();

        let action = app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            action,
            Some(AppAction::FetchEpisodes {
                show_id: 42,
                generation: 1,
            })
        );
        assert!(app.episodes.visible);
        assert_eq!(app.episodes.show, Some((42, "B".to_string())));
    }

    #[test]
    fn test_episode_trigger_without_selection_is_noop() {
        let mut app = App::new();
        let action = app.handle_key(key(KeyCode::Enter));
        assert_eq!(action, None);
        assert!(!app.episodes.visible);
    }

    #[test]
    fn test_episodes_loaded_replaces_list() {
        let mut app = App::new();
        app.search.set_shows(vec![show(1, "A")]);
        app.request_episodes();

        app.apply_event(AppEvent::EpisodesLoaded {
            generation: 1,
            result: Ok(vec![Episode {
                id: 1,
                name: "Pilot".to_string(),
                season: 1,
                number: 1,
            }]),
        });
        assert_eq!(app.episodes.episodes.len(), 1);
        assert_eq!(
            app.episodes.episodes[0].to_string(),
            "Pilot (season 1, number 1)"
        );
    }

    #[test]
    fn test_stale_episodes_result_discarded() {
        let mut app = App::new();
        app.search.set_shows(vec![show(1, "A"), show(2, "B")]);
        app.request_episodes(); // generation 1
        app.search.list.down();
        app.request_episodes(); // generation 2

        app.apply_event(AppEvent::EpisodesLoaded {
            generation: 1,
            result: Ok(vec![Episode {
                id: 9,
                name: "Stale".to_string(),
                season: 9,
                number: 9,
            }]),
        });
        assert!(app.episodes.episodes.is_empty());
    }

    // -------------------------------------------------------------------------
    // Key Handling Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_quit_key() {
        let mut app = App::new();
        assert!(app.running);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_quit_ctrl_c() {
        let mut app = App::new();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_slash_focuses_search() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Editing);
    }

    #[test]
    fn test_escape_closes_episode_region() {
        let mut app = App::new();
        app.episodes.visible = true;
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.episodes.visible);
    }

    #[test]
    fn test_navigation_targets_episode_list_when_visible() {
        let mut app = App::new();
        app.search.set_shows(vec![show(1, "A"), show(2, "B")]);
        app.episodes.visible = true;
        app.episodes.set_episodes(vec![
            Episode {
                id: 1,
                name: "One".to_string(),
                season: 1,
                number: 1,
            },
            Episode {
                id: 2,
                name: "Two".to_string(),
                season: 1,
                number: 2,
            },
        ]);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.episodes.list.selected, 1);
        assert_eq!(app.search.list.selected, 0);
    }
}
