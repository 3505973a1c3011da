//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use super::catalog::TrackCatalog;
use super::track::Track;
use super::types::{
    LibrarySource, Screen, TrackListState, UiState, ERROR_DISPLAY_DURATION,
    NOTICE_DISPLAY_DURATION,
};

/// Main application model containing all UI state
pub struct AppModel {
    pub catalog: TrackCatalog,
    pub ui_state: Arc<Mutex<UiState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(catalog: TrackCatalog) -> Self {
        Self {
            catalog,
            ui_state: Arc::new(Mutex::new(UiState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn current_screen(&self) -> Screen {
        self.ui_state.lock().await.screen()
    }

    pub async fn set_user_name(&self, name: String) {
        self.ui_state.lock().await.user_name = Some(name);
    }

    // ========================================================================
    // Library & Track Lists
    // ========================================================================

    pub async fn set_sources(&self, sources: Vec<LibrarySource>) {
        let mut state = self.ui_state.lock().await;
        state.sources = sources;
        state.library_selected = 0;
    }

    pub async fn get_selected_source(&self) -> Option<LibrarySource> {
        self.ui_state.lock().await.selected_source().cloned()
    }

    pub async fn set_loading(&self, loading: bool) {
        self.ui_state.lock().await.loading = loading;
    }

    pub async fn open_track_list(&self, source: LibrarySource, tracks: Vec<Track>) {
        let mut state = self.ui_state.lock().await;
        state.track_list = Some(TrackListState::new(source, tracks));
        state.loading = false;
    }

    /// Leave the track list. Returns `false` when already at the library root.
    pub async fn close_track_list(&self) -> bool {
        self.ui_state.lock().await.track_list.take().is_some()
    }

    pub async fn move_selection_up(&self) {
        let mut guard = self.ui_state.lock().await;
        let state = &mut *guard;
        match state.track_list.as_mut() {
            Some(list) => list.move_up(),
            None => state.library_selected = state.library_selected.saturating_sub(1),
        }
    }

    pub async fn move_selection_down(&self) {
        let mut guard = self.ui_state.lock().await;
        let state = &mut *guard;
        let source_count = state.sources.len();
        match state.track_list.as_mut() {
            Some(list) => list.move_down(),
            None => {
                if state.library_selected + 1 < source_count {
                    state.library_selected += 1;
                }
            }
        }
    }

    /// Selected row of the open track list with its queue index
    pub async fn get_selected_track(&self) -> Option<(usize, Track)> {
        let state = self.ui_state.lock().await;
        state.track_list.as_ref()?.selected_entry()
    }

    pub async fn get_track_list_tracks(&self) -> Option<Vec<Track>> {
        let state = self.ui_state.lock().await;
        state.track_list.as_ref().map(|list| list.tracks.clone())
    }

    // ========================================================================
    // Filter
    // ========================================================================

    pub async fn is_filter_active(&self) -> bool {
        let state = self.ui_state.lock().await;
        state.track_list.as_ref().is_some_and(|list| list.filter_active)
    }

    pub async fn start_filter(&self) {
        if let Some(list) = self.ui_state.lock().await.track_list.as_mut() {
            list.filter_active = true;
        }
    }

    /// Stop editing but keep the current filter applied
    pub async fn finish_filter(&self) {
        if let Some(list) = self.ui_state.lock().await.track_list.as_mut() {
            list.filter_active = false;
        }
    }

    pub async fn clear_filter(&self) {
        if let Some(list) = self.ui_state.lock().await.track_list.as_mut() {
            list.clear_filter();
        }
    }

    pub async fn append_to_filter(&self, c: char) {
        if let Some(list) = self.ui_state.lock().await.track_list.as_mut() {
            list.push_filter_char(c);
        }
    }

    pub async fn backspace_filter(&self) {
        if let Some(list) = self.ui_state.lock().await.track_list.as_mut() {
            list.pop_filter_char();
        }
    }

    // ========================================================================
    // Errors, Notices & Popups
    // ========================================================================

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
        state.loading = false;
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn show_notice(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.notice_message = Some(message);
        state.notice_timestamp = Some(Instant::now());
    }

    /// Drop errors and notices that have been on screen long enough
    pub async fn auto_clear_expired(&self) {
        let mut state = self.ui_state.lock().await;
        if state
            .error_timestamp
            .is_some_and(|shown| shown.elapsed() >= ERROR_DISPLAY_DURATION)
        {
            state.error_message = None;
            state.error_timestamp = None;
        }
        if state
            .notice_timestamp
            .is_some_and(|shown| shown.elapsed() >= NOTICE_DISPLAY_DURATION)
        {
            state.notice_message = None;
            state.notice_timestamp = None;
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }
}
