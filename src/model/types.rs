//! Core type definitions for the application

use std::time::{Duration, Instant};

use super::track::Track;

pub const ERROR_DISPLAY_DURATION: Duration = Duration::from_secs(5);
pub const NOTICE_DISPLAY_DURATION: Duration = Duration::from_secs(3);

/// A list of tracks the user can open from the library screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LibrarySource {
    LikedSongs,
    RecentlyPlayed,
    Playlist { id: String, name: String },
    /// Opened from a track row rather than listed on the library screen
    Album { id: String, name: String },
    LocalQueue,
}

impl LibrarySource {
    pub fn label(&self) -> &str {
        match self {
            Self::LikedSongs => "Liked Songs",
            Self::RecentlyPlayed => "Recently Played",
            Self::Playlist { name, .. } | Self::Album { name, .. } => name,
            Self::LocalQueue => "Local Queue",
        }
    }
}

/// Which screen currently owns the main area
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Library,
    TrackList,
}

/// An opened track list. `tracks` is exactly the queue handed to the player.
#[derive(Clone, Debug)]
pub struct TrackListState {
    pub source: LibrarySource,
    pub tracks: Vec<Track>,
    /// Position within the filtered rows
    pub selected: usize,
    pub filter: String,
    pub filter_active: bool,
}

impl TrackListState {
    pub fn new(source: LibrarySource, tracks: Vec<Track>) -> Self {
        Self {
            source,
            tracks,
            selected: 0,
            filter: String::new(),
            filter_active: false,
        }
    }

    /// Rows matching the filter, paired with their index in the full queue
    pub fn visible(&self) -> Vec<(usize, &Track)> {
        self.tracks
            .iter()
            .enumerate()
            .filter(|(_, track)| track.matches(&self.filter))
            .collect()
    }

    pub fn selected_entry(&self) -> Option<(usize, Track)> {
        self.visible()
            .get(self.selected)
            .map(|(index, track)| (*index, (*track).clone()))
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.visible().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.selected = 0;
    }

    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.selected = 0;
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.filter_active = false;
        self.selected = 0;
    }
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    /// Spotify profile name, when signed in
    pub user_name: Option<String>,
    pub sources: Vec<LibrarySource>,
    pub library_selected: usize,
    pub track_list: Option<TrackListState>,
    pub loading: bool,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub notice_message: Option<String>,
    pub notice_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            user_name: None,
            sources: Vec::new(),
            library_selected: 0,
            track_list: None,
            loading: false,
            error_message: None,
            error_timestamp: None,
            notice_message: None,
            notice_timestamp: None,
            show_help_popup: false,
        }
    }
}

impl UiState {
    pub fn screen(&self) -> Screen {
        if self.track_list.is_some() {
            Screen::TrackList
        } else {
            Screen::Library
        }
    }

    pub fn selected_source(&self) -> Option<&LibrarySource> {
        self.sources.get(self.library_selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, title: &str) -> Track {
        Track {
            id: id.to_string(),
            title: title.to_string(),
            artist_name: None,
            album_image_url: None,
            preview_url: None,
            album: None,
        }
    }

    #[test]
    fn filtered_rows_keep_queue_indices() {
        let mut list = TrackListState::new(
            LibrarySource::LikedSongs,
            vec![track("a", "Alpha"), track("b", "Beta"), track("c", "Alphabet")],
        );
        list.push_filter_char('a');
        list.push_filter_char('l');

        let visible: Vec<usize> = list.visible().iter().map(|(i, _)| *i).collect();
        assert_eq!(visible, vec![0, 2]);

        list.move_down();
        assert_eq!(list.selected_entry().map(|(i, t)| (i, t.id)), Some((2, "c".to_string())));

        list.move_down();
        assert_eq!(list.selected, 1);
    }

    #[test]
    fn empty_list_has_no_selection() {
        let list = TrackListState::new(LibrarySource::LocalQueue, Vec::new());
        assert!(list.selected_entry().is_none());
    }

    #[test]
    fn screen_follows_open_track_list() {
        let mut state = UiState::default();
        assert_eq!(state.screen(), Screen::Library);
        state.track_list = Some(TrackListState::new(LibrarySource::RecentlyPlayed, Vec::new()));
        assert_eq!(state.screen(), Screen::TrackList);
    }

    #[test]
    fn playlist_label_is_its_name() {
        let source = LibrarySource::Playlist {
            id: "37i9dQZF1DXcBWIGoYBM5M".to_string(),
            name: "Today's Top Hits".to_string(),
        };
        assert_eq!(source.label(), "Today's Top Hits");
        assert_eq!(LibrarySource::LikedSongs.label(), "Liked Songs");

        let album = LibrarySource::Album {
            id: "4m2880jivSbbyEGAKfITCa".to_string(),
            name: "Discovery".to_string(),
        };
        assert_eq!(album.label(), "Discovery");
    }
}
