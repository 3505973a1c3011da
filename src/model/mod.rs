//! Model module - Application state and data types
//!
//! - `track`: The track record every source produces
//! - `playback`: Playback snapshot read by the mini-player
//! - `types`: UI state (screens, library sources, overlays)
//! - `spotify_client`: Spotify Web API track sources
//! - `catalog`: Resolves a library source to a track list
//! - `app_model`: Main application model with state management methods

mod track;
mod playback;
mod types;
mod spotify_client;
mod catalog;
mod app_model;

pub use track::{AlbumRef, Track};

pub use playback::{progress_fraction, MiniPlayerState, PlaybackInfo};

pub use types::{
    LibrarySource, Screen, TrackListState, UiState, ERROR_DISPLAY_DURATION,
    NOTICE_DISPLAY_DURATION,
};

pub use spotify_client::SpotifyClient;

pub use catalog::{load_local_queue, TrackCatalog};

pub use app_model::AppModel;
