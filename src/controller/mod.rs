//! Controller module - Application logic and event handling
//!
//! The controller turns key presses into model updates and playback session
//! calls. It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `navigation`: Library and track list navigation, including pause on back
//! - `mini_player`: Mini-player intents

mod input;
mod mini_player;
mod navigation;

use std::sync::Arc;

use crate::context::TrackSubscriber;
use crate::model::AppModel;
use crate::playback::PlaybackSession;

pub use mini_player::{MiniPlayer, MiniPlayerIntent};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
    pub(crate) session: PlaybackSession,
    pub(crate) mini_player: MiniPlayer,
}

impl AppController {
    pub fn new(model: Arc<AppModel>, session: PlaybackSession, current_track: TrackSubscriber) -> Self {
        let mini_player = MiniPlayer::new(session.clone(), current_track);
        Self {
            model,
            session,
            mini_player,
        }
    }

    pub fn mini_player(&self) -> &MiniPlayer {
        &self.mini_player
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        let error_str = error.to_string();

        if error_str.contains("401") {
            "Access token rejected or expired. Restart with a fresh token.".to_string()
        } else if error_str.contains("403") {
            "Spotify refused the request. Check the token's scopes.".to_string()
        } else if error_str.contains("404") {
            "Not found on Spotify.".to_string()
        } else if error_str.contains("429") {
            "Rate limited. Please wait a moment.".to_string()
        } else {
            format!("Error: {}", error_str)
        }
    }
}
