//! Mini-player overlay: maps user intents onto the playback session

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::context::TrackSubscriber;
use crate::model::MiniPlayerState;
use crate::playback::PlaybackSession;

/// Everything a user can ask of the mini-player
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MiniPlayerIntent {
    TogglePlayPause,
    Next,
    Previous,
    Expand,
    Collapse,
    ToggleExpanded,
}

/// Mounted once, outside the per-screen lists. Holds no playback state of
/// its own beyond whether it is expanded.
#[derive(Clone)]
pub struct MiniPlayer {
    session: PlaybackSession,
    current_track: TrackSubscriber,
    expanded: Arc<AtomicBool>,
}

impl MiniPlayer {
    pub fn new(session: PlaybackSession, current_track: TrackSubscriber) -> Self {
        Self {
            session,
            current_track,
            expanded: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn dispatch(&self, intent: MiniPlayerIntent) {
        tracing::debug!(?intent, "Mini-player intent");
        match intent {
            MiniPlayerIntent::TogglePlayPause => self.session.toggle_play_pause().await,
            MiniPlayerIntent::Next => self.session.play_next().await,
            MiniPlayerIntent::Previous => self.session.play_previous().await,
            MiniPlayerIntent::Expand => self.set_expanded(true),
            MiniPlayerIntent::Collapse => self.set_expanded(false),
            MiniPlayerIntent::ToggleExpanded => self.set_expanded(!self.is_expanded()),
        }
    }

    /// Intents that only touch the overlay and never wait on the engine
    pub fn is_presentation_only(intent: MiniPlayerIntent) -> bool {
        matches!(
            intent,
            MiniPlayerIntent::Expand | MiniPlayerIntent::Collapse | MiniPlayerIntent::ToggleExpanded
        )
    }

    fn set_expanded(&self, expanded: bool) {
        // Nothing to expand while the overlay is hidden
        if expanded && !self.is_visible() {
            return;
        }
        self.expanded.store(expanded, Ordering::Relaxed);
    }

    pub fn is_visible(&self) -> bool {
        self.current_track.has_track()
    }

    pub fn is_expanded(&self) -> bool {
        self.is_visible() && self.expanded.load(Ordering::Relaxed)
    }

    pub async fn state(&self) -> MiniPlayerState {
        MiniPlayerState {
            track: self.current_track.current(),
            playback: self.session.snapshot().await,
            expanded: self.is_expanded(),
        }
    }
}
