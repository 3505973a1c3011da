//! Shared "current track" slot read by every screen
//!
//! Created once at the application root. The [`TrackPublisher`] half is moved
//! into the playback session, which is its only writer; any number of
//! [`TrackSubscriber`] clones are handed to screens and the mini-player.

use tokio::sync::watch;

use crate::model::Track;

/// Create the shared current-track slot, initially empty
pub fn shared_track_context() -> (TrackPublisher, TrackSubscriber) {
    let (tx, rx) = watch::channel(None);
    (TrackPublisher { tx }, TrackSubscriber { rx })
}

/// Write half. Deliberately not `Clone`.
#[derive(Debug)]
pub struct TrackPublisher {
    tx: watch::Sender<Option<Track>>,
}

impl TrackPublisher {
    pub(crate) fn publish(&self, track: Option<Track>) {
        tracing::trace!(track = ?track.as_ref().map(|t| t.title.as_str()), "Publishing current track");
        self.tx.send_replace(track);
    }

    pub fn subscribe(&self) -> TrackSubscriber {
        TrackSubscriber {
            rx: self.tx.subscribe(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TrackSubscriber {
    rx: watch::Receiver<Option<Track>>,
}

impl TrackSubscriber {
    pub fn current(&self) -> Option<Track> {
        self.rx.borrow().clone()
    }

    pub fn has_track(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait until the current track is replaced or cleared.
    /// Returns `false` once the publisher is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
