//! Playback session - owns the queue and the single live sound
//!
//! The session is the only component that creates, drives or releases sound
//! handles, and the only writer of the shared current-track slot. It is split
//! into submodules by responsibility:
//!
//! - `transport`: Queue assignment and transport operations
//! - `status`: Engine status reports (progress and auto-advance)
//! - `notify`: One-shot user notices

mod notify;
mod status;
mod transport;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;

use crate::audio::{AudioEngine, SoundHandle, StatusUpdate};
use crate::config::SessionConfig;
use crate::context::TrackPublisher;
use crate::model::{PlaybackInfo, Track};

pub use notify::{Notifier, ToastNotifier};

/// Cloneable handle to the app-wide playback session
#[derive(Clone)]
pub struct PlaybackSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    engine: Arc<dyn AudioEngine>,
    notifier: Arc<dyn Notifier>,
    publisher: TrackPublisher,
    config: SessionConfig,
    state: Mutex<SessionState>,
    /// Bumped by every resource transition; stale async results compare against it
    generation: AtomicU64,
    status_tx: UnboundedSender<StatusUpdate>,
}

#[derive(Default)]
struct SessionState {
    queue: Vec<Track>,
    cursor: usize,
    current_track: Option<Track>,
    sound: Option<Box<dyn SoundHandle>>,
    is_playing: bool,
    position_ms: u64,
    duration_ms: u64,
}

impl SessionState {
    fn current_index(&self) -> Option<usize> {
        if self.queue.is_empty() {
            None
        } else {
            Some(self.cursor.min(self.queue.len() - 1))
        }
    }

    /// Queue position of `track`, preferring `index` when it still holds it.
    ///
    /// The queue may have been replaced while the track was loading, so a
    /// caller's index is only trusted when it points at the same track.
    fn position_of(&self, track: &Track, index: usize) -> Option<usize> {
        if self.queue.get(index).is_some_and(|t| t.id == track.id) {
            return Some(index);
        }
        self.queue.iter().position(|t| t.id == track.id)
    }
}

impl PlaybackSession {
    /// Create the session and start its status listener.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        engine: Arc<dyn AudioEngine>,
        notifier: Arc<dyn Notifier>,
        publisher: TrackPublisher,
        config: SessionConfig,
    ) -> Self {
        let (status_tx, status_rx) = mpsc::unbounded_channel();

        let session = Self {
            inner: Arc::new(SessionInner {
                engine,
                notifier,
                publisher,
                config,
                state: Mutex::new(SessionState::default()),
                generation: AtomicU64::new(0),
                status_tx,
            }),
        };

        Self::start_status_listener(Arc::downgrade(&session.inner), status_rx);
        session
    }

    /// Forward engine status reports into the session until it is dropped
    fn start_status_listener(inner: Weak<SessionInner>, mut status_rx: UnboundedReceiver<StatusUpdate>) {
        tracing::debug!("Starting playback status listener");

        tokio::spawn(async move {
            while let Some(update) = status_rx.recv().await {
                let Some(inner) = inner.upgrade() else {
                    break;
                };
                PlaybackSession { inner }.handle_status(update).await;
            }
            tracing::debug!("Playback status listener shutting down");
        });
    }

    pub async fn snapshot(&self) -> PlaybackInfo {
        let state = self.inner.state.lock().await;
        PlaybackInfo {
            track: state.current_track.clone(),
            current_index: state.current_index(),
            queue_len: state.queue.len(),
            position_ms: state.position_ms,
            duration_ms: state.duration_ms,
            is_playing: state.is_playing,
        }
    }

    pub async fn is_playing(&self) -> bool {
        self.inner.state.lock().await.is_playing
    }

    pub async fn queue(&self) -> Vec<Track> {
        self.inner.state.lock().await.queue.clone()
    }

    pub(crate) fn current_generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    /// Invalidate every in-flight creation and status stream
    fn next_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.current_generation() != generation
    }
}
