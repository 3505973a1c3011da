//! Engine status reports: progress tracking and auto-advance

use crate::audio::{PlaybackStatus, StatusUpdate};

use super::{PlaybackSession, SessionState};

impl PlaybackSession {
    /// Apply one status report from the engine.
    ///
    /// Reports from a released sound are dropped. A report that marks the end
    /// of the clip releases the sound and advances the queue.
    pub async fn handle_status(&self, update: StatusUpdate) {
        if self.is_stale(update.generation) {
            tracing::trace!(
                generation = update.generation,
                current = self.current_generation(),
                "Ignoring stale status"
            );
            return;
        }

        let status = update.status;
        let finished = {
            let mut state = self.inner.state.lock().await;
            // Re-check under the lock: a transition may have landed meanwhile
            if self.is_stale(update.generation) {
                return;
            }
            Self::apply_progress(&mut state, &status);

            if status.did_just_finish {
                state.is_playing = false;
                state.sound.take()
            } else {
                None
            }
        };

        if status.did_just_finish {
            drop(finished);
            tracing::debug!(generation = update.generation, "Preview finished, advancing");
            self.play_next().await;
        }
    }

    /// The single writer of position and duration
    pub(super) fn apply_progress(state: &mut SessionState, status: &PlaybackStatus) {
        if status.is_loaded && status.is_playing {
            state.position_ms = status.position_ms;
            state.duration_ms = status.duration_ms;
        }
    }
}
