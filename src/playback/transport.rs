//! Queue assignment and transport operations

use crate::audio::{EngineError, PlaybackStatus, SoundHandle, StatusSink};
use crate::model::Track;

use super::PlaybackSession;

impl PlaybackSession {
    /// Replace the queue wholesale and rewind the cursor. Playback is untouched.
    pub async fn set_queue(&self, tracks: Vec<Track>) {
        let mut state = self.inner.state.lock().await;
        tracing::debug!(len = tracks.len(), "Queue replaced");
        state.queue = tracks;
        state.cursor = 0;
    }

    /// Queue `tracks` and start the first one.
    ///
    /// Returns the track handed to the engine, or `None` for an empty list.
    pub async fn play_from(&self, tracks: Vec<Track>) -> Option<Track> {
        let first = tracks.first().cloned()?;
        self.set_queue(tracks).await;

        self.inner.state.lock().await.current_track = Some(first.clone());
        self.inner.publisher.publish(Some(first.clone()));

        Some(self.play(first, 0).await)
    }

    /// Load and start `track`, recording `index` as the queue cursor.
    ///
    /// A track without a preview only raises the notice: the current sound and
    /// state are left as they were. Engine failures are logged and leave the
    /// session idle; they never reach the caller.
    pub async fn play(&self, track: Track, index: usize) -> Track {
        let Some(url) = track.preview_url.clone().filter(|_| track.has_preview()) else {
            tracing::info!(track = %track.display_title(), index, "No preview available");
            self.inner
                .notifier
                .notify(&self.inner.config.preview_unavailable_notice);
            return track;
        };

        let generation = self.release_current().await;
        tracing::debug!(track = %track.display_title(), index, generation, "Loading preview");

        match self.load_preview(&url, generation).await {
            Ok(Some((sound, initial))) => {
                let mut state = self.inner.state.lock().await;
                if self.is_stale(generation) {
                    drop(state);
                    tracing::debug!(generation, "Preview superseded before it started, releasing");
                    discard(sound).await;
                    return track;
                }

                state.sound = Some(sound);
                state.is_playing = initial.is_loaded;
                match state.position_of(&track, index) {
                    Some(position) => state.cursor = position,
                    None => tracing::debug!(index, "Playing track is not in the current queue"),
                }
                state.current_track = Some(track.clone());
                Self::apply_progress(&mut state, &initial);
                self.inner.publisher.publish(Some(track.clone()));

                tracing::info!(track = %track.display_title(), index, "Preview playing");
            }
            Ok(None) => {
                tracing::debug!(generation, "Preview superseded while loading");
            }
            Err(e) => {
                tracing::warn!(track = %track.display_title(), error = %e, "Preview playback failed");
                if !self.is_stale(generation) {
                    let mut state = self.inner.state.lock().await;
                    state.sound = None;
                    state.is_playing = false;
                    state.current_track = None;
                    self.inner.publisher.publish(None);
                }
            }
        }

        track
    }

    /// Advance to the next queue entry, wrapping past the end to the first.
    pub async fn play_next(&self) {
        self.step(|cursor, len| if cursor + 1 < len { cursor + 1 } else { 0 })
            .await;
    }

    /// Step back one queue entry; the first entry stays on the first.
    pub async fn play_previous(&self) {
        self.step(|cursor, _| cursor.saturating_sub(1)).await;
    }

    async fn step(&self, advance: impl FnOnce(usize, usize) -> usize) {
        if self.inner.state.lock().await.queue.is_empty() {
            tracing::debug!("Transport step ignored on empty queue");
            return;
        }

        self.release_current().await;

        let (track, index) = {
            let mut state = self.inner.state.lock().await;
            // The queue may have been replaced while the old sound was stopping
            if state.queue.is_empty() {
                return;
            }
            let len = state.queue.len();
            let index = advance(state.cursor.min(len - 1), len);
            state.cursor = index;
            let track = state.queue[index].clone();
            state.current_track = Some(track.clone());
            self.inner.publisher.publish(Some(track.clone()));
            (track, index)
        };

        self.play(track, index).await;
    }

    /// Pause or resume the live sound. Does nothing when no sound is loaded.
    pub async fn toggle_play_pause(&self) {
        let mut state = self.inner.state.lock().await;
        let Some(sound) = state.sound.as_ref() else {
            return;
        };

        let was_playing = state.is_playing;
        let result = if was_playing {
            sound.pause().await
        } else {
            sound.play().await
        };

        match result {
            Ok(()) => {
                state.is_playing = !was_playing;
                let action = if was_playing { "paused" } else { "resumed" };
                tracing::info!(action, "Playback toggled");
            }
            Err(e) => tracing::warn!(error = %e, "Toggle playback failed"),
        }
    }

    /// "Pause on back": silence the sound and clear everything the UI shows.
    pub async fn pause_and_clear(&self) {
        let generation = self.next_generation();

        let sound = {
            let mut state = self.inner.state.lock().await;
            if state.is_playing {
                if let Some(sound) = state.sound.as_ref() {
                    if let Err(e) = sound.pause().await {
                        tracing::warn!(error = %e, "Pause on back failed");
                    }
                }
            }
            state.is_playing = false;
            state.current_track = None;
            self.inner.publisher.publish(None);
            state.sound.take()
        };

        // Dropping the handle is the release; navigation never waits on the engine
        drop(sound);
        tracing::debug!(generation, "Playback cleared");
    }

    /// Stop and drop the live sound, if any, and start a new generation.
    async fn release_current(&self) -> u64 {
        let generation = self.next_generation();

        let sound = {
            let mut state = self.inner.state.lock().await;
            state.is_playing = false;
            state.sound.take()
        };

        if let Some(sound) = sound {
            tracing::debug!(generation, "Releasing previous sound");
            discard(sound).await;
        }
        generation
    }

    /// Configure, create and start a sound for `url`.
    ///
    /// `Ok(None)` means a newer transition started while this one was in flight
    /// and the freshly created sound has already been released.
    async fn load_preview(
        &self,
        url: &str,
        generation: u64,
    ) -> Result<Option<(Box<dyn SoundHandle>, PlaybackStatus)>, EngineError> {
        let engine = &self.inner.engine;
        engine.configure_mode(self.inner.config.audio_mode).await?;

        let sink = StatusSink::new(generation, self.inner.status_tx.clone());
        let (sound, initial) = engine.create_and_load(url, true, sink).await?;

        if self.is_stale(generation) {
            discard(sound).await;
            return Ok(None);
        }

        sound.play().await?;
        Ok(Some((sound, initial)))
    }
}

async fn discard(sound: Box<dyn SoundHandle>) {
    if let Err(e) = sound.stop().await {
        tracing::warn!(error = %e, "Failed to stop sound");
    }
}
