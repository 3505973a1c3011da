//! Navigation-related controller methods (library, track lists, back)

use crate::model::LibrarySource;

use super::AppController;

impl AppController {
    /// Populate the library screen with every configured source
    pub async fn load_library(&self) {
        self.model.set_loading(true).await;

        match self.model.catalog.sources().await {
            Ok(sources) => {
                tracing::info!(count = sources.len(), "Library loaded");
                self.model.set_sources(sources).await;
                self.model.set_loading(false).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load library");
                self.model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    /// Load the selected source, queue it, and open its track list
    pub async fn open_selected_source(&self) {
        let Some(source) = self.model.get_selected_source().await else {
            return;
        };
        self.model.set_loading(true).await;

        match self.model.catalog.load(&source).await {
            Ok(tracks) => {
                self.session.set_queue(tracks.clone()).await;
                self.model.open_track_list(source, tracks).await;
            }
            Err(e) => {
                tracing::error!(source = source.label(), error = %e, "Failed to load tracks");
                self.model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    /// Replace the open list with the album of the selected track, queued
    pub async fn open_selected_album(&self) {
        let Some((_, track)) = self.model.get_selected_track().await else {
            return;
        };
        let Some(album) = track.album else {
            tracing::debug!(track = %track.display_title(), "Track has no album to open");
            return;
        };
        let source = LibrarySource::Album {
            id: album.id,
            name: album.name,
        };
        self.model.set_loading(true).await;

        match self.model.catalog.load(&source).await {
            Ok(tracks) => {
                self.session.set_queue(tracks.clone()).await;
                self.model.open_track_list(source, tracks).await;
            }
            Err(e) => {
                tracing::error!(source = source.label(), error = %e, "Failed to load album");
                self.model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    /// Leave the track list. Playback stops and the mini-player clears first.
    pub async fn go_back(&self) {
        self.session.pause_and_clear().await;
        if self.model.close_track_list().await {
            tracing::debug!("Returned to library");
        }
    }

    /// Play the selected row at its position in the full queue
    pub async fn play_selected(&self) {
        let Some((index, track)) = self.model.get_selected_track().await else {
            return;
        };
        tracing::info!(index, track = %track.display_title(), "Play selected");

        let session = self.session.clone();
        tokio::spawn(async move {
            session.play(track, index).await;
        });
    }

    /// Queue the whole open list and start from its first track
    pub async fn play_all(&self) {
        let Some(tracks) = self.model.get_track_list_tracks().await else {
            return;
        };

        let session = self.session.clone();
        tokio::spawn(async move {
            if session.play_from(tracks).await.is_none() {
                tracing::debug!("Play all on an empty list");
            }
        });
    }
}
