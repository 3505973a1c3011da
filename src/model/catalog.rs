//! Track catalog: every source the library screen can open

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::spotify_client::SpotifyClient;
use super::track::Track;
use super::types::LibrarySource;

/// Resolves library sources to track lists
#[derive(Clone)]
pub struct TrackCatalog {
    spotify: Option<SpotifyClient>,
    local_queue: Option<PathBuf>,
    limit: u32,
}

impl TrackCatalog {
    pub fn new(spotify: Option<SpotifyClient>, local_queue: Option<PathBuf>, limit: u32) -> Self {
        Self {
            spotify,
            local_queue,
            limit,
        }
    }

    pub fn spotify(&self) -> Option<&SpotifyClient> {
        self.spotify.as_ref()
    }

    fn remote(&self) -> Result<&SpotifyClient> {
        self.spotify
            .as_ref()
            .context("Spotify access is not configured")
    }

    /// Sources shown on the library screen, playlists included
    pub async fn sources(&self) -> Result<Vec<LibrarySource>> {
        let mut sources = Vec::new();

        if let Some(spotify) = &self.spotify {
            sources.push(LibrarySource::LikedSongs);
            sources.push(LibrarySource::RecentlyPlayed);
            sources.extend(spotify.get_user_playlists(self.limit).await?);
        }
        if self.local_queue.is_some() {
            sources.push(LibrarySource::LocalQueue);
        }

        Ok(sources)
    }

    pub async fn load(&self, source: &LibrarySource) -> Result<Vec<Track>> {
        tracing::debug!(source = source.label(), "Loading tracks");

        let tracks = match source {
            LibrarySource::LocalQueue => {
                let path = self
                    .local_queue
                    .as_deref()
                    .context("no local queue file configured")?;
                load_local_queue(path).await?
            }
            LibrarySource::LikedSongs => self.remote()?.get_liked_songs(self.limit).await?,
            LibrarySource::RecentlyPlayed => self.remote()?.get_recently_played(self.limit).await?,
            LibrarySource::Playlist { id, .. } => {
                self.remote()?.get_playlist_tracks(id, self.limit).await?
            }
            LibrarySource::Album { id, .. } => {
                self.remote()?.get_album_tracks(id, self.limit).await?
            }
        };

        let playable = tracks.iter().filter(|t| t.has_preview()).count();
        tracing::info!(source = source.label(), count = tracks.len(), playable, "Tracks loaded");
        Ok(tracks)
    }
}

/// Read a JSON array of tracks from disk
pub async fn load_local_queue(path: &Path) -> Result<Vec<Track>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read queue file {}", path.display()))?;
    let tracks: Vec<Track> = serde_json::from_str(&content)
        .with_context(|| format!("invalid queue file {}", path.display()))?;
    Ok(tracks)
}
