//! Spotify Web API track sources

use std::sync::Arc;

use anyhow::Result;
use futures::{StreamExt, TryStreamExt};
use rspotify::{
    model::{AlbumId, Market, PlaylistId},
    prelude::*,
    AuthCodeSpotify,
};

use super::track::Track;
use super::types::LibrarySource;

/// Read-only Spotify client producing `Track` lists for the player
#[derive(Clone)]
pub struct SpotifyClient {
    client: Arc<AuthCodeSpotify>,
}

impl SpotifyClient {
    pub fn new(client: AuthCodeSpotify) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub async fn current_user_name(&self) -> Result<String> {
        let user = self.client.me().await?;
        Ok(user.display_name.unwrap_or_else(|| user.id.id().to_string()))
    }

    pub async fn get_liked_songs(&self, limit: u32) -> Result<Vec<Track>> {
        let result: Result<Vec<_>, _> = self
            .client
            .current_user_saved_tracks(Some(Market::FromToken))
            .take(limit as usize)
            .try_collect()
            .await;
        crate::log_api_result!("current_user_saved_tracks", result);

        Ok(result?
            .iter()
            .map(|saved| Track::from(&saved.track))
            .collect())
    }

    pub async fn get_recently_played(&self, limit: u32) -> Result<Vec<Track>> {
        let result = self
            .client
            .current_user_recently_played(Some(limit), None)
            .await;
        crate::log_api_result!("current_user_recently_played", result);

        Ok(result?
            .items
            .iter()
            .map(|item| Track::from(&item.track))
            .collect())
    }

    /// The user's playlists as library sources
    pub async fn get_user_playlists(&self, limit: u32) -> Result<Vec<LibrarySource>> {
        let result: Result<Vec<_>, _> = self
            .client
            .current_user_playlists()
            .take(limit as usize)
            .try_collect()
            .await;
        crate::log_api_result!("current_user_playlists", result);

        Ok(result?
            .into_iter()
            .map(|playlist| LibrarySource::Playlist {
                id: playlist.id.id().to_string(),
                name: playlist.name,
            })
            .collect())
    }

    pub async fn get_playlist_tracks(&self, playlist_id: &str, limit: u32) -> Result<Vec<Track>> {
        let id = PlaylistId::from_id(playlist_id)?;

        let result: Result<Vec<_>, _> = self
            .client
            .playlist_items(id, None, Some(Market::FromToken))
            .take(limit as usize)
            .try_collect()
            .await;
        crate::log_api_result!("playlist_items", result);

        // Episodes and removed entries have no track to preview
        Ok(result?
            .iter()
            .filter_map(|item| item.track.as_ref().and_then(Track::from_playable))
            .collect())
    }

    /// Tracks of one album, carrying the album's cover and reference
    pub async fn get_album_tracks(&self, album_id: &str, limit: u32) -> Result<Vec<Track>> {
        let id = AlbumId::from_id(album_id)?;

        let album = self.client.album(id.clone(), Some(Market::FromToken)).await;
        crate::log_api_result!("album", album);
        let album = album?;

        let result: Result<Vec<_>, _> = self
            .client
            .album_track(id, Some(Market::FromToken))
            .take(limit as usize)
            .try_collect()
            .await;
        crate::log_api_result!("album_track", result);

        Ok(result?
            .iter()
            .map(|track| Track::from_album_track(track, &album))
            .collect())
    }
}
