//! Track records handed to the player by track sources

use rspotify::model::{FullAlbum, FullTrack, PlayableItem, SimplifiedTrack};
use rspotify::prelude::Id;
use serde::{Deserialize, Serialize};

const UNKNOWN_TITLE: &str = "Unknown track";
const UNKNOWN_ARTIST: &str = "Unknown artist";

/// A playable catalogue entry. `preview_url` is routinely absent
/// (regional licensing), which is not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub album_image_url: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub album: Option<AlbumRef>,
}

/// The album a track belongs to, enough to open it as a source
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: String,
    pub name: String,
}

impl Track {
    pub fn has_preview(&self) -> bool {
        self.preview_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNKNOWN_TITLE
        } else {
            &self.title
        }
    }

    pub fn display_artist(&self) -> &str {
        match self.artist_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_ARTIST,
        }
    }

    /// Case-insensitive title match used by the track list filter
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.title.to_lowercase().contains(&query.to_lowercase())
    }

    pub fn from_playable(item: &PlayableItem) -> Option<Self> {
        match item {
            PlayableItem::Track(track) => Some(Self::from(track)),
            _ => None,
        }
    }

    /// Album tracks come without album data; take it from the album itself
    pub fn from_album_track(track: &SimplifiedTrack, album: &FullAlbum) -> Self {
        Self {
            id: track
                .id
                .as_ref()
                .map(|id| id.id().to_string())
                .unwrap_or_default(),
            title: track.name.clone(),
            artist_name: track
                .artists
                .first()
                .or(album.artists.first())
                .map(|a| a.name.clone()),
            album_image_url: album.images.first().map(|i| i.url.clone()),
            preview_url: track.preview_url.clone(),
            album: Some(AlbumRef {
                id: album.id.id().to_string(),
                name: album.name.clone(),
            }),
        }
    }
}

impl From<&FullTrack> for Track {
    fn from(track: &FullTrack) -> Self {
        Self {
            id: track
                .id
                .as_ref()
                .map(|id| id.id().to_string())
                .unwrap_or_default(),
            title: track.name.clone(),
            artist_name: track.artists.first().map(|a| a.name.clone()),
            album_image_url: track.album.images.first().map(|i| i.url.clone()),
            preview_url: track.preview_url.clone(),
            album: track.album.id.as_ref().map(|id| AlbumRef {
                id: id.id().to_string(),
                name: track.album.name.clone(),
            }),
        }
    }
}
