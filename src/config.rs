//! Command-line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::audio::AudioMode;

pub const DEFAULT_PREVIEW_NOTICE: &str = "Preview of this song isn't available in your market";

#[derive(Debug, Clone, Parser)]
#[command(name = "spotify-preview", version, about = "Play Spotify track previews from the terminal")]
pub struct AppConfig {
    /// Pre-acquired Spotify Web API access token
    #[arg(long, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// JSON file containing an array of tracks to offer as a local queue
    #[arg(long, env = "PREVIEW_QUEUE_FILE")]
    pub queue_file: Option<PathBuf>,

    /// Directory for rotated log files
    #[arg(long, env = "PREVIEW_LOG_DIR", default_value = ".logs")]
    pub log_dir: PathBuf,

    /// Period of engine status updates, in milliseconds
    #[arg(long, default_value_t = 250)]
    pub tick_ms: u64,

    /// Maximum number of tracks or playlists fetched per library source
    #[arg(long, default_value_t = 50)]
    pub library_limit: u32,
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.access_token.is_none() && self.queue_file.is_none() {
            anyhow::bail!(
                "no track source configured: pass --access-token (or SPOTIFY_ACCESS_TOKEN) \
                 and/or --queue-file (or PREVIEW_QUEUE_FILE)"
            );
        }
        if self.tick_ms == 0 {
            anyhow::bail!("--tick-ms must be greater than zero");
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Settings consumed by the playback session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Mode requested from the engine before each sound is created
    pub audio_mode: AudioMode,
    /// Text of the one-shot notice for tracks without a preview
    pub preview_unavailable_notice: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            audio_mode: AudioMode::foreground(),
            preview_unavailable_notice: DEFAULT_PREVIEW_NOTICE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_a_track_source() {
        let config = AppConfig::parse_from(["spotify-preview", "--log-dir", "/tmp/logs"]);
        // The environment may provide a source; only assert when it does not
        if config.access_token.is_none() && config.queue_file.is_none() {
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn accepts_queue_file_only() {
        let config = AppConfig::parse_from(["spotify-preview", "--queue-file", "tracks.json"]);
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.library_limit, 50);
    }

    #[test]
    fn rejects_zero_tick() {
        let config =
            AppConfig::parse_from(["spotify-preview", "--queue-file", "q.json", "--tick-ms", "0"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn session_defaults_to_foreground_audible_mode() {
        let config = SessionConfig::default();
        assert!(config.audio_mode.plays_in_silent_mode);
        assert!(!config.audio_mode.stays_active_in_background);
        assert!(!config.audio_mode.duck_others);
        assert_eq!(config.preview_unavailable_notice, DEFAULT_PREVIEW_NOTICE);
    }
}
