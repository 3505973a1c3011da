//! Playback snapshot handed to the UI

use super::track::Track;

/// Complete playback information for rendering the mini-player
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackInfo {
    pub track: Option<Track>,
    /// `None` while no queue is loaded
    pub current_index: Option<usize>,
    pub queue_len: usize,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub is_playing: bool,
}

impl PlaybackInfo {
    /// Position over duration, clamped to `[0, 1]`; zero while the duration is unknown
    pub fn progress_fraction(&self) -> f64 {
        progress_fraction(self.position_ms, self.duration_ms)
    }
}

/// Everything the mini-player overlay renders from
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MiniPlayerState {
    /// The shared current track; the overlay is hidden while this is `None`
    pub track: Option<Track>,
    pub playback: PlaybackInfo,
    pub expanded: bool,
}

impl MiniPlayerState {
    pub fn is_visible(&self) -> bool {
        self.track.is_some()
    }
}

pub fn progress_fraction(position_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        0.0
    } else {
        (position_ms as f64 / duration_ms as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_duration_reports_no_progress() {
        assert_eq!(progress_fraction(5_000, 0), 0.0);
        assert_eq!(PlaybackInfo::default().progress_fraction(), 0.0);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress_fraction(15_000, 30_000), 0.5);
        assert_eq!(progress_fraction(31_000, 30_000), 1.0);
        assert_eq!(progress_fraction(0, 30_000), 0.0);
    }
}
