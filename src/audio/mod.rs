//! Audio engine capabilities consumed by the playback session
//!
//! The session never talks to an audio library directly. It asks an
//! [`AudioEngine`] for one [`SoundHandle`] per preview clip and receives
//! asynchronous [`PlaybackStatus`] reports through the [`StatusSink`] it
//! registered when the handle was created.
//!
//! - `rodio_engine`: desktop engine that downloads the clip and plays it with rodio

mod rodio_engine;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

pub use rodio_engine::RodioEngine;

/// Errors raised by an engine while creating or driving a sound
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Audio output device error: {0}")]
    Device(String),

    #[error("Network error fetching preview: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Could not decode preview: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rodio::decoder::DecoderError> for EngineError {
    fn from(err: rodio::decoder::DecoderError) -> Self {
        EngineError::Decode(err.to_string())
    }
}

impl From<rodio::PlayError> for EngineError {
    fn from(err: rodio::PlayError) -> Self {
        EngineError::Device(err.to_string())
    }
}

/// Session-level audio behavior requested before a sound is created
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioMode {
    pub plays_in_silent_mode: bool,
    pub stays_active_in_background: bool,
    pub duck_others: bool,
}

impl AudioMode {
    /// Audible foreground playback, nothing kept alive in the background
    pub fn foreground() -> Self {
        Self {
            plays_in_silent_mode: true,
            stays_active_in_background: false,
            duck_others: false,
        }
    }
}

/// Snapshot reported by the engine on every tick and on completion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub is_loaded: bool,
    pub is_playing: bool,
    pub position_ms: u64,
    /// Zero while the clip length is unknown
    pub duration_ms: u64,
    pub did_just_finish: bool,
}

/// A status report tagged with the generation of the `play()` that created its sound
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusUpdate {
    pub generation: u64,
    pub status: PlaybackStatus,
}

/// Registration handed to the engine alongside each new sound
#[derive(Clone, Debug)]
pub struct StatusSink {
    generation: u64,
    tx: UnboundedSender<StatusUpdate>,
}

impl StatusSink {
    pub fn new(generation: u64, tx: UnboundedSender<StatusUpdate>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Deliver a status report. Returns `false` once nobody is listening.
    pub fn send(&self, status: PlaybackStatus) -> bool {
        self.tx
            .send(StatusUpdate {
                generation: self.generation,
                status,
            })
            .is_ok()
    }
}

/// One loaded audio clip. Dropping the handle releases the engine resource.
#[async_trait]
pub trait SoundHandle: Send + Sync {
    async fn play(&self) -> Result<(), EngineError>;
    async fn pause(&self) -> Result<(), EngineError>;
    async fn stop(&self) -> Result<(), EngineError>;
}

#[async_trait]
pub trait AudioEngine: Send + Sync {
    async fn configure_mode(&self, mode: AudioMode) -> Result<(), EngineError>;

    /// Load `url` into a new sound, registering `sink` for its status reports.
    async fn create_and_load(
        &self,
        url: &str,
        autoplay: bool,
        sink: StatusSink,
    ) -> Result<(Box<dyn SoundHandle>, PlaybackStatus), EngineError>;
}
