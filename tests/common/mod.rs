//! Scripted audio engine and helpers shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use spotify_preview::audio::{
    AudioEngine, AudioMode, EngineError, PlaybackStatus, SoundHandle, StatusSink, StatusUpdate,
};
use spotify_preview::config::SessionConfig;
use spotify_preview::context::{shared_track_context, TrackSubscriber};
use spotify_preview::model::Track;
use spotify_preview::playback::{Notifier, PlaybackSession};

pub const PREVIEW_CLIP_MS: u64 = 30_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Configure,
    Create(String),
    Play(String),
    Pause(String),
    Stop(String),
    Release(String),
}

#[derive(Default)]
pub struct FakeEngine {
    ops: Arc<Mutex<Vec<Op>>>,
    live: Arc<AtomicUsize>,
    max_live: Arc<AtomicUsize>,
    sinks: Mutex<Vec<(String, StatusSink)>>,
    failing: Mutex<HashSet<String>>,
    delays: Mutex<HashMap<String, Duration>>,
}

impl FakeEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_on(&self, url: &str) {
        self.failing.lock().unwrap().insert(url.to_string());
    }

    pub fn delay(&self, url: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(url.to_string(), delay);
    }

    pub fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }

    pub fn created(&self) -> usize {
        self.ops()
            .iter()
            .filter(|op| matches!(op, Op::Create(_)))
            .count()
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn max_live(&self) -> usize {
        self.max_live.load(Ordering::SeqCst)
    }

    /// Status sink registered with the most recent creation
    pub fn last_sink(&self) -> Option<StatusSink> {
        self.sinks.lock().unwrap().last().map(|(_, sink)| sink.clone())
    }

    pub fn sink_for(&self, url: &str) -> Option<StatusSink> {
        self.sinks
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(u, _)| u == url)
            .map(|(_, sink)| sink.clone())
    }

    fn record(&self, op: Op) {
        self.ops.lock().unwrap().push(op);
    }
}

#[async_trait]
impl AudioEngine for FakeEngine {
    async fn configure_mode(&self, _mode: AudioMode) -> Result<(), EngineError> {
        self.record(Op::Configure);
        Ok(())
    }

    async fn create_and_load(
        &self,
        url: &str,
        autoplay: bool,
        sink: StatusSink,
    ) -> Result<(Box<dyn SoundHandle>, PlaybackStatus), EngineError> {
        let delay = self.delays.lock().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().unwrap().contains(url) {
            return Err(EngineError::Device(format!("cannot open {url}")));
        }

        self.record(Op::Create(url.to_string()));
        self.sinks.lock().unwrap().push((url.to_string(), sink));

        let now_live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_live.fetch_max(now_live, Ordering::SeqCst);

        let sound = FakeSound {
            url: url.to_string(),
            ops: self.ops.clone(),
            live: self.live.clone(),
        };
        let status = PlaybackStatus {
            is_loaded: true,
            is_playing: autoplay,
            position_ms: 0,
            duration_ms: PREVIEW_CLIP_MS,
            did_just_finish: false,
        };
        Ok((Box::new(sound), status))
    }
}

struct FakeSound {
    url: String,
    ops: Arc<Mutex<Vec<Op>>>,
    live: Arc<AtomicUsize>,
}

impl FakeSound {
    fn record(&self, op: Op) {
        self.ops.lock().unwrap().push(op);
    }
}

#[async_trait]
impl SoundHandle for FakeSound {
    async fn play(&self) -> Result<(), EngineError> {
        self.record(Op::Play(self.url.clone()));
        Ok(())
    }

    async fn pause(&self) -> Result<(), EngineError> {
        self.record(Op::Pause(self.url.clone()));
        Ok(())
    }

    async fn stop(&self) -> Result<(), EngineError> {
        self.record(Op::Stop(self.url.clone()));
        Ok(())
    }
}

impl Drop for FakeSound {
    fn drop(&mut self) {
        self.record(Op::Release(self.url.clone()));
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub struct Harness {
    pub session: PlaybackSession,
    pub engine: Arc<FakeEngine>,
    pub notifier: Arc<RecordingNotifier>,
    pub current_track: TrackSubscriber,
}

pub fn harness() -> Harness {
    let engine = FakeEngine::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let (publisher, current_track) = shared_track_context();
    let session = PlaybackSession::new(
        engine.clone(),
        notifier.clone(),
        publisher,
        SessionConfig::default(),
    );
    Harness {
        session,
        engine,
        notifier,
        current_track,
    }
}

pub fn url(id: &str) -> String {
    format!("https://p.scdn.co/mp3-preview/{id}")
}

pub fn track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Track {id}"),
        artist_name: Some("Artist".to_string()),
        album_image_url: None,
        preview_url: Some(url(id)),
        album: None,
    }
}

pub fn silent_track(id: &str) -> Track {
    Track {
        preview_url: None,
        ..track(id)
    }
}

pub fn finished(sink: &StatusSink) -> StatusUpdate {
    StatusUpdate {
        generation: sink.generation(),
        status: PlaybackStatus {
            is_loaded: true,
            is_playing: false,
            position_ms: PREVIEW_CLIP_MS,
            duration_ms: PREVIEW_CLIP_MS,
            did_just_finish: true,
        },
    }
}

pub fn progress(sink: &StatusSink, position_ms: u64) -> StatusUpdate {
    StatusUpdate {
        generation: sink.generation(),
        status: PlaybackStatus {
            is_loaded: true,
            is_playing: true,
            position_ms,
            duration_ms: PREVIEW_CLIP_MS,
            did_just_finish: false,
        },
    }
}

/// Poll `check` until it holds or a second has passed
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
