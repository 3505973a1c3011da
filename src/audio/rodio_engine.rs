use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::{AudioEngine, AudioMode, EngineError, PlaybackStatus, SoundHandle, StatusSink};

const OUTPUT_THREAD_NAME: &str = "audio-output";

/// Desktop engine: downloads preview clips over HTTP and plays them through rodio
pub struct RodioEngine {
    stream_handle: OutputStreamHandle,
    http: reqwest::Client,
    tick: Duration,
}

impl RodioEngine {
    /// Open the default output device.
    ///
    /// The rodio `OutputStream` is not `Send`, so it lives on its own parked
    /// thread for the lifetime of the process; only the handle is shared.
    pub fn new(tick: Duration) -> Result<Self, EngineError> {
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::Builder::new()
            .name(OUTPUT_THREAD_NAME.to_string())
            .spawn(move || match OutputStream::try_default() {
                Ok((_stream, handle)) => {
                    if tx.send(Ok(handle)).is_err() {
                        return;
                    }
                    loop {
                        std::thread::park();
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(EngineError::Device(e.to_string())));
                }
            })?;

        let stream_handle = rx
            .recv()
            .map_err(|_| EngineError::Device("audio output thread exited".to_string()))??;

        tracing::info!(tick_ms = tick.as_millis() as u64, "Audio output opened");

        Ok(Self {
            stream_handle,
            http: reqwest::Client::new(),
            tick,
        })
    }

    async fn fetch_clip(&self, url: &str) -> Result<Vec<u8>, EngineError> {
        let bytes = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        tracing::debug!(url, bytes = bytes.len(), "Preview clip downloaded");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl AudioEngine for RodioEngine {
    async fn configure_mode(&self, mode: AudioMode) -> Result<(), EngineError> {
        // A desktop output stream has no silent switch, ducking or background policy
        tracing::trace!(?mode, "Audio mode requested");
        Ok(())
    }

    async fn create_and_load(
        &self,
        url: &str,
        autoplay: bool,
        sink: StatusSink,
    ) -> Result<(Box<dyn SoundHandle>, PlaybackStatus), EngineError> {
        let clip = self.fetch_clip(url).await?;
        let decoder = Decoder::new(Cursor::new(clip))?;
        let duration_ms = decoder
            .total_duration()
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let output = Sink::try_new(&self.stream_handle)?;
        if !autoplay {
            output.pause();
        }
        output.append(decoder);

        let sound = RodioSound {
            output: Arc::new(output),
            released: Arc::new(AtomicBool::new(false)),
        };
        spawn_status_ticker(&sound, sink, duration_ms, self.tick);

        let status = PlaybackStatus {
            is_loaded: true,
            is_playing: autoplay,
            position_ms: 0,
            duration_ms,
            did_just_finish: false,
        };

        Ok((Box::new(sound), status))
    }
}

fn spawn_status_ticker(sound: &RodioSound, sink: StatusSink, duration_ms: u64, tick: Duration) {
    let output = sound.output.clone();
    let released = sound.released.clone();

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        loop {
            interval.tick().await;

            if released.load(Ordering::Acquire) {
                break;
            }

            if output.empty() {
                tracing::debug!(generation = sink.generation(), "Preview clip finished");
                sink.send(PlaybackStatus {
                    is_loaded: true,
                    is_playing: false,
                    position_ms: duration_ms,
                    duration_ms,
                    did_just_finish: true,
                });
                break;
            }

            let status = PlaybackStatus {
                is_loaded: true,
                is_playing: !output.is_paused(),
                position_ms: output.get_pos().as_millis() as u64,
                duration_ms,
                did_just_finish: false,
            };
            if !sink.send(status) {
                break;
            }
        }
    });
}

struct RodioSound {
    output: Arc<Sink>,
    released: Arc<AtomicBool>,
}

impl RodioSound {
    fn release(&self) {
        self.released.store(true, Ordering::Release);
        self.output.stop();
    }
}

#[async_trait]
impl SoundHandle for RodioSound {
    async fn play(&self) -> Result<(), EngineError> {
        self.output.play();
        Ok(())
    }

    async fn pause(&self) -> Result<(), EngineError> {
        self.output.pause();
        Ok(())
    }

    async fn stop(&self) -> Result<(), EngineError> {
        self.release();
        Ok(())
    }
}

impl Drop for RodioSound {
    fn drop(&mut self) {
        self.release();
    }
}
