//! Terminal client that plays Spotify track previews.
//!
//! The [`playback::PlaybackSession`] owns the queue and the single live
//! sound; screens read the current track through [`context`] and drive
//! transport through the [`controller::MiniPlayer`].

pub mod audio;
pub mod config;
pub mod context;
pub mod controller;
pub mod logging;
pub mod model;
pub mod playback;
pub mod view;
