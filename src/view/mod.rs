//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (time formatting, scrollable lists)
//! - `layout`: Header bar
//! - `content`: Library and track list screens
//! - `mini_player`: Collapsed bar and expanded transport
//! - `overlays`: Error notification, toast, help

mod utils;
mod layout;
mod content;
mod mini_player;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{MiniPlayerState, UiState};

pub use utils::format_time;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, player: &MiniPlayerState) {
        let bar_height = if player.is_visible() && !player.expanded { 3 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),          // Header
                Constraint::Min(0),             // Screen or expanded player
                Constraint::Length(bar_height), // Collapsed mini-player
            ])
            .split(frame.area());

        layout::render_header(frame, chunks[0], ui_state);

        match player.track.as_ref() {
            Some(track) if player.expanded => {
                mini_player::render_expanded(frame, chunks[1], player, track);
            }
            Some(track) => {
                content::render_main_content(frame, chunks[1], ui_state, Some(track.id.as_str()));
                mini_player::render_collapsed(frame, chunks[2], player, track);
            }
            None => content::render_main_content(frame, chunks[1], ui_state, None),
        }

        overlays::render_toast(frame, chunks[1], ui_state);

        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
