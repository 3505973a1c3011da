//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::Screen;
use super::{AppController, MiniPlayer, MiniPlayerIntent};

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.model.set_should_quit(true).await;
            return Ok(());
        }

        // Error message blocks all other interactions
        if self.model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.model.clear_error().await;
            }
            return Ok(());
        }

        if self.model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h')) {
                self.model.hide_help_popup().await;
            }
            return Ok(());
        }

        if self.model.is_filter_active().await {
            match key.code {
                KeyCode::Esc => self.model.clear_filter().await,
                KeyCode::Enter => self.model.finish_filter().await,
                KeyCode::Backspace => self.model.backspace_filter().await,
                KeyCode::Up => self.model.move_selection_up().await,
                KeyCode::Down => self.model.move_selection_down().await,
                KeyCode::Char(c) => self.model.append_to_filter(c).await,
                _ => {}
            }
            return Ok(());
        }

        if let Some(intent) = Self::mini_player_intent(key, self.mini_player.is_expanded()) {
            self.dispatch_intent(intent).await;
            return Ok(());
        }

        let screen = self.model.current_screen().await;
        match key.code {
            KeyCode::Char('q') => self.model.set_should_quit(true).await,
            KeyCode::Char('?') => self.model.show_help_popup().await,
            KeyCode::Up | KeyCode::Char('k') => self.model.move_selection_up().await,
            KeyCode::Down | KeyCode::Char('j') => self.model.move_selection_down().await,
            KeyCode::Enter => match screen {
                Screen::Library => self.open_selected_source().await,
                Screen::TrackList => self.play_selected().await,
            },
            KeyCode::Char('a') if screen == Screen::TrackList => self.play_all().await,
            KeyCode::Char('o') if screen == Screen::TrackList => self.open_selected_album().await,
            KeyCode::Char('/') if screen == Screen::TrackList => self.model.start_filter().await,
            KeyCode::Esc | KeyCode::Backspace if screen == Screen::TrackList => {
                self.go_back().await
            }
            _ => {}
        }

        Ok(())
    }

    /// Keys owned by the mini-player overlay
    fn mini_player_intent(key: KeyEvent, expanded: bool) -> Option<MiniPlayerIntent> {
        match key.code {
            KeyCode::Char(' ') => Some(MiniPlayerIntent::TogglePlayPause),
            KeyCode::Char('n') => Some(MiniPlayerIntent::Next),
            KeyCode::Char('p') => Some(MiniPlayerIntent::Previous),
            KeyCode::Char('e') => Some(MiniPlayerIntent::ToggleExpanded),
            KeyCode::Esc if expanded => Some(MiniPlayerIntent::Collapse),
            _ => None,
        }
    }

    async fn dispatch_intent(&self, intent: MiniPlayerIntent) {
        if MiniPlayer::is_presentation_only(intent) {
            self.mini_player.dispatch(intent).await;
            return;
        }

        // Transport may wait on a preview download; keep the UI loop responsive
        let player = self.mini_player.clone();
        tokio::spawn(async move {
            player.dispatch(intent).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn transport_keys_map_to_intents() {
        let intent = |code| AppController::mini_player_intent(press(code), false);
        assert_eq!(intent(KeyCode::Char(' ')), Some(MiniPlayerIntent::TogglePlayPause));
        assert_eq!(intent(KeyCode::Char('n')), Some(MiniPlayerIntent::Next));
        assert_eq!(intent(KeyCode::Char('p')), Some(MiniPlayerIntent::Previous));
        assert_eq!(intent(KeyCode::Char('e')), Some(MiniPlayerIntent::ToggleExpanded));
        assert_eq!(intent(KeyCode::Char('x')), None);
    }

    #[test]
    fn escape_collapses_only_when_expanded() {
        assert_eq!(
            AppController::mini_player_intent(press(KeyCode::Esc), true),
            Some(MiniPlayerIntent::Collapse)
        );
        assert_eq!(AppController::mini_player_intent(press(KeyCode::Esc), false), None);
    }
}
