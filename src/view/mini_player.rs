//! Mini-player rendering: collapsed bottom bar and expanded transport

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::model::{MiniPlayerState, Track};
use super::utils::format_time;

fn status_icon(is_playing: bool) -> &'static str {
    if is_playing { "▶" } else { "||" }
}

fn time_label(state: &MiniPlayerState) -> String {
    format!(
        "{} / {}",
        format_time(state.playback.position_ms),
        format_time(state.playback.duration_ms)
    )
}

pub fn render_collapsed(frame: &mut Frame, area: Rect, state: &MiniPlayerState, track: &Track) {
    let title = format!(
        " {} {} | {} ",
        status_icon(state.playback.is_playing),
        track.display_title(),
        track.display_artist()
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(" Space play/pause · n/p skip · e expand ").right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(state.playback.progress_fraction())
        .label(time_label(state));

    frame.render_widget(gauge, area);
}

pub fn render_expanded(frame: &mut Frame, area: Rect, state: &MiniPlayerState, track: &Track) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Now Playing (e or Esc to collapse) ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // Title
            Constraint::Length(1), // Artist
            Constraint::Length(1),
            Constraint::Length(1), // Scrub bar
            Constraint::Length(1), // Times
            Constraint::Length(1),
            Constraint::Length(1), // Transport
            Constraint::Min(0),
        ])
        .split(inner);

    let title = Paragraph::new(track.display_title())
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, rows[1]);

    let artist = Paragraph::new(track.display_artist())
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(artist, rows[2]);

    let scrub = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
        .ratio(state.playback.progress_fraction())
        .label("");
    frame.render_widget(scrub, horizontal_margin(rows[4], 4));

    let times = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(horizontal_margin(rows[5], 4));
    frame.render_widget(Paragraph::new(format_time(state.playback.position_ms)), times[0]);
    frame.render_widget(
        Paragraph::new(format_time(state.playback.duration_ms)).alignment(Alignment::Right),
        times[1],
    );

    let transport = format!(
        "|<  p      {}  Space      n  >|",
        status_icon(state.playback.is_playing)
    );
    let transport = Paragraph::new(transport)
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center);
    frame.render_widget(transport, rows[7]);
}

fn horizontal_margin(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin.min(area.width / 2),
        width: area.width.saturating_sub(margin * 2),
        ..area
    }
}
