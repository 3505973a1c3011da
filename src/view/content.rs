//! Main content area rendering (library sources and track lists)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{Track, TrackListState, UiState};
use super::utils::{calculate_num_width, render_scrollable_list, truncate_string};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    current_track_id: Option<&str>,
) {
    if ui_state.loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(" Content "));
        frame.render_widget(loading, area);
        return;
    }

    match &ui_state.track_list {
        Some(list) => render_track_list(frame, area, list, current_track_id),
        None => render_library(frame, area, ui_state),
    }
}

fn render_library(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Library ")
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Green));

    if ui_state.sources.is_empty() {
        let empty = Paragraph::new("No sources available")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = ui_state
        .sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let style = if i == ui_state.library_selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(source.label().to_string()).style(style)
        })
        .collect();

    render_scrollable_list(frame, area, items, ui_state.library_selected, block);
}

fn render_track_list(
    frame: &mut Frame,
    area: Rect,
    list: &TrackListState,
    current_track_id: Option<&str>,
) {
    let title = if list.filter_active || !list.filter.is_empty() {
        format!(" {} · filter: {}_ ", list.source.label(), list.filter)
    } else {
        format!(" {} ", list.source.label())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Green));

    let visible = list.visible();
    if visible.is_empty() {
        let empty = Paragraph::new("No tracks")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let items = track_items(&visible, list.selected, current_track_id, content_width, list.tracks.len());

    // +1 for header
    render_scrollable_list(frame, area, items, list.selected + 1, block);
}

fn track_items(
    tracks: &[(usize, &Track)],
    selected: usize,
    current_track_id: Option<&str>,
    content_width: usize,
    total_count: usize,
) -> Vec<ListItem<'static>> {
    let num_width = calculate_num_width(total_count);
    let preview_width = 7;
    let fixed_width = 1 + num_width + 3 + 3 + 3 + preview_width;
    let remaining_width = content_width.saturating_sub(fixed_width);
    let title_width = (remaining_width * 55) / 100;
    let artist_width = remaining_width.saturating_sub(title_width);

    let mut items = vec![ListItem::new(format!(
        " {:<num_width$}   {:<title_width$}   {:<artist_width$}   {}",
        "#", "Title", "Artist", "Preview",
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))];

    items.extend(tracks.iter().enumerate().map(|(row, (index, track))| {
        let is_current = current_track_id.is_some_and(|id| id == track.id);
        let style = if row == selected {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if is_current {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if !track.has_preview() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let marker = if is_current { "▶" } else { " " };
        let preview = if track.has_preview() { "yes" } else { "-" };
        ListItem::new(format!(
            "{}{:<num_width$}   {}   {}   {}",
            marker,
            index + 1,
            truncate_string(track.display_title(), title_width),
            truncate_string(track.display_artist(), artist_width),
            preview,
        ))
        .style(style)
    }));

    items
}
