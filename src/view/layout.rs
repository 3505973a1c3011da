//! Layout rendering (header bar)

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::UiState;

pub fn render_header(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let breadcrumb = match &ui_state.track_list {
        Some(list) => format!("Library › {}", list.source.label()),
        None => "Library".to_string(),
    };

    let title = match &ui_state.user_name {
        Some(name) => format!(" Spotify Preview · {name} "),
        None => " Spotify Preview ".to_string(),
    };

    let header = Paragraph::new(breadcrumb)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(" ? help ")
                .padding(Padding::horizontal(1))
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(header, area);
}
