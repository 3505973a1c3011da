mod common;

use std::path::PathBuf;
use std::sync::Arc;

use common::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use spotify_preview::controller::AppController;
use spotify_preview::model::{AlbumRef, AppModel, LibrarySource, Screen, TrackCatalog};

fn queue_file(name: &str, tracks: &[spotify_preview::model::Track]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("spotify-preview-nav-{}-{name}.json", std::process::id()));
    std::fs::write(&path, serde_json::to_string(tracks).unwrap()).unwrap();
    path
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

async fn controller_for(h: &Harness, path: PathBuf) -> (AppController, Arc<AppModel>) {
    let model = Arc::new(AppModel::new(TrackCatalog::new(None, Some(path), 50)));
    let controller = AppController::new(model.clone(), h.session.clone(), h.current_track.clone());
    controller.load_library().await;
    (controller, model)
}

#[tokio::test]
async fn opening_a_source_queues_its_tracks() {
    let h = harness();
    let path = queue_file("open", &[track("a"), silent_track("b")]);
    let (controller, model) = controller_for(&h, path.clone()).await;

    assert_eq!(model.get_ui_state().await.sources, vec![LibrarySource::LocalQueue]);

    controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();

    assert_eq!(model.current_screen().await, Screen::TrackList);
    assert_eq!(h.session.queue().await.len(), 2);
    assert!(!h.session.is_playing().await);

    std::fs::remove_file(path).ok();
}

#[tokio::test]
async fn back_pauses_and_clears_before_leaving() {
    let h = harness();
    let path = queue_file("back", &[track("a"), track("b")]);
    let (controller, model) = controller_for(&h, path.clone()).await;

    controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
    controller.handle_key_event(press(KeyCode::Down)).await.unwrap();
    controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();

    let current = h.current_track.clone();
    assert!(eventually(|| {
        let current = current.clone();
        async move { current.current().is_some_and(|t| t.id == "b") }
    })
    .await);
    assert_eq!(h.session.snapshot().await.current_index, Some(1));

    controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();

    assert_eq!(model.current_screen().await, Screen::Library);
    assert!(h.current_track.current().is_none());
    assert!(!h.session.is_playing().await);
    assert_eq!(h.engine.live(), 0);

    std::fs::remove_file(path).ok();
}

#[tokio::test]
async fn filtered_row_plays_at_its_queue_index() {
    let h = harness();
    let mut tracks = vec![track("a"), track("b"), track("c")];
    tracks[2].title = "Harder Better".to_string();
    let path = queue_file("filter", &tracks);
    let (controller, _model) = controller_for(&h, path.clone()).await;

    controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
    for code in [KeyCode::Char('/'), KeyCode::Char('h'), KeyCode::Char('a'), KeyCode::Enter] {
        controller.handle_key_event(press(code)).await.unwrap();
    }
    controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();

    let session = &h.session;
    assert!(eventually(|| async move { session.snapshot().await.current_index == Some(2) }).await);
    assert_eq!(h.current_track.current().map(|t| t.id), Some("c".to_string()));

    std::fs::remove_file(path).ok();
}

#[tokio::test]
async fn album_key_needs_an_album_and_spotify_access() {
    let h = harness();
    let mut tracks = vec![track("a"), track("b")];
    tracks[1].album = Some(AlbumRef {
        id: "4m2880jivSbbyEGAKfITCa".to_string(),
        name: "Discovery".to_string(),
    });
    let path = queue_file("album", &tracks);
    let (controller, model) = controller_for(&h, path.clone()).await;

    controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();

    // First row carries no album reference
    controller.handle_key_event(press(KeyCode::Char('o'))).await.unwrap();
    assert!(!model.has_error().await);
    assert_eq!(model.get_ui_state().await.track_list.map(|l| l.source), Some(LibrarySource::LocalQueue));

    controller.handle_key_event(press(KeyCode::Down)).await.unwrap();
    controller.handle_key_event(press(KeyCode::Char('o'))).await.unwrap();
    assert!(model.has_error().await);
    assert_eq!(model.current_screen().await, Screen::TrackList);
    assert_eq!(h.session.queue().await.len(), 2);

    std::fs::remove_file(path).ok();
}
