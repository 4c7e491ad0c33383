//! Playlist decision and chunked insertion tests

mod helpers;

use helpers::{RecordingSink, SinkCall};
use tunebridge_match::error::PlaylistError;
use tunebridge_match::playlist::{add_tracks, resolve_playlist, PlaylistDecision};

fn uris(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("spotify:track:t{}", i)).collect()
}

#[tokio::test]
async fn test_insertion_is_chunked_in_order() {
    let sink = RecordingSink::new();
    let tracks = uris(250);

    let added = add_tracks(&sink, "pl1", &tracks).await.unwrap();

    assert_eq!(added, 250);
    let batches = sink.appended_batches();
    let sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert_eq!(batches.concat(), tracks);
}

#[tokio::test]
async fn test_exact_chunk_boundary() {
    let sink = RecordingSink::new();

    add_tracks(&sink, "pl1", &uris(200)).await.unwrap();

    assert_eq!(sink.appended_batches().len(), 2);
}

#[tokio::test]
async fn test_no_tracks_makes_no_calls() {
    let sink = RecordingSink::new();

    let added = add_tracks(&sink, "pl1", &[]).await.unwrap();

    assert_eq!(added, 0);
    assert!(sink.calls().is_empty());
}

#[tokio::test]
async fn test_insert_failure_propagates() {
    let sink = RecordingSink::failing_appends();

    let result = add_tracks(&sink, "pl1", &uris(3)).await;

    assert!(matches!(result, Err(PlaylistError::Api(500, _))));
}

#[tokio::test]
async fn test_create_new_decision() {
    let sink = RecordingSink::new();
    let decision = PlaylistDecision::CreateNew {
        name: "Road Trip".to_string(),
        public: false,
    };

    let id = resolve_playlist(&sink, &decision).await.unwrap();

    assert_eq!(id, "new-playlist");
    assert_eq!(
        sink.calls(),
        vec![SinkCall::Create {
            name: "Road Trip".to_string(),
            public: false
        }]
    );
}

#[tokio::test]
async fn test_use_existing_decision_accepts_url() {
    let sink = RecordingSink::new();
    let decision = PlaylistDecision::UseExisting(
        "https://open.spotify.com/playlist/37i9dQZF1DX?si=abc".to_string(),
    );

    let id = resolve_playlist(&sink, &decision).await.unwrap();

    assert_eq!(id, "37i9dQZF1DX");
    assert_eq!(sink.calls(), vec![SinkCall::Open("37i9dQZF1DX".to_string())]);
}

#[tokio::test]
async fn test_use_existing_rejects_garbage_without_calls() {
    let sink = RecordingSink::new();
    let decision = PlaylistDecision::UseExisting("   ".to_string());

    let result = resolve_playlist(&sink, &decision).await;

    assert!(matches!(result, Err(PlaylistError::InvalidReference(_))));
    assert!(sink.calls().is_empty());
}
