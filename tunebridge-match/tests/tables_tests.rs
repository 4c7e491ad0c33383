//! CSV export/import against a temporary directory

use tempfile::TempDir;
use tunebridge_match::models::{CatalogFormat, CatalogUri, MatchOutcome, MatchReport, SourceItem};
use tunebridge_match::tables::{
    export_results, export_source, read_matched_uris, read_unmatched_titles, Table,
    MATCHED_EXPORT_FILE, SOURCE_EXPORT_FILE, UNMATCHED_EXPORT_FILE,
};

fn report() -> MatchReport {
    let format = CatalogFormat::default();
    let hit = CatalogUri::parse("spotify:track:4uLU6hMCjMI75M1A2tKUQC").unwrap();
    let url = format.to_url(&hit);

    MatchReport::aggregate(vec![
        MatchOutcome::matched(
            SourceItem::new("Band - Song, Part 1", "v1", "Band", 1),
            hit,
            url,
            "artist:Band track:Song, Part 1",
        ),
        MatchOutcome::unmatched(
            SourceItem::new("He said \"hi\"", "v2", "Chan", 2),
            Some("track:He said hi".to_string()),
        ),
        MatchOutcome::failed(SourceItem::new("Broken", "v3", "Chan", 3), None, "boom"),
    ])
}

#[test]
fn test_source_export_columns() {
    let dir = TempDir::new().unwrap();
    let items = vec![SourceItem::new("Band - Song", "abc", "Band", 1)];

    export_source(&items, dir.path()).unwrap();

    let table = Table::read(&dir.path().join(SOURCE_EXPORT_FILE)).unwrap();
    assert_eq!(table.columns, vec!["position", "title", "channel", "video_id", "url"]);
    assert_eq!(
        table.rows,
        vec![vec!["1", "Band - Song", "Band", "abc", "https://youtu.be/abc"]]
    );
}

#[test]
fn test_matched_export_reads_back_as_uris() {
    let dir = TempDir::new().unwrap();
    export_results(&report(), dir.path()).unwrap();

    let uris = read_matched_uris(
        &dir.path().join(MATCHED_EXPORT_FILE),
        &CatalogFormat::default(),
    )
    .unwrap();

    assert_eq!(uris.len(), 1);
    assert_eq!(uris[0].to_string(), "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
}

#[test]
fn test_unmatched_export_keeps_errors_and_quoting() {
    let dir = TempDir::new().unwrap();
    export_results(&report(), dir.path()).unwrap();

    let path = dir.path().join(UNMATCHED_EXPORT_FILE);
    let titles = read_unmatched_titles(&path).unwrap();
    assert_eq!(titles, vec!["He said \"hi\"", "Broken"]);

    let table = Table::read(&path).unwrap();
    // Failure before any search call carries the sentinel query
    assert_eq!(table.rows[1][4], "N/A");
    assert_eq!(table.rows[0][3], "https://youtu.be/v2");
}

#[test]
fn test_read_matched_skips_foreign_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("matched.csv");
    std::fs::write(
        &path,
        "position,title,channel,spotify_url,query_used\r\n\
         1,A,C,https://open.spotify.com/track/abc,q\r\n\
         2,B,C,,N/A\r\n\
         3,C,C,https://open.spotify.com/album/xyz,q\r\n",
    )
    .unwrap();

    let uris = read_matched_uris(&path, &CatalogFormat::default()).unwrap();

    assert_eq!(uris.len(), 1);
    assert_eq!(uris[0].id(), "abc");
}

#[test]
fn test_read_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = read_matched_uris(&dir.path().join("absent.csv"), &CatalogFormat::default());
    assert!(result.is_err());
}
