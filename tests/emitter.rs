use printspool::emitter::{FileEmitter, TimestampKey};
use tempfile::tempdir;

fn fixed_key() -> TimestampKey {
    TimestampKey {
        day: 5,
        month: 3,
        year: 2026,
        hour: 7,
        minute: 4,
    }
}

#[test]
fn test_timestamp_key_display_has_no_padding() {
    assert_eq!(fixed_key().to_string(), "5_3_2026_7_4");
}

#[tokio::test]
async fn test_filename_combines_index_and_minute_key() {
    let dir = tempdir().unwrap();
    let emitter = FileEmitter::new(dir.path());

    let path = emitter.emit(2, &fixed_key(), "doc").await.unwrap();
    assert_eq!(path, dir.path().join("2.5_3_2026_7_4"));
    assert!(path.exists());
}

#[tokio::test]
async fn test_same_minute_emissions_append() {
    let dir = tempdir().unwrap();
    let emitter = FileEmitter::new(dir.path());
    let key = fixed_key();

    let first = emitter.emit(1, &key, "A").await.unwrap();
    let second = emitter.emit(1, &key, "B").await.unwrap();
    assert_eq!(first, second);

    let content = std::fs::read_to_string(first).unwrap();
    assert_eq!(content, "A\nB\n");
}

#[tokio::test]
async fn test_empty_text_still_writes_a_line() {
    let dir = tempdir().unwrap();
    let emitter = FileEmitter::new(dir.path());

    let path = emitter.emit(1, &fixed_key(), "").await.unwrap();
    let content = std::fs::read_to_string(path).unwrap();
    assert_eq!(content, "\n");
}

#[tokio::test]
async fn test_emit_fails_when_output_dir_is_missing() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("no_such_dir");
    let emitter = FileEmitter::new(&missing);

    let result = emitter.emit(1, &fixed_key(), "doc").await;
    assert!(result.is_err());
}
