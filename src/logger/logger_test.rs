use super::Logger;
use serde_json::json;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_log_text_writes_file_in_suffixed_dir() {
    let base = tempdir().unwrap();
    let logger = Logger::new_in(base.path(), "answer").unwrap();

    logger.log_text("1-prompt.txt", "hello").unwrap();

    let dir_name = logger
        .log_dir()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    assert!(dir_name.ends_with("-answer"));

    let content = fs::read_to_string(logger.log_dir().join("1-prompt.txt")).unwrap();
    assert_eq!(content, "hello");
}

#[test]
fn test_log_json_pretty_prints() {
    let base = tempdir().unwrap();
    let logger = Logger::new_in(base.path(), "").unwrap();

    logger
        .log_json("response.json", &json!({"answer": 42}))
        .unwrap();

    let content = fs::read_to_string(logger.log_dir().join("response.json")).unwrap();
    assert!(content.contains("\"answer\": 42"));
}

#[test]
fn test_empty_suffix_uses_bare_timestamp() {
    let base = tempdir().unwrap();
    let logger = Logger::new_in(base.path(), "").unwrap();
    let dir_name = logger
        .log_dir()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    assert!(!dir_name.ends_with('-'));
}
