use super::*;

#[test]
fn test_empty_file_is_default() {
    let config = SessionConfig::from_toml_str("").unwrap();
    assert_eq!(config, SessionConfig::default());
    assert_eq!(config.mode, Mode::HumanVsHuman);
    assert_eq!(config.max_plies, DEFAULT_MAX_PLIES);
    assert_eq!(config.engine.depth, 3);
}

#[test]
fn test_full_file() {
    let text = r#"
mode = "ai-vs-ai"
max_plies = 40
log_filter = "minimax_engine=debug"
record = "games/last.json"

[engine]
depth = 2
parallel_root = true
"#;
    let config = SessionConfig::from_toml_str(text).unwrap();
    assert_eq!(config.mode, Mode::AiVsAi);
    assert_eq!(config.max_plies, 40);
    assert_eq!(config.log_filter.as_deref(), Some("minimax_engine=debug"));
    assert_eq!(config.record, Some(PathBuf::from("games/last.json")));
    assert_eq!(config.engine.depth, 2);
    assert!(config.engine.parallel_root);
}

#[test]
fn test_unknown_mode_is_rejected() {
    let err = SessionConfig::from_toml_str("mode = \"engine-vs-cat\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_missing_file() {
    let err = SessionConfig::load(Path::new("/nonexistent/chess.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/chess.toml"));
}

#[test]
fn test_mode_sides() {
    assert!(Mode::HumanVsHuman.is_human(Color::Black));
    assert!(Mode::HumanVsAi.is_human(Color::White));
    assert!(!Mode::HumanVsAi.is_human(Color::Black));
    assert!(!Mode::AiVsAi.is_human(Color::White));
    assert_eq!(Mode::HumanVsAi.to_string(), "human-vs-ai");
}
