//! Configuration loading tests

use std::time::Duration;
use tempo_player::{PlayerConfig, PlayerError};

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tempo.toml");
    std::fs::write(
        &path,
        r#"
[lyrics]
enabled = false

[simulation]
track_length_secs = 42
"#,
    )
    .unwrap();

    let config = PlayerConfig::load(Some(path.as_path())).unwrap();

    assert!(!config.lyrics.enabled);
    assert_eq!(config.track_length(), Duration::from_secs(42));
    assert_eq!(config.simulation.tick_ms, 1000);
    assert_eq!(config.playback.media_album, "Tempo");
    assert!(config.validate().is_ok());
}

#[test]
fn test_playback_section_maps_to_controller_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tempo.toml");
    std::fs::write(
        &path,
        r#"
[playback]
restart_threshold_secs = 5
shuffle_seed = 99
fallback_artwork = "cover.png"
"#,
    )
    .unwrap();

    let playback = PlayerConfig::load(Some(path.as_path())).unwrap().playback_config();

    assert_eq!(playback.restart_threshold, Duration::from_secs(5));
    assert_eq!(playback.shuffle_seed, Some(99));
    assert_eq!(playback.fallback_artwork, "cover.png");
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = PlayerConfig::load(Some(dir.path().join("absent.toml").as_path()));
    assert!(matches!(result, Err(PlayerError::Config(_))));
}

#[test]
fn test_invalid_values_fail_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tempo.toml");
    std::fs::write(&path, "[simulation]\ntrack_length_secs = 0\n").unwrap();

    let config = PlayerConfig::load(Some(path.as_path())).unwrap();
    assert!(matches!(config.validate(), Err(PlayerError::Config(_))));
}

#[test]
fn test_sample_config_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/tempo.toml");
    let config = PlayerConfig::load(Some(path.as_path())).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.lyrics.base_url, "http://localhost:8000/lyrics");
}
