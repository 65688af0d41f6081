/// Player configuration
use crate::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempo_lyrics::LyricsConfig;
use tempo_playback::PlaybackConfig;

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "tempo.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_lyrics")]
    pub lyrics: LyricsSettings,

    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_simulation")]
    pub simulation: SimulationSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// JSON file holding `lastPlayed` and `playlists`
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LyricsSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_lyrics_base_url")]
    pub base_url: String,

    #[serde(default = "default_lyrics_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_restart_threshold_secs")]
    pub restart_threshold_secs: u64,

    /// Fixed seed for shuffle picks; entropy when unset
    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    #[serde(default = "default_media_album")]
    pub media_album: String,

    #[serde(default = "default_fallback_artwork")]
    pub fallback_artwork: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// How often the simulated resource reports progress
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Length given to every simulated source
    #[serde(default = "default_track_length_secs")]
    pub track_length_secs: u64,
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `tempo.toml` is read when
    /// present. Environment variables prefixed with `TEMPO_` override both,
    /// with `__` between section and key (`TEMPO_LYRICS__BASE_URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TEMPO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| PlayerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| PlayerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.simulation.tick_ms == 0 {
            return Err(PlayerError::Config(
                "simulation.tick_ms must be greater than zero".to_string(),
            ));
        }

        if self.simulation.track_length_secs == 0 {
            return Err(PlayerError::Config(
                "simulation.track_length_secs must be greater than zero".to_string(),
            ));
        }

        if self.lyrics.enabled && self.lyrics.base_url.trim().is_empty() {
            return Err(PlayerError::Config(
                "Lyrics base URL is required (set TEMPO_LYRICS__BASE_URL or disable lyrics)"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Controller settings
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            restart_threshold: Duration::from_secs(self.playback.restart_threshold_secs),
            shuffle_seed: self.playback.shuffle_seed,
            media_album: self.playback.media_album.clone(),
            fallback_artwork: self.playback.fallback_artwork.clone(),
        }
    }

    /// Lyrics client settings
    pub fn lyrics_config(&self) -> LyricsConfig {
        LyricsConfig {
            base_url: self.lyrics.base_url.clone(),
            timeout: Duration::from_secs(self.lyrics.timeout_secs),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.simulation.tick_ms)
    }

    pub fn track_length(&self) -> Duration {
        Duration::from_secs(self.simulation.track_length_secs)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            lyrics: default_lyrics(),
            catalog: default_catalog(),
            playback: default_playback(),
            simulation: default_simulation(),
        }
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        state_file: default_state_file(),
    }
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./data/tempo-state.json")
}

fn default_lyrics() -> LyricsSettings {
    LyricsSettings {
        enabled: default_enabled(),
        base_url: default_lyrics_base_url(),
        timeout_secs: default_lyrics_timeout_secs(),
    }
}

fn default_enabled() -> bool {
    true
}

fn default_lyrics_base_url() -> String {
    "http://localhost:8000/lyrics".to_string()
}

fn default_lyrics_timeout_secs() -> u64 {
    10
}

fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        path: default_catalog_path(),
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("./demos/catalog.json")
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        restart_threshold_secs: default_restart_threshold_secs(),
        shuffle_seed: None,
        media_album: default_media_album(),
        fallback_artwork: default_fallback_artwork(),
    }
}

fn default_restart_threshold_secs() -> u64 {
    PlaybackConfig::default().restart_threshold.as_secs()
}

fn default_media_album() -> String {
    PlaybackConfig::default().media_album
}

fn default_fallback_artwork() -> String {
    PlaybackConfig::default().fallback_artwork
}

fn default_simulation() -> SimulationSettings {
    SimulationSettings {
        tick_ms: default_tick_ms(),
        track_length_secs: default_track_length_secs(),
    }
}

fn default_tick_ms() -> u64 {
    1000
}

fn default_track_length_secs() -> u64 {
    180
}
