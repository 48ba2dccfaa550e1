/// CLI configuration
use crate::error::{CliError, Result};
use pulse_playback::{ControllerConfig, Track, DEFAULT_SIMULATED_DURATION_SECS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "pulse.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub player: ControllerConfig,

    #[serde(default = "default_playlist")]
    pub playlist: Vec<Track>,

    #[serde(default = "default_simulation")]
    pub simulation: SimulationSettings,
}

/// Behaviour of the in-memory media device
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Length reported for every loaded track
    #[serde(default = "default_track_duration_secs")]
    pub track_duration_secs: f64,

    /// Simulated seconds per demo step
    #[serde(default = "default_step_secs")]
    pub step_secs: f64,

    /// Reject `play()` like a browser autoplay policy
    #[serde(default)]
    pub autoplay_blocked: bool,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `pulse.toml` is used when
    /// present. Variables prefixed with `PULSE_` override file values, with
    /// `__` between nested keys (`PULSE_PLAYER__VOLUME=40`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
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
            config::Environment::with_prefix("PULSE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;

        tracing::debug!(
            "Loaded configuration: {} tracks, volume {}",
            config.playlist.len(),
            config.player.volume
        );
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.player.volume > 100 {
            return Err(CliError::Config(format!(
                "player.volume must be between 0 and 100 (got {})",
                self.player.volume
            )));
        }

        if let Some(index) = self.playlist.iter().position(|t| t.source.is_empty()) {
            return Err(CliError::Config(format!(
                "playlist entry {} has no source",
                index
            )));
        }

        if !(self.simulation.track_duration_secs.is_finite()
            && self.simulation.track_duration_secs > 0.0)
        {
            return Err(CliError::Config(
                "simulation.track_duration_secs must be positive".to_string(),
            ));
        }

        if !(self.simulation.step_secs.is_finite() && self.simulation.step_secs > 0.0) {
            return Err(CliError::Config(
                "simulation.step_secs must be positive".to_string(),
            ));
        }

        if self.playlist.is_empty() {
            tracing::warn!("Playlist is empty, every playback command will be ignored");
        }

        Ok(())
    }

    /// Write the default configuration as TOML
    pub fn write_default(path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(&Self::default())?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

// Default values
fn default_playlist() -> Vec<Track> {
    vec![
        Track::new(
            "Kartini - Archipelago Series",
            "Epic Majestic Orchestral",
            "/Kartini - Archipelago Series - Epic Majestic Orchestral.wav",
        ),
        Track::new("Blue", "Yung Kai", "/Blue - Yung Kai.wav"),
        Track::new(
            "Tanah Airku",
            "My Spring Lullaby",
            "/Tanah Airku - My Spring Lullaby.wav",
        ),
        Track::new(
            "Indonesia Pusaka",
            "My Spring Lullaby",
            "/Indonesia Pusaka - My Spring Lullaby.wav",
        ),
    ]
}

fn default_simulation() -> SimulationSettings {
    SimulationSettings {
        track_duration_secs: default_track_duration_secs(),
        step_secs: default_step_secs(),
        autoplay_blocked: false,
    }
}

fn default_track_duration_secs() -> f64 {
    DEFAULT_SIMULATED_DURATION_SECS
}

fn default_step_secs() -> f64 {
    1.0
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            player: ControllerConfig::default(),
            playlist: default_playlist(),
            simulation: default_simulation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_playback::RepeatStyle;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn default_config_is_valid() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.playlist.len(), 4);
        assert_eq!(config.simulation.track_duration_secs, 225.0);
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let file = write_config(
            r#"
[player]
volume = 40
repeat_style = "toggle"
settle_delay_ms = 500

[[playlist]]
title = "Blue"
artist = "Yung Kai"
source = "/Blue - Yung Kai.wav"
"#,
        );

        let config = CliConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.player.volume, 40);
        assert_eq!(config.player.repeat_style, RepeatStyle::Toggle);
        assert_eq!(config.player.settle_delay_ms, Some(500));
        assert!(config.player.shuffle_available);
        assert_eq!(config.playlist.len(), 1);
        assert_eq!(config.playlist[0].title, "Blue");
        assert_eq!(config.simulation.step_secs, 1.0);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CliConfig::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn rejects_out_of_range_volume() {
        let file = write_config("[player]\nvolume = 150\n");
        assert!(matches!(
            CliConfig::load(Some(file.path())),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn rejects_non_positive_duration() {
        let mut config = CliConfig::default();
        config.simulation.track_duration_secs = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_track_without_source() {
        let mut config = CliConfig::default();
        config.playlist.push(Track::new("Untitled", "Unknown", ""));
        assert!(config.validate().is_err());
    }

    #[test]
    fn written_default_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pulse.toml");

        CliConfig::write_default(&path).unwrap();
        let loaded = CliConfig::load(Some(&path)).unwrap();

        assert_eq!(loaded, CliConfig::default());
    }
}
