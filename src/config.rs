use crate::engine::{Difficulty, Grid};
use crate::store::{JsonFileStore, KeyValueStore, MemoryStore};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Gameplay settings
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct GameConfig {
    /// Difficulty to start at unless overridden on the command line
    pub(crate) difficulty: Difficulty,

    /// Size of the playing field
    #[serde(rename = "grid-size")]
    pub(crate) grid: Grid,
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score in a file
    save_high_score: bool,

    /// File to write log messages to
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
            log_file: None,
        }
    }
}

impl FileConfig {
    /// Return the filepath at which the high score should be stored: the file
    /// given in the configuration or, if that is not set, the default path.
    /// Return `None` if no path is present in the configuration and the
    /// default path could not be computed.
    fn high_score_file(&self) -> Option<Cow<'_, Path>> {
        self.high_score_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| JsonFileStore::default_path().map(Cow::from))
    }

    /// Return the store in which to keep the high score.
    ///
    /// If `save_high_score` is `false`, or if no high score file path could
    /// be determined, the high score is only kept in memory.
    pub(crate) fn high_score_store(&self) -> Box<dyn KeyValueStore> {
        if !self.save_high_score {
            return Box::new(MemoryStore::new());
        }
        match self.high_score_file() {
            Some(p) => {
                let store = JsonFileStore::new(p.into_owned());
                log::debug!("Keeping high score in {}", store.path().display());
                Box::new(store)
            }
            None => {
                log::warn!(
                    "Could not determine path to local data directory; high score will not be saved"
                );
                Box::new(MemoryStore::new())
            }
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_allowed() {
        let tmpdir = TempDir::new().unwrap();
        let cfg = Config::load(&tmpdir.path().join("config.toml"), true).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.game.grid, Grid::default());
        assert_eq!(cfg.game.difficulty, Difficulty::Medium);
        assert!(cfg.files.save_high_score);
    }

    #[test]
    fn missing_not_allowed() {
        let tmpdir = TempDir::new().unwrap();
        let r = Config::load(&tmpdir.path().join("config.toml"), false);
        assert!(matches!(r, Err(ConfigError::Read(_))));
    }

    #[test]
    fn full_config() {
        let tmpdir = TempDir::new().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(
            &path,
            concat!(
                "[game]\n",
                "difficulty = \"nightmare\"\n",
                "grid-size = 20\n",
                "\n",
                "[files]\n",
                "high-score-file = \"/var/games/snake.json\"\n",
                "save-high-score = true\n",
                "log-file = \"/tmp/gridsnake.log\"\n",
            ),
        )
        .unwrap();
        let cfg = Config::load(&path, false).unwrap();
        assert_eq!(
            cfg,
            Config {
                game: GameConfig {
                    difficulty: Difficulty::Nightmare,
                    grid: Grid::new(20).unwrap(),
                },
                files: FileConfig {
                    high_score_file: Some(PathBuf::from("/var/games/snake.json")),
                    save_high_score: true,
                    log_file: Some(PathBuf::from("/tmp/gridsnake.log")),
                },
            }
        );
    }

    #[test]
    fn partial_config() {
        let cfg = toml::from_str::<Config>("[game]\ngrid-size = 5\n").unwrap();
        assert_eq!(cfg.game.grid, Grid::new(5).unwrap());
        assert_eq!(cfg.game.difficulty, Difficulty::Medium);
        assert_eq!(cfg.files, FileConfig::default());
    }

    #[test]
    fn bad_grid_size() {
        let tmpdir = TempDir::new().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[game]\ngrid-size = 45\n").unwrap();
        let r = Config::load(&path, false);
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn bad_difficulty() {
        let r = toml::from_str::<Config>("[game]\ndifficulty = \"extreme\"\n");
        assert!(r.is_err());
    }

    #[test]
    fn unsaved_high_score_stays_in_memory() {
        let tmpdir = TempDir::new().unwrap();
        let path = tmpdir.path().join("highscore.json");
        let files = FileConfig {
            high_score_file: Some(path.clone()),
            save_high_score: false,
            log_file: None,
        };
        let mut store = files.high_score_store();
        store.set(consts::HIGH_SCORE_KEY, "17".into()).unwrap();
        assert_eq!(
            store.get(consts::HIGH_SCORE_KEY).unwrap().as_deref(),
            Some("17")
        );
        assert!(!path.exists());
    }

    #[test]
    fn saved_high_score_goes_to_file() {
        let tmpdir = TempDir::new().unwrap();
        let path = tmpdir.path().join("data").join("highscore.json");
        let files = FileConfig {
            high_score_file: Some(path.clone()),
            ..FileConfig::default()
        };
        let mut store = files.high_score_store();
        store.set(consts::HIGH_SCORE_KEY, "23".into()).unwrap();
        assert!(path.exists());
        let reopened = files.high_score_store();
        assert_eq!(
            reopened.get(consts::HIGH_SCORE_KEY).unwrap().as_deref(),
            Some("23")
        );
    }
}
