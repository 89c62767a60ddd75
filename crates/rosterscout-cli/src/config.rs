// Configuration loading and parsing (config/scout.toml).

use std::path::{Path, PathBuf};

use rosterscout_core::RecommendSettings;
use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "scout.toml";

#[derive(Debug, Clone)]
pub struct Config {
    pub recommend: RecommendSettings,
    pub data_paths: DataPaths,
    pub logging: LoggingConfig,
}

/// Raw deserialization target for scout.toml.
#[derive(Debug, Clone, Deserialize)]
struct ScoutFile {
    #[serde(default)]
    recommend: RecommendSettings,
    data: DataPaths,
    #[serde(default)]
    logging: LoggingConfig,
}

/// Data file locations, relative to the base directory unless absolute.
#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub players: String,
    pub baseline: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "rosterscout=info,rosterscout_cli=info,rosterscout_core=info,warn".into(),
            file_name: "rosterscout.log".into(),
        }
    }
}

impl DataPaths {
    pub fn players_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.players)
    }

    pub fn baseline_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.baseline)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/scout.toml` relative to `base_dir`.
///
/// Does not copy defaults; see [`load_config`].
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: ScoutFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        recommend: file.recommend,
        data_paths: file.data,
        logging: file.logging,
    };

    validate(&config)?;

    Ok(config)
}

/// Copy any config file missing from `config/` out of `defaults/`.
/// Returns the files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        if copy_if_absent(&path, &target)? {
            copied.push(target);
        }
    }

    Ok(copied)
}

/// Copy `src` to `target` unless `target` already exists. The existence
/// check and the create are a single `create_new` open.
fn copy_if_absent(src: &Path, target: &Path) -> Result<bool, ConfigError> {
    let copy_err = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", src.display(), target.display()),
    };

    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(copy_err(e)),
    };
    let mut source = std::fs::File::open(src).map_err(copy_err)?;
    std::io::copy(&mut source, &mut dest).map_err(copy_err)?;
    Ok(true)
}

/// Ensure defaults are in place, then load config relative to `base_dir`.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let r = &config.recommend;
    let positive: &[(&str, usize)] = &[
        ("recommend.min_roster_size", r.min_roster_size),
        ("recommend.max_recommendations", r.max_recommendations),
        ("recommend.candidate_concurrency", r.candidate_concurrency),
    ];
    for (name, val) in positive {
        if *val == 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must be > 0".into(),
            });
        }
    }

    let paths: &[(&str, &str)] = &[
        ("data.players", config.data_paths.players.as_str()),
        ("data.baseline", config.data_paths.baseline.as_str()),
    ];
    for (name, val) in paths {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
