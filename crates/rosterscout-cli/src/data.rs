// Player and league baseline loading from JSON data files.
//
// players.json: array of player profiles (id, name, position/positions,
// image_url, seasons keyed by year).
// baseline.json: { "average": {...}, "std_dev": {...} } keyed by metric name.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use rosterscout_core::position::PlayerProfile;
use rosterscout_core::{InMemorySource, LeagueBaseline};
use tracing::{info, warn};

use crate::config::{Config, DataPaths};

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Reader-based loaders (enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerProfile>, serde_json::Error> {
    serde_json::from_reader(rdr)
}

fn load_baseline_from_reader<R: Read>(rdr: R) -> Result<LeagueBaseline, serde_json::Error> {
    serde_json::from_reader(rdr)
}

fn open(path: &Path) -> Result<std::fs::File, DataError> {
    std::fs::File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_players(players: &[PlayerProfile]) -> Result<(), DataError> {
    let mut seen = HashSet::new();
    for p in players {
        if p.id == 0 {
            return Err(DataError::Validation(format!(
                "player '{}' has id 0; ids must be positive",
                p.name
            )));
        }
        if !seen.insert(p.id) {
            warn!("duplicate player id {} ('{}'); lookups use the first entry", p.id, p.name);
        }
    }
    Ok(())
}

fn validate_baseline(baseline: &LeagueBaseline) -> Result<(), DataError> {
    if !baseline.average.is_finite() || !baseline.std_dev.is_finite() {
        return Err(DataError::Validation(
            "league baseline contains a non-finite value".into(),
        ));
    }
    if let Some((metric, sd)) = baseline.std_dev.iter().find(|(_, sd)| *sd < 0.0) {
        return Err(DataError::Validation(format!(
            "league std dev for {} is negative ({})",
            metric, sd
        )));
    }
    for metric in baseline.degenerate_metrics() {
        warn!(
            "league std dev for {} is zero; value scoring and recommendations will fail",
            metric
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn load_players(path: &Path) -> Result<Vec<PlayerProfile>, DataError> {
    let players = load_players_from_reader(open(path)?).map_err(|e| DataError::Json {
        path: path.display().to_string(),
        source: e,
    })?;
    validate_players(&players)?;
    Ok(players)
}

pub fn load_baseline(path: &Path) -> Result<LeagueBaseline, DataError> {
    let baseline = load_baseline_from_reader(open(path)?).map_err(|e| DataError::Json {
        path: path.display().to_string(),
        source: e,
    })?;
    validate_baseline(&baseline)?;
    Ok(baseline)
}

/// Load both data files named by `paths` into a ready data source.
pub fn load_source(base_dir: &Path, paths: &DataPaths) -> Result<InMemorySource, DataError> {
    let players = load_players(&paths.players_path(base_dir))?;
    let baseline = load_baseline(&paths.baseline_path(base_dir))?;
    info!("Loaded {} players and league baseline", players.len());
    Ok(InMemorySource::new(players, baseline))
}

/// Convenience wrapper over [`load_source`] for an assembled config.
pub fn load_all(base_dir: &Path, config: &Config) -> Result<InMemorySource, DataError> {
    load_source(base_dir, &config.data_paths)
}
