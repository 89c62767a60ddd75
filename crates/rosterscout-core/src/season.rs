// Season aggregation: career averages, latest-season snapshots, team composites.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::error::ScoutError;
use crate::stats::{round3, KeyMetrics, Metric, PlayerId, PlayerSeasons, SeasonRecord};

/// Per-player career averages for a roster, restricted to players with at
/// least one qualifying season.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterAggregate {
    pub players: BTreeMap<PlayerId, KeyMetrics>,
    pub total_players: usize,
}

impl RosterAggregate {
    pub fn averages(&self) -> Vec<KeyMetrics> {
        self.players.values().copied().collect()
    }
}

// ---------------------------------------------------------------------------
// Year ordering
// ---------------------------------------------------------------------------

/// Seasons sorted by year, most recent first. Keys that are not a numeric
/// year are dropped.
pub fn seasons_by_year_desc(seasons: &PlayerSeasons) -> Vec<(u16, &SeasonRecord)> {
    let mut ordered: Vec<(u16, &SeasonRecord)> = seasons
        .iter()
        .filter_map(|(key, record)| match key.trim().parse::<u16>() {
            Ok(year) => Some((year, record)),
            Err(_) => {
                debug!("ignoring non-year season key '{}'", key);
                None
            }
        })
        .collect();
    ordered.sort_by(|a, b| b.0.cmp(&a.0));
    ordered
}

fn latest_qualifying(seasons: &PlayerSeasons) -> Option<&SeasonRecord> {
    seasons_by_year_desc(seasons)
        .into_iter()
        .map(|(_, record)| record)
        .find(|record| record.qualifies())
}

// ---------------------------------------------------------------------------
// Per-player reductions
// ---------------------------------------------------------------------------

/// Average each key metric over qualifying year seasons, rounded to 3 decimals.
///
/// Returns `None` when no season has plate appearances; callers treat that
/// as "exclude this player", not as an error.
pub fn average_seasons(seasons: &PlayerSeasons) -> Option<KeyMetrics> {
    let qualifying: Vec<KeyMetrics> = seasons_by_year_desc(seasons)
        .into_iter()
        .map(|(_, record)| record)
        .filter(|record| record.qualifies())
        .map(SeasonRecord::key_metrics)
        .collect();
    if qualifying.is_empty() {
        return None;
    }
    let n = qualifying.len() as f64;
    Some(KeyMetrics::from_fn(|m| {
        round3(qualifying.iter().map(|km| km.get(m)).sum::<f64>() / n)
    }))
}

/// Key metrics from the most recent qualifying season.
///
/// Falls back to the most recent season of any kind when none qualify.
/// Returns `None` only when there are no seasons at all.
pub fn latest_snapshot(seasons: &PlayerSeasons) -> Option<KeyMetrics> {
    let ordered = seasons_by_year_desc(seasons);
    ordered
        .iter()
        .find(|(_, record)| record.qualifies())
        .or_else(|| ordered.first())
        .map(|(_, record)| record.key_metrics())
}

/// WAR from the most recent qualifying season.
pub fn latest_war(seasons: &PlayerSeasons) -> Option<f64> {
    latest_qualifying(seasons).map(|record| record.war)
}

// ---------------------------------------------------------------------------
// Roster-level reductions
// ---------------------------------------------------------------------------

/// Career averages for every player with at least one qualifying season.
pub fn aggregate_roster(players: &HashMap<PlayerId, PlayerSeasons>) -> RosterAggregate {
    let players: BTreeMap<PlayerId, KeyMetrics> = players
        .iter()
        .filter_map(|(&id, seasons)| average_seasons(seasons).map(|avg| (id, avg)))
        .collect();
    RosterAggregate {
        total_players: players.len(),
        players,
    }
}

/// Unweighted mean of each key metric across the given player averages.
///
/// Entries carrying a non-finite metric are skipped. Fails when nothing
/// usable remains.
pub fn team_composite(averages: &[KeyMetrics]) -> Result<KeyMetrics, ScoutError> {
    if averages.is_empty() {
        return Err(ScoutError::invalid("no player averages to combine"));
    }
    let usable: Vec<&KeyMetrics> = averages
        .iter()
        .filter(|km| {
            let ok = km.is_finite();
            if !ok {
                warn!("skipping player average with non-finite metric: {:?}", km);
            }
            ok
        })
        .collect();
    if usable.is_empty() {
        return Err(ScoutError::invalid("no usable player averages to combine"));
    }
    let n = usable.len() as f64;
    Ok(KeyMetrics::from_fn(|m: Metric| {
        usable.iter().map(|km| km.get(m)).sum::<f64>() / n
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
