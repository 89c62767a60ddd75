// Key metrics, per-season records, and the league baseline they are scored against.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Player identifier as issued by the player store. Always positive.
pub type PlayerId = u32;

/// Season history keyed by four-digit year string ("2023").
pub type PlayerSeasons = BTreeMap<String, SeasonRecord>;

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// The five key metrics used throughout weakness and value scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    StrikeoutRate,
    WalkRate,
    IsolatedPower,
    OnBasePercentage,
    BaseRunning,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::StrikeoutRate,
        Metric::WalkRate,
        Metric::IsolatedPower,
        Metric::OnBasePercentage,
        Metric::BaseRunning,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::StrikeoutRate => "strikeout_rate",
            Metric::WalkRate => "walk_rate",
            Metric::IsolatedPower => "isolated_power",
            Metric::OnBasePercentage => "on_base_percentage",
            Metric::BaseRunning => "base_running",
        }
    }

    /// Strikeout rate is the only metric where a smaller number is better.
    pub fn lower_is_better(self) -> bool {
        matches!(self, Metric::StrikeoutRate)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// KeyMetrics
// ---------------------------------------------------------------------------

/// One value per key metric.
///
/// Used for career averages, latest-season snapshots, team composites, the
/// league baseline, weakness vectors and per-metric contributions alike, so
/// every per-metric map in a computation covers exactly the same five keys.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub strikeout_rate: f64,
    pub walk_rate: f64,
    pub isolated_power: f64,
    pub on_base_percentage: f64,
    pub base_running: f64,
}

impl KeyMetrics {
    pub const ZERO: KeyMetrics = KeyMetrics {
        strikeout_rate: 0.0,
        walk_rate: 0.0,
        isolated_power: 0.0,
        on_base_percentage: 0.0,
        base_running: 0.0,
    };

    /// Build a value by evaluating `f` once per metric.
    pub fn from_fn(mut f: impl FnMut(Metric) -> f64) -> Self {
        KeyMetrics {
            strikeout_rate: f(Metric::StrikeoutRate),
            walk_rate: f(Metric::WalkRate),
            isolated_power: f(Metric::IsolatedPower),
            on_base_percentage: f(Metric::OnBasePercentage),
            base_running: f(Metric::BaseRunning),
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::StrikeoutRate => self.strikeout_rate,
            Metric::WalkRate => self.walk_rate,
            Metric::IsolatedPower => self.isolated_power,
            Metric::OnBasePercentage => self.on_base_percentage,
            Metric::BaseRunning => self.base_running,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    /// Sum of all five components.
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }

    pub fn is_finite(&self) -> bool {
        self.iter().all(|(_, v)| v.is_finite())
    }

    pub fn rounded(&self) -> Self {
        KeyMetrics::from_fn(|m| round3(self.get(m)))
    }
}

/// Round to three decimal places (half away from zero).
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

// ---------------------------------------------------------------------------
// Season record
// ---------------------------------------------------------------------------

/// One player-season as supplied by the season store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonRecord {
    pub games: u32,
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub home_runs: u32,
    pub runs: u32,
    pub rbi: u32,
    pub stolen_bases: u32,
    pub strikeout_rate: f64,
    pub walk_rate: f64,
    pub isolated_power: f64,
    pub on_base_percentage: f64,
    pub base_running: f64,
    pub war: f64,
    /// Primary position recorded for this season, if the store tracks it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl SeasonRecord {
    /// A season counts toward averages and snapshots only with recorded PAs.
    pub fn qualifies(&self) -> bool {
        self.plate_appearances > 0
    }

    pub fn key_metrics(&self) -> KeyMetrics {
        KeyMetrics {
            strikeout_rate: self.strikeout_rate,
            walk_rate: self.walk_rate,
            isolated_power: self.isolated_power,
            on_base_percentage: self.on_base_percentage,
            base_running: self.base_running,
        }
    }
}

// ---------------------------------------------------------------------------
// League baseline
// ---------------------------------------------------------------------------

/// League-wide mean and standard deviation per key metric.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LeagueBaseline {
    pub average: KeyMetrics,
    pub std_dev: KeyMetrics,
}

impl LeagueBaseline {
    /// Metrics whose standard deviation is zero (or not finite).
    ///
    /// `adjustment_sum` refuses to divide by these, so a non-empty result means
    /// value scoring and recommendations will fail against this baseline.
    pub fn degenerate_metrics(&self) -> Vec<Metric> {
        self.std_dev
            .iter()
            .filter(|(_, sd)| *sd == 0.0 || !sd.is_finite())
            .map(|(m, _)| m)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_match_serde_keys() {
        let json = serde_json::to_value(KeyMetrics::ZERO).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), Metric::ALL.len());
        for m in Metric::ALL {
            assert!(obj.contains_key(m.name()), "missing key {}", m.name());
        }
    }

    #[test]
    fn from_fn_and_get_agree() {
        let km = KeyMetrics::from_fn(|m| m as usize as f64);
        for m in Metric::ALL {
            assert_eq!(km.get(m), m as usize as f64);
        }
        assert_eq!(km.total(), 0.0 + 1.0 + 2.0 + 3.0 + 4.0);
    }

    #[test]
    fn round3_half_away_from_zero() {
        assert_eq!(round3(0.2204), 0.22);
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(-1.23456), -1.235);
    }

    #[test]
    fn season_record_defaults_missing_fields() {
        let rec: SeasonRecord =
            serde_json::from_str(r#"{"plate_appearances": 10, "walk_rate": 0.1}"#).unwrap();
        assert!(rec.qualifies());
        assert_eq!(rec.walk_rate, 0.1);
        assert_eq!(rec.war, 0.0);
        assert!(rec.position.is_none());
    }

    #[test]
    fn degenerate_metrics_lists_zero_std_devs() {
        let baseline = LeagueBaseline {
            average: KeyMetrics::ZERO,
            std_dev: KeyMetrics {
                walk_rate: 0.0,
                ..KeyMetrics::from_fn(|_| 0.05)
            },
        };
        assert_eq!(baseline.degenerate_metrics(), vec![Metric::WalkRate]);
    }
}
