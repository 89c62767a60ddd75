// League-relative weakness vector, adjustment score and value score.
//
// All three work from the same directional convention: strikeout rate is
// lower-is-better, the other key metrics are higher-is-better.

use serde::Serialize;

use crate::error::ScoutError;
use crate::stats::{round3, KeyMetrics, Metric};

/// Denominator used by the weakness vector when a league std dev is zero,
/// so a zero-variance metric contributes negligible weakness.
pub const ZERO_VARIANCE_DENOMINATOR: f64 = 1e6;

/// Signed, weakness-weighted comparison of one player against the league.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdjustmentResult {
    pub total: f64,
    pub contributions: KeyMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueScoreResult {
    pub latest_war: f64,
    pub adjustment_score: f64,
    pub value_score: f64,
    pub contributions: KeyMetrics,
}

/// Shortfall of `value` against `league` in the metric's unfavourable
/// direction, never negative.
fn shortfall(metric: Metric, value: f64, league: f64) -> f64 {
    let raw = if metric.lower_is_better() {
        value - league
    } else {
        league - value
    };
    raw.max(0.0)
}

/// Signed difference of `value` against `league`, positive when better.
fn advantage(metric: Metric, value: f64, league: f64) -> f64 {
    if metric.lower_is_better() {
        league - value
    } else {
        value - league
    }
}

/// Per-metric shortfall of the team against the league, normalized by the
/// league standard deviation and rounded to 3 decimals.
///
/// Every component is `>= 0`; `0` means the team meets or beats the league on
/// that metric. A std dev that is not positive falls back to
/// [`ZERO_VARIANCE_DENOMINATOR`].
pub fn team_weakness_vector(
    team: &KeyMetrics,
    league_average: &KeyMetrics,
    league_std_dev: &KeyMetrics,
) -> KeyMetrics {
    KeyMetrics::from_fn(|m| {
        let raw = shortfall(m, team.get(m), league_average.get(m));
        let sd = league_std_dev.get(m);
        let denom = if sd > 0.0 { sd } else { ZERO_VARIANCE_DENOMINATOR };
        round3(raw / denom)
    })
}

/// Weakness-weighted, std-dev-normalized sum of the player's advantage over
/// the league on each metric.
///
/// `contribution = advantage / std_dev * |team_weakness|`. Unlike
/// [`team_weakness_vector`] there is no zero-variance fallback: a zero std dev
/// is reported as [`ScoutError::ZeroStdDev`].
pub fn adjustment_sum(
    player: &KeyMetrics,
    league_average: &KeyMetrics,
    league_std_dev: &KeyMetrics,
    team_weakness: &KeyMetrics,
) -> Result<AdjustmentResult, ScoutError> {
    if let Some(metric) = Metric::ALL.into_iter().find(|&m| league_std_dev.get(m) == 0.0) {
        return Err(ScoutError::ZeroStdDev { metric });
    }

    let contributions = KeyMetrics::from_fn(|m| {
        let diff = advantage(m, player.get(m), league_average.get(m));
        diff / league_std_dev.get(m) * team_weakness.get(m).abs()
    });

    Ok(AdjustmentResult {
        total: contributions.total(),
        contributions,
    })
}

/// Latest WAR plus the player's adjustment score.
///
/// A missing WAR means the player has no qualifying season and cannot be
/// scored. A missing snapshot is scored as all-zero metrics.
pub fn value_score(
    latest_war: Option<f64>,
    latest: Option<&KeyMetrics>,
    league_average: &KeyMetrics,
    league_std_dev: &KeyMetrics,
    team_weakness: &KeyMetrics,
) -> Result<ValueScoreResult, ScoutError> {
    let latest_war = latest_war
        .ok_or_else(|| ScoutError::invalid("player has no qualifying season to score"))?;
    let player = latest.copied().unwrap_or(KeyMetrics::ZERO);

    let adjustment = adjustment_sum(&player, league_average, league_std_dev, team_weakness)?;

    Ok(ValueScoreResult {
        latest_war,
        adjustment_score: adjustment.total,
        value_score: round3(latest_war + adjustment.total),
        contributions: adjustment.contributions,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
