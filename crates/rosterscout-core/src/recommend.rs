// Replacement recommendations.
//
// Pipeline for one request:
// 1. Validate roster size
// 2. Compute the roster's weakness vector against the league baseline
// 3. Find the roster player with the lowest adjustment score
// 4. Resolve that player's position
// 5. Collect same-position candidates from the player pool
// 6. Simulate swapping each candidate in and recompute total weakness
// 7. Rank by weakness reduction, keep the top N
// 8. Attach display metadata

use std::collections::{HashMap, HashSet};

use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ScoutError;
use crate::position::{resolve_position, same_position, years_active};
use crate::season::{
    aggregate_roster, average_seasons, latest_snapshot, latest_war, team_composite,
};
use crate::source::PlayerDataSource;
use crate::stats::{round3, KeyMetrics, LeagueBaseline, PlayerId, PlayerSeasons};
use crate::weakness::{self, adjustment_sum, team_weakness_vector, ValueScoreResult};

// ---------------------------------------------------------------------------
// Settings and output types
// ---------------------------------------------------------------------------

/// Tunables for the recommendation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendSettings {
    /// Smallest roster accepted (a fielded lineup).
    pub min_roster_size: usize,
    pub max_recommendations: usize,
    /// Upper bound on concurrent candidate season lookups.
    pub candidate_concurrency: usize,
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            min_roster_size: 9,
            max_recommendations: 5,
            candidate_concurrency: 8,
        }
    }
}

/// One suggested replacement, ranked by `score` (weakness reduction).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: PlayerId,
    pub name: String,
    pub score: f64,
    pub image_url: Option<String>,
    pub years_active: String,
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Weakness vector of a set of season histories against a baseline.
pub fn roster_weakness(
    histories: &HashMap<PlayerId, PlayerSeasons>,
    baseline: &LeagueBaseline,
) -> Result<KeyMetrics, ScoutError> {
    let aggregate = aggregate_roster(histories);
    let composite = team_composite(&aggregate.averages())?;
    Ok(team_weakness_vector(&composite, &baseline.average, &baseline.std_dev))
}

/// Sort by improvement descending, then id ascending, and keep `limit`.
pub fn rank_improvements(mut scored: Vec<(PlayerId, f64)>, limit: usize) -> Vec<(PlayerId, f64)> {
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scored.truncate(limit);
    scored
}

/// Ids in first-seen order with duplicates removed.
fn unique_ids(ids: impl IntoIterator<Item = PlayerId>) -> Vec<PlayerId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Entry points for weakness, value and recommendation requests.
///
/// Holds no request state; the data source is injected at construction and
/// every call reads through it.
pub struct ScoutService<S> {
    source: S,
    settings: RecommendSettings,
}

impl<S: PlayerDataSource> ScoutService<S> {
    pub fn new(source: S, settings: RecommendSettings) -> Self {
        Self { source, settings }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn settings(&self) -> &RecommendSettings {
        &self.settings
    }

    /// Weakness vector for the given roster.
    pub async fn team_weakness_scores(
        &self,
        player_ids: &[PlayerId],
    ) -> Result<KeyMetrics, ScoutError> {
        if player_ids.is_empty() {
            return Err(ScoutError::invalid("roster is empty"));
        }
        let histories = self.source.season_histories(player_ids).await?;
        let baseline = self.source.league_baseline().await?;
        let weakness = roster_weakness(&histories, &baseline)?;
        debug!(
            "weakness for {} ids ({} with data): total {:.3}",
            player_ids.len(),
            histories.len(),
            weakness.total()
        );
        Ok(weakness)
    }

    /// Latest-season value score for one player against a team weakness vector.
    pub async fn value_score(
        &self,
        player_id: PlayerId,
        team_weakness: &KeyMetrics,
    ) -> Result<ValueScoreResult, ScoutError> {
        let mut histories = self.source.season_histories(&[player_id]).await?;
        let seasons = histories
            .remove(&player_id)
            .ok_or_else(|| ScoutError::missing_seasons(player_id))?;
        let baseline = self.source.league_baseline().await?;

        weakness::value_score(
            latest_war(&seasons),
            latest_snapshot(&seasons).as_ref(),
            &baseline.average,
            &baseline.std_dev,
            team_weakness,
        )
    }

    /// Rank same-position replacements for the roster's weakest contributor.
    pub async fn recommend_players(
        &self,
        player_ids: &[PlayerId],
    ) -> Result<Vec<Recommendation>, ScoutError> {
        // ---- 1. Validate ----
        if player_ids.len() < self.settings.min_roster_size {
            return Err(ScoutError::invalid(format!(
                "roster needs at least {} players, got {}",
                self.settings.min_roster_size,
                player_ids.len()
            )));
        }
        let roster = unique_ids(player_ids.iter().copied());
        info!("recommending replacements for a {}-player roster", roster.len());

        // ---- 2. Current weakness ----
        let histories = self.source.season_histories(&roster).await?;
        if let Some(&missing) = roster.iter().find(|id| !histories.contains_key(*id)) {
            return Err(ScoutError::missing_seasons(missing));
        }
        let baseline = self.source.league_baseline().await?;
        let original = roster_weakness(&histories, &baseline)?;
        let original_total = original.total();
        debug!("original weakness total {:.3}", original_total);

        // ---- 3. Weakest contributor ----
        let mut weakest: Option<(PlayerId, f64)> = None;
        for &id in &roster {
            let snapshot = histories
                .get(&id)
                .and_then(latest_snapshot)
                .ok_or_else(|| ScoutError::missing_seasons(id))?;
            let adj = adjustment_sum(&snapshot, &baseline.average, &baseline.std_dev, &original)?;
            if weakest.map_or(true, |(_, lowest)| adj.total < lowest) {
                weakest = Some((id, adj.total));
            }
        }
        let Some((weak_id, weak_score)) = weakest else {
            return Err(ScoutError::invalid("roster is empty"));
        };
        info!("weakest contributor: player {} (adjustment {:.3})", weak_id, weak_score);

        // ---- 4. Position ----
        let position = self
            .source
            .player(weak_id)
            .await?
            .as_ref()
            .and_then(resolve_position)
            .ok_or_else(|| {
                ScoutError::invalid(format!("could not resolve position for player {weak_id}"))
            })?;

        // ---- 5. Candidates ----
        let roster_set: HashSet<PlayerId> = roster.iter().copied().collect();
        let pool = self.source.player_pool().await?;
        let candidates = unique_ids(
            pool.iter()
                .filter(|p| !roster_set.contains(&p.id))
                .filter(|p| resolve_position(p).is_some_and(|pos| same_position(&pos, &position)))
                .map(|p| p.id),
        );
        if candidates.is_empty() {
            info!("no candidates found at position {}", position);
            return Ok(Vec::new());
        }
        debug!("{} candidates at position {}", candidates.len(), position);

        // ---- 6. Simulate ----
        let mut remaining = histories;
        remaining.remove(&weak_id);
        let base_averages = aggregate_roster(&remaining).averages();

        let cache = self.fetch_candidate_seasons(&candidates).await;
        let mut scored: Vec<(PlayerId, f64)> = Vec::with_capacity(candidates.len());
        for &cand in &candidates {
            let Some(Some(seasons)) = cache.get(&cand) else {
                debug!("skipping candidate {}: no season data", cand);
                continue;
            };
            let mut averages = base_averages.clone();
            if let Some(avg) = average_seasons(seasons) {
                averages.push(avg);
            }
            let composite = match team_composite(&averages) {
                Ok(c) => c,
                Err(e) => {
                    debug!("skipping candidate {}: {}", cand, e);
                    continue;
                }
            };
            let candidate_total =
                team_weakness_vector(&composite, &baseline.average, &baseline.std_dev).total();
            scored.push((cand, original_total - candidate_total));
        }

        // ---- 7. Rank ----
        let top = rank_improvements(scored, self.settings.max_recommendations);

        // ---- 8. Materialize ----
        let mut results = Vec::with_capacity(top.len());
        for (id, improvement) in top {
            match self.source.player(id).await {
                Ok(Some(profile)) => results.push(Recommendation {
                    id,
                    name: profile.name,
                    score: round3(improvement),
                    image_url: profile.image_url,
                    years_active: years_active(&profile.seasons),
                }),
                Ok(None) => warn!("skipping candidate {}: metadata not found", id),
                Err(e) => warn!("skipping candidate {}: metadata lookup failed: {}", id, e),
            }
        }
        info!("returning {} recommendations", results.len());
        Ok(results)
    }

    /// Fetch each candidate's seasons once, with bounded concurrency.
    /// Lookup failures and missing histories are both cached as `None`.
    async fn fetch_candidate_seasons(
        &self,
        candidates: &[PlayerId],
    ) -> HashMap<PlayerId, Option<PlayerSeasons>> {
        let source = &self.source;
        stream::iter(candidates.iter().copied())
            .map(|id| async move {
                match source.season_histories(&[id]).await {
                    Ok(mut found) => (id, found.remove(&id)),
                    Err(e) => {
                        warn!("season lookup failed for candidate {}: {}", id, e);
                        (id, None)
                    }
                }
            })
            .buffer_unordered(self.settings.candidate_concurrency.max(1))
            .collect()
            .await
    }
}
