// Data access seam: the lookups the engine consumes but does not implement.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::position::PlayerProfile;
use crate::stats::{LeagueBaseline, PlayerId, PlayerSeasons};

/// Season, baseline and player metadata lookups.
///
/// Implementations own any caching, retry or timeout policy; the engine treats
/// every call as a plain read.
#[async_trait]
pub trait PlayerDataSource: Send + Sync {
    /// Season histories for the requested ids. Unknown ids are simply absent.
    async fn season_histories(
        &self,
        ids: &[PlayerId],
    ) -> anyhow::Result<HashMap<PlayerId, PlayerSeasons>>;

    /// Current league mean and standard deviation per key metric.
    async fn league_baseline(&self) -> anyhow::Result<LeagueBaseline>;

    /// Display metadata for one player, `None` when unknown.
    async fn player(&self, id: PlayerId) -> anyhow::Result<Option<PlayerProfile>>;

    /// Every player that may be considered as a replacement.
    async fn player_pool(&self) -> anyhow::Result<Vec<PlayerProfile>>;
}

/// A fully loaded, read-only data source.
///
/// Season histories are served from the profiles' own `seasons` maps. Players
/// with an empty history are reported as missing by `season_histories`.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    players: Vec<PlayerProfile>,
    index: HashMap<PlayerId, usize>,
    baseline: LeagueBaseline,
}

impl InMemorySource {
    /// Build a source from a player list and baseline. When an id appears
    /// more than once, lookups by id return the first occurrence while the
    /// pool keeps every entry.
    pub fn new(players: Vec<PlayerProfile>, baseline: LeagueBaseline) -> Self {
        let mut index = HashMap::with_capacity(players.len());
        for (i, p) in players.iter().enumerate() {
            index.entry(p.id).or_insert(i);
        }
        Self {
            players,
            index,
            baseline,
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    fn profile(&self, id: PlayerId) -> Option<&PlayerProfile> {
        self.index.get(&id).map(|&i| &self.players[i])
    }
}

#[async_trait]
impl PlayerDataSource for InMemorySource {
    async fn season_histories(
        &self,
        ids: &[PlayerId],
    ) -> anyhow::Result<HashMap<PlayerId, PlayerSeasons>> {
        Ok(ids
            .iter()
            .filter_map(|&id| self.profile(id))
            .filter(|p| !p.seasons.is_empty())
            .map(|p| (p.id, p.seasons.clone()))
            .collect())
    }

    async fn league_baseline(&self) -> anyhow::Result<LeagueBaseline> {
        Ok(self.baseline)
    }

    async fn player(&self, id: PlayerId) -> anyhow::Result<Option<PlayerProfile>> {
        Ok(self.profile(id).cloned())
    }

    async fn player_pool(&self) -> anyhow::Result<Vec<PlayerProfile>> {
        Ok(self.players.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SeasonRecord;

    fn profile(id: PlayerId, with_seasons: bool) -> PlayerProfile {
        let mut p = PlayerProfile {
            id,
            name: format!("Player {id}"),
            ..PlayerProfile::default()
        };
        if with_seasons {
            p.seasons.insert("2023".into(), SeasonRecord::default());
        }
        p
    }

    #[tokio::test]
    async fn missing_and_empty_histories_are_absent() {
        let source = InMemorySource::new(
            vec![profile(1, true), profile(2, false)],
            LeagueBaseline::default(),
        );
        let histories = source.season_histories(&[1, 2, 3]).await.unwrap();
        assert_eq!(histories.len(), 1);
        assert!(histories.contains_key(&1));
    }

    #[tokio::test]
    async fn duplicate_ids_resolve_to_first_entry() {
        let mut second = profile(5, true);
        second.name = "Shadow".into();
        let source = InMemorySource::new(vec![profile(5, true), second], LeagueBaseline::default());
        assert_eq!(source.len(), 2);
        let p = source.player(5).await.unwrap().unwrap();
        assert_eq!(p.name, "Player 5");
        assert_eq!(source.player_pool().await.unwrap().len(), 2);
        assert!(source.player(6).await.unwrap().is_none());
    }
}
