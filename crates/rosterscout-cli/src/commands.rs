// Command dispatch: runs one CLI command against the scouting service and
// renders the result as JSON.

use rosterscout_core::{PlayerDataSource, ScoutError, ScoutService};
use serde_json::Value;
use tracing::info;

use crate::cli::Command;

/// Execute `command` and return its JSON result.
pub async fn execute<S: PlayerDataSource>(
    service: &ScoutService<S>,
    command: &Command,
) -> Result<Value, ScoutError> {
    match command {
        Command::Weakness { ids } => {
            let weakness = service.team_weakness_scores(ids).await?;
            info!("weakness total {:.3} for {} ids", weakness.total(), ids.len());
            Ok(serde_json::json!({
                "weakness": weakness,
                "total": weakness.total(),
            }))
        }
        Command::Value { id, roster } => {
            let weakness = service.team_weakness_scores(roster).await?;
            let score = service.value_score(*id, &weakness).await?;
            Ok(serde_json::json!({
                "player_id": id,
                "team_weakness": weakness,
                "score": score,
            }))
        }
        Command::Recommend { ids } => {
            let recs = service.recommend_players(ids).await?;
            Ok(serde_json::json!({ "recommendations": recs }))
        }
    }
}

/// Short label for each error kind, used as the CLI error prefix.
pub fn error_kind(err: &ScoutError) -> &'static str {
    match err {
        ScoutError::InputValidation(_) => "invalid request",
        ScoutError::Query { .. } => "missing data",
        ScoutError::ZeroStdDev { .. } => "degenerate league baseline",
        ScoutError::DataSource(_) => "data source failure",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterscout_core::position::PlayerProfile;
    use rosterscout_core::{InMemorySource, KeyMetrics, LeagueBaseline, RecommendSettings, SeasonRecord};

    fn baseline() -> LeagueBaseline {
        LeagueBaseline {
            average: KeyMetrics::from_fn(|_| 0.2),
            std_dev: KeyMetrics::from_fn(|_| 0.05),
        }
    }

    fn player(id: u32, k: f64) -> PlayerProfile {
        let mut p = PlayerProfile {
            id,
            name: format!("P{id}"),
            position: Some("C".into()),
            ..PlayerProfile::default()
        };
        p.seasons.insert(
            "2023".into(),
            SeasonRecord {
                plate_appearances: 300,
                strikeout_rate: k,
                walk_rate: 0.2,
                isolated_power: 0.2,
                on_base_percentage: 0.2,
                base_running: 0.2,
                war: 1.0,
                ..SeasonRecord::default()
            },
        );
        p
    }

    fn service() -> ScoutService<InMemorySource> {
        let players = vec![player(1, 0.25), player(2, 0.2)];
        ScoutService::new(InMemorySource::new(players, baseline()), RecommendSettings::default())
    }

    #[tokio::test]
    async fn weakness_command_reports_vector_and_total() {
        let out = execute(&service(), &Command::Weakness { ids: vec![1, 2] })
            .await
            .unwrap();
        // composite K = 0.225 -> (0.225 - 0.2) / 0.05 = 0.5
        assert_eq!(out["weakness"]["strikeout_rate"], 0.5);
        assert_eq!(out["total"], 0.5);
    }

    #[tokio::test]
    async fn value_command_embeds_score() {
        let out = execute(&service(), &Command::Value { id: 2, roster: vec![1, 2] })
            .await
            .unwrap();
        assert_eq!(out["player_id"], 2);
        assert_eq!(out["score"]["latest_war"], 1.0);
    }

    #[tokio::test]
    async fn short_roster_maps_to_invalid_request() {
        let err = execute(&service(), &Command::Recommend { ids: vec![1, 2] })
            .await
            .unwrap_err();
        assert_eq!(error_kind(&err), "invalid request");
    }
}
