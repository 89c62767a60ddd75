// Player metadata and position resolution.
//
// Player stores record position in several shapes: a plain `position` field,
// a `positions` list of strings or structured entries, or only per-season.
// `resolve_position` folds all of them into one normalized tag.

use serde::{Deserialize, Serialize};

use crate::season::seasons_by_year_desc;
use crate::stats::{PlayerId, PlayerSeasons};

/// One entry of a player's `positions` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionEntry {
    Tag(String),
    Detailed {
        #[serde(default)]
        position: Option<String>,
        #[serde(default)]
        abbreviation: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl PositionEntry {
    fn tag(&self) -> Option<&str> {
        match self {
            PositionEntry::Tag(tag) => Some(tag.as_str()),
            PositionEntry::Detailed {
                position,
                abbreviation,
                name,
            } => position
                .as_deref()
                .or(abbreviation.as_deref())
                .or(name.as_deref()),
        }
    }
}

/// Display metadata and season history for one player.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<PositionEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub seasons: PlayerSeasons,
}

/// Trim and uppercase a position tag. Blank tags normalize to `None`.
pub fn normalize_position(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Resolve a player's position, in priority order: the explicit `position`
/// field, the first usable `positions` entry, then the position recorded on
/// the most recent season that has one.
pub fn resolve_position(profile: &PlayerProfile) -> Option<String> {
    if let Some(pos) = profile.position.as_deref().and_then(normalize_position) {
        return Some(pos);
    }

    if let Some(pos) = profile
        .positions
        .iter()
        .filter_map(PositionEntry::tag)
        .find_map(normalize_position)
    {
        return Some(pos);
    }

    seasons_by_year_desc(&profile.seasons)
        .into_iter()
        .find_map(|(_, season)| season.position.as_deref().and_then(normalize_position))
}

/// Case-insensitive exact comparison of two position tags.
pub fn same_position(a: &str, b: &str) -> bool {
    match (normalize_position(a), normalize_position(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Format the span of season years as "2020-2023", "2023", or "Unknown".
pub fn years_active(seasons: &PlayerSeasons) -> String {
    let ordered = seasons_by_year_desc(seasons);
    match (ordered.last(), ordered.first()) {
        (Some((first, _)), Some((last, _))) if first == last => first.to_string(),
        (Some((first, _)), Some((last, _))) => format!("{first}-{last}"),
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SeasonRecord;

    fn season_at(position: Option<&str>) -> SeasonRecord {
        SeasonRecord {
            plate_appearances: 100,
            position: position.map(str::to_string),
            ..SeasonRecord::default()
        }
    }

    fn make_profile() -> PlayerProfile {
        PlayerProfile {
            id: 7,
            name: "Test Player".into(),
            ..PlayerProfile::default()
        }
    }

    #[test]
    fn explicit_field_wins() {
        let profile = PlayerProfile {
            position: Some(" ss ".into()),
            positions: vec![PositionEntry::Tag("2B".into())],
            ..make_profile()
        };
        assert_eq!(resolve_position(&profile).as_deref(), Some("SS"));
    }

    #[test]
    fn blank_field_falls_through_to_list() {
        let profile = PlayerProfile {
            position: Some("   ".into()),
            positions: vec![PositionEntry::Tag("cf".into())],
            ..make_profile()
        };
        assert_eq!(resolve_position(&profile).as_deref(), Some("CF"));
    }

    #[test]
    fn structured_entries_are_parsed() {
        let json = r#"{
            "id": 3,
            "name": "Structured",
            "positions": [{"abbreviation": "1B", "name": "First Base"}, "DH"]
        }"#;
        let profile: PlayerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(resolve_position(&profile).as_deref(), Some("1B"));
    }

    #[test]
    fn falls_back_to_most_recent_season_position() {
        let mut profile = make_profile();
        profile.seasons.insert("2021".into(), season_at(Some("LF")));
        profile.seasons.insert("2023".into(), season_at(Some("rf")));
        profile.seasons.insert("2024".into(), season_at(None));
        assert_eq!(resolve_position(&profile).as_deref(), Some("RF"));
    }

    #[test]
    fn unresolvable_position_is_none() {
        let mut profile = make_profile();
        profile.seasons.insert("2023".into(), season_at(None));
        assert!(resolve_position(&profile).is_none());
    }

    #[test]
    fn position_match_ignores_case_but_not_content() {
        assert!(same_position("ss", "SS"));
        assert!(!same_position("SS", "2B"));
        assert!(!same_position("", ""));
    }

    #[test]
    fn years_active_formats() {
        let mut seasons = PlayerSeasons::new();
        assert_eq!(years_active(&seasons), "Unknown");
        seasons.insert("2023".into(), SeasonRecord::default());
        assert_eq!(years_active(&seasons), "2023");
        seasons.insert("2020".into(), SeasonRecord::default());
        assert_eq!(years_active(&seasons), "2020-2023");
    }
}
