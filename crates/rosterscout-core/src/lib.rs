// Library root: roster evaluation and replacement recommendation engine.
//
// Layers, each depending only on the ones above it in this list:
// - stats: key metrics, season records, league baseline
// - season: career averages and latest-season snapshots
// - weakness: team weakness vector, adjustment and value scores
// - recommend: weakest-contributor search and candidate ranking

pub mod error;
pub mod position;
pub mod recommend;
pub mod season;
pub mod source;
pub mod stats;
pub mod weakness;

pub use error::ScoutError;
pub use recommend::{Recommendation, RecommendSettings, ScoutService};
pub use source::{InMemorySource, PlayerDataSource};
pub use stats::{KeyMetrics, LeagueBaseline, Metric, PlayerId, PlayerSeasons, SeasonRecord};
