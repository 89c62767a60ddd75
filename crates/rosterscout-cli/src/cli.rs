// Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rosterscout_core::PlayerId;

/// Roster weakness scoring and replacement recommendations
#[derive(Parser, Debug)]
#[command(name = "rosterscout")]
#[command(version, about = "Roster weakness scoring and replacement recommendations")]
pub struct Cli {
    /// Directory holding config/, defaults/ and the data files
    #[arg(long, global = true, env = "ROSTERSCOUT_HOME")]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Per-metric weakness of a roster against the league
    Weakness {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<PlayerId>,
    },

    /// Value score of one player against a roster's weakness
    Value {
        id: PlayerId,
        /// Roster whose weakness vector weights the score
        #[arg(long, required = true, num_args = 1..)]
        roster: Vec<PlayerId>,
    },

    /// Ranked replacements for the roster's weakest contributor
    Recommend {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<PlayerId>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recommend_ids() {
        let cli = Cli::try_parse_from(["rosterscout", "recommend", "1", "2", "3"]).unwrap();
        assert_eq!(cli.command, Command::Recommend { ids: vec![1, 2, 3] });
        assert!(cli.base_dir.is_none());
    }

    #[test]
    fn parses_value_with_roster() {
        let cli = Cli::try_parse_from([
            "rosterscout",
            "--base-dir",
            "/tmp/scout",
            "value",
            "7",
            "--roster",
            "1",
            "2",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Value {
                id: 7,
                roster: vec![1, 2]
            }
        );
        assert_eq!(cli.base_dir, Some(PathBuf::from("/tmp/scout")));
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(Cli::try_parse_from(["rosterscout", "weakness", "abc"]).is_err());
        assert!(Cli::try_parse_from(["rosterscout", "weakness"]).is_err());
    }
}
