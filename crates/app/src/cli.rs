use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "algo-patterns", version, about = "Practice algorithm patterns and track your streak")]
pub struct Cli {
    /// Directory holding saved progress
    #[arg(long, env = "PATTERNS_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Catalog JSON file (defaults to the bundled catalog)
    #[arg(long, env = "PATTERNS_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Pretend today is this UTC date (YYYY-MM-DD)
    #[arg(long, env = "PATTERNS_TODAY", global = true, hide = true)]
    pub today: Option<NaiveDate>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Overall completion and streak (default)
    Status,
    /// All patterns grouped by difficulty
    Patterns,
    /// Problems and hints of one pattern
    Pattern { id: String },
    /// Mark a problem done, or not done if it already is
    Toggle { problem: String },
    /// Unlock the next hint of a problem, or up to an explicit level
    Hint {
        problem: String,
        #[arg(long)]
        level: Option<u32>,
    },
    /// Ask the tutor about a pattern
    Ask {
        pattern: String,
        question: Vec<String>,
    },
}

/// Default data directory: the platform's local data dir, or `./.algo-patterns`.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("algo-patterns"))
        .unwrap_or_else(|| PathBuf::from(".algo-patterns"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hint_with_level() {
        let cli = Cli::try_parse_from(["algo-patterns", "hint", "sw-1", "--level", "2"]).unwrap();
        match cli.command {
            Some(Command::Hint { problem, level }) => {
                assert_eq!(problem, "sw-1");
                assert_eq!(level, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_multiword_question_and_global_flags() {
        let cli = Cli::try_parse_from([
            "algo-patterns",
            "ask",
            "subsets",
            "why",
            "copy?",
            "--today",
            "2024-05-02",
            "--data-dir",
            "/tmp/p",
        ])
        .unwrap();
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2024, 5, 2));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/p")));
        match cli.command {
            Some(Command::Ask { pattern, question }) => {
                assert_eq!(pattern, "subsets");
                assert_eq!(question.join(" "), "why copy?");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["algo-patterns"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn rejects_bad_date() {
        assert!(Cli::try_parse_from(["algo-patterns", "--today", "tomorrow"]).is_err());
    }
}
