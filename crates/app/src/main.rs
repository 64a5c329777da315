use std::process::ExitCode;

use clap::Parser;
use patterns_core::model::ProblemId;
use services::{AppServices, Clock};
use storage::Storage;
use storage::catalog::parse_catalog;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod render;

use cli::{Cli, Command};

const BUNDLED_CATALOG: &str = include_str!("../assets/catalog.json");

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_services(cli: &Cli) -> Result<AppServices, Box<dyn std::error::Error>> {
    let data_dir = cli.data_dir.clone().unwrap_or_else(cli::default_data_dir);
    debug!(data_dir = %data_dir.display(), "using progress storage");
    let storage = Storage::file(data_dir);

    let clock = cli.today.map_or_else(Clock::default_clock, Clock::fixed_on);

    let services = match &cli.catalog {
        Some(path) => AppServices::from_catalog_file(path, &storage, clock)?,
        None => AppServices::new(parse_catalog(BUNDLED_CATALOG)?, &storage, clock),
    };
    Ok(services)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = build_services(&cli)?;

    match cli.command.unwrap_or(Command::Status) {
        Command::Status => print!("{}", render::status(&app.dashboard())),
        Command::Patterns => print!("{}", render::sections(&app.sections(), &app)),
        Command::Pattern { id } => {
            let (pattern, progress) = app
                .pattern(&id)
                .ok_or_else(|| format!("unknown pattern: {id}"))?;
            print!("{}", render::pattern(pattern, &progress, &app));
        }
        Command::Toggle { problem } => {
            let problem = ProblemId::new(problem);
            if app.catalog().problem(problem.as_str()).is_none() {
                debug!(problem = %problem, "problem is not in the catalog; tracking anyway");
            }
            let outcome = app.progress_mut().toggle_completion(problem.clone());
            print!(
                "{}",
                render::toggled(&problem, outcome, app.progress().streak())
            );
        }
        Command::Hint { problem, level } => {
            let unlocked = match level {
                Some(level) => app.unlock_hint_to(&problem, level)?,
                None => app.unlock_next_hint(&problem)?,
            };
            println!("{problem}: hints unlocked up to level {unlocked}");
        }
        Command::Ask { pattern, question } => {
            let question = question.join(" ");
            let question = (!question.trim().is_empty()).then_some(question.as_str());
            println!("{}", app.ask_tutor(&pattern, question)?);
        }
    }

    if !app.progress().is_persisted() {
        eprintln!("warning: progress could not be saved; changes are kept for this run only");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use patterns_core::streak::StreakStatus;

    fn cli(data_dir: &std::path::Path, today: &str, args: &[&str]) -> Cli {
        let data_dir = data_dir.to_str().unwrap();
        let mut argv = vec!["algo-patterns", "--data-dir", data_dir, "--today", today];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn bundled_catalog_is_valid() {
        let catalog = parse_catalog(BUNDLED_CATALOG).unwrap();
        assert!(catalog.total_problems() > 0);
        assert!(catalog.patterns().iter().all(|p| !p.problems.is_empty()));
    }

    #[test]
    fn commands_persist_between_runs() {
        let dir = tempfile::tempdir().unwrap();

        run(cli(dir.path(), "2024-05-01", &["toggle", "sw-1"])).unwrap();
        run(cli(dir.path(), "2024-05-01", &["hint", "sw-1"])).unwrap();
        run(cli(dir.path(), "2024-05-02", &["toggle", "sw-2"])).unwrap();

        let app = build_services(&cli(dir.path(), "2024-05-02", &["status"])).unwrap();
        assert!(app.progress().is_completed("sw-1"));
        assert!(app.progress().is_completed("sw-2"));
        assert_eq!(app.progress().unlocked_level("sw-1"), 1);
        assert_eq!(app.progress().streak(), 2);
        assert_eq!(app.dashboard().streak_status, StreakStatus::PracticedToday);
    }

    #[test]
    fn hint_level_is_capped_by_the_catalog() {
        let dir = tempfile::tempdir().unwrap();

        assert!(run(cli(dir.path(), "2024-05-01", &["hint", "sw-1", "--level", "99"])).is_err());
        run(cli(dir.path(), "2024-05-01", &["hint", "sw-1", "--level", "2"])).unwrap();

        let app = build_services(&cli(dir.path(), "2024-05-01", &["status"])).unwrap();
        let catalog = app.catalog();
        let (_, problem) = catalog.problem("sw-1").unwrap();
        assert_eq!(problem.max_hint_level(), 3);
        assert_eq!(app.progress().unlocked_level("sw-1"), 2);
    }

    #[test]
    fn unknown_pattern_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(cli(dir.path(), "2024-05-01", &["pattern", "nope"])).is_err());
    }
}
