//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `keepsake_core` linkage with a deterministic ping.
//! - Optionally summarize one app's persisted collection.
//!
//! Usage: `keepsake [--log-dir <dir>] [<db_path> <app>]` where `<app>` is one
//! of `hair-care|purchases|places|reflections|gratitude|questions`. With
//! `--log-dir`, core events are written to rotating files in `<dir>`.

use keepsake_core::{
    open_kv, Category, GratitudeCategory, HairCareCategory, PlaceCategory, PurchaseCategory,
    QuestionCategory, RecordStore, ReflectionMood, SqliteKeyValueStore, StoreError,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "usage: keepsake [--log-dir <dir>] [<db_path> <app>]";

#[derive(Debug, PartialEq, Eq)]
struct CliArgs<'a> {
    log_dir: Option<&'a str>,
    summary: Option<(&'a str, &'a str)>,
}

fn parse_args(args: &[String]) -> Option<CliArgs<'_>> {
    let (log_dir, rest) = match args {
        [flag, dir, rest @ ..] if flag == "--log-dir" => (Some(dir.as_str()), rest),
        _ => (None, args),
    };
    let summary = match rest {
        [] => None,
        [db_path, app] if !db_path.starts_with("--") => Some((db_path.as_str(), app.as_str())),
        _ => return None,
    };
    Some(CliArgs { log_dir, summary })
}

fn main() -> ExitCode {
    println!("keepsake_core ping={}", keepsake_core::ping());
    println!("keepsake_core version={}", keepsake_core::core_version());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(cli) = parse_args(&args) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    if let Some(dir) = cli.log_dir {
        let dir = absolute_dir(Path::new(dir));
        let level = keepsake_core::default_log_level();
        match keepsake_core::init_logging(level, &dir.to_string_lossy()) {
            Ok(()) => println!("logging dir={}", dir.display()),
            Err(err) => eprintln!("warning: logging disabled: {err}"),
        }
    }

    let Some((db_path, app)) = cli.summary else {
        return ExitCode::SUCCESS;
    };

    match run(db_path, app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// `init_logging` only accepts absolute directories.
fn absolute_dir(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(dir))
        .unwrap_or_else(|_| dir.to_path_buf())
}

fn run(db_path: &str, app: &str) -> Result<(), Box<dyn Error>> {
    let storage = open_kv(db_path)?;
    match app {
        "hair-care" => summarize::<HairCareCategory>(storage)?,
        "purchases" => summarize::<PurchaseCategory>(storage)?,
        "places" => summarize::<PlaceCategory>(storage)?,
        "reflections" => summarize::<ReflectionMood>(storage)?,
        "gratitude" => summarize::<GratitudeCategory>(storage)?,
        "questions" => summarize::<QuestionCategory>(storage)?,
        other => return Err(format!("unknown app `{other}`").into()),
    }
    Ok(())
}

fn summarize<C: Category>(storage: SqliteKeyValueStore) -> Result<(), StoreError> {
    let store = RecordStore::<C, _>::open_default(storage)?;
    let stats = store.statistics_today();

    println!("key={}", store.config().storage_key);
    println!("total={} favorites={}", stats.total, stats.favorites);
    println!(
        "current_streak={} best_streak={}",
        stats.current_streak, stats.best_streak
    );
    for row in &stats.by_category {
        println!(
            "category={} count={} percent={:.1}",
            row.category.as_str(),
            row.count,
            row.percentage
        );
    }
    for item in stats.frequent_items() {
        println!("frequent name={:?} count={}", item.name, item.count);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{absolute_dir, parse_args, CliArgs};
    use std::path::Path;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn no_arguments_only_runs_smoke_check() {
        assert_eq!(
            parse_args(&[]),
            Some(CliArgs {
                log_dir: None,
                summary: None
            })
        );
    }

    #[test]
    fn log_dir_flag_precedes_summary_arguments() {
        let raw = args(&["--log-dir", "/tmp/keepsake-logs", "data.db", "places"]);
        assert_eq!(
            parse_args(&raw),
            Some(CliArgs {
                log_dir: Some("/tmp/keepsake-logs"),
                summary: Some(("data.db", "places")),
            })
        );
    }

    #[test]
    fn dangling_flag_or_extra_arguments_are_rejected() {
        assert_eq!(parse_args(&args(&["--log-dir"])), None);
        assert_eq!(parse_args(&args(&["data.db"])), None);
        assert_eq!(parse_args(&args(&["a", "b", "c"])), None);
        assert_eq!(parse_args(&args(&["--verbose", "places"])), None);
    }

    #[test]
    fn relative_log_dir_is_resolved_against_cwd() {
        assert!(absolute_dir(Path::new("logs")).is_absolute());
        assert_eq!(
            absolute_dir(Path::new("/var/log/keepsake")),
            Path::new("/var/log/keepsake")
        );
    }
}
