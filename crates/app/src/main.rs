mod learner;

use std::fmt;
use std::path::{Path, PathBuf};

use learn_core::Clock;
use learn_core::model::{LessonSettings, StepCatalog, StepId};
use services::LessonController;
use tracing::info;
use tracing_subscriber::EnvFilter;

use learner::{ConsoleHost, ScriptedLearner, star_bar};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingCatalog,
    InvalidMissList { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingCatalog => {
                write!(f, "no catalog given (use --catalog or LESSON_CATALOG)")
            }
            ArgsError::InvalidMissList { raw } => write!(f, "invalid --miss value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- run      --catalog <path> [--miss <id,id>] [--no-review]");
    eprintln!("  cargo run -p app -- validate --catalog <path>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LESSON_CATALOG   default catalog path");
    eprintln!("  LESSON_LOG       log filter (default: info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Run,
    Validate,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "run" => Some(Self::Run),
            "validate" => Some(Self::Validate),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    catalog: PathBuf,
    misses: Vec<StepId>,
    review_missed_steps: bool,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env_catalog: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut catalog = env_catalog
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut misses = Vec::new();
        let mut review_missed_steps = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    catalog = Some(PathBuf::from(require_value(args, "--catalog")?));
                }
                "--miss" => {
                    let value = require_value(args, "--miss")?;
                    misses = parse_miss_list(&value)?;
                }
                "--no-review" => review_missed_steps = false,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            catalog: catalog.ok_or(ArgsError::MissingCatalog)?,
            misses,
            review_missed_steps,
        })
    }
}

fn parse_miss_list(raw: &str) -> Result<Vec<StepId>, ArgsError> {
    let ids: Vec<StepId> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(StepId::new)
        .collect();
    if ids.is_empty() {
        return Err(ArgsError::InvalidMissList {
            raw: raw.to_string(),
        });
    }
    Ok(ids)
}

fn init_logging() {
    let filter = std::env::var("LESSON_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: &Path) -> Result<StepCatalog, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(StepCatalog::from_json(&raw)?)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play the lesson when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Run,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Run,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, std::env::var("LESSON_CATALOG").ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let catalog = load_catalog(&parsed.catalog)?;
    info!(
        path = %parsed.catalog.display(),
        steps = catalog.len(),
        "catalog loaded"
    );

    match cmd {
        Command::Validate => {
            println!(
                "ok: {} steps, {} assessments",
                catalog.len(),
                catalog.assessment_count()
            );
            Ok(())
        }
        Command::Run => {
            let settings =
                LessonSettings::default().with_review_missed_steps(parsed.review_missed_steps);
            let mut controller =
                LessonController::new(catalog, settings, Clock::default(), ConsoleHost::default())?;
            ScriptedLearner::new(parsed.misses).play(&mut controller)?;

            if let Some(completion) = &controller.host().completion {
                println!(
                    "finished {}: {} ({} mistakes)",
                    completion.attempt_id,
                    star_bar(completion.stars),
                    completion.total_mistakes
                );
            }
            Ok(())
        }
    }
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
