use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use texlog::{Level, LogParser, ParseOptions};

#[derive(Parser)]
#[command(name = "texlog")]
#[command(about = "Extract errors, warnings and bad boxes from LaTeX logs", long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a TeX log file and emit the diagnostics as JSON
    Parse {
        /// Path to the .log file, or `-` for stdin
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// JSON options document, e.g. {"ignoreDuplicates": true}
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Collapse repeated (file, line, message) diagnostics
        #[arg(long)]
        ignore_duplicates: bool,

        /// Column at which the engine wrapped the log
        #[arg(long, value_name = "N", conflicts_with = "no_unwrap")]
        wrap_width: Option<usize>,

        /// Leave hard-wrapped lines as they are
        #[arg(long)]
        no_unwrap: bool,

        /// Only print diagnostics of this level
        #[arg(long, value_enum)]
        only: Option<LevelArg>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    Error,
    Warning,
    Typesetting,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Error => Level::Error,
            LevelArg::Warning => Level::Warning,
            LevelArg::Typesetting => Level::Typesetting,
        }
    }
}

fn read_log(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read log from stdin")?;
        return Ok(content);
    }
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    // Engines write logs in the input encoding; keep going on stray bytes.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn load_options(config: Option<&Path>) -> anyhow::Result<ParseOptions> {
    match config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ParseOptions::from_json(&json).with_context(|| format!("invalid options in {}", path.display()))
        }
        None => Ok(ParseOptions::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match &cli.command {
        Commands::Parse {
            path,
            config,
            ignore_duplicates,
            wrap_width,
            no_unwrap,
            only,
            compact,
        } => {
            let mut options = load_options(config.as_deref())?;
            if *ignore_duplicates {
                options.ignore_duplicates = true;
            }
            if *no_unwrap {
                options.wrap_width = None;
            } else if wrap_width.is_some() {
                options.wrap_width = *wrap_width;
            }
            options.validate()?;

            let content = read_log(path)?;
            let result = LogParser::with_options(options).parse(&content);
            log::info!(
                "{}: {} errors, {} warnings, {} typesetting",
                path.display(),
                result.errors.len(),
                result.warnings.len(),
                result.typesetting.len()
            );

            let json = match only {
                Some(level) => {
                    let records = result.by_level(Level::from(*level));
                    if *compact {
                        serde_json::to_string(records)?
                    } else {
                        serde_json::to_string_pretty(records)?
                    }
                }
                None if *compact => serde_json::to_string(&result)?,
                None => serde_json::to_string_pretty(&result)?,
            };
            println!("{}", json);
        }
    }
    Ok(())
}
