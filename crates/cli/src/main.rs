// subtrans CLI - carries backstory translations across resource versions

mod config_cmd;
mod distance;
mod exit_codes;
mod logging;
mod update;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use subtrans_backstory::BackstoryError;
use subtrans_matching::{MatchConfig, MatchError};

use config_cmd::ConfigCommands;
use exit_codes::{EXIT_ERROR, EXIT_INVALID_CONFIG, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE, EXIT_XML};

#[derive(Parser)]
#[command(name = "subtrans")]
#[command(about = "Approximate record matching for backstory translation updates")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug); SUBTRANS_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a translation file for a new resource set, reusing existing translations
    #[command(after_help = "\
Examples:
  subtrans update --resources res-1.1 --translated Backstories.xml --output Backstories-new.xml
  subtrans update --resources res-1.1 --resources-prev res-1.0 \\
      --translated Backstories.xml --output Backstories-new.xml --report report.json
  subtrans update --resources res-1.1 --translated Backstories.xml --output out.xml --strict")]
    Update {
        /// Directory with the current resource XML files
        #[arg(long, short = 'r')]
        resources: PathBuf,

        /// Directory with the previous resource XML files; enables matching
        #[arg(long, short = 'p')]
        resources_prev: Option<PathBuf>,

        /// Existing translation file
        #[arg(long, short = 't')]
        translated: PathBuf,

        /// Where to write the new translation file
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Matching config (match.toml)
        #[arg(long, env = "SUBTRANS_CONFIG")]
        config: Option<PathBuf>,

        /// Print the JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Write a tab-separated per-entry report
        #[arg(long)]
        tsv: Option<PathBuf>,

        /// Exit 6 if any entry is left untranslated
        #[arg(long)]
        strict: bool,
    },

    /// Print the weighted edit distance between two strings
    #[command(after_help = "\
Examples:
  subtrans distance kitten sitting
  subtrans distance kitten sitting --bounded 2
  subtrans distance 'a red fox' 'a red fax' --normalized
  subtrans distance abc abd --substitution 2 --json")]
    Distance {
        a: String,
        b: String,

        /// Banded distance; results above N are reported as N
        #[arg(long, value_name = "N", conflicts_with_all = ["normalized", "normalized_bounded"])]
        bounded: Option<usize>,

        /// Distance divided by the shorter length
        #[arg(long, conflicts_with = "normalized_bounded")]
        normalized: bool,

        /// Banded normalized distance, clamped to F
        #[arg(long, value_name = "F")]
        normalized_bounded: Option<f64>,

        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        insertion: i64,

        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        deletion: i64,

        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        substitution: i64,

        /// JSON output
        #[arg(long)]
        json: bool,
    },

    /// Inspect matching configs
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("SUBTRANS_REVISION"), ")",
        "\nengine:  subtrans-matching ", env!("CARGO_PKG_VERSION"),
        "\nbuild:   ", env!("SUBTRANS_BUILD_PROFILE"),
        "\ntarget:  ", env!("SUBTRANS_TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        None => {
            eprintln!("Usage: subtrans <command> [options]");
            eprintln!("       subtrans --help for more information");
            Ok(())
        }
        Some(Commands::Update {
            resources,
            resources_prev,
            translated,
            output,
            config,
            json,
            report,
            tsv,
            strict,
        }) => update::cmd_update(update::UpdateArgs {
            resources,
            resources_prev,
            translated,
            output,
            config,
            json,
            report,
            tsv,
            strict,
        }),
        Some(Commands::Distance {
            a,
            b,
            bounded,
            normalized,
            normalized_bounded,
            insertion,
            deletion,
            substitution,
            json,
        }) => distance::cmd_distance(
            &a,
            &b,
            distance::DistanceKind::from_flags(bounded, normalized, normalized_bounded),
            (insertion, deletion, substitution),
            json,
        ),
        Some(Commands::Config(cmd)) => config_cmd::cmd_config(cmd),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_IO, msg)
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<BackstoryError> for CliError {
    fn from(err: BackstoryError) -> Self {
        let code = match err {
            BackstoryError::Io(_) => EXIT_IO,
            BackstoryError::Xml { .. }
            | BackstoryError::MissingElement { .. }
            | BackstoryError::InvalidSlot(_)
            | BackstoryError::UnknownFormat { .. } => EXIT_XML,
        };
        let hint = match &err {
            BackstoryError::UnknownFormat { .. } => {
                Some("translation files must have a <BackstoryTranslations> root".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}

impl From<MatchError> for CliError {
    fn from(err: MatchError) -> Self {
        Self::new(EXIT_INVALID_CONFIG, err.to_string())
    }
}

/// Read and validate a matching config; defaults when no path is given.
pub fn load_match_config(path: Option<&PathBuf>) -> Result<MatchConfig, CliError> {
    let Some(path) = path else {
        return Ok(MatchConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
    MatchConfig::from_toml(&text).map_err(|e| {
        CliError::from(e).with_hint(format!("check {}", path.display()))
    })
}
