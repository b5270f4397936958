//! `subtrans update` - carry translations over to a new resource set.

use std::path::{Path, PathBuf};

use subtrans_backstory::reader::{load_resource_dir, load_translations};
use subtrans_backstory::{plan_update, UpdateReport};

use crate::exit_codes::EXIT_UPDATE_UNTRANSLATED;
use crate::{load_match_config, CliError};

pub struct UpdateArgs {
    pub resources: PathBuf,
    pub resources_prev: Option<PathBuf>,
    pub translated: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub report: Option<PathBuf>,
    pub tsv: Option<PathBuf>,
    pub strict: bool,
}

pub fn cmd_update(args: UpdateArgs) -> Result<(), CliError> {
    let config = load_match_config(args.config.as_ref())?;
    let resolver = config.resolver()?;
    let threshold = config.threshold()?;

    let translations = load_translations(&args.translated)?;
    let current = load_resource_dir(&args.resources)?;
    let previous = match &args.resources_prev {
        Some(dir) => Some(load_resource_dir(dir)?),
        None => None,
    };

    if current.is_empty() {
        log::warn!("no backstories found in {}", args.resources.display());
    }

    let plan = plan_update(current, previous, translations, &resolver, threshold);

    std::fs::write(&args.output, &plan.document)
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", args.output.display())))?;
    eprintln!("wrote {}", args.output.display());

    let report = &plan.report;
    if args.json || args.report.is_some() {
        let json_str = serde_json::to_string_pretty(report)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = args.report {
            std::fs::write(path, &json_str)
                .map_err(|e| CliError::io(format!("cannot write report: {e}")))?;
            eprintln!("wrote {}", path.display());
        }
        if args.json {
            println!("{json_str}");
        }
    }

    if let Some(ref path) = args.tsv {
        write_tsv(path, report)?;
        eprintln!("wrote {}", path.display());
    }

    print_summary(report);

    if args.strict && report.todo > 0 {
        return Err(CliError::new(
            EXIT_UPDATE_UNTRANSLATED,
            format!("{} entries left untranslated", report.todo),
        )
        .with_hint("search the output for TODO"));
    }

    Ok(())
}

fn print_summary(report: &UpdateReport) {
    eprintln!(
        "{} backstories: {} translated, {} todo, {} unused translations",
        report.total,
        report.translated,
        report.todo,
        report.unused_translations.len(),
    );
    if let Some(ref migration) = report.migration {
        let s = &migration.summary;
        eprintln!(
            "matching: {} identity, {} structural, {} fuzzy, {} unmatched, {} previous left over",
            s.identity, s.structural, s.fuzzy, s.unmatched, s.leftover_previous,
        );
    }
}

fn write_tsv(path: &Path, report: &UpdateReport) -> Result<(), CliError> {
    let tsv_err = |e: csv::Error| CliError::io(format!("TSV write error: {e}"));

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(tsv_err)?;

    writer
        .write_record(["id", "status", "previous_id", "tier", "distance", "hint"])
        .map_err(tsv_err)?;

    for entry in &report.entries {
        writer
            .write_record([
                entry.id.clone(),
                entry.status.to_string(),
                entry.previous_id.clone().unwrap_or_default(),
                entry.tier.map(|t| t.to_string()).unwrap_or_default(),
                entry.distance.map(|d| format!("{d:.4}")).unwrap_or_default(),
                entry.hint.clone(),
            ])
            .map_err(tsv_err)?;
    }

    writer
        .flush()
        .map_err(|e| CliError::io(format!("TSV write error: {e}")))
}
