use std::path::PathBuf;

use sheetloc_core::Mode;
use sheetloc_domain::{CatalogStatus, ImportSummary};
use sheetloc_services::MergeOptions;
use sheetloc_workbook::{XlsxReader, DEFAULT_EXTENSION};

use crate::reporter::ConsoleReporter;
use crate::SelectionArgs;

pub struct ImportParams {
    pub config: PathBuf,
    pub in_dir: PathBuf,
    pub extension: Option<String>,
    pub mode: Option<Mode>,
    pub selection: SelectionArgs,
    pub dry_run: bool,
    pub backup: bool,
    pub format: String,
    pub quiet: bool,
}

pub fn run_import(p: ImportParams) -> color_eyre::Result<()> {
    tracing::debug!(event = "import_args", config = ?p.config, in_dir = ?p.in_dir, extension = ?p.extension, mode = ?p.mode, dry_run = p.dry_run, backup = p.backup, format = %p.format);

    let defaults = sheetloc_config::load_config()?;
    let import_cfg = defaults.import.unwrap_or_default();
    let mode = p.mode.or(import_cfg.mode).unwrap_or(Mode::All);
    let extension = p
        .extension
        .or(import_cfg.extension)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    let extension = extension.trim_start_matches('.').to_string();
    let opts = MergeOptions {
        dry_run: p.dry_run,
        backup: p.backup || import_cfg.backup.unwrap_or(false),
        ..MergeOptions::for_mode(mode)
    };

    let cfg = sheetloc_config::load_run_config(&p.config, &p.in_dir)?;
    let selector = super::selector(p.selection, defaults.selection);
    let mut reporter = ConsoleReporter::new(p.quiet);
    let summary = sheetloc_services::import_workbooks(
        &cfg,
        &p.in_dir,
        &extension,
        &selector,
        &XlsxReader,
        opts,
        &mut reporter,
    )?;

    if p.format == "json" {
        serde_json::to_writer(std::io::stdout().lock(), &summary)?;
        println!();
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &ImportSummary) {
    for f in &summary.files {
        let status = match f.status {
            CatalogStatus::Updated => "updated",
            CatalogStatus::Unchanged => "unchanged",
            CatalogStatus::Missing => "missing",
            CatalogStatus::Planned => "planned",
            CatalogStatus::Failed => "failed",
        };
        ui_out!("{}\t{status}\t{} key(s)", f.path, f.updated.len());
    }
    let prefix = if summary.dry_run { "DRY-RUN: " } else { "" };
    ui_out!(
        "{prefix}{} updated, {} unchanged, {} missing, {} failed; {} key(s) ({} mode).",
        summary.updated,
        summary.unchanged,
        summary.missing,
        summary.failed,
        summary.keys,
        summary.mode
    );
}
