use std::path::PathBuf;

use color_eyre::eyre::eyre;
use sheetloc_core::Mode;
use sheetloc_workbook::XlsxWriter;

use crate::reporter::ConsoleReporter;
use crate::SelectionArgs;

pub fn run_export(
    config: PathBuf,
    out_dir: PathBuf,
    mode: Option<Mode>,
    selection: SelectionArgs,
    line_height: Option<f64>,
    format: String,
    quiet: bool,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "export_args", config = ?config, out_dir = ?out_dir, mode = ?mode, selection = ?selection, line_height = ?line_height, format = %format);

    let defaults = sheetloc_config::load_config()?;
    let export_cfg = defaults.export.unwrap_or_default();
    let mode = mode.or(export_cfg.mode).unwrap_or(Mode::New);
    let writer = XlsxWriter::new(line_height.or(export_cfg.line_height));
    if writer.line_height.is_some_and(|h| h <= 0.0) {
        return Err(eyre!("--line-height must be positive"));
    }

    let cfg = sheetloc_config::load_run_config(&config, &out_dir)?;
    let selector = super::selector(selection, defaults.selection);
    let mut reporter = ConsoleReporter::new(quiet);
    let summary =
        sheetloc_services::export_workbooks(&cfg, &selector, mode, &out_dir, &writer, &mut reporter)?;

    if format == "json" {
        serde_json::to_writer(std::io::stdout().lock(), &summary)?;
        println!();
    } else if summary.workbooks.is_empty() {
        ui_out!("No workbooks written.");
    } else {
        for wb in &summary.workbooks {
            let rows: usize = wb.sheets.iter().map(|s| s.rows).sum();
            ui_out!("{}\t{} sheet(s)\t{} row(s)", wb.path, wb.sheets.len(), rows);
        }
        ui_out!(
            "Exported {} row(s) into {} workbook(s) ({} mode).",
            summary.rows,
            summary.workbooks.len(),
            summary.mode
        );
    }
    Ok(())
}
