use std::collections::BTreeMap;
use std::path::Path;

use sheetloc_catalog::{list_categories, load_catalog};
use sheetloc_config::RunConfig;
use sheetloc_core::{persisted_order, Catalog, ExportSet, Mode, Result};
use sheetloc_domain::{ExportSummary, SheetStat, WorkbookStat, SCHEMA_VERSION};
use sheetloc_workbook::{SheetData, WorkbookWriter};

use crate::report::{Event, Reporter};
use crate::selector::Selector;

/// Collect catalog entries for every selected (language, category) pair.
///
/// A category appears in the result as soon as its catalog file is found and
/// selected, even when `mode` filters out every entry; it then becomes an
/// empty sheet. A catalog that cannot be loaded is reported and left out; the
/// other categories are still exported. The empty key is never exported.
pub fn build_export_set(
    cfg: &RunConfig,
    selector: &Selector,
    mode: Mode,
    reporter: &mut dyn Reporter,
) -> Result<ExportSet> {
    let mut export = ExportSet::new();
    for language in &cfg.languages {
        if !selector.language_included(language) {
            reporter.report(Event::LanguageSkipped {
                language: language.clone(),
            });
            continue;
        }
        for category in list_categories(&cfg.language_dir(language)) {
            if !selector.category_included(&category) {
                reporter.report(Event::CategorySkipped {
                    language: language.clone(),
                    category,
                });
                continue;
            }
            let path = cfg.catalog_path(language, &category);
            let mut catalog = match load_catalog(&path) {
                Ok(catalog) => catalog,
                Err(err) => {
                    tracing::error!(event = "catalog_failed", path = %path.display(), error = %err);
                    reporter.report(Event::CatalogFailed {
                        path,
                        error: err.to_string(),
                    });
                    continue;
                }
            };
            // A blank source cell reads back as absent and would end the sheet.
            if catalog.remove("").is_some() {
                tracing::warn!(event = "empty_key_skipped", language = %language, category = %category);
                reporter.report(Event::EmptyKeySkipped {
                    language: language.clone(),
                    category: category.clone(),
                });
            }
            let sheet = export
                .entry(language.clone())
                .or_default()
                .entry(category)
                .or_default();
            let before = sheet.len();
            sheet.extend(catalog.into_iter().filter(|(_, v)| mode.selects(v)));
            tracing::debug!(event = "export_catalog_read", path = %path.display(), selected = sheet.len() - before);
            reporter.report(Event::CatalogRead {
                entries: sheet.len() - before,
                path,
            });
        }
    }
    Ok(export)
}

/// Turn one language of an export set into sheets, in category order, rows in
/// persisted catalog order.
pub fn sheets_for(categories: &BTreeMap<String, Catalog>) -> Vec<SheetData> {
    categories
        .iter()
        .map(|(category, catalog)| SheetData {
            name: category.clone(),
            rows: persisted_order(catalog)
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
        .collect()
}

/// Write one workbook per language into `out_dir` as `<language>.<ext>`.
pub fn write_export_set(
    export: &ExportSet,
    out_dir: &Path,
    mode: Mode,
    writer: &dyn WorkbookWriter,
    reporter: &mut dyn Reporter,
) -> Result<ExportSummary> {
    let mut summary = ExportSummary {
        schema_version: SCHEMA_VERSION,
        mode: mode.to_string(),
        rows: 0,
        workbooks: Vec::new(),
    };
    for (language, categories) in export {
        let path = out_dir.join(format!("{language}.{}", writer.extension()));
        let sheets = sheets_for(categories);
        writer.write(&path, &sheets)?;
        tracing::info!(event = "workbook_written", language = %language, path = %path.display(), sheets = sheets.len());
        reporter.report(Event::WorkbookWritten {
            language: language.clone(),
            path: path.clone(),
            sheets: sheets.len(),
        });
        let stats: Vec<SheetStat> = sheets
            .iter()
            .map(|s| SheetStat {
                category: s.name.clone(),
                rows: s.rows.len(),
            })
            .collect();
        summary.rows += stats.iter().map(|s| s.rows).sum::<usize>();
        summary.workbooks.push(WorkbookStat {
            language: language.clone(),
            path: path.display().to_string(),
            sheets: stats,
        });
    }
    Ok(summary)
}

/// Full export run. An empty export set is a normal outcome: nothing is
/// written and the summary lists no workbooks.
pub fn export_workbooks(
    cfg: &RunConfig,
    selector: &Selector,
    mode: Mode,
    out_dir: &Path,
    writer: &dyn WorkbookWriter,
    reporter: &mut dyn Reporter,
) -> Result<ExportSummary> {
    let export = build_export_set(cfg, selector, mode, reporter)?;
    if export.is_empty() {
        reporter.report(Event::NothingToExport);
        return Ok(ExportSummary {
            schema_version: SCHEMA_VERSION,
            mode: mode.to_string(),
            rows: 0,
            workbooks: Vec::new(),
        });
    }
    write_export_set(&export, out_dir, mode, writer, reporter)
}
