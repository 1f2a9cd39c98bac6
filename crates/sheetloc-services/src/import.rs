use std::path::{Path, PathBuf};

use sheetloc_core::{Catalog, ImportSet, Result};
use sheetloc_workbook::{Workbook, WorkbookReader};
use walkdir::WalkDir;

use crate::report::{Event, Reporter};
use crate::selector::Selector;

/// `(language, path)` for every `*.<extension>` file directly in `dir`,
/// sorted by file name. The file stem is the language code.
pub fn discover_workbooks(dir: &Path, extension: &str) -> Vec<(String, PathBuf)> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == extension))
        .filter_map(|e| {
            let stem = e.path().file_stem()?.to_string_lossy().into_owned();
            Some((stem, e.into_path()))
        })
        .collect()
}

/// Read the translations of one sheet.
///
/// Row 1 is the header. Scanning stops at the first row whose source cell
/// (column A) is absent; an empty string there does not stop it. Rows whose
/// translation (column B) is blank after trimming are not recorded at all.
pub fn read_sheet(workbook: &dyn Workbook, sheet: &str) -> Catalog {
    let mut out = Catalog::new();
    let mut row = 2;
    while let Some(source) = workbook.cell(sheet, row, 1) {
        let translation = workbook.cell(sheet, row, 2).unwrap_or_default();
        if !translation.trim().is_empty() {
            out.insert(source, translation);
        }
        row += 1;
    }
    out
}

/// Add the selected sheets of one language's workbook to `import`.
pub fn collect_workbook(
    language: &str,
    workbook: &dyn Workbook,
    selector: &Selector,
    import: &mut ImportSet,
    reporter: &mut dyn Reporter,
) {
    for category in workbook.sheet_names() {
        if !selector.category_included(&category) {
            reporter.report(Event::CategorySkipped {
                language: language.to_string(),
                category,
            });
            continue;
        }
        let translations = read_sheet(workbook, &category);
        tracing::debug!(event = "import_sheet_read", language = %language, category = %category, translations = translations.len());
        if translations.is_empty() {
            continue;
        }
        import
            .entry(language.to_string())
            .or_default()
            .entry(category)
            .or_default()
            .extend(translations);
    }
}

/// Read every selected workbook in `dir` into an import set.
pub fn build_import_set(
    dir: &Path,
    extension: &str,
    selector: &Selector,
    reader: &dyn WorkbookReader,
    reporter: &mut dyn Reporter,
) -> Result<ImportSet> {
    let mut import = ImportSet::new();
    for (language, path) in discover_workbooks(dir, extension) {
        if !selector.language_included(&language) {
            reporter.report(Event::LanguageSkipped { language });
            continue;
        }
        let workbook = reader.open(&path)?;
        reporter.report(Event::WorkbookRead {
            language: language.clone(),
            path: path.clone(),
            sheets: workbook.sheet_names().len(),
        });
        collect_workbook(&language, workbook.as_ref(), selector, &mut import, reporter);
    }
    Ok(import)
}
