//! Export, import and merge flows over catalogs and workbooks.
//! Nothing here prints; progress goes through a [`Reporter`].

use std::path::Path;

use sheetloc_config::RunConfig;
use sheetloc_domain::ImportSummary;
use sheetloc_workbook::WorkbookReader;

pub mod export;
pub mod import;
pub mod merge;
pub mod report;
pub mod selector;

pub use export::{build_export_set, export_workbooks, write_export_set};
pub use import::build_import_set;
pub use merge::{merge_catalog, merge_import_set, MergeOptions, MergeOutcome};
pub use report::{CollectingReporter, Event, NullReporter, Reporter};
pub use selector::{Filter, Selector};
pub use sheetloc_core::Result;

/// Read the workbooks in `in_dir` and merge them into the catalogs of `cfg`.
pub fn import_workbooks(
    cfg: &RunConfig,
    in_dir: &Path,
    extension: &str,
    selector: &Selector,
    reader: &dyn WorkbookReader,
    opts: MergeOptions,
    reporter: &mut dyn Reporter,
) -> Result<ImportSummary> {
    let import = build_import_set(in_dir, extension, selector, reader, reporter)?;
    tracing::info!(event = "import_set_built", languages = import.len(), in_dir = %in_dir.display());
    merge_import_set(&import, cfg, opts, reporter)
}
