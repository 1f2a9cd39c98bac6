//! Workbook collaborators: how translation sheets get onto disk and back.
//!
//! The services layer only sees [`WorkbookWriter`], [`WorkbookReader`] and
//! [`Workbook`]; the xlsx implementations live in [`xlsx`] and an in-memory
//! workbook for tests and tooling in [`memory`].

use std::path::Path;

use thiserror::Error;

pub mod memory;
pub mod xlsx;

pub use memory::MemoryWorkbook;
pub use xlsx::{XlsxReader, XlsxWriter};

/// Default workbook file extension.
pub const DEFAULT_EXTENSION: &str = "xlsx";

/// Header row written above every sheet.
pub const HEADER: [&str; 2] = ["Source", "Translation"];

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("failed to write workbook {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
    #[error("failed to open workbook {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: calamine::Error,
    },
    #[error("failed to read sheet `{sheet}` of {path}: {source}")]
    Sheet {
        path: String,
        sheet: String,
        #[source]
        source: calamine::Error,
    },
}

/// One sheet to write: name plus (source, translation) rows below the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetData {
    pub name: String,
    pub rows: Vec<(String, String)>,
}

/// Materializes a workbook with one sheet per entry, in order.
pub trait WorkbookWriter {
    /// Extension of the files this writer produces, without the dot.
    fn extension(&self) -> &str;

    fn write(&self, path: &Path, sheets: &[SheetData]) -> Result<(), WorkbookError>;
}

/// Read access to an opened workbook.
pub trait Workbook {
    fn sheet_names(&self) -> Vec<String>;

    /// Cell text at a 1-based `(row, column)`; `None` when the cell is absent
    /// or the sheet does not exist.
    fn cell(&self, sheet: &str, row: u32, column: u32) -> Option<String>;
}

pub trait WorkbookReader {
    fn open(&self, path: &Path) -> Result<Box<dyn Workbook>, WorkbookError>;
}
