use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_xlsxwriter::Format;

use crate::{SheetData, Workbook, WorkbookError, WorkbookReader, WorkbookWriter, HEADER};

const COLUMN_WIDTH: f64 = 60.0;

/// Writes `.xlsx` files.
#[derive(Debug, Clone, Default)]
pub struct XlsxWriter {
    /// Fixed row height for data rows. `None` leaves the height to the
    /// spreadsheet application, which LibreOffice Calc does not always honour.
    pub line_height: Option<f64>,
}

impl XlsxWriter {
    pub fn new(line_height: Option<f64>) -> Self {
        Self { line_height }
    }
}

impl WorkbookWriter for XlsxWriter {
    fn extension(&self) -> &str {
        crate::DEFAULT_EXTENSION
    }

    fn write(&self, path: &Path, sheets: &[SheetData]) -> Result<(), WorkbookError> {
        let err = |source| WorkbookError::Write {
            path: path.display().to_string(),
            source,
        };

        let mut book = rust_xlsxwriter::Workbook::new();
        let bold = Format::new().set_bold();
        let wrap = Format::new().set_text_wrap();

        for (idx, sheet) in sheets.iter().enumerate() {
            let ws = book.add_worksheet();
            ws.set_name(&sheet.name).map_err(err)?;
            ws.set_column_width(0, COLUMN_WIDTH).map_err(err)?;
            ws.set_column_width(1, COLUMN_WIDTH).map_err(err)?;
            ws.write_string_with_format(0, 0, HEADER[0], &bold)
                .map_err(err)?;
            ws.write_string_with_format(0, 1, HEADER[1], &bold)
                .map_err(err)?;

            for (i, (source, translation)) in sheet.rows.iter().enumerate() {
                let row = i as u32 + 1;
                ws.write_string_with_format(row, 0, source, &wrap)
                    .map_err(err)?;
                // Column B stays absent for untranslated messages.
                if !translation.is_empty() {
                    ws.write_string_with_format(row, 1, translation, &wrap)
                        .map_err(err)?;
                }
                if let Some(height) = self.line_height {
                    ws.set_row_height(row, height).map_err(err)?;
                }
            }

            if idx == 0 {
                ws.set_active(true);
            }
        }

        book.save(path).map_err(err)?;
        Ok(())
    }
}

/// Opens any spreadsheet format calamine understands (xlsx, xlsm, xls, ods).
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxReader;

struct LoadedWorkbook {
    sheets: Vec<(String, Range<Data>)>,
}

impl WorkbookReader for XlsxReader {
    fn open(&self, path: &Path) -> Result<Box<dyn Workbook>, WorkbookError> {
        let mut wb = open_workbook_auto(path).map_err(|source| WorkbookError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let mut sheets = Vec::new();
        for name in wb.sheet_names() {
            let range = wb
                .worksheet_range(&name)
                .map_err(|source| WorkbookError::Sheet {
                    path: path.display().to_string(),
                    sheet: name.clone(),
                    source,
                })?;
            sheets.push((name, range));
        }
        Ok(Box::new(LoadedWorkbook { sheets }))
    }
}

impl Workbook for LoadedWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(n, _)| n.clone()).collect()
    }

    fn cell(&self, sheet: &str, row: u32, column: u32) -> Option<String> {
        if row == 0 || column == 0 {
            return None;
        }
        let (_, range) = self.sheets.iter().find(|(n, _)| n == sheet)?;
        match range.get_value((row - 1, column - 1))? {
            Data::Empty => None,
            value => Some(cell_text(value)),
        }
    }
}

fn cell_text(value: &Data) -> String {
    match value {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        other => other.to_string(),
    }
}
