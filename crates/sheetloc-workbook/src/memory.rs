use std::collections::BTreeMap;

use crate::{SheetData, Workbook, HEADER};

/// Workbook held entirely in memory. Cells are sparse, so "absent" and
/// "empty string" stay distinguishable.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, BTreeMap<(u32, u32), String>)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty sheet (or keep the existing one) and return `self` for chaining.
    pub fn sheet(mut self, name: &str) -> Self {
        self.sheet_mut(name);
        self
    }

    /// Set one cell at a 1-based position, creating the sheet if needed.
    pub fn set(mut self, sheet: &str, row: u32, column: u32, value: &str) -> Self {
        self.sheet_mut(sheet)
            .insert((row, column), value.to_string());
        self
    }

    /// Lay out sheets exactly as the xlsx writer does: header row, then one
    /// row per entry with column B left absent for empty translations.
    pub fn from_sheets(sheets: &[SheetData]) -> Self {
        let mut wb = Self::new();
        for sheet in sheets {
            let cells = wb.sheet_mut(&sheet.name);
            cells.insert((1, 1), HEADER[0].to_string());
            cells.insert((1, 2), HEADER[1].to_string());
            for (i, (source, translation)) in sheet.rows.iter().enumerate() {
                let row = i as u32 + 2;
                cells.insert((row, 1), source.clone());
                if !translation.is_empty() {
                    cells.insert((row, 2), translation.clone());
                }
            }
        }
        wb
    }

    fn sheet_mut(&mut self, name: &str) -> &mut BTreeMap<(u32, u32), String> {
        let idx = match self.sheets.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.sheets.push((name.to_string(), BTreeMap::new()));
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[idx].1
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(n, _)| n.clone()).collect()
    }

    fn cell(&self, sheet: &str, row: u32, column: u32) -> Option<String> {
        self.sheets
            .iter()
            .find(|(n, _)| n == sheet)
            .and_then(|(_, cells)| cells.get(&(row, column)).cloned())
    }
}
