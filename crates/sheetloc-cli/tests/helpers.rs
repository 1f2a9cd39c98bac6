#![allow(dead_code)]

use assert_cmd::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

use sheetloc_core::Catalog;
use sheetloc_workbook::{SheetData, WorkbookWriter, XlsxWriter};
use tempfile::TempDir;

/// A scratch project: `sheetloc.config.toml`, `messages/<lang>/*.toml`, and
/// an empty `sheets/` directory for workbooks.
pub struct Project {
    pub tmp: TempDir,
    pub config: PathBuf,
    pub sheets: PathBuf,
}

impl Project {
    pub fn new(languages: &[&str]) -> Self {
        let tmp = tempfile::tempdir().unwrap();
        for lang in languages {
            std::fs::create_dir_all(tmp.path().join("messages").join(lang)).unwrap();
        }
        let sheets = tmp.path().join("sheets");
        std::fs::create_dir(&sheets).unwrap();
        let list = languages
            .iter()
            .map(|l| format!("\"{l}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let config = tmp.path().join("sheetloc.config.toml");
        std::fs::write(
            &config,
            format!("format = \"toml\"\nmessagePath = \"messages\"\nlanguages = [{list}]\n"),
        )
        .unwrap();
        Self {
            tmp,
            config,
            sheets,
        }
    }

    pub fn catalog_path(&self, language: &str, category: &str) -> PathBuf {
        self.tmp
            .path()
            .join("messages")
            .join(language)
            .join(format!("{category}.toml"))
    }

    pub fn catalog(&self, language: &str, category: &str, pairs: &[(&str, &str)]) -> PathBuf {
        let path = self.catalog_path(language, category);
        sheetloc_catalog::write_catalog(&path, &catalog(pairs)).unwrap();
        path
    }

    pub fn read_catalog(&self, language: &str, category: &str) -> Catalog {
        sheetloc_catalog::load_catalog(&self.catalog_path(language, category)).unwrap()
    }

    /// Write `sheets/<language>.xlsx` with one sheet per `(category, rows)`.
    pub fn workbook(&self, language: &str, sheets: &[(&str, &[(&str, &str)])]) {
        let data: Vec<SheetData> = sheets
            .iter()
            .map(|(name, rows)| SheetData {
                name: name.to_string(),
                rows: rows
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            })
            .collect();
        XlsxWriter::default()
            .write(&self.sheets.join(format!("{language}.xlsx")), &data)
            .unwrap();
    }

    /// The binary, run inside the project with logs kept in the temp dir.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("sheetloc").unwrap();
        cmd.current_dir(self.tmp.path())
            .env("SHEETLOC_LOG_DIR", self.tmp.path().join("logs"))
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn path(&self) -> &Path {
        self.tmp.path()
    }
}

pub fn catalog(pairs: &[(&str, &str)]) -> Catalog {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn has_ansi(s: &str) -> bool {
    s.bytes().any(|b| b == 0x1B)
}

/// Parse the single JSON line a `--format json` run prints.
pub fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).unwrap_or_else(|e| panic!("bad JSON ({e}):\n{stdout}"))
}
