use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SheetStat {
    pub category: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WorkbookStat {
    pub language: String,
    pub path: String,
    pub sheets: Vec<SheetStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportSummary {
    pub schema_version: u32,
    pub mode: String,
    pub rows: usize,
    pub workbooks: Vec<WorkbookStat>,
}

/// Outcome of merging one imported sheet into its catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CatalogStatus {
    Updated,
    Unchanged,
    Missing,
    Planned,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CatalogFileStat {
    pub language: String,
    pub category: String,
    pub path: String,
    pub status: CatalogStatus,
    /// Keys whose translation was replaced by the imported one.
    pub updated: Vec<String>,
    /// Imported keys that no longer exist in the catalog.
    pub removed: Vec<String>,
    /// Keys whose existing translation was kept over the imported one.
    pub kept: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImportSummary {
    pub schema_version: u32,
    pub mode: String,
    pub dry_run: bool,
    pub updated: usize,
    pub unchanged: usize,
    pub missing: usize,
    pub failed: usize,
    pub keys: usize,
    pub files: Vec<CatalogFileStat>,
}

impl ImportSummary {
    pub fn new(mode: &str, dry_run: bool) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            mode: mode.to_string(),
            dry_run,
            updated: 0,
            unchanged: 0,
            missing: 0,
            failed: 0,
            keys: 0,
            files: Vec::new(),
        }
    }

    /// Record a file stat and keep the counters in sync with it.
    pub fn push(&mut self, stat: CatalogFileStat) {
        match stat.status {
            CatalogStatus::Updated | CatalogStatus::Planned => self.updated += 1,
            CatalogStatus::Unchanged => self.unchanged += 1,
            CatalogStatus::Missing => self.missing += 1,
            CatalogStatus::Failed => self.failed += 1,
        }
        self.keys += stat.updated.len();
        self.files.push(stat);
    }
}
