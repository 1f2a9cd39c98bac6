use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Translations of one (language, category) pair, keyed by source text.
/// An empty value means "not yet translated".
pub type Catalog = BTreeMap<String, String>;

/// language -> category -> catalog subset selected for a workbook.
pub type ExportSet = BTreeMap<String, BTreeMap<String, Catalog>>;

/// language -> category -> translations read back from workbooks.
pub type ImportSet = BTreeMap<String, BTreeMap<String, Catalog>>;

/// Which messages take part in a run.
///
/// On export `New` keeps only untranslated entries. On import `New` means
/// existing translations are never overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    New,
    All,
}

impl Mode {
    /// Whether an entry with this translation passes the export filter.
    pub fn selects(self, translation: &str) -> bool {
        match self {
            Mode::New => translation.is_empty(),
            Mode::All => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::New => "new",
            Mode::All => "all",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown value `{value}` (expected {expected})")]
pub struct ParseEnumError {
    pub value: String,
    pub expected: &'static str,
}

impl FromStr for Mode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Mode::New),
            "all" => Ok(Mode::All),
            other => Err(ParseEnumError {
                value: other.to_string(),
                expected: "`new` or `all`",
            }),
        }
    }
}

/// What the language selector does when neither an include-list nor an
/// exclude-list is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlistedPolicy {
    #[default]
    Include,
    Exclude,
}

impl FromStr for UnlistedPolicy {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "include" => Ok(UnlistedPolicy::Include),
            "exclude" => Ok(UnlistedPolicy::Exclude),
            other => Err(ParseEnumError {
                value: other.to_string(),
                expected: "`include` or `exclude`",
            }),
        }
    }
}

/// Order in which a catalog is persisted: untranslated entries first, then
/// translated ones, each group sorted by key.
pub fn persisted_order(catalog: &Catalog) -> Vec<(&str, &str)> {
    let (mut empty, translated): (Vec<_>, Vec<_>) = catalog
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .partition(|(_, v)| v.is_empty());
    // BTreeMap iteration is already sorted; partition keeps relative order.
    empty.extend(translated);
    empty
}
