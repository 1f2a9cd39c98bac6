use std::path::{Path, PathBuf};

use serde::Deserialize;
use sheetloc_core::{Mode, UnlistedPolicy};

/// The only catalog storage format this tool reads and writes.
pub const CATALOG_FORMAT: &str = "toml";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("The configuration file does not exist: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("The directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Format must be \"toml\" (got \"{0}\").")]
    WrongFormat(String),
    #[error("The configuration file must specify \"message_path\".")]
    MissingMessagePath,
    #[error("The message path {} is not a valid directory.", .0.display())]
    InvalidMessagePath(PathBuf),
    #[error("Languages cannot be empty.")]
    EmptyLanguages,
}

/// Settings of one export/import invocation. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub format: String,
    /// Root with one subdirectory per language.
    pub message_path: PathBuf,
    pub languages: Vec<String>,
}

impl RunConfig {
    pub fn language_dir(&self, language: &str) -> PathBuf {
        self.message_path.join(language)
    }

    /// `<message_path>/<language>/<category>.toml`
    pub fn catalog_path(&self, language: &str, category: &str) -> PathBuf {
        self.language_dir(language)
            .join(format!("{category}.{CATALOG_FORMAT}"))
    }
}

#[derive(Debug, Deserialize)]
struct RawRunConfig {
    format: Option<String>,
    #[serde(alias = "messagePath")]
    message_path: Option<PathBuf>,
    #[serde(default)]
    languages: Vec<String>,
}

/// Load and validate the run configuration.
///
/// `work_dir` is the workbook output (export) or input (import) directory; it
/// must exist before anything else is looked at. Relative `message_path`
/// values resolve against the directory holding the configuration file.
pub fn load_run_config(config_file: &Path, work_dir: &Path) -> Result<RunConfig, ConfigError> {
    if !config_file.is_file() {
        return Err(ConfigError::MissingFile(config_file.to_path_buf()));
    }
    if !work_dir.is_dir() {
        return Err(ConfigError::MissingDirectory(work_dir.to_path_buf()));
    }

    let text = std::fs::read_to_string(config_file).map_err(|source| ConfigError::Read {
        path: config_file.to_path_buf(),
        source,
    })?;
    let raw: RawRunConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: config_file.to_path_buf(),
        source,
    })?;

    let format = raw.format.unwrap_or_else(|| CATALOG_FORMAT.to_string());
    if format != CATALOG_FORMAT {
        return Err(ConfigError::WrongFormat(format));
    }

    let message_path = raw.message_path.ok_or(ConfigError::MissingMessagePath)?;
    let message_path = if message_path.is_relative() {
        config_file
            .parent()
            .map(|base| base.join(&message_path))
            .unwrap_or(message_path)
    } else {
        message_path
    };
    if !message_path.is_dir() {
        return Err(ConfigError::InvalidMessagePath(message_path));
    }

    if raw.languages.is_empty() {
        return Err(ConfigError::EmptyLanguages);
    }

    Ok(RunConfig {
        format,
        message_path,
        languages: raw.languages,
    })
}

/// User defaults read from `sheetloc.toml`. Every field is optional; command
/// line arguments take precedence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetLocConfig {
    pub export: Option<ExportCfg>,
    pub import: Option<ImportCfg>,
    pub selection: Option<SelectionCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportCfg {
    pub mode: Option<Mode>,
    pub line_height: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportCfg {
    pub mode: Option<Mode>,
    pub extension: Option<String>,
    pub backup: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionCfg {
    pub unlisted_languages: Option<UnlistedPolicy>,
}

/// Search order: CWD/sheetloc.toml, then `<config dir>/sheetloc/sheetloc.toml`.
/// Earlier files win field by field.
pub fn load_config() -> Result<SheetLocConfig, ConfigError> {
    let mut candidates = Vec::new();
    if let Ok(p) = std::env::current_dir() {
        candidates.push(p.join("sheetloc.toml"));
    }
    if let Some(base) = dirs::config_dir() {
        candidates.push(base.join("sheetloc").join("sheetloc.toml"));
    }
    load_config_from(&candidates)
}

pub fn load_config_from(paths: &[PathBuf]) -> Result<SheetLocConfig, ConfigError> {
    let mut merged = SheetLocConfig::default();
    for path in paths {
        let Ok(s) = std::fs::read_to_string(path) else {
            continue;
        };
        let cfg = toml::from_str::<SheetLocConfig>(&s).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        merged = merge(merged, cfg);
    }
    Ok(merged)
}

fn merge(mut a: SheetLocConfig, b: SheetLocConfig) -> SheetLocConfig {
    a.export = merge_opt(a.export, b.export, merge_export);
    a.import = merge_opt(a.import, b.import, merge_import);
    a.selection = merge_opt(a.selection, b.selection, merge_selection);
    a
}

fn merge_opt<T: Default>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_export(mut a: ExportCfg, b: ExportCfg) -> ExportCfg {
    if a.mode.is_none() {
        a.mode = b.mode;
    }
    if a.line_height.is_none() {
        a.line_height = b.line_height;
    }
    a
}

fn merge_import(mut a: ImportCfg, b: ImportCfg) -> ImportCfg {
    if a.mode.is_none() {
        a.mode = b.mode;
    }
    if a.extension.is_none() {
        a.extension = b.extension;
    }
    if a.backup.is_none() {
        a.backup = b.backup;
    }
    a
}

fn merge_selection(mut a: SelectionCfg, b: SelectionCfg) -> SelectionCfg {
    if a.unlisted_languages.is_none() {
        a.unlisted_languages = b.unlisted_languages;
    }
    a
}
