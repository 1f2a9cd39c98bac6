//! Catalog files: one flat TOML table of `source = translation` pairs per
//! (language, category), preceded by a fixed comment header.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sheetloc_core::{persisted_order, Catalog};
use thiserror::Error;
use walkdir::WalkDir;

/// File extension of catalog files.
pub const CATALOG_EXT: &str = "toml";

/// Written verbatim at the top of every catalog file.
pub const CATALOG_HEADER: &str = "\
# Message translations.
#
# This file is created by the message extraction step and updated by
# `sheetloc import`. Each entry maps a source message (the key) to its
# translation (the value). An empty value means the message has not been
# translated yet.
#
# Untranslated messages are listed first, followed by translated ones.
# Both groups are sorted by source message.
#
# NOTE: this file must be saved in UTF-8 encoding.

";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to render catalog: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("failed to write catalog {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a catalog file. Every value must be a string.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&text).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_catalog(text: &str) -> Result<Catalog, toml::de::Error> {
    toml::from_str::<Catalog>(text)
}

/// Header plus entries in persisted order.
pub fn render_catalog(catalog: &Catalog) -> Result<String, CatalogError> {
    let mut table = toml::Table::new();
    for (key, value) in persisted_order(catalog) {
        table.insert(key.to_string(), toml::Value::String(value.to_string()));
    }
    let body = toml::to_string(&table)?;
    let mut out = String::with_capacity(CATALOG_HEADER.len() + body.len());
    out.push_str(CATALOG_HEADER);
    out.push_str(&body);
    Ok(out)
}

/// Render and persist a catalog, replacing the file atomically.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let content = render_catalog(catalog)?;
    write_atomic(path, content.as_bytes())
}

/// Write to a sibling temp file, then rename over `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CatalogError> {
    let io_err = |source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);
    {
        let mut f = fs::File::create(&tmp).map_err(io_err)?;
        f.write_all(bytes).map_err(io_err)?;
        f.sync_all().map_err(io_err)?;
    }
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        io_err(e)
    })
}

/// Category names (file stems) of the catalog files directly inside
/// `language_dir`, sorted. A missing directory yields no categories.
pub fn list_categories(language_dir: &Path) -> Vec<String> {
    let mut out: Vec<String> = WalkDir::new(language_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == CATALOG_EXT)
        })
        .filter_map(|e| {
            e.path()
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .collect();
    out.sort();
    tracing::debug!(event = "categories_found", dir = %language_dir.display(), count = out.len());
    out
}
