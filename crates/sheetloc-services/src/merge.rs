use std::fs;
use std::path::{Path, PathBuf};

use sheetloc_catalog::{load_catalog, render_catalog, write_atomic};
use sheetloc_config::RunConfig;
use sheetloc_core::{Catalog, ImportSet, Mode, Result};
use sheetloc_domain::{CatalogFileStat, CatalogStatus, ImportSummary};

use crate::report::{Event, Reporter};

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Never replace a translation that is already non-empty.
    pub skip_existing: bool,
    /// Compute and report everything, write nothing.
    pub dry_run: bool,
    /// Copy the catalog to `<file>.bak` before overwriting it.
    pub backup: bool,
}

impl MergeOptions {
    /// `Mode::New` imports only fill in missing translations.
    pub fn for_mode(mode: Mode) -> Self {
        Self {
            skip_existing: mode == Mode::New,
            ..Self::default()
        }
    }
}

/// What merging one imported sheet did to its catalog, key by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Keys whose translation changed.
    pub updated: Vec<String>,
    /// Imported keys missing from the catalog; they are dropped.
    pub removed: Vec<String>,
    /// Keys whose existing translation was kept because of `skip_existing`.
    pub kept: Vec<String>,
}

/// Apply imported translations to a catalog in place.
///
/// Keys are never added or removed: an imported key the catalog does not know
/// is dropped, catalog keys without an imported value stay untouched.
pub fn merge_catalog(existing: &mut Catalog, incoming: &Catalog, skip_existing: bool) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    for (key, translation) in incoming {
        match existing.get_mut(key) {
            None => outcome.removed.push(key.clone()),
            Some(current) if skip_existing && !current.is_empty() => {
                outcome.kept.push(key.clone())
            }
            Some(current) => {
                if current != translation {
                    outcome.updated.push(key.clone());
                    *current = translation.clone();
                }
            }
        }
    }
    outcome
}

/// Merge every (language, category) of `import` into its catalog file.
///
/// Each category is handled on its own: a missing or unreadable catalog is
/// reported and skipped, the rest of the run continues. A catalog file is only
/// replaced once its merged content has been rendered in full.
pub fn merge_import_set(
    import: &ImportSet,
    cfg: &RunConfig,
    opts: MergeOptions,
    reporter: &mut dyn Reporter,
) -> Result<ImportSummary> {
    let mode = if opts.skip_existing { Mode::New } else { Mode::All };
    let mut summary = ImportSummary::new(mode.as_str(), opts.dry_run);

    for (language, categories) in import {
        reporter.report(Event::LanguageMerging {
            language: language.clone(),
        });
        for (category, translations) in categories {
            let path = cfg.catalog_path(language, category);
            let mut stat = CatalogFileStat {
                language: language.clone(),
                category: category.clone(),
                path: path.display().to_string(),
                status: CatalogStatus::Missing,
                updated: Vec::new(),
                removed: Vec::new(),
                kept: Vec::new(),
                error: None,
            };

            if !path.is_file() {
                tracing::warn!(event = "category_missing", language = %language, category = %category, path = %path.display());
                reporter.report(Event::CategoryMissing {
                    language: language.clone(),
                    category: category.clone(),
                    path,
                });
                summary.push(stat);
                continue;
            }

            match merge_file(&path, translations, opts, reporter) {
                Ok((status, outcome)) => {
                    for key in &outcome.removed {
                        reporter.report(Event::KeyRemoved {
                            language: language.clone(),
                            category: category.clone(),
                            key: key.clone(),
                        });
                    }
                    for key in &outcome.kept {
                        reporter.report(Event::KeyKept {
                            language: language.clone(),
                            category: category.clone(),
                            key: key.clone(),
                        });
                    }
                    let updated = outcome.updated.len();
                    reporter.report(match status {
                        CatalogStatus::Unchanged => Event::CatalogUnchanged { path },
                        CatalogStatus::Planned => Event::CatalogPlanned { path, updated },
                        _ => Event::CatalogUpdated { path, updated },
                    });
                    stat.status = status;
                    stat.updated = outcome.updated;
                    stat.removed = outcome.removed;
                    stat.kept = outcome.kept;
                }
                Err(err) => {
                    tracing::error!(event = "catalog_failed", path = %path.display(), error = %err);
                    reporter.report(Event::CatalogFailed {
                        path,
                        error: err.to_string(),
                    });
                    stat.status = CatalogStatus::Failed;
                    stat.error = Some(err.to_string());
                }
            }
            summary.push(stat);
        }
    }
    Ok(summary)
}

fn merge_file(
    path: &Path,
    translations: &Catalog,
    opts: MergeOptions,
    reporter: &mut dyn Reporter,
) -> Result<(CatalogStatus, MergeOutcome)> {
    let current = fs::read_to_string(path)?;
    let mut catalog = load_catalog(path)?;
    let outcome = merge_catalog(&mut catalog, translations, opts.skip_existing);
    let rendered = render_catalog(&catalog)?;

    if rendered == current {
        tracing::debug!(event = "catalog_unchanged", path = %path.display());
        return Ok((CatalogStatus::Unchanged, outcome));
    }
    if opts.dry_run {
        return Ok((CatalogStatus::Planned, outcome));
    }
    if opts.backup {
        let bak = backup_path(path);
        fs::copy(path, &bak)?;
        tracing::warn!(event = "backup", from = %path.display(), to = %bak.display());
        reporter.report(Event::BackupWritten {
            from: path.to_path_buf(),
            to: bak,
        });
    }
    write_atomic(path, rendered.as_bytes())?;
    tracing::info!(event = "catalog_updated", path = %path.display(), updated = outcome.updated.len());
    Ok((CatalogStatus::Updated, outcome))
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{CollectingReporter, NullReporter};
    use crate::testutil::{catalog, Fixture};
    use sheetloc_core::persisted_order;

    fn keys(c: &Catalog) -> Vec<&str> {
        persisted_order(c).into_iter().map(|(k, _)| k).collect()
    }

    fn one(language: &str, category: &str, pairs: &[(&str, &str)]) -> ImportSet {
        let mut set = ImportSet::new();
        set.entry(language.to_string())
            .or_default()
            .insert(category.to_string(), catalog(pairs));
        set
    }

    #[test]
    fn overwrites_and_drops_removed_keys() {
        let mut c = catalog(&[("Hello", ""), ("Bye", "Tschüss")]);
        let out = merge_catalog(&mut c, &catalog(&[("Hello", "Hallo"), ("Removed", "X")]), false);
        assert_eq!(c, catalog(&[("Bye", "Tschüss"), ("Hello", "Hallo")]));
        assert_eq!(keys(&c), vec!["Bye", "Hello"]);
        assert_eq!(out.updated, vec!["Hello"]);
        assert_eq!(out.removed, vec!["Removed"]);
        assert!(out.kept.is_empty());
    }

    #[test]
    fn skip_existing_keeps_translated_entries() {
        let mut c = catalog(&[("Hello", ""), ("Bye", "Tschüss")]);
        let out = merge_catalog(&mut c, &catalog(&[("Bye", "Au revoir")]), true);
        assert_eq!(c, catalog(&[("Hello", ""), ("Bye", "Tschüss")]));
        assert_eq!(keys(&c), vec!["Hello", "Bye"]);
        assert_eq!(out.kept, vec!["Bye"]);
    }

    #[test]
    fn skip_existing_still_fills_empty_translations() {
        let mut c = catalog(&[("Hello", ""), ("Bye", "Tschüss")]);
        merge_catalog(&mut c, &catalog(&[("Hello", "Hallo"), ("Bye", "Ciao")]), true);
        assert_eq!(c, catalog(&[("Hello", "Hallo"), ("Bye", "Tschüss")]));
    }

    #[test]
    fn without_skip_existing_translations_are_overwritten() {
        let mut c = catalog(&[("Bye", "Tschüss")]);
        let out = merge_catalog(&mut c, &catalog(&[("Bye", "Servus")]), false);
        assert_eq!(c["Bye"], "Servus");
        assert_eq!(out.updated, vec!["Bye"]);
    }

    #[test]
    fn persists_merged_catalog_in_empty_first_order() {
        let fx = Fixture::new(&["de"]);
        let path = fx.catalog("de", "app", &[("Zebra", ""), ("Apple", ""), ("Mango", "")]);
        let import = one("de", "app", &[("Apple", "Apfel")]);

        let summary =
            merge_import_set(&import, &fx.cfg, MergeOptions::default(), &mut NullReporter).unwrap();
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.files[0].status, CatalogStatus::Updated);

        let text = fs::read_to_string(&path).unwrap();
        let pos = |k: &str| text.find(&format!("{k} =")).unwrap();
        assert!(pos("Mango") < pos("Zebra"));
        assert!(pos("Zebra") < pos("Apple"));
        assert_eq!(
            load_catalog(&path).unwrap(),
            catalog(&[("Zebra", ""), ("Apple", "Apfel"), ("Mango", "")])
        );
    }

    #[test]
    fn missing_category_is_reported_and_the_rest_continues() {
        let fx = Fixture::new(&["de"]);
        fx.catalog("de", "app", &[("Hello", "")]);
        let mut import = one("de", "app", &[("Hello", "Hallo")]);
        import
            .get_mut("de")
            .unwrap()
            .insert("gone".into(), catalog(&[("X", "Y")]));

        let mut rep = CollectingReporter::default();
        let summary = merge_import_set(&import, &fx.cfg, MergeOptions::default(), &mut rep).unwrap();
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.updated, 1);
        assert!(!fx.cfg.catalog_path("de", "gone").exists());
        assert!(rep
            .events
            .iter()
            .any(|e| matches!(e, Event::CategoryMissing { category, .. } if category == "gone")));
        assert_eq!(
            load_catalog(&fx.cfg.catalog_path("de", "app")).unwrap()["Hello"],
            "Hallo"
        );
    }

    #[test]
    fn unreadable_catalog_fails_alone() {
        let fx = Fixture::new(&["de"]);
        fx.catalog("de", "app", &[("Hello", "")]);
        let broken = fx.cfg.catalog_path("de", "broken");
        fs::write(&broken, "not = [valid").unwrap();
        let mut import = one("de", "app", &[("Hello", "Hallo")]);
        import
            .get_mut("de")
            .unwrap()
            .insert("broken".into(), catalog(&[("X", "Y")]));

        let summary =
            merge_import_set(&import, &fx.cfg, MergeOptions::default(), &mut NullReporter).unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(fs::read_to_string(&broken).unwrap(), "not = [valid");
    }

    #[test]
    fn dry_run_and_unchanged_files_are_not_written() {
        let fx = Fixture::new(&["de"]);
        let path = fx.catalog("de", "app", &[("Hello", ""), ("Bye", "Tschüss")]);
        let before = fs::read_to_string(&path).unwrap();

        let opts = MergeOptions {
            dry_run: true,
            ..MergeOptions::default()
        };
        let summary = merge_import_set(&one("de", "app", &[("Hello", "Hallo")]), &fx.cfg, opts, &mut NullReporter)
            .unwrap();
        assert_eq!(summary.files[0].status, CatalogStatus::Planned);
        assert_eq!(summary.files[0].updated, vec!["Hello"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), before);

        let summary = merge_import_set(
            &one("de", "app", &[("Bye", "Tschüss")]),
            &fx.cfg,
            MergeOptions::default(),
            &mut NullReporter,
        )
        .unwrap();
        assert_eq!(summary.files[0].status, CatalogStatus::Unchanged);
        assert_eq!(summary.unchanged, 1);
    }

    #[test]
    fn backup_copies_previous_content() {
        let fx = Fixture::new(&["de"]);
        let path = fx.catalog("de", "app", &[("Hello", "")]);
        let before = fs::read_to_string(&path).unwrap();
        let opts = MergeOptions {
            backup: true,
            ..MergeOptions::default()
        };
        merge_import_set(&one("de", "app", &[("Hello", "Hallo")]), &fx.cfg, opts, &mut NullReporter).unwrap();
        assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), before);
        assert_eq!(load_catalog(&path).unwrap()["Hello"], "Hallo");
    }
}
