use sheetloc_services::{Event, Reporter};

/// Renders service events on the console. With `quiet`, only problems are
/// shown.
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: Event) {
        match event {
            Event::CategoryMissing {
                language,
                category,
                path,
            } => ui_err!(
                "{language}/{category}: no catalog at {}, skipped",
                path.display()
            ),
            Event::CatalogFailed { path, error } => {
                ui_err!("{}: {error}", path.display())
            }
            _ if self.quiet => {}
            Event::LanguageSkipped { language } => ui_warn!("skipping language {language}"),
            Event::CategorySkipped { language, category } => {
                ui_warn!("skipping {language}/{category}")
            }
            Event::CatalogRead { path, entries } => {
                ui_info!("{}: {entries} entries", path.display())
            }
            Event::EmptyKeySkipped { language, category } => {
                ui_warn!("{language}/{category}: entry with an empty source text not exported")
            }
            Event::NothingToExport => ui_warn!("nothing to export"),
            Event::WorkbookWritten {
                language,
                path,
                sheets,
            } => ui_ok!("{language}: {sheets} sheet(s) written to {}", path.display()),
            Event::WorkbookRead {
                language,
                path,
                sheets,
            } => ui_info!("{language}: {sheets} sheet(s) read from {}", path.display()),
            Event::LanguageMerging { language } => ui_info!("merging {language}"),
            Event::KeyRemoved {
                language,
                category,
                key,
            } => ui_warn!("{language}/{category}: \"{key}\" no longer exists, dropped"),
            Event::KeyKept {
                language,
                category,
                key,
            } => ui_warn!("{language}/{category}: \"{key}\" already translated, kept"),
            Event::CatalogUpdated { path, updated } => {
                ui_ok!("{}: {updated} translation(s) updated", path.display())
            }
            Event::CatalogUnchanged { path } => ui_info!("{}: unchanged", path.display()),
            Event::CatalogPlanned { path, updated } => {
                ui_info!("DRY-RUN: {}: would update {updated} translation(s)", path.display())
            }
            Event::BackupWritten { from, to } => {
                ui_info!("backup: {} -> {}", from.display(), to.display())
            }
        }
    }
}
