use std::path::PathBuf;

/// Progress and per-item notices emitted while exporting or importing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    LanguageSkipped {
        language: String,
    },
    CategorySkipped {
        language: String,
        category: String,
    },
    CatalogRead {
        path: PathBuf,
        entries: usize,
    },
    /// The catalog has an entry with an empty source text; it is not exported.
    EmptyKeySkipped {
        language: String,
        category: String,
    },
    NothingToExport,
    WorkbookWritten {
        language: String,
        path: PathBuf,
        sheets: usize,
    },
    WorkbookRead {
        language: String,
        path: PathBuf,
        sheets: usize,
    },
    LanguageMerging {
        language: String,
    },
    CategoryMissing {
        language: String,
        category: String,
        path: PathBuf,
    },
    KeyRemoved {
        language: String,
        category: String,
        key: String,
    },
    KeyKept {
        language: String,
        category: String,
        key: String,
    },
    CatalogUpdated {
        path: PathBuf,
        updated: usize,
    },
    CatalogUnchanged {
        path: PathBuf,
    },
    CatalogPlanned {
        path: PathBuf,
        updated: usize,
    },
    CatalogFailed {
        path: PathBuf,
        error: String,
    },
    BackupWritten {
        from: PathBuf,
        to: PathBuf,
    },
}

/// Sink for [`Event`]s. The services never print; callers decide.
pub trait Reporter {
    fn report(&mut self, event: Event);
}

/// Drops everything.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _event: Event) {}
}

/// Keeps every event in order.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub events: Vec<Event>,
}

impl Reporter for CollectingReporter {
    fn report(&mut self, event: Event) {
        self.events.push(event);
    }
}
