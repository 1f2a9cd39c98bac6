use sheetloc_core::UnlistedPolicy;

/// Include/exclude lists for one dimension (languages or categories).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

impl Filter {
    /// Build from comma separated lists as given on the command line.
    pub fn from_csv(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include: include.map(split_list),
            exclude: exclude.map(split_list),
        }
    }

    pub fn include(names: &[&str]) -> Self {
        Self {
            include: Some(names.iter().map(|s| s.to_string()).collect()),
            exclude: None,
        }
    }

    pub fn exclude(names: &[&str]) -> Self {
        Self {
            include: None,
            exclude: Some(names.iter().map(|s| s.to_string()).collect()),
        }
    }

    /// An include-list wins over an exclude-list; with neither, `unlisted` decides.
    fn accepts(&self, name: &str, unlisted: UnlistedPolicy) -> bool {
        if let Some(include) = &self.include {
            return include.iter().any(|n| n == name);
        }
        if let Some(exclude) = &self.exclude {
            return !exclude.iter().any(|n| n == name);
        }
        unlisted == UnlistedPolicy::Include
    }
}

/// Split `a, b,,c` into `["a", "b", "c"]`.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decides which languages and categories take part in a run. The same
/// selector is applied on export and on import.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    pub languages: Filter,
    pub categories: Filter,
    /// Language policy when no list is configured. Categories always default
    /// to included.
    pub unlisted_languages: UnlistedPolicy,
}

impl Selector {
    pub fn new(languages: Filter, categories: Filter, unlisted_languages: UnlistedPolicy) -> Self {
        Self {
            languages,
            categories,
            unlisted_languages,
        }
    }

    pub fn language_included(&self, language: &str) -> bool {
        self.languages.accepts(language, self.unlisted_languages)
    }

    pub fn category_included(&self, category: &str) -> bool {
        self.categories.accepts(category, UnlistedPolicy::Include)
    }
}
