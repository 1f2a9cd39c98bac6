pub mod export;
pub mod import;
pub mod schema;

use crate::SelectionArgs;
use sheetloc_config::SelectionCfg;
use sheetloc_services::{Filter, Selector};

/// Command line lists win; the unlisted-language policy falls back to the
/// defaults file.
pub(crate) fn selector(args: SelectionArgs, defaults: Option<SelectionCfg>) -> Selector {
    let unlisted = args
        .unlisted_languages
        .or(defaults.and_then(|d| d.unlisted_languages))
        .unwrap_or_default();
    Selector::new(
        Filter::from_csv(args.languages.as_deref(), args.ignore_languages.as_deref()),
        Filter::from_csv(args.categories.as_deref(), args.ignore_categories.as_deref()),
        unlisted,
    )
}
