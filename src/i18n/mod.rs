pub mod locale;
pub mod localizer;

pub use locale::{detect_locale, detect_locale_with, detect_system_locale, DEFAULT_LOCALE};
pub use localizer::{
    default_search_paths, format_positional, placeholder_indexes, Localizer, Messages,
    TranslationTable,
};
