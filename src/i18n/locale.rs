//! Detect the user's locale from the environment

/// Locale used when nothing in the environment names a language
pub const DEFAULT_LOCALE: &str = "en";

/// Environment variables consulted, highest priority first
pub const LOCALE_ENV_VARS: &[&str] = &["LC_ALL", "LC_MESSAGES", "LANG"];

/// Extract the language code from a `<lang>[_<REGION>][.<encoding>]` value
///
/// Returns `None` when the value has no language part.
pub fn parse_locale(value: &str) -> Option<String> {
    let lang = value
        .trim()
        .split(['_', '.'])
        .next()
        .unwrap_or_default()
        .to_lowercase();

    if lang.is_empty() {
        None
    } else {
        Some(lang)
    }
}

/// Detect the locale from a single value, defaulting to English
pub fn detect_locale(value: &str) -> String {
    parse_locale(value).unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Detect the locale using a variable lookup function
pub fn detect_locale_with<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    LOCALE_ENV_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .find_map(|value| parse_locale(&value))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Detect the locale from the process environment
pub fn detect_system_locale() -> String {
    detect_locale_with(|var| std::env::var(var).ok())
}
