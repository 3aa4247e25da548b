//! Translation table loading and message lookup

use crate::error::LocalizationError;
use crate::utils::paths::executable_dir;
use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::locale::DEFAULT_LOCALE;

/// Application directory name used in the user and system search paths
const APP_DIR: &str = "cli-helper";

/// System-wide locales directory
pub const SYSTEM_LOCALES_DIR: &str = "/usr/local/share/cli-helper/locales";

/// English messages bundled into the binary
const BUNDLED_EN: &str = include_str!("../../locales/en.json");

/// Messages for a single locale
pub type Messages = HashMap<String, String>;

/// Locale code to flat message map, immutable once loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    locales: HashMap<String, Messages>,
}

impl TranslationTable {
    /// Build a table from already parsed locales
    pub fn from_locales(locales: HashMap<String, Messages>) -> Self {
        Self { locales }
    }

    /// Load translations from the first existing directory in `search_paths`
    ///
    /// Only that directory is read; later candidates are never merged in.
    /// When the directory has no `en.json`, the bundled English messages
    /// are used for "en".
    pub fn load(search_paths: &[PathBuf]) -> Result<Self, LocalizationError> {
        let dir = search_paths
            .iter()
            .find(|p| p.is_dir())
            .ok_or_else(|| LocalizationError::NotFound {
                searched: search_paths.to_vec(),
            })?;

        debug!(dir = %dir.display(), "loading translations");
        let mut table = Self::load_dir(dir)?;

        if !table.locales.contains_key(DEFAULT_LOCALE) {
            debug!("no en.json in locales directory, using bundled messages");
            table
                .locales
                .insert(DEFAULT_LOCALE.to_string(), bundled_english());
        }

        Ok(table)
    }

    fn load_dir(dir: &Path) -> Result<Self, LocalizationError> {
        let entries = fs::read_dir(dir).map_err(|source| LocalizationError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut locales = HashMap::new();
        for entry in entries {
            let entry = entry.map_err(|source| LocalizationError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            let Some(locale) = locale_from_file_name(&path) else {
                continue;
            };

            // Bytes go straight to serde_json so bad UTF-8 reports as a format error
            let content = fs::read(&path).map_err(|source| LocalizationError::Io {
                path: path.clone(),
                source,
            })?;
            let messages: Messages = serde_json::from_slice(&content)
                .map_err(|source| LocalizationError::InvalidFormat { file: path, source })?;

            locales.insert(locale, messages);
        }

        Ok(Self { locales })
    }

    /// Messages for `locale`, if that locale was loaded
    pub fn messages(&self, locale: &str) -> Option<&Messages> {
        self.locales.get(locale)
    }

    /// Loaded locale codes, sorted
    pub fn locales(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

/// `ru.json` -> `ru`; anything not ending in `.json` is skipped
fn locale_from_file_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.strip_suffix(".json").map(str::to_string)
}

fn bundled_english() -> Messages {
    serde_json::from_str(BUNDLED_EN).expect("bundled en.json is invalid")
}

/// Candidate locales directories, in search order
///
/// `override_dir` comes from the config file and is searched first.
pub fn default_search_paths(override_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(dir) = override_dir {
        paths.push(dir.to_path_buf());
    }
    if let Some(exe_dir) = executable_dir() {
        paths.push(exe_dir.join("locales"));
    }
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_DIR).join("locales"));
    }
    paths.push(PathBuf::from(SYSTEM_LOCALES_DIR));
    paths.push(PathBuf::from("locales"));

    paths
}

/// Resolves message keys for one locale, falling back to English
#[derive(Debug, Clone)]
pub struct Localizer {
    locale: String,
    table: TranslationTable,
}

impl Localizer {
    pub fn new(locale: impl Into<String>, table: TranslationTable) -> Self {
        Self {
            locale: locale.into(),
            table,
        }
    }

    /// Localizer with no translations; every lookup returns the key
    pub fn degraded(locale: impl Into<String>) -> Self {
        Self::new(locale, TranslationTable::default())
    }

    /// Load from `search_paths`, degrading to bare keys on failure
    pub fn load_or_degraded(locale: impl Into<String>, search_paths: &[PathBuf]) -> Self {
        let locale = locale.into();
        match TranslationTable::load(search_paths) {
            Ok(table) => Self::new(locale, table),
            Err(e) => {
                warn!("failed to load translations: {}", e);
                Self::degraded(locale)
            }
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Look up `key` in the active locale, then English, then return the key itself
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.lookup(key).unwrap_or(key)
    }

    /// Look up `key` without falling back to the key itself
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let in_locale = |locale: &str| {
            self.table
                .messages(locale)
                .and_then(|m| m.get(key))
                .map(String::as_str)
        };

        in_locale(self.locale.as_str()).or_else(|| {
            if self.locale == DEFAULT_LOCALE {
                None
            } else {
                in_locale(DEFAULT_LOCALE)
            }
        })
    }

    /// `get` followed by positional substitution of `args`
    pub fn format(&self, key: &str, args: &[&dyn Display]) -> String {
        format_positional(self.get(key), args)
    }
}

/// Substitute `{N}` with `args[N]` and `{}` with the next argument
///
/// Placeholders without a matching argument are kept verbatim and extra
/// arguments are ignored.
pub fn format_positional(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut next = 0;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let inner = &after[..close];
        let index = if inner.is_empty() {
            let i = next;
            next += 1;
            Some(i)
        } else {
            inner.parse::<usize>().ok()
        };

        match index.and_then(|i| args.get(i)) {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Argument indexes referenced by the placeholders of `template`, in order
///
/// Numbering matches `format_positional`: `{}` takes the next sequential index.
pub fn placeholder_indexes(template: &str) -> Vec<usize> {
    let mut indexes = Vec::new();
    let mut rest = template;
    let mut next = 0;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let inner = &after[..close];
        if inner.is_empty() {
            indexes.push(next);
            next += 1;
        } else if let Ok(index) = inner.parse::<usize>() {
            indexes.push(index);
        }
        rest = &after[close + 1..];
    }

    indexes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(pairs: &[(&str, &str)]) -> Messages {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn table(locales: Vec<(&str, Messages)>) -> TranslationTable {
        TranslationTable::from_locales(
            locales
                .into_iter()
                .map(|(code, msgs)| (code.to_string(), msgs))
                .collect(),
        )
    }

    #[test]
    fn test_get_uses_active_locale() {
        let l = Localizer::new(
            "ru",
            table(vec![
                ("ru", messages(&[("hi", "привет")])),
                ("en", messages(&[("hi", "hello")])),
            ]),
        );
        assert_eq!(l.get("hi"), "привет");
    }

    #[test]
    fn test_get_falls_back_to_english() {
        let l = Localizer::new(
            "ru",
            table(vec![("ru", Messages::new()), ("en", messages(&[("hi", "hello")]))]),
        );
        assert_eq!(l.get("hi"), "hello");
    }

    #[test]
    fn test_get_never_falls_back_to_other_locales() {
        let l = Localizer::new(
            "ru",
            table(vec![("de", messages(&[("hi", "hallo")])), ("en", Messages::new())]),
        );
        assert_eq!(l.get("hi"), "hi");
    }

    #[test]
    fn test_get_unknown_key_returns_key() {
        let l = Localizer::new("en", table(vec![("en", messages(&[("hi", "hello")]))]));
        assert_eq!(l.get("missing_key"), "missing_key");

        let empty = Localizer::degraded("ru");
        assert_eq!(empty.get("missing_key"), "missing_key");
    }

    #[test]
    fn test_format_positional_indexes() {
        assert_eq!(format_positional("{1} then {0}", &[&"a", &"b"]), "b then a");
        assert_eq!(format_positional("{} and {}", &[&1, &2]), "1 and 2");
    }

    #[test]
    fn test_format_positional_mismatched_args() {
        assert_eq!(format_positional("{0} {1}", &[&"a"]), "a {1}");
        assert_eq!(format_positional("only {0}", &[&"a", &"b"]), "only a");
        assert_eq!(format_positional("{name} {", &[&"a"]), "{name} {");
    }

    #[test]
    fn test_placeholder_indexes() {
        assert_eq!(placeholder_indexes("I use {0}, do {1}"), vec![0, 1]);
        assert_eq!(placeholder_indexes("{} {}"), vec![0, 1]);
        assert_eq!(placeholder_indexes("{0} {0}"), vec![0, 0]);
        assert_eq!(placeholder_indexes("{name} {0}"), vec![0]);
        assert!(placeholder_indexes("no placeholders").is_empty());
    }

    #[test]
    fn test_bundled_english_parses() {
        let en = bundled_english();
        assert!(en.contains_key("default_prompt_template"));
        assert!(en.contains_key("clipboard_error"));
    }
}
