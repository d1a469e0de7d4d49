//! Locale-keyed label tables and request-scoped lookups.
//!
//! Tables are JSON objects whose nested keys are flattened with dots, so
//! `{"label": {"url_list": "URLs"}}` provides the key `label.url_list`.  The `en` and `zh-TW`
//! tables are compiled into the crate; [`Translations::load_dir`] layers files named
//! `<locale>.json` on top of them.  Placeholders use the `%{name}` syntax.
//!
//! The active locale is never global state: each render creates its own [`Localizer`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Map, Value};

use crate::error::TranslationError;

/// Locale consulted when a key is missing from the active locale.
pub const DEFAULT_FALLBACK_LOCALE: &str = "en";

const EMBEDDED_TABLES: &[(&str, &str)] = &[
    ("en", include_str!("../translations/en.json")),
    ("zh-TW", include_str!("../translations/zh-TW.json")),
];

/// Translation tables for every known locale.
#[derive(Clone, Debug)]
pub struct Translations {
    tables: HashMap<String, HashMap<String, String>>,
    fallback: String,
}

impl Default for Translations {
    fn default() -> Self {
        Self::embedded()
    }
}

impl Translations {
    /// Creates an instance without any table.
    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
            fallback: DEFAULT_FALLBACK_LOCALE.to_owned(),
        }
    }

    /// Returns the tables bundled with the crate.
    pub fn embedded() -> Self {
        let mut translations = Self::empty();
        for (locale, source) in EMBEDDED_TABLES {
            translations
                .merge_json(locale, source, Path::new(locale))
                .unwrap_or_else(|err| panic!("embedded translation table is invalid: {err}"));
        }
        translations
    }

    /// Returns the embedded tables extended with every `<locale>.json` file in `directory`.
    ///
    /// Keys from the directory override the embedded ones.
    pub fn load_dir(directory: impl AsRef<Path>) -> Result<Self, TranslationError> {
        let mut translations = Self::embedded();
        translations.merge_dir(directory.as_ref())?;
        Ok(translations)
    }

    /// Sets the fallback locale and returns the updated instance.
    pub fn with_fallback(mut self, locale: impl Into<String>) -> Self {
        self.fallback = locale.into();
        self
    }

    /// Returns the fallback locale.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Returns the known locales in no particular order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Merges a JSON table for `locale`; `origin` is only used in error messages.
    pub fn merge_json(
        &mut self,
        locale: &str,
        source: &str,
        origin: &Path,
    ) -> Result<(), TranslationError> {
        let value: Value =
            serde_json::from_str(source).map_err(|source| TranslationError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        let Value::Object(root) = value else {
            return Err(TranslationError::NotAnObject {
                path: origin.to_path_buf(),
            });
        };

        let table = self.tables.entry(locale.to_owned()).or_default();
        flatten_into(table, "", &root);
        Ok(())
    }

    fn merge_dir(&mut self, directory: &Path) -> Result<(), TranslationError> {
        let io_error = |path: &Path, source| TranslationError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut files: Vec<PathBuf> = fs::read_dir(directory)
            .map_err(|err| io_error(directory, err))?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        for path in files {
            let Some(locale) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let source = fs::read_to_string(&path).map_err(|err| io_error(&path, err))?;
            self.merge_json(locale, &source, &path)?;
            debug!("Loaded translations for '{}' from {}", locale, path.display());
        }
        Ok(())
    }

    /// Looks `key` up in `locale`, then in the fallback locale.
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        [locale, self.fallback.as_str()]
            .into_iter()
            .filter_map(|candidate| self.tables.get(candidate))
            .find_map(|table| table.get(key))
            .map(String::as_str)
    }

    /// Creates a lookup bound to `locale`.
    pub fn localizer(&self, locale: impl Into<String>) -> Localizer<'_> {
        Localizer {
            translations: self,
            locale: locale.into(),
        }
    }
}

fn flatten_into(table: &mut HashMap<String, String>, prefix: &str, object: &Map<String, Value>) {
    for (key, value) in object {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(nested) => flatten_into(table, &full_key, nested),
            Value::String(text) => {
                table.insert(full_key, text.clone());
            }
            Value::Null => {}
            other => {
                table.insert(full_key, other.to_string());
            }
        }
    }
}

/// Request-scoped label resolver bound to one locale.
#[derive(Clone, Debug)]
pub struct Localizer<'a> {
    translations: &'a Translations,
    locale: String,
}

impl<'a> Localizer<'a> {
    /// Resolves `key`; a key unknown to both the active and the fallback locale resolves to
    /// itself.
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &[])
    }

    /// Resolves `key` and replaces each `%{name}` placeholder with its argument.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let Some(template) = self.translations.lookup(&self.locale, key) else {
            debug!("Missing translation for '{}' in locale '{}'", key, self.locale);
            return key.to_owned();
        };

        interpolate(template, args)
    }
}

/// Replaces each `%{name}` placeholder of `template` with its argument.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    args.iter()
        .fold(template.to_owned(), |text, (name, value)| {
            text.replace(&format!("%{{{name}}}"), value)
        })
}
