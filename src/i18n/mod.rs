//! Interface translations.
//!
//! Each language ships an embedded TOML table. Keys are dotted paths into
//! that table (`explore.search.placeholder`). Lookups fall back to English
//! and finally to the key itself, so a missing entry is visible but never
//! fatal.

use crate::prefs::Language;
use std::collections::HashMap;
use std::sync::OnceLock;

const EN: &str = include_str!("locales/en.toml");
const AR: &str = include_str!("locales/ar.toml");

fn tables() -> &'static HashMap<Language, toml::Table> {
    static TABLES: OnceLock<HashMap<Language, toml::Table>> = OnceLock::new();
    TABLES.get_or_init(|| {
        Language::ALL
            .iter()
            .map(|&language| (language, parse_table(language)))
            .collect()
    })
}

fn source(language: Language) -> &'static str {
    match language {
        Language::En => EN,
        Language::Ar => AR,
    }
}

fn parse_table(language: Language) -> toml::Table {
    match source(language).parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => {
            tracing::error!(language = %language, error = %e, "Invalid translation table");
            toml::Table::new()
        }
    }
}

fn lookup<'a>(table: &'a toml::Table, key: &str) -> Option<&'a str> {
    let mut parts = key.split('.');
    let mut value = table.get(parts.next()?)?;
    for part in parts {
        value = value.as_table()?.get(part)?;
    }
    value.as_str()
}

/// Translate `key` for `language`.
pub fn t(language: Language, key: &str) -> String {
    let tables = tables();
    tables
        .get(&language)
        .and_then(|table| lookup(table, key))
        .or_else(|| {
            tables
                .get(&Language::En)
                .and_then(|table| lookup(table, key))
        })
        .map(str::to_string)
        .unwrap_or_else(|| {
            tracing::debug!(key, language = %language, "Missing translation");
            key.to_string()
        })
}

/// Translate `key` and replace each `{{name}}` placeholder from `args`.
pub fn t_with(language: Language, key: &str, args: &[(&str, &str)]) -> String {
    args.iter()
        .fold(t(language, key), |text, (name, value)| {
            text.replace(&format!("{{{{{name}}}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_nested_key() {
        assert_eq!(
            t(Language::En, "explore.search.placeholder"),
            "Search tickers..."
        );
        assert_eq!(t(Language::Ar, "actions.close"), "إغلاق");
    }

    #[test]
    fn test_missing_key_returns_key() {
        assert_eq!(t(Language::En, "nope.missing"), "nope.missing");
        assert_eq!(t(Language::En, "explore"), "explore");
    }

    #[test]
    fn test_interpolation() {
        assert_eq!(
            t_with(Language::En, "explore.search.results_found", &[("count", "42")]),
            "42 tickers loaded"
        );
    }

    #[test]
    fn test_every_english_key_is_translated() {
        fn keys(prefix: &str, table: &toml::Table, out: &mut Vec<String>) {
            for (name, value) in table {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                match value {
                    toml::Value::Table(inner) => keys(&key, inner, out),
                    _ => out.push(key),
                }
            }
        }

        let mut english = Vec::new();
        keys("", &tables()[&Language::En], &mut english);
        assert!(!english.is_empty());

        let arabic = &tables()[&Language::Ar];
        for key in english {
            assert!(lookup(arabic, &key).is_some(), "missing ar translation: {key}");
        }
    }
}
