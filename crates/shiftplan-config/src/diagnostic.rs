// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config errors rendered as miette diagnostics.
//!
//! Figment errors are mapped onto [`ConfigError`] with the offending line of
//! `shiftplan.toml` attached when it can be found. Closed vocabularies
//! (weekdays, slot labels, gender requirements, section keys) get a
//! "did you mean" hint from Jaro-Winkler similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::path::Path;

use figment::error::{Error as FigmentError, Kind};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Similarity needed before a hint is offered (`fairnes_weight` clears it,
/// `zzz` against `seed` does not).
const SUGGESTION_THRESHOLD: f64 = 0.75;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key the table does not define.
    #[error("unknown key `{key}` in {table}")]
    #[diagnostic(
        code(shiftplan::config::unknown_key),
        help("{}", hint(suggestion.as_deref(), "accepted keys", valid_keys))
    )]
    UnknownKey {
        key: String,
        /// `[scoring]`, `[[positions]] entry 2`, ...
        table: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a {table} key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("invalid type for `{key}`: {detail}")]
    #[diagnostic(code(shiftplan::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
        #[label("expected {expected}")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value outside a closed vocabulary.
    #[error("invalid value `{value}` for `{key}`")]
    #[diagnostic(
        code(shiftplan::config::unknown_value),
        help("{}", hint(suggestion.as_deref(), "allowed", allowed))
    )]
    UnknownValue {
        key: String,
        value: String,
        suggestion: Option<String>,
        allowed: String,
        #[label("not an allowed value")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("missing required key `{key}` in {table}")]
    #[diagnostic(
        code(shiftplan::config::missing_key),
        help("add `{key} = ...` under {table}")
    )]
    MissingKey { key: String, table: String },

    #[error("validation error: {message}")]
    #[diagnostic(code(shiftplan::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(shiftplan::config::other))]
    Other(String),
}

impl ConfigError {
    /// `value` is not in `allowed`; suggests the closest entry.
    ///
    /// Matching is case-insensitive, so `Caturday` still suggests `saturday`.
    pub fn unknown_value(key: &str, value: &str, allowed: &[&str]) -> Self {
        ConfigError::UnknownValue {
            key: key.to_string(),
            value: value.to_string(),
            suggestion: closest_match(&value.trim().to_ascii_lowercase(), allowed),
            allowed: allowed.join(", "),
            span: None,
            src: None,
        }
    }

    fn at(mut self, location: (Option<SourceSpan>, Option<NamedSource<String>>)) -> Self {
        if let ConfigError::UnknownValue { span, src, .. } = &mut self {
            (*span, *src) = location;
        }
        self
    }
}

fn hint(suggestion: Option<&str>, what: &str, list: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? {what}: {list}"),
        None => format!("{what}: {list}"),
    }
}

/// The entry of `vocabulary` most similar to `input`, if any is close enough.
pub fn closest_match(input: &str, vocabulary: &[&str]) -> Option<String> {
    vocabulary
        .iter()
        .map(|&word| (word, strsim::jaro_winkler(input, word)))
        .filter(|&(_, score)| score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(word, _)| word.to_string())
}

/// Convert every error inside a `figment::Error` into a diagnostic.
///
/// `toml_sources` holds `(path, content)` pairs of the files that were
/// merged, used to point at the offending line.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| {
            let path: Vec<String> = error.path.clone();
            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    let (span, src) = locate(&error, &path, field, toml_sources);
                    ConfigError::UnknownKey {
                        key: field.clone(),
                        table: table_label(&path),
                        suggestion: closest_match(field, expected),
                        valid_keys: expected.join(", "),
                        span,
                        src,
                    }
                }
                Kind::UnknownVariant(value, allowed) => {
                    let (table, key) = split_key(&path);
                    ConfigError::unknown_value(&path.join("."), value, allowed)
                        .at(locate(&error, table, key, toml_sources))
                }
                // InvalidValue covers e.g. `seed = -1`.
                Kind::InvalidType(actual, expected) | Kind::InvalidValue(actual, expected) => {
                    type_error(&error, &path, actual.to_string(), expected, toml_sources)
                }
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: field.to_string(),
                    table: table_label(&path),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

fn type_error(
    error: &FigmentError,
    path: &[String],
    actual: String,
    expected: &str,
    toml_sources: &[(String, String)],
) -> ConfigError {
    let (table, key) = split_key(path);
    let (span, src) = locate(error, table, key, toml_sources);
    ConfigError::InvalidType {
        key: path.join("."),
        detail: format!("found {actual}, expected {expected}"),
        expected: expected.to_string(),
        span,
        src,
    }
}

/// `["positions", "0", "gender"]` becomes `(["positions", "0"], "gender")`.
fn split_key(path: &[String]) -> (&[String], &str) {
    match path.split_last() {
        Some((key, table)) => (table, key.as_str()),
        None => (&[], ""),
    }
}

/// `["positions", "1"]` names the second `[[positions]]` entry.
fn array_entry(table: &[String]) -> Option<(&str, usize)> {
    match table {
        [array, index] => index.parse().ok().map(|i| (array.as_str(), i)),
        _ => None,
    }
}

/// How a table path reads in a message.
fn table_label(table: &[String]) -> String {
    if table.is_empty() {
        return "the top level".to_string();
    }
    match array_entry(table) {
        Some((array, i)) => format!("[[{array}]] entry {}", i + 1),
        None => format!("[{}]", table.join(".")),
    }
}

/// Find the source text an error came from and the span of `key` in it.
fn locate(
    error: &FigmentError,
    table: &[String],
    key: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let origin = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| s.file_path());

    let source = match origin {
        Some(file) => toml_sources
            .iter()
            .find(|(name, _)| file == Path::new(name) || file.ends_with(name)),
        // Values tagged by the defaults layer or an inline string.
        None => match toml_sources {
            [only] => Some(only),
            _ => None,
        },
    };

    source
        .and_then(|(name, content)| {
            let offset = key_offset(content, table, key)?;
            Some((
                Some(SourceSpan::new(offset.into(), key.len())),
                Some(NamedSource::new(name, content.clone())),
            ))
        })
        .unwrap_or((None, None))
}

/// Byte offset of `key` inside the TOML table at `table`.
///
/// `["scoring"]` searches under `[scoring]`, `["positions", "1"]` under the
/// second `[[positions]]` header, and an empty path searches the lines
/// before the first header. The search stops at the next header.
pub fn key_offset(content: &str, table: &[String], key: &str) -> Option<usize> {
    let mut lines = line_offsets(content);

    if let Some((array, nth)) = array_entry(table) {
        let header = format!("[[{array}]]");
        lines
            .by_ref()
            .filter(|(_, line)| line.trim() == header)
            .nth(nth)?;
    } else if !table.is_empty() {
        let header = format!("[{}]", table.join("."));
        lines.by_ref().find(|(_, line)| line.trim() == header)?;
    }

    lines
        .take_while(|(_, line)| !line.trim_start().starts_with('['))
        .find_map(|(start, line)| {
            let trimmed = line.trim_start();
            let rest = trimmed.strip_prefix(key)?;
            rest.trim_start()
                .starts_with('=')
                .then(|| start + line.len() - trimmed.len())
        })
}

fn line_offsets(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line.trim_end_matches(['\r', '\n'])))
    })
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "\
gender = \"any\"

[scoring]
jiter = 0.5

[[positions]]
name = \"Gate\"
gender = \"female\"

[[positions]]
name = \"Tower\"
gendre = \"male\"
";

    fn path(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    fn text_at(offset: usize, len: usize) -> &'static str {
        &CONFIG[offset..offset + len]
    }

    #[test]
    fn closest_match_picks_the_best_candidate() {
        let weekdays = ["sunday", "monday", "tuesday", "saturday"];
        assert_eq!(closest_match("caturday", &weekdays).as_deref(), Some("saturday"));
        assert_eq!(closest_match("mnday", &weekdays).as_deref(), Some("monday"));
        assert_eq!(closest_match("zzzzzz", &weekdays), None);
    }

    #[test]
    fn key_offset_stays_inside_its_table() {
        let o = key_offset(CONFIG, &path(&["scoring"]), "jiter").unwrap();
        assert_eq!(text_at(o, 5), "jiter");

        // Top-level lookups never reach into a section.
        assert!(key_offset(CONFIG, &[], "jiter").is_none());
        let top = key_offset(CONFIG, &[], "gender").unwrap();
        assert_eq!(top, 0);
    }

    #[test]
    fn key_offset_finds_the_right_positions_entry() {
        let second = key_offset(CONFIG, &path(&["positions", "1"]), "gendre").unwrap();
        assert_eq!(text_at(second, 6), "gendre");
        assert!(key_offset(CONFIG, &path(&["positions", "0"]), "gendre").is_none());

        let first = key_offset(CONFIG, &path(&["positions", "0"]), "gender").unwrap();
        assert!(CONFIG[first..].starts_with("gender = \"female\""));
        assert!(key_offset(CONFIG, &path(&["positions", "2"]), "name").is_none());
    }

    #[test]
    fn key_offset_needs_an_assignment() {
        let content = "[schedule]\nseed_value = 3\nseed = 4\n";
        let o = key_offset(content, &path(&["schedule"]), "seed").unwrap();
        assert!(content[o..].starts_with("seed = 4"));
    }

    #[test]
    fn tables_are_named_the_way_they_are_written() {
        assert_eq!(table_label(&path(&["scoring"])), "[scoring]");
        assert_eq!(table_label(&path(&["positions", "1"])), "[[positions]] entry 2");
        assert_eq!(
            table_label(&path(&["schedule", "slot_times"])),
            "[schedule.slot_times]"
        );
        assert_eq!(table_label(&[]), "the top level");
    }

    #[test]
    fn unknown_value_suggests_case_insensitively() {
        let err = ConfigError::unknown_value("schedule.week_starts_on", "Caturday", &["saturday"]);
        match &err {
            ConfigError::UnknownValue { suggestion, .. } => {
                assert_eq!(suggestion.as_deref(), Some("saturday"));
            }
            other => panic!("expected UnknownValue, got {other:?}"),
        }
        assert!(err.to_string().contains("schedule.week_starts_on"));
    }

    #[test]
    fn hint_lists_the_vocabulary() {
        assert_eq!(
            hint(Some("jitter"), "accepted keys", "jitter, seed"),
            "did you mean `jitter`? accepted keys: jitter, seed"
        );
        assert_eq!(hint(None, "allowed", "any, male"), "allowed: any, male");
    }
}
