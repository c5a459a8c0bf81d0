//! Property name sanitization.
//!
//! Property keys are the only input-derived text placed inside a query
//! template, so they are reduced to lower-case ASCII letters, digits and
//! underscores before use.

use std::sync::LazyLock;

use regex::Regex;

use crate::error_handling::{ConfigurationError, WarningTally};

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\s_-]").expect("valid punctuation pattern"));
static LOWER_TO_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z]+)").expect("valid camel case pattern"));
static ACRONYM_TO_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").expect("valid acronym pattern"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid separator pattern"));

/// Groovy keywords; a property named after one is prefixed with `_`.
const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "def", "default", "do", "double", "else", "enum", "extends", "false",
    "final", "finally", "float", "for", "goto", "if", "implements", "import", "in", "instanceof",
    "int", "interface", "long", "native", "new", "null", "package", "private", "protected",
    "public", "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "threadsafe", "throw", "throws", "trait", "transient", "true", "try", "var", "void",
    "volatile", "while",
];

/// Strips punctuation, converts to snake_case and lower-cases.
///
/// `"Population (2016)"` becomes `"population_2016"`, `"zipCode"` becomes
/// `"zip_code"`.
pub fn to_snake_case(raw: &str) -> String {
    let stripped = PUNCTUATION.replace_all(raw, "");
    let trimmed = stripped.trim();
    let split = LOWER_TO_UPPER.replace_all(trimmed, "${1}_${2}");
    let split = ACRONYM_TO_WORD.replace_all(&split, "${1}_${2}");
    SEPARATORS.replace_all(&split, "_").to_lowercase()
}

/// Keys Gremlin reserves for element identity; servers refuse them as properties.
const RESERVED_KEYS: &[&str] = &["id", "label"];

pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

pub fn is_reserved_key(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

/// Sanitizes a column or triple name into a property key.
///
/// A key that collides with a Groovy keyword or a reserved Gremlin key is
/// prefixed with `_` and the rename is recorded in `warnings`.
///
/// # Errors
///
/// Returns `ConfigurationError::EmptyPropertyName` when nothing is left of the
/// name once punctuation is removed.
pub fn sanitize_property_name(
    raw: &str,
    warnings: &mut WarningTally,
) -> Result<String, ConfigurationError> {
    let name = to_snake_case(raw);
    if name.is_empty() {
        return Err(ConfigurationError::EmptyPropertyName {
            name: raw.to_string(),
        });
    }
    if is_reserved_word(&name) {
        let renamed = format!("_{name}");
        warnings.record(format!(
            "Property \"{name}\" conflicts with groovy syntax, automatically changed to: \"{renamed}\""
        ));
        return Ok(renamed);
    }
    if is_reserved_key(&name) {
        let renamed = format!("_{name}");
        warnings.record(format!(
            "Property \"{name}\" is a reserved gremlin key, automatically changed to: \"{renamed}\""
        ));
        return Ok(renamed);
    }
    Ok(name)
}
