//! # Query Normalization
//!
//! The search tool accepts its query argument in three shapes: plain text, a
//! native JSON object, or a JSON object encoded inside a string (possibly
//! with `\uXXXX` escape sequences still in place). This module resolves any
//! of those into a single search string.
//!
//! Resolution is fail-open: a payload that looks structured but cannot be
//! decoded or parsed is treated as free text. Malformed input must never
//! prevent a search from being attempted.
//!
//! ```rust
//! use mcp_tools::query::{normalize, RawQueryInput};
//! use serde_json::json;
//!
//! // Free text passes through untouched.
//! let q = normalize(RawQueryInput::resolve(json!("  rust web frameworks ")));
//! assert_eq!(q, "rust web frameworks");
//!
//! // Structured input is flattened and gets the boosting suffix.
//! let q = normalize(RawQueryInput::resolve(json!({"artefato": "Java 8"})));
//! assert!(q.starts_with("Java 8"));
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

/// Fixed relevance-boosting terms appended to every structured query.
///
/// These bias the search backend toward lifecycle and recency signals, which
/// is what the technology-modernity callers care about.
pub const BOOST_TERMS: &str = "última versão suporte oficial fim de vida";

/// Canonical category labels keyed by lower-cased synonym.
///
/// Closed, static set: the table is built once at startup and is not
/// extensible at runtime. Canonical labels map to themselves so aliasing is
/// idempotent.
static CATEGORY_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("linguagem", "Linguagem de Programação"),
        ("linguagem de programação", "Linguagem de Programação"),
        ("language", "Linguagem de Programação"),
        ("programming language", "Linguagem de Programação"),
        ("banco", "Banco de Dados"),
        ("bd", "Banco de Dados"),
        ("banco de dados", "Banco de Dados"),
        ("database", "Banco de Dados"),
        ("framework", "Framework"),
        ("so", "Sistema Operacional"),
        ("os", "Sistema Operacional"),
        ("sistema operacional", "Sistema Operacional"),
        ("operating system", "Sistema Operacional"),
        ("biblioteca", "Biblioteca"),
        ("lib", "Biblioteca"),
        ("library", "Biblioteca"),
        ("servidor de aplicação", "Servidor de Aplicação"),
        ("application server", "Servidor de Aplicação"),
        ("ferramenta", "Ferramenta"),
        ("tool", "Ferramenta"),
    ])
});

/// A tool-call query argument of unknown shape, resolved into one of the
/// three shapes the normalizer knows how to handle.
#[derive(Debug, Clone, PartialEq)]
pub enum RawQueryInput {
    /// Plain text with no recoverable structure
    FreeText(String),
    /// A key/value payload, either native or successfully parsed from a string
    Structured(Map<String, Value>),
    /// Any other JSON type (number, bool, array, null)
    Other(Value),
}

impl RawQueryInput {
    /// Resolves a raw argument value into its input shape.
    ///
    /// Strings are probed for a string-encoded object: if the `\u` escape
    /// marker is present the escapes are decoded first, then the candidate is
    /// parsed as a JSON object. Both steps fail open — any failure yields
    /// `FreeText` with the original string trimmed.
    pub fn resolve(value: Value) -> Self {
        match value {
            Value::Object(map) => RawQueryInput::Structured(map),
            Value::String(raw) => {
                let candidate = if raw.contains("\\u") {
                    decode_unicode_escapes(&raw)
                } else {
                    Some(raw.clone())
                };

                match candidate.and_then(|c| serde_json::from_str::<Map<String, Value>>(&c).ok()) {
                    Some(map) => RawQueryInput::Structured(map),
                    None => RawQueryInput::FreeText(raw.trim().to_string()),
                }
            }
            other => RawQueryInput::Other(other),
        }
    }
}

/// Turns a resolved query input into a single search string.
///
/// Free text is returned trimmed and unchanged. Structured input is
/// flattened in insertion order — category values canonicalized, string
/// values trimmed, array elements stringified — and terminated with
/// [`BOOST_TERMS`]. Any other type is stringified and trimmed with no
/// suffix. Never fails.
pub fn normalize(input: RawQueryInput) -> String {
    match input {
        RawQueryInput::FreeText(text) => text,
        RawQueryInput::Other(value) => stringify(&value).trim().to_string(),
        RawQueryInput::Structured(map) => {
            let mut pieces: Vec<String> = Vec::new();

            for (key, value) in &map {
                let is_category =
                    key.eq_ignore_ascii_case("category") || key.eq_ignore_ascii_case("categoria");

                match value {
                    Value::String(s) => {
                        let trimmed = s.trim();
                        let text = if is_category {
                            canonical_category(trimmed)
                        } else {
                            trimmed.to_string()
                        };
                        if !text.is_empty() {
                            pieces.push(text);
                        }
                    }
                    Value::Array(items) => {
                        for item in items {
                            let text = stringify(item).trim().to_string();
                            if !text.is_empty() {
                                pieces.push(text);
                            }
                        }
                    }
                    // Non-text values carry no searchable words
                    _ => {}
                }
            }

            let base = pieces.join(" ");
            format!("{} {}", base, BOOST_TERMS).trim().to_string()
        }
    }
}

/// Maps a category value to its canonical label.
///
/// Lookup is case-insensitive; unknown values pass through unchanged.
pub fn canonical_category(value: &str) -> String {
    CATEGORY_ALIASES
        .get(value.to_lowercase().as_str())
        .map(|canonical| canonical.to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Stringifies a JSON value for concatenation into the query text.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decodes `\uXXXX` escape sequences (including surrogate pairs) to literal
/// characters, leaving every other escape untouched.
///
/// Returns `None` when a `\u` sequence is truncated, non-hex, or forms an
/// invalid surrogate pair; callers fall back to free-text handling.
fn decode_unicode_escapes(input: &str) -> Option<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('u') => {
                let unit = read_hex4(&mut chars)?;
                if (0xD800..0xDC00).contains(&unit) {
                    // High surrogate: the low half must follow immediately.
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return None;
                    }
                    let low = read_hex4(&mut chars)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return None;
                    }
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(code)?);
                } else if (0xDC00..0xE000).contains(&unit) {
                    // Unpaired low surrogate
                    return None;
                } else {
                    out.push(char::from_u32(unit)?);
                }
            }
            // Preserve any other escape verbatim so that JSON string escapes
            // survive for the parse step.
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => return None,
        }
    }

    Some(out)
}

/// Reads exactly four hex digits from the iterator.
fn read_hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..4 {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize_value(value: Value) -> String {
        normalize(RawQueryInput::resolve(value))
    }

    #[test]
    fn test_free_text_unchanged() {
        assert_eq!(normalize_value(json!("plain text query")), "plain text query");
        assert_eq!(normalize_value(json!("  padded  ")), "padded");
    }

    #[test]
    fn test_free_text_has_no_suffix() {
        let result = normalize_value(json!("java frameworks"));
        assert!(!result.contains(BOOST_TERMS));
    }

    #[test]
    fn test_structured_ends_with_suffix() {
        let result = normalize_value(json!({"artefato": "Java 8", "versao": "8"}));
        assert!(result.ends_with(BOOST_TERMS));
        assert!(result.contains("Java 8"));
        assert!(result.contains("8"));
    }

    #[test]
    fn test_category_alias_applied() {
        let result = normalize_value(json!({"categoria": "linguagem", "artefato": "Java 8"}));
        assert!(result.contains("Linguagem de Programação"));
        assert!(result.contains("Java 8"));
        assert!(result.ends_with(BOOST_TERMS));
    }

    #[test]
    fn test_category_key_english_and_case_insensitive() {
        let result = normalize_value(json!({"Category": "database"}));
        assert!(result.contains("Banco de Dados"));
    }

    #[test]
    fn test_category_alias_idempotent() {
        let canonical = "Linguagem de Programação";
        assert_eq!(canonical_category(canonical), canonical);
        let twice = canonical_category(&canonical_category("linguagem"));
        assert_eq!(twice, canonical);
    }

    #[test]
    fn test_unknown_category_passes_through() {
        assert_eq!(canonical_category("Middleware"), "Middleware");
    }

    #[test]
    fn test_string_encoded_object_is_parsed() {
        let encoded = r#"{"categoria": "linguagem", "artefato": "Java 8"}"#;
        let result = normalize_value(json!(encoded));
        assert!(result.contains("Linguagem de Programação"));
        assert!(result.contains("Java 8"));
        assert!(result.ends_with(BOOST_TERMS));
    }

    #[test]
    fn test_unicode_escaped_object_is_decoded() {
        let encoded = "{\"categoria\": \"Linguagem de Programa\\u00e7\\u00e3o\"}";
        let result = normalize_value(json!(encoded));
        assert!(result.contains("Linguagem de Programação"));
        assert!(result.ends_with(BOOST_TERMS));
    }

    #[test]
    fn test_malformed_json_falls_back_to_free_text() {
        let broken = r#"{"categoria": "linguagem""#;
        let result = normalize_value(json!(broken));
        assert_eq!(result, broken);
        assert!(!result.ends_with(BOOST_TERMS));
    }

    #[test]
    fn test_malformed_unicode_escape_falls_back() {
        let broken = r#"{"a": "\uZZZZ"}"#;
        let result = normalize_value(json!(broken));
        assert_eq!(result, broken.trim());
    }

    #[test]
    fn test_unpaired_surrogate_falls_back() {
        assert_eq!(decode_unicode_escapes(r"\ud800 alone"), None);
        assert_eq!(decode_unicode_escapes(r"\udc00"), None);
    }

    #[test]
    fn test_surrogate_pair_decodes() {
        assert_eq!(
            decode_unicode_escapes("\\ud83d\\ude00").as_deref(),
            Some("😀")
        );
    }

    #[test]
    fn test_other_types_stringified_without_suffix() {
        assert_eq!(normalize_value(json!(42)), "42");
        assert_eq!(normalize_value(json!(true)), "true");
        assert_eq!(normalize_value(json!(null)), "null");
    }

    #[test]
    fn test_empty_object_yields_suffix_only() {
        assert_eq!(normalize_value(json!({})), BOOST_TERMS);
    }

    #[test]
    fn test_array_values_contribute_each_element() {
        let result = normalize_value(json!({"tags": ["legacy", 8, " padded "]}));
        assert!(result.contains("legacy"));
        assert!(result.contains('8'));
        assert!(result.contains("padded"));
        assert!(result.ends_with(BOOST_TERMS));
    }

    #[test]
    fn test_non_text_values_are_dropped() {
        let result = normalize_value(json!({"artefato": "Java", "peso": 35, "ativo": true}));
        assert_eq!(result, format!("Java {}", BOOST_TERMS));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let result = normalize_value(json!({"b": "second", "a": "first"}));
        assert!(result.starts_with("second first"));
    }

    #[test]
    fn test_modernity_probe_payload() {
        let result = normalize_value(json!({"categoria": "linguagem", "artefato": "Java 8"}));
        assert!(result.contains("Linguagem de Programação"));
        assert!(result.contains("Java 8"));
        assert!(result.ends_with(BOOST_TERMS));
    }
}
