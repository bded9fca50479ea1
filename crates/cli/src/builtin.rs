//! Bundled SQL formatting providers.
//!
//! The CLI ships two small formatters so the picker commands work out of the
//! box: one uppercases SQL keywords, one compacts whitespace. Both leave
//! single-quoted string literals untouched.

use std::sync::Arc;

use sqltools_formatters::{
    DocumentFormattingProvider, FormatError, FormatterRegistry, RangeFormattingProvider,
};
use sqltools_types::{Document, Range, TextEdit};

const KEYWORDS: &[&str] = &[
    "all", "and", "as", "asc", "by", "create", "delete", "desc", "distinct", "drop", "exists",
    "from", "group", "having", "in", "inner", "insert", "into", "is", "join", "left", "like",
    "limit", "not", "null", "on", "or", "order", "outer", "right", "select", "set", "table",
    "union", "update", "values", "where",
];

/// Uppercases SQL keywords outside string literals.
pub struct KeywordCaser;

impl KeywordCaser {
    fn rewrite(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut word = String::new();
        let mut in_string = false;
        for ch in text.chars() {
            if in_string {
                out.push(ch);
                if ch == '\'' {
                    in_string = false;
                }
                continue;
            }
            if ch.is_ascii_alphanumeric() || ch == '_' {
                word.push(ch);
                continue;
            }
            flush_word(&mut word, &mut out);
            out.push(ch);
            if ch == '\'' {
                in_string = true;
            }
        }
        flush_word(&mut word, &mut out);
        out
    }
}

fn flush_word(word: &mut String, out: &mut String) {
    if word.is_empty() {
        return;
    }
    if KEYWORDS.contains(&word.to_ascii_lowercase().as_str()) {
        out.push_str(&word.to_ascii_uppercase());
    } else {
        out.push_str(word);
    }
    word.clear();
}

impl DocumentFormattingProvider for KeywordCaser {
    fn display_name(&self) -> &str {
        "Uppercase Keywords"
    }

    fn extension_id(&self) -> Option<&str> {
        Some("sqltools.keyword-casing")
    }

    fn format_document(&self, document: &Document) -> Result<Vec<TextEdit>, FormatError> {
        let range = document.full_range();
        Ok(vec![TextEdit::new(range, Self::rewrite(&document.text()))])
    }
}

impl RangeFormattingProvider for KeywordCaser {
    fn display_name(&self) -> &str {
        "Uppercase Keywords"
    }

    fn extension_id(&self) -> Option<&str> {
        Some("sqltools.keyword-casing")
    }

    fn format_range(&self, document: &Document, range: Range) -> Result<Vec<TextEdit>, FormatError> {
        Ok(vec![TextEdit::new(
            range,
            Self::rewrite(&document.text_in_range(range)),
        )])
    }
}

/// Collapses runs of blanks to single spaces and strips leading and trailing
/// whitespace per line.
pub struct WhitespaceCompactor;

impl WhitespaceCompactor {
    fn rewrite(text: &str) -> String {
        text.split('\n')
            .map(Self::rewrite_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn rewrite_line(line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut in_string = false;
        let mut pending_space = false;
        for ch in line.chars() {
            if in_string {
                out.push(ch);
                if ch == '\'' {
                    in_string = false;
                }
                continue;
            }
            if ch == ' ' || ch == '\t' {
                if !out.is_empty() {
                    pending_space = true;
                }
                continue;
            }
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
            if ch == '\'' {
                in_string = true;
            }
        }
        out
    }
}

impl RangeFormattingProvider for WhitespaceCompactor {
    fn display_name(&self) -> &str {
        "Compact Whitespace"
    }

    fn extension_id(&self) -> Option<&str> {
        Some("sqltools.compact-whitespace")
    }

    fn format_range(&self, document: &Document, range: Range) -> Result<Vec<TextEdit>, FormatError> {
        Ok(vec![TextEdit::new(
            range,
            Self::rewrite(&document.text_in_range(range)),
        )])
    }
}

/// The registry the CLI commands run against.
///
/// `KeywordCaser` registers for both surfaces; `WhitespaceCompactor` is
/// range-only and reaches the document picker through synthesis.
pub fn registry() -> FormatterRegistry {
    let keyword_caser = Arc::new(KeywordCaser);
    let mut registry = FormatterRegistry::new();
    registry.register_document("sql", keyword_caser.clone());
    registry.register_range("sql", keyword_caser);
    registry.register_range("sql", Arc::new(WhitespaceCompactor));
    registry
}
