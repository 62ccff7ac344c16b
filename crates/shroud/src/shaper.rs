//! Cosmetic source transform ("code shaping").
//!
//! Single pass, order-sensitive: strip line comments, strip block comments,
//! collapse whitespace, rewrite quoted string literals into
//! `String.fromCharCode(..)` concatenations. Escaped closing quotes are
//! honored when finding a literal's end.
//!
//! This is a best-effort textual rewrite, not a parser, and not a
//! confidentiality mechanism. Known limitations, kept by design:
//!
//! - comment markers inside string literals are treated as comments
//!   (comments are stripped before literals are recognized);
//! - escape sequences in literal bodies are re-emitted as their raw
//!   characters (backslash included), as the original transform does;
//! - template literals are rewritten like plain strings, so interpolation
//!   expressions lose their meaning.

use std::sync::LazyLock;

use regex::Regex;

static LINE_COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)//.*$").expect("valid line comment pattern"));

static BLOCK_COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid block comment pattern"));

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

// One alternation per quote kind; the regex engine here has no
// backreferences, so the closing-quote constraint is encoded per branch.
// `\\.` before the negated class makes escaped quotes part of the body.
static STRING_LITERALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'((?:\\.|[^'\\])*)'|"((?:\\.|[^"\\])*)"|`((?:\\.|[^`\\])*)`"#)
        .expect("valid string literal pattern")
});

fn char_codes(body: &str) -> String {
    if body.is_empty() {
        return "(\"\")".to_string();
    }

    let mut out = String::with_capacity(body.len() * 24 + 2);
    out.push('(');
    for (i, c) in body.chars().enumerate() {
        if i > 0 {
            out.push('+');
        }
        out.push_str(&format!("String.fromCharCode({})", c as u32));
    }
    out.push(')');
    out
}

/// Apply the shaping transform to `source`.
pub fn shape(source: &str) -> String {
    let src = LINE_COMMENTS.replace_all(source, "");
    let src = BLOCK_COMMENTS.replace_all(&src, "");
    let src = WHITESPACE_RUNS.replace_all(&src, " ");
    STRING_LITERALS
        .replace_all(&src, |caps: &regex::Captures<'_>| {
            let body = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or("");
            char_codes(body)
        })
        .into_owned()
}
