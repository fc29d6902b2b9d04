use once_cell::sync::Lazy;
use regex::Regex;

// Line comments to end of line, block comments non-greedy across lines.
// A syntactic token count, not an AST-aware one: it works across all
// supported languages at the cost of false positives inside string
// literals.
static COMMENT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("comment token regex"));

/// Count syntactic comment tokens in a text
pub fn count_comment_tokens(text: &str) -> usize {
    COMMENT_TOKEN.find_iter(text).count()
}

/// Net change in comment tokens between the original and annotated
/// content. May be negative when the annotated text lost comments.
pub fn comment_delta(original: &str, annotated: &str) -> i64 {
    count_comment_tokens(annotated) as i64 - count_comment_tokens(original) as i64
}
