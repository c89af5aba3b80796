//! Word counting
//!
//! Approximates how word processors count words, rather than naively
//! splitting on whitespace: a dash standing between words separates them, a
//! hyphen inside a compound does not, and punctuation glued to a word never
//! fuses two words into one token.
//!
//! The same paragraph text always yields the same count, so totals computed
//! at skip-check time agree with the per-part sums computed while packing.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Dash (hyphen, en or em) with whitespace on both sides: a separator.
static SPACED_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s[-\u{2013}\u{2014}]\s").unwrap());

/// Hyphen directly between word characters: an intra-word join.
static INTERNAL_HYPHEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)-(\w+)").unwrap());

/// Closing punctuation immediately followed by a word character.
static CLOSING_PUNCT_BEFORE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([,.;:!?)\]}"])(\w)"#).unwrap());

/// Word character immediately followed by opening punctuation.
static WORD_BEFORE_OPENING_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\w)([(\[{"])"#).unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Contractions such as `don't`, detected for diagnostics only.
static CONTRACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+'[a-z]+\b").unwrap());

/// Multi-period abbreviations such as `U.S.A.`, detected for diagnostics only.
static ABBREVIATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:[A-Z]\.){2,}").unwrap());

/// Count the words in `text`.
///
/// Rules, applied in order:
///
/// 1. Non-breaking spaces behave like regular spaces.
/// 2. A dash with whitespace on both sides separates words.
/// 3. A hyphen directly between word characters joins them: `well-known`
///    counts once. The hyphen is protected through tokenization with a
///    marker and conceptually restored afterwards; since the marker is
///    itself a word character, restoration cannot change the count.
/// 4. Punctuation never fuses adjacent words: a space is inserted between
///    closing punctuation and a following word character, and between a
///    word character and following opening punctuation.
/// 5. Whitespace runs collapse to single spaces and the remaining
///    space-separated tokens are counted.
///
/// Empty or whitespace-only input counts zero.
pub fn count_words(text: &str) -> usize {
    if text.trim().is_empty() {
        return 0;
    }

    let text = text.replace('\u{00a0}', " ");
    let text = SPACED_DASH.replace_all(&text, " ");
    let text = INTERNAL_HYPHEN.replace_all(&text, "${1}_HYPHEN_${2}");
    let text = CLOSING_PUNCT_BEFORE_WORD.replace_all(&text, "${1} ${2}");
    let text = WORD_BEFORE_OPENING_PUNCT.replace_all(&text, "${1} ${2}");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    let text = text.trim();

    // Recognized but deliberately not adjusted for; the tokenization above
    // already treats a contraction as one word.
    if tracing::enabled!(tracing::Level::TRACE) {
        let contractions = CONTRACTION.find_iter(text).count();
        let abbreviations = ABBREVIATION.find_iter(text).count();
        if contractions > 0 || abbreviations > 0 {
            trace!(contractions, abbreviations, "special token forms seen");
        }
    }

    text.split(' ').filter(|token| !token.is_empty()).count()
}

/// Format a word count with thousands separators: `12345` becomes `12,345`.
pub fn format_word_count(count: usize) -> String {
    let digits = count.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}
