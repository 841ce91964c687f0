//! Text cleanup for names that end up in CSV cells and console lines.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

const TRADEMARK_SYMBOLS: [char; 3] = ['™', '®', '©'];

/// Normalizes arbitrary text into a CSV-safe, display-safe string.
///
/// The pipeline:
/// 1. `+` becomes a space (undoes form-encoding of spaces)
/// 2. Strip `™`, `®`, `©`
/// 3. NFKC normalization
/// 4. Tabs and line breaks become spaces; other control and format
///    characters are dropped
/// 5. Collapse whitespace runs
/// 6. Trim
///
/// Empty input is returned unchanged.
#[must_use]
pub fn sanitize_text(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let cleaned: String = input
        .chars()
        .filter(|c| !TRADEMARK_SYMBOLS.contains(c))
        .map(|c| if c == '+' { ' ' } else { c })
        .nfkc()
        .filter_map(|c| match c {
            '\t' | '\r' | '\n' => Some(' '),
            c if c.is_control() || is_format_char(c) => None,
            c => Some(c),
        })
        .collect();

    WHITESPACE_RUN_RE
        .replace_all(&cleaned, " ")
        .trim()
        .to_string()
}

/// Unicode general category `Cf` (format characters) as of Unicode 15.0:
/// zero-width spaces and joiners, bidi controls, the BOM, soft hyphen and the
/// tag characters.
fn is_format_char(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{0890}'..='\u{0891}'
            | '\u{08E2}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{110BD}'
            | '\u{110CD}'
            | '\u{13430}'..='\u{1343F}'
            | '\u{1BCA0}'..='\u{1BCA3}'
            | '\u{1D173}'..='\u{1D17A}'
            | '\u{E0001}'
            | '\u{E0020}'..='\u{E007F}'
    )
}
