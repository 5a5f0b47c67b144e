use once_cell::sync::Lazy;
use onig::{Regex, RegexOptions, Syntax};

use crate::error::BuildResult;

pub fn re(regex: &str) -> BuildResult<Regex> {
    Regex::with_options(regex, RegexOptions::REGEX_OPTION_NONE, Syntax::ruby())
}

pub fn re_i(regex: &str) -> BuildResult<Regex> {
    Regex::with_options(regex, RegexOptions::REGEX_OPTION_IGNORECASE, Syntax::ruby())
}

/// The full set of line separators recognized by Python's
/// `str.splitlines()`, used to keep the abbreviation replacer's per-line pass
/// faithful to the reference implementation it was ported from.
const PYTHON_NEWLINES: &[&str] = &[
    "\r\n",     // Carriage Return + Line Feed
    "\n",       // Line Feed
    "\r",       // Carriage Return
    "\x0b",     // Line Tabulation
    "\x0c",     // Form Feed
    "\x1c",     // File Separator
    "\x1d",     // Group Separator
    "\x1e",     // Record Separator
    "\u{85}",   // Next Line (C1 Control Code)
    "\u{2028}", // Line Separator
    "\u{2029}", // Paragraph Separator
];

static PYTHON_NEWLINE_MATCHER: Lazy<aho_corasick::AhoCorasick> = Lazy::new(|| {
    aho_corasick::AhoCorasickBuilder::new()
        .match_kind(aho_corasick::MatchKind::LeftmostFirst)
        .dfa(true)
        .build(PYTHON_NEWLINES)
});

/// Rust implementation of Python's [`str.splitlines(keepends=True)`][ref].
///
/// [ref]: https://docs.python.org/3/library/stdtypes.html#str.splitlines
pub fn splitlines_keepends(input: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut last_index = 0;
    for mat in PYTHON_NEWLINE_MATCHER.find_iter(input) {
        lines.push(&input[last_index..mat.end()]);
        last_index = mat.end();
    }
    if last_index < input.len() {
        lines.push(&input[last_index..]);
    }
    lines
}

/// Rust implementation of Python's [`str.isupper()`][ref]: true when there is
/// at least one cased character and every cased character is uppercase.
///
/// [ref]: https://docs.python.org/3/library/stdtypes.html#str.isupper
pub fn python_isupper(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if unic_ucd_case::is_cased(c) && c.is_uppercase() {
            cased = true;
        } else if unic_ucd_case::is_cased(c) && c.is_lowercase() {
            return false;
        }
    }
    cased
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splitlines_keepends() {
        let input = "x\nx\rx\r\nx\x0bx\x0cx\x1cx\x1dx\x1ex\u{85}x\u{2028}x\u{2029}";
        let expected = [
            "x\n",
            "x\r",
            "x\r\n",
            "x\x0b",
            "x\x0c",
            "x\x1c",
            "x\x1d",
            "x\x1e",
            "x\u{85}",
            "x\u{2028}",
            "x\u{2029}",
        ];
        assert_eq!(splitlines_keepends(input), expected.to_vec());

        let input = "\n\na";
        assert_eq!(splitlines_keepends(input), vec!["\n", "\n", "a"]);

        assert_eq!(splitlines_keepends(""), Vec::<&str>::new());
    }

    #[test]
    fn test_python_isupper() {
        assert!(!python_isupper("abc"));
        assert!(!python_isupper("123"));
        assert!(python_isupper("A_B"));
        assert!(!python_isupper("a_b"));
        assert!(python_isupper("A1"));
        assert!(python_isupper("1A"));
        assert!(!python_isupper("a1"));
        assert!(!python_isupper("1a"));
    }
}
