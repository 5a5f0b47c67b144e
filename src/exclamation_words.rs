//! A handful of proper nouns contain a literal `!` that is not a sentence
//! terminator (`Yahoo!`, `!Kung`, ...). Mask those before the boundary regex
//! ever sees them.

use once_cell::sync::Lazy;
use onig::{Captures, Regex};

use crate::sentinel;
use crate::util::re;

#[rustfmt::skip]
const EXCLAMATION_WORDS: &[&str] = &[
    "!Xũ", "!Kung", "ǃʼOǃKung", "!Xuun", "!Kung-Ekoka", "ǃHu", "ǃKhung", "ǃKu",
    "ǃung", "ǃXo", "ǃXû", "ǃXung", "ǃXũ", "!Xun", "Yahoo!", "Y!J", "Yum!",
];

fn escape_literal(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        if matches!(c, '.' | '\\' | '+' | '*' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '/' | '!') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

static EXCLAMATION_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = EXCLAMATION_WORDS.iter().map(|w| escape_literal(w)).collect::<Vec<_>>().join("|");
    re(&pattern).expect("exclamation word list compiles")
});

/// Masks the `!` inside any of [`EXCLAMATION_WORDS`] so it survives to the
/// output sentence intact.
pub fn apply_rules(text: &str) -> String {
    EXCLAMATION_RE.replace_all(text, |c: &Captures| {
        c.at(0).unwrap().replace('!', sentinel::BANG)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yahoo_bang_is_masked() {
        let out = apply_rules("I searched on Yahoo! for the answer.");
        assert!(out.contains(sentinel::BANG));
        assert!(!out.contains("Yahoo!"));
    }

    #[test]
    fn ordinary_exclamation_is_untouched() {
        let input = "Stop right there!";
        assert_eq!(apply_rules(input), input);
    }
}
