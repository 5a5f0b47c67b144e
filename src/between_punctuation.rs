//! Masks sentence-ending punctuation that falls *inside* a quoted or
//! parenthesized span, so a period inside `"He said "Go." and left"` does not
//! register as a boundary.

use once_cell::sync::Lazy;
use onig::{Captures, Regex};

use crate::error::BuildResult;
use crate::sentinel;
use crate::util::re;

/// Which bracket/quote pairs a language additionally protects, beyond the
/// Latin-script set every profile shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketSet {
    Standard,
    /// `《》`, `「」`, `『』`, `（）`.
    Chinese,
    /// `（）`, `「」`, `『』` — narrower than Chinese, no angle quotes.
    Japanese,
}

enum MatchType {
    Single,
    Other,
}

fn replace_punctuation(matched: &str, match_type: MatchType) -> String {
    const ESCAPE_PAIRS: &[(char, &str)] = &[('(', "\\("), (')', "\\)"), ('[', "\\["), (']', "\\]"), ('-', "\\-")];

    let needs_escape = matched.chars().any(|c| matches!(c, '(' | ')' | '[' | ']' | '-'));
    let mut text = matched.to_string();
    if needs_escape {
        for &(orig, escaped) in ESCAPE_PAIRS {
            text = text.replace(orig, escaped);
        }
    }

    text = text.replace('.', "∯");
    text = text.replace('。', sentinel::CJK_PERIOD);
    text = text.replace('．', sentinel::CJK_FULLWIDTH_PERIOD);
    text = text.replace('！', sentinel::CJK_BANG);
    text = text.replace('!', sentinel::BANG);
    text = text.replace('?', sentinel::QUESTION);
    text = text.replace('？', sentinel::CJK_QUESTION);

    if matches!(match_type, MatchType::Other) {
        text = text.replace('\'', sentinel::APOSTROPHE);
    }

    if needs_escape {
        for &(orig, escaped) in ESCAPE_PAIRS {
            text = text.replace(escaped, &orig.to_string());
        }
    }
    text
}

struct Patterns {
    between_single_quotes: Regex,
    between_single_quote_slanted: Regex,
    between_double_quotes: Regex,
    between_square_brackets: Regex,
    between_parens: Regex,
    between_quote_arrow: Regex,
    between_quote_slanted: Regex,
    between_em_dashes: Regex,
    word_with_leading_apostrophe: Regex,
    quote_space: Regex,

    chinese_double_angled: Regex,
    chinese_l_bracket: Regex,
    chinese_corner_quotes: Regex,
    chinese_parens: Regex,

    japanese_parens: Regex,
    japanese_quotes: Regex,
    japanese_corner_quotes: Regex,
}

impl Patterns {
    fn new() -> BuildResult<Self> {
        Ok(Patterns {
            // Example: http://rubular.com/r/2YFrKWQUYi
            between_single_quotes: re(r"(?<=\s)'(?:[^']|'[a-zA-Z])*'")?,
            between_single_quote_slanted: re(r"(?<=\s)\x{2018}(?:[^\x{2019}]|\x{2019}[a-zA-Z])*\x{2019}")?,
            between_double_quotes: re(r#""(?=(?<tmp>[^"\\]+|\\{2}|\\.)*)\k<tmp>""#)?,
            between_square_brackets: re(r"\[(?=(?<tmp>[^\]\\]+|\\{2}|\\.)*)\k<tmp>\]")?,
            between_parens: re(r"\((?=(?<tmp>[^\(\)\\]+|\\{2}|\\.)*)\k<tmp>\)")?,
            between_quote_arrow: re(r"\x{ab}(?=(?<tmp>[^\x{bb}\\]+|\\{2}|\\.)*)\k<tmp>\x{bb}")?,
            between_quote_slanted: re(r"\x{201c}(?=(?<tmp>[^\x{201d}\\]+|\\{2}|\\.)*)\k<tmp>\x{201d}")?,
            between_em_dashes: re(r"--(?=(?<tmp>[^--]*))\k<tmp>--")?,
            // Example: http://rubular.com/r/mXf8cW025o
            word_with_leading_apostrophe: re(r"(?<=\s)'(?:[^']|'[a-zA-Z])*'\S")?,
            quote_space: re(r"'\s")?,

            chinese_double_angled: re(r"\x{300a}(?=(?<tmp>[^\x{300b}\\]+|\\{2}|\\.)*)\k<tmp>\x{300b}")?,
            chinese_l_bracket: re(r"\x{300c}(?=(?<tmp>[^\x{300d}\\]+|\\{2}|\\.)*)\k<tmp>\x{300d}")?,
            chinese_corner_quotes: re(r"\x{300e}(?=(?<tmp>[^\x{300f}\\]+|\\{2}|\\.)*)\k<tmp>\x{300f}")?,
            chinese_parens: re(r"\x{ff08}(?=(?<tmp>[^\x{ff09}\\]+|\\{2}|\\.)*)\k<tmp>\x{ff09}")?,

            japanese_parens: re(r"\x{ff08}(?=(?<tmp>[^\x{ff08}\x{ff09}]+|\\{2}|\\.)*)\k<tmp>\x{ff09}")?,
            japanese_quotes: re(r"\x{300c}(?=(?<tmp>[^\x{300c}\x{300d}]+|\\{2}|\\.)*)\k<tmp>\x{300d}")?,
            japanese_corner_quotes: re(r"\x{300e}(?=(?<tmp>[^\x{300e}\x{300f}]+|\\{2}|\\.)*)\k<tmp>\x{300f}")?,
        })
    }

    fn replace(&self, text: &str, brackets: BracketSet) -> String {
        let text = self.sub_single_quotes(text);
        let text = self.between_single_quote_slanted.replace_all(&text, |c: &Captures| {
            replace_punctuation(c.at(0).unwrap(), MatchType::Other)
        });
        let text = self
            .between_double_quotes
            .replace_all(&text, |c: &Captures| replace_punctuation(c.at(0).unwrap(), MatchType::Other));
        let text = self
            .between_square_brackets
            .replace_all(&text, |c: &Captures| replace_punctuation(c.at(0).unwrap(), MatchType::Other));
        let text = self
            .between_parens
            .replace_all(&text, |c: &Captures| replace_punctuation(c.at(0).unwrap(), MatchType::Other));

        let text = match brackets {
            BracketSet::Standard => self
                .between_quote_arrow
                .replace_all(&text, |c: &Captures| replace_punctuation(c.at(0).unwrap(), MatchType::Other)),
            BracketSet::Chinese => {
                let text = self
                    .chinese_double_angled
                    .replace_all(&text, |c: &Captures| replace_punctuation(c.at(0).unwrap(), MatchType::Other));
                let text = self
                    .chinese_l_bracket
                    .replace_all(&text, |c: &Captures| replace_punctuation(c.at(0).unwrap(), MatchType::Other));
                let text = self
                    .chinese_corner_quotes
                    .replace_all(&text, |c: &Captures| replace_punctuation(c.at(0).unwrap(), MatchType::Other));
                self.chinese_parens
                    .replace_all(&text, |c: &Captures| replace_punctuation(c.at(0).unwrap(), MatchType::Other))
            }
            BracketSet::Japanese => {
                let text = self
                    .japanese_parens
                    .replace_all(&text, |c: &Captures| replace_punctuation(c.at(0).unwrap(), MatchType::Other));
                let text = self
                    .japanese_quotes
                    .replace_all(&text, |c: &Captures| replace_punctuation(c.at(0).unwrap(), MatchType::Other));
                self.japanese_corner_quotes
                    .replace_all(&text, |c: &Captures| replace_punctuation(c.at(0).unwrap(), MatchType::Other))
            }
        };

        let text = self
            .between_em_dashes
            .replace_all(&text, |c: &Captures| replace_punctuation(c.at(0).unwrap(), MatchType::Other));

        if matches!(brackets, BracketSet::Standard) {
            self.between_quote_slanted
                .replace_all(&text, |c: &Captures| replace_punctuation(c.at(0).unwrap(), MatchType::Other))
        } else {
            text
        }
    }

    fn sub_single_quotes(&self, text: &str) -> String {
        if self.word_with_leading_apostrophe.find(text).is_some() && self.quote_space.find(text).is_none() {
            return text.to_string();
        }
        self.between_single_quotes
            .replace_all(text, |c: &Captures| replace_punctuation(c.at(0).unwrap(), MatchType::Single))
    }
}

static PATTERNS: Lazy<Patterns> =
    Lazy::new(|| Patterns::new().expect("between-punctuation regexes are static and must compile"));

/// Masks `. ! ? 。 ！ ？ ．` and the quote character itself wherever they occur
/// inside a matched quoted/bracketed/parenthesized span.
pub fn replace(text: &str, brackets: BracketSet) -> String {
    PATTERNS.replace(text, brackets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_inside_double_quotes_is_masked() {
        let out = replace(r#"She said "Go. Now." to him."#, BracketSet::Standard);
        assert!(out.contains("Go∯ Now∯"));
    }

    #[test]
    fn period_inside_parens_is_masked() {
        let out = replace("Many e.g. (i.e. also) are used.", BracketSet::Standard);
        assert!(out.contains("i.e∯ also"));
    }

    #[test]
    fn single_quote_word_internal_apostrophe_is_left_alone() {
        let input = "It's John's book.";
        let out = replace(input, BracketSet::Standard);
        assert_eq!(out, input);
    }

    #[test]
    fn chinese_corner_brackets_are_masked() {
        let out = replace("他说「你好。再见。」然后走了。", BracketSet::Chinese);
        assert!(out.contains("你好∯再见∯"));
    }

    #[test]
    fn japanese_parens_are_masked() {
        let out = replace("これは（一。二。）です。", BracketSet::Japanese);
        assert!(out.contains("一∯二∯"));
    }
}
