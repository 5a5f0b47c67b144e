//! Destructive text normalization that runs before the [`crate::processor::Processor`]
//! when a [`crate::Segmenter`] is constructed with `clean = true` (spec §4.8).
//!
//! Transcribed from `original_source/sentencesplit/cleaner.py::clean`. Unlike
//! every other stage in this crate, `Cleaner` does not preserve a
//! non-destructive round trip — it exists specifically to repair OCR/PDF
//! artifacts and HTML/Markdown leftovers before the real segmentation runs.

use once_cell::sync::Lazy;
use onig::Regex;

use crate::error::BuildResult;
use crate::language;
use crate::rule::Rule;
use crate::util::re;

struct Cleaner {
    newline_mid_sentence_rule: Rule,
    newline_mid_word_rule: Rule,
    double_newline_rule: Rule,

    newline_after_period_before_capital: Regex,
    pdf_hyphenated_linebreak_rule: Rule,
    pdf_bulleted_linebreak_rule: Rule,

    escaped_newline_rule: Rule,
    escaped_carriage_return_rule: Rule,

    html_tag_rule: Rule,
    html_entity_rules: Vec<Rule>,

    bracket_question_mark_rule: Rule,

    markdown_bold_rule: Rule,
    markdown_italic_rule: Rule,

    backtick_quote_rule: Rule,
    smart_quote_pair_rule: Rule,
    smart_single_quote_pair_rule: Rule,

    toc_leader_dots_rule: Rule,
    consecutive_period_rule: Rule,
    consecutive_slash_rule: Rule,

    no_space_between_sentences_regex: Regex,
    url_like_regex: Regex,

    japanese_newline_in_word_rule: Rule,
}

impl Cleaner {
    fn new() -> BuildResult<Self> {
        Ok(Cleaner {
            // A newline between two non-terminal characters is mid-sentence;
            // collapse it to a single space.
            newline_mid_sentence_rule: Rule::new(r"(?<=[^.!?\n])\n(?=[^\n])", " ")?,
            // A newline directly between two word characters is a hard-wrapped
            // word; join with no space at all.
            newline_mid_word_rule: Rule::new(r"(?<=\w)\n(?=\w)", "")?,
            double_newline_rule: Rule::new(r"\n\s*\n", "\n")?,

            newline_after_period_before_capital: re(r"(?<=[.!?])\n(?=[A-Z])")?,
            pdf_hyphenated_linebreak_rule: Rule::new(r"-\n(?=\w)", "")?,
            pdf_bulleted_linebreak_rule: Rule::new(r"\n(?=[•▪◦]\s)", "\r")?,

            escaped_newline_rule: Rule::new(r"\\n", "\n")?,
            escaped_carriage_return_rule: Rule::new(r"\\r", "\r")?,

            html_tag_rule: Rule::new(r"<[^>]*>", "")?,
            html_entity_rules: vec![
                Rule::new("&nbsp;", " ")?,
                Rule::new("&amp;", "&")?,
                Rule::new("&lt;", "<")?,
                Rule::new("&gt;", ">")?,
                Rule::new("&quot;", "\"")?,
                Rule::new("&#39;", "'")?,
            ],

            // Does not touch `.`/`!` inside the bracketed aside, only `?`.
            bracket_question_mark_rule: Rule::new(r"(?<=\[[^\]]{0,200})\?(?=[^\[]{0,200}\])", "∯")?,

            markdown_bold_rule: Rule::new(r"\*(\S(?:[^*]*\S)?)\*", "\\1")?,
            markdown_italic_rule: Rule::new(r"(?<=\s|^)_(\S(?:[^_]*\S)?)_(?=\s|$)", "\\1")?,

            backtick_quote_rule: Rule::new("`", "'")?,
            smart_quote_pair_rule: Rule::new(r#"\x{201c}(\S(?:[^\x{201d}]*\s[^\x{201d}]*)?)\x{201d}"#, "\"\\1\"")?,
            smart_single_quote_pair_rule: Rule::new(
                r"\x{2018}(\S(?:[^\x{2019}]*\s[^\x{2019}]*)?)\x{2019}",
                "'\\1'",
            )?,

            toc_leader_dots_rule: Rule::new(r"\.{4,}", ".")?,
            consecutive_period_rule: Rule::new(r"\.{2,}", ".")?,
            consecutive_slash_rule: Rule::new(r"/{2,}", "/")?,

            // Lowercase-or-digit, period, uppercase, with nothing but
            // non-space characters in between: a sentence boundary with no
            // space after the period.
            no_space_between_sentences_regex: re(r"(?<=[a-z0-9])\.(?=[A-Z])")?,
            url_like_regex: re(r"(?i)https?://|www\.|@|\.com|\.org|\.net")?,

            japanese_newline_in_word_rule: Rule::new(
                &format!(r"(?<=[{0}])\n(?=[{0}])", language::japanese_word_char_class()),
                "",
            )?,
        })
    }

    fn clean(&self, text: &str, lang_code: &str, pdf: bool) -> String {
        let text = self.newline_mid_sentence_rule.replace_all(text);
        let text = if lang_code == "ja" {
            self.japanese_newline_in_word_rule.replace_all(&text)
        } else {
            self.newline_mid_word_rule.replace_all(&text)
        };
        let text = self.double_newline_rule.replace_all(&text);

        let text = if pdf {
            let text = self.pdf_hyphenated_linebreak_rule.replace_all(&text);
            self.pdf_bulleted_linebreak_rule.replace_all(&text)
        } else {
            self.newline_after_period_before_capital.replace_all(&text, "\r")
        };
        let text = text.replace('\n', "\r");

        let text = self.escaped_newline_rule.replace_all(&text);
        let text = self.escaped_carriage_return_rule.replace_all(&text);

        let text = self.html_tag_rule.replace_all(&text);
        let mut text = text;
        for rule in &self.html_entity_rules {
            text = rule.replace_all(&text);
        }

        let text = self.bracket_question_mark_rule.replace_all(&text);

        let text = self.markdown_bold_rule.replace_all(&text);
        let text = self.markdown_italic_rule.replace_all(&text);

        let text = self.backtick_quote_rule.replace_all(&text);
        let text = self.smart_quote_pair_rule.replace_all(&text);
        let text = self.smart_single_quote_pair_rule.replace_all(&text);

        let text = self.toc_leader_dots_rule.replace_all(&text);
        let text = self.consecutive_period_rule.replace_all(&text);
        let text = self.consecutive_slash_rule.replace_all(&text);

        let text = self.repair_missing_space(&text);

        let text = self.consecutive_period_rule.replace_all(&text);
        self.consecutive_slash_rule.replace_all(&text)
    }

    fn repair_missing_space(&self, text: &str) -> String {
        let matches: Vec<(usize, usize)> = self.no_space_between_sentences_regex.find_iter(text).collect();
        if matches.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len() + matches.len());
        let mut last = 0;
        for (start, end) in matches {
            let window_start = char_boundary_at_or_before(text, start.saturating_sub(40));
            let window_end = char_boundary_at_or_after(text, (end + 40).min(text.len()));
            let window = &text[window_start..window_end];

            out.push_str(&text[last..end]);
            if self.url_like_regex.find(window).is_none() {
                out.push(' ');
            }
            last = end;
        }
        out.push_str(&text[last..]);
        out
    }
}

fn char_boundary_at_or_before(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn char_boundary_at_or_after(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

static CLEANER: Lazy<Cleaner> = Lazy::new(|| Cleaner::new().expect("cleaner regexes are static and must compile"));

/// Runs the full cleaning pipeline. `lang_code` selects the Japanese
/// mid-CJK-word newline override; `pdf` selects the PDF line-break variant.
pub fn clean(text: &str, lang_code: &str, pdf: bool) -> String {
    CLEANER.clean(text, lang_code, pdf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_html_tags_and_entities() {
        let out = clean("<p>Hello&nbsp;world.</p>", "en", false);
        assert!(!out.contains('<'));
        assert!(!out.contains("&nbsp;"));
        assert!(out.contains("Hello world."));
    }

    #[test]
    fn collapses_toc_leader_dots() {
        let out = clean("Chapter One..........5", "en", false);
        assert!(!out.contains(".........."));
    }

    #[test]
    fn joins_hyphenated_pdf_linebreak() {
        let out = clean("This is a hyphen-\nated word.", "en", true);
        assert!(out.contains("hyphenated word"));
    }

    #[test]
    fn japanese_mid_word_newline_is_removed() {
        let out = clean("これは\n日本語です。", "ja", false);
        assert!(!out.contains('\n'));
    }
}
