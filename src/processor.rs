//! The pipeline orchestrator: turns one document into a sequence of sentence
//! candidates by threading it through every masking stage in
//! `original_source/sentencesplit/processor.py`'s `Processor.process` in the
//! same order, then splits on the surviving boundary punctuation and cleans
//! up what's left (spec §4.6).

use once_cell::sync::Lazy;
use onig::Regex;

use crate::common_rules::COMMON;
use crate::exclamation_words;
use crate::language::LanguageProfile;
use crate::list_item_replacer;
use crate::sentinel;
use crate::util::re;

static ALPHA_ONLY: Lazy<Regex> = Lazy::new(|| re(r"\A[a-zA-Z]*\Z").unwrap());
static ELLIPSIS_ONLY: Lazy<Regex> = Lazy::new(|| re(r"\A\.{3,}\Z").unwrap());
static RESPLIT_PAREN_PERIOD: Lazy<Regex> = Lazy::new(|| re(r"(?<=[a-zA-Z]{2}\.\))\s+(?=[A-Z])").unwrap());

const ORPHAN_SINGLE_CHARS: &[char] = &['\'', '"', ')', '\u{2019}', '\u{201d}'];

/// Splits `text` on every zero- or one-width match of `regex`, dropping the
/// matched span itself — the Rust counterpart of Python's `re.split`, which
/// `onig::Regex` has no direct equivalent for.
fn split_on(text: &str, regex: &Regex) -> Vec<String> {
    let mut out = Vec::new();
    let mut last = 0;
    for (start, end) in regex.find_iter(text) {
        out.push(text[last..start].to_string());
        last = end;
    }
    out.push(text[last..].to_string());
    out
}

pub struct Processor<'a> {
    lang: &'a LanguageProfile,
}

impl<'a> Processor<'a> {
    pub fn new(lang: &'a LanguageProfile) -> Self {
        Processor { lang }
    }

    pub fn process(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let text = text.replace('\n', "\r");
        let text = list_item_replacer::add_line_break(&text);
        let text = self.lang.abbreviation_replacer.replace(&text);
        let text = crate::rule::apply_rules(text, &COMMON.numbers);
        let text = COMMON.replace_continuous_punctuation(&text);
        let text = COMMON.replace_periods_before_numeric_references(&text);
        let text = COMMON.mask_email_and_domain_periods(&text);
        let text = self.lang.apply_cjk_abbreviation_rules(&text);

        self.split_into_segments(&text)
    }

    fn split_into_segments(&self, text: &str) -> Vec<String> {
        let text = COMMON.mask_parens_between_double_quotes(text, &self.lang.parens_between_double_quotes_regex);

        let mut candidates = Vec::new();
        for piece in text.split('\r') {
            if piece.is_empty() {
                continue;
            }
            let piece = COMMON.single_newline_rule.replace_all(piece);
            let piece = COMMON.apply_ellipsis_rules(&piece);
            candidates.extend(self.check_for_punctuation(&piece));
        }

        let mut postprocessed = Vec::new();
        for candidate in &candidates {
            let restored = sub_symbols(candidate);
            for pps in self.post_process_segments(&restored) {
                if !pps.is_empty() {
                    postprocessed.push(pps);
                }
            }
        }

        let postprocessed: Vec<String> = postprocessed
            .iter()
            .map(|s| COMMON.sub_single_quote_rule.replace_all(s))
            .collect();

        let mut resplit = Vec::new();
        for pps in &postprocessed {
            for part in split_on(pps, &RESPLIT_PAREN_PERIOD) {
                if !part.is_empty() {
                    resplit.push(part);
                }
            }
        }

        merge_orphans(resplit)
    }

    fn check_for_punctuation(&self, txt: &str) -> Vec<String> {
        if self.lang.contains_punctuation(txt) {
            self.process_text(txt)
        } else {
            vec![txt.to_string()]
        }
    }

    fn process_text(&self, txt: &str) -> Vec<String> {
        let mut txt = txt.to_string();
        if !txt.ends_with(|c| self.lang.punctuations.contains(&c)) {
            txt.push(sentinel::ELLIPSIS_1);
        }

        let txt = exclamation_words::apply_rules(&txt);
        let txt = crate::between_punctuation::replace(&txt, self.lang.brackets());
        let txt = COMMON.apply_double_punctuation_rules(&txt);
        let txt = COMMON.question_mark_in_quotation_rule.replace_all(&txt);
        let txt = crate::rule::apply_rules(txt, &COMMON.exclamation_point_rules);
        let txt = list_item_replacer::replace_parens(&txt);

        self.sentence_boundary_punctuation(&txt)
    }

    fn sentence_boundary_punctuation(&self, txt: &str) -> Vec<String> {
        let txt = self.lang.apply_colon_and_comma_rules(txt);
        let txt = COMMON.restore_trailing_exclamation(&txt);
        self.lang.boundary_matches(&txt).into_iter().map(str::to_string).collect()
    }

    fn post_process_segments(&self, txt: &str) -> Vec<String> {
        if txt.len() > 2 && ALPHA_ONLY.find(txt).is_some() {
            return vec![txt.to_string()];
        }

        let txt = COMMON.reinsert_ellipsis(txt);
        if self.lang.quotation_at_end_of_sentence_regex.find(&txt).is_some() {
            split_on(&txt, &self.lang.split_space_quotation_at_end_of_sentence_regex)
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect()
        } else {
            let trimmed = txt.replace('\n', "");
            let trimmed = trimmed.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            }
        }
    }
}

fn sub_symbols(text: &str) -> String {
    let mut text = text.to_string();
    for &(old, new) in sentinel::SUB_SYMBOLS_TABLE {
        text = text.replace(old, new);
    }
    text
}

fn merge_orphans(sents: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for sent in sents {
        let stripped = sent.trim();
        let is_orphan = !stripped.is_empty()
            && !merged.is_empty()
            && (ELLIPSIS_ONLY.find(stripped).is_some()
                || (stripped.chars().count() == 1 && ORPHAN_SINGLE_CHARS.contains(&stripped.chars().next().unwrap()))
                || (stripped.chars().count() <= 10
                    && stripped.ends_with('.')
                    && !stripped.chars().next().unwrap().is_uppercase()
                    && stripped.chars().any(|c| c.is_alphanumeric())));

        if is_orphan {
            let last = merged.last_mut().unwrap();
            last.push(' ');
            last.push_str(&sent);
        } else {
            merged.push(sent);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language;

    #[test]
    fn basic_english_segmentation() {
        let lang = language::get("en").unwrap();
        let sents = Processor::new(lang).process("Hello world. How are you?");
        assert_eq!(sents, vec!["Hello world.", "How are you?"]);
    }

    #[test]
    fn prepositive_abbreviation_does_not_split() {
        let lang = language::get("en").unwrap();
        let sents = Processor::new(lang).process("Mr. Smith went home. He was tired.");
        assert_eq!(sents, vec!["Mr. Smith went home.", "He was tired."]);
    }

    #[test]
    fn timezone_guard_prevents_split_after_am_pm() {
        let lang = language::get("en").unwrap();
        let sents = Processor::new(lang).process("The call is at 3 p.m. AST. Please join on time.");
        assert_eq!(sents.len(), 1);
    }
}
