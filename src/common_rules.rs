//! Language-independent rule groups used by [`crate::processor::Processor`].
//!
//! These mirror the `Numbers`, `DoublePunctuationRules`, `ExclamationPointRules`,
//! `EllipsisRules`/`ReinsertEllipsisRules`, and the numeric/geo/file-format/
//! `.NET` masking groups that every language profile in
//! `original_source/sentencesplit/lang/common/common.py` shares. None of
//! these rules depend on script or abbreviation data, so — like
//! [`crate::list_item_replacer`] — they are built once behind a `Lazy`
//! rather than duplicated per [`crate::language::LanguageProfile`].

use once_cell::sync::Lazy;
use onig::{Captures, Regex};

use crate::error::BuildResult;
use crate::rule::{apply_rules, Rule};
use crate::sentinel;
use crate::util::re;

pub struct CommonRules {
    pub numbers: Vec<Rule>,

    continuous_punctuation_regex: Regex,
    numbered_reference_regex: Regex,
    email_regex: Regex,
    geo_location_rule: Rule,
    file_format_rule: Rule,
    dot_net_rules: Vec<Rule>,

    pub single_newline_rule: Rule,
    ellipsis_dots_rule: Rule,
    ellipsis_three_spaced_rule: Rule,
    ellipsis_three_bare_rule: Rule,
    reinsert_ellipsis_rule: Rule,

    double_punctuation_check: Regex,
    pub double_punctuation_rules: Vec<Rule>,
    pub question_mark_in_quotation_rule: Rule,
    pub exclamation_point_rules: Vec<Rule>,
    pub sub_single_quote_rule: Rule,

    parens_space_before_rule: Rule,
    parens_space_after_rule: Rule,
    trailing_masked_exclamation_rule: Rule,
}

impl CommonRules {
    fn new() -> BuildResult<Self> {
        Ok(CommonRules {
            // Example: https://rubular.com/r/oNyxBOqbyy
            numbers: vec![
                Rule::new(r"\.(?=\d)", "∯")?,
                Rule::new(r"(?<=\d)\.(?=\S)", "∯")?,
                Rule::new(r"(?<=\r\d)\.(?=(\s\S)|\))", "∯")?,
                Rule::new(r"(?<=^\d)\.(?=(\s\S)|\))", "∯")?,
                Rule::new(r"(?<=^\d\d)\.(?=(\s\S)|\))", "∯")?,
                // "5 in. wide" (measurement) vs "walked in. She left" (preposition).
                Rule::new(r"(?<=\d )in\.(?=\s[a-z])", "in∯")?,
            ],

            // `!!!`, `???`, `!?!` and longer runs — mask every character so
            // none of them is individually read as a boundary.
            continuous_punctuation_regex: re(r"(?<=\S)(!|\?){3,}(?=(\s|\z|$))")?,

            // https://github.com/diasks2/pragmatic_segmenter/commit/d9ec1a352aff92b91e2e572c30bb9561eb42c703
            numbered_reference_regex: re(
                r"(?<=[^\d\s])(\.|∯)((\[(\d{1,3},?\s?-?\s?)?\b\d{1,3}\])+|((\d{1,3}\s?){0,3}\d{1,3}))(\s)(?=[A-Z])",
            )?,

            // Email addresses: mask every period inside the local-part/domain.
            email_regex: re(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+")?,

            // Geographic coordinates: "N. 40°", "23.5°W." — mask the period
            // after a direction letter before a number.
            geo_location_rule: Rule::new(r"(?<=[NSEW])\.(?=\s?\d)", "∯")?,

            // Filenames and `.NET`/`co.uk`-style domains.
            file_format_rule: Rule::new(
                r"(?<=[A-Za-z0-9_])\.(?=(txt|pdf|docx?|xlsx?|pptx?|py|rs|go|java|cpp?|h|md|json|ya?ml|html?|css|png|jpe?g|gif|svg|mp[34]|zip|tar|gz|csv|log)\b)",
                "∯",
            )?,
            dot_net_rules: vec![
                Rule::new(r"(?<=\w)\.(?=NET\b)", "∯")?,
                Rule::new(r"(?<=\bco)\.(?=uk\b)", "∯")?,
            ],

            single_newline_rule: Rule::new(r"\n", " ")?,

            // `…` and spaced `. . .` are normalized to the same masked form
            // as a bare `...` before the boundary regex runs; `ReinsertEllipsisRules`
            // restores real periods after the candidate sentence is carved out.
            ellipsis_dots_rule: Rule::new("…", "...")?,
            ellipsis_three_spaced_rule: Rule::new(r"(?:\.\s){2}\.", "ȹ ȹ ȹ")?,
            ellipsis_three_bare_rule: Rule::new(r"\.\.\.", "ȸȸȸ")?,
            reinsert_ellipsis_rule: Rule::new(r"[ȸȹ]", ".")?,

            double_punctuation_check: re(r"^(&ᓷ&|&ᓴ&)+$")?,
            double_punctuation_rules: vec![
                Rule::new(r"\?!", "&ᓷ&&ᓴ&")?,
                Rule::new(r"!\?", "&ᓴ&&ᓷ&")?,
                Rule::new(r"\?\?", "&ᓷ&&ᓷ&")?,
                Rule::new(r"!!", "&ᓴ&&ᓴ&")?,
            ],
            // Rubular: http://rubular.com/r/NqCqv372Ix (question mark before a closing quote)
            question_mark_in_quotation_rule: Rule::new(r#"\?(?=["'])"#, "&ᓷ&")?,
            exclamation_point_rules: vec![
                Rule::new(r"!(?=,\s[a-z])", "&ᓴ&")?,
                Rule::new(r#"!(?=['"]?\s[a-z])"#, "&ᓴ&")?,
            ],
            // Defensive no-op by construction (the masked apostrophe is always
            // restored earlier by `sentinel::SUB_SYMBOLS_TABLE`); kept as its
            // own named stage so a future change to restoration order has
            // somewhere to hook a real single-quote fixup.
            sub_single_quote_rule: Rule::new(sentinel::APOSTROPHE, "'")?,

            parens_space_before_rule: Rule::new(r"\s(?=\()", "\r")?,
            parens_space_after_rule: Rule::new(r"(?<=\))\s", "\r")?,
            trailing_masked_exclamation_rule: Rule::new(r"&ᓴ&$", "!")?,
        })
    }

    pub fn replace_continuous_punctuation(&self, text: &str) -> String {
        self.continuous_punctuation_regex.replace_all(text, |c: &Captures| {
            let mat = c.at(0).unwrap();
            mat.replace('!', sentinel::BANG).replace('?', sentinel::QUESTION)
        })
    }

    pub fn replace_periods_before_numeric_references(&self, text: &str) -> String {
        self.numbered_reference_regex.replace_all(text, |c: &Captures| {
            format!("∯{}\r{}", c.at(2).unwrap_or(""), c.at(7).unwrap_or(" "))
        })
    }

    pub fn mask_email_and_domain_periods(&self, text: &str) -> String {
        let text = self
            .email_regex
            .replace_all(text, |c: &Captures| c.at(0).unwrap().replace('.', "∯"));
        let text = self.geo_location_rule.replace_all(&text);
        let text = self.file_format_rule.replace_all(&text);
        apply_rules(text, &self.dot_net_rules)
    }

    pub fn apply_ellipsis_rules(&self, text: &str) -> String {
        let text = self.ellipsis_dots_rule.replace_all(text);
        let text = self.ellipsis_three_spaced_rule.replace_all(&text);
        self.ellipsis_three_bare_rule.replace_all(&text)
    }

    pub fn reinsert_ellipsis(&self, text: &str) -> String {
        self.reinsert_ellipsis_rule.replace_all(text)
    }

    pub fn apply_double_punctuation_rules(&self, text: &str) -> String {
        if self.double_punctuation_check.find(text).is_some() {
            return text.to_string();
        }
        apply_rules(text.to_string(), &self.double_punctuation_rules)
    }

    pub fn mask_parens_between_double_quotes(&self, text: &str, regex: &Regex) -> String {
        regex.replace_all(text, |c: &Captures| {
            let mat = c.at(0).unwrap();
            let step1 = self.parens_space_before_rule.replace_all(mat);
            self.parens_space_after_rule.replace_all(&step1)
        })
    }

    pub fn restore_trailing_exclamation(&self, text: &str) -> String {
        self.trailing_masked_exclamation_rule.replace_all(text)
    }
}

pub static COMMON: Lazy<CommonRules> =
    Lazy::new(|| CommonRules::new().expect("common rule-group regexes are static and must compile"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuous_punctuation_is_masked() {
        let out = COMMON.replace_continuous_punctuation("Wait!!! Really???");
        assert!(!out.contains("!!!"));
        assert!(!out.contains("???"));
    }

    #[test]
    fn ellipsis_round_trips() {
        let masked = COMMON.apply_ellipsis_rules("Wait... what");
        assert!(!masked.contains("..."));
        let restored = COMMON.reinsert_ellipsis(&masked);
        assert_eq!(restored, "Wait... what");
    }

    #[test]
    fn double_punctuation_masked() {
        let out = COMMON.apply_double_punctuation_rules("Really?!");
        assert_eq!(out, "&ᓷ&&ᓴ&");
    }
}
