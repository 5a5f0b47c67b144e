//! Rule-based, multilingual sentence boundary disambiguation (spec §1).
//!
//! A [`Segmenter`] rewrites non-terminal punctuation to private sentinel
//! code points (see [`sentinel`]), protects bracketed/quoted text, resolves
//! abbreviations, lists, numerics and timestamps, then carves the buffer
//! into sentences with a language-specific boundary regex and restores the
//! original punctuation. Transcribed from `original_source/sentencesplit/segmenter.py`.
//!
//! ```
//! use langsplit::Segmenter;
//!
//! let seg = Segmenter::new("en").unwrap();
//! assert_eq!(
//!     seg.segment("My name is Jonas E. Smith. Please turn to p. 55."),
//!     vec!["My name is Jonas E. Smith.", "Please turn to p. 55."],
//! );
//! ```

mod abbreviation_replacer;
mod between_punctuation;
mod cleaner;
mod common_rules;
pub mod error;
mod exclamation_words;
mod language;
mod list_item_replacer;
mod processor;
mod rule;
mod sentinel;
mod text_span;
mod util;

pub use error::SegmenterError;
pub use language::SUPPORTED_LANGUAGES;
pub use text_span::TextSpan;

use language::LanguageProfile;
use processor::Processor;

/// Segments text into sentences for one configured language (spec §6).
///
/// Construction validates the language code and flag combination once;
/// `segment`/`segment_spans`/`segment_clean` never fail afterwards. A
/// `Segmenter` holds only `&'static` language data plus a handful of bools,
/// so it is `Send + Sync` and cheap to clone or share across threads
/// (spec §5): the expensive per-language tables live behind the
/// process-wide [`language`] registry and are built at most once.
#[derive(Clone)]
pub struct Segmenter {
    lang: &'static LanguageProfile,
    lang_code: &'static str,
    clean: bool,
    pdf: bool,
    char_span: bool,
}

/// Builds a [`Segmenter`], mirroring `Segmenter.__init__`'s keyword
/// arguments in `original_source/sentencesplit/segmenter.py`.
pub struct SegmenterBuilder {
    language: String,
    clean: bool,
    doc_type: Option<String>,
    char_span: bool,
}

impl SegmenterBuilder {
    fn new(language: impl Into<String>) -> Self {
        SegmenterBuilder {
            language: language.into(),
            clean: false,
            doc_type: None,
            char_span: false,
        }
    }

    /// Runs the [`cleaner`] before segmentation. Destructive: see spec §4.7.
    #[must_use]
    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// `"pdf"` forces `clean = true`; every other value (including absent)
    /// is accepted but has no effect, matching the source's `doc_type`.
    #[must_use]
    pub fn doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Return [`TextSpan`]s instead of bare strings. Conflicts with `clean`.
    #[must_use]
    pub fn char_span(mut self, char_span: bool) -> Self {
        self.char_span = char_span;
        self
    }

    pub fn build(self) -> Result<Segmenter, SegmenterError> {
        let pdf = self.doc_type.as_deref() == Some("pdf");

        if self.clean && self.char_span {
            return Err(SegmenterError::IncompatibleOptions(
                "char_span must be false if clean is true, since clean modifies the original text",
            ));
        }
        if pdf && !self.clean {
            return Err(SegmenterError::IncompatibleOptions(
                "doc_type = \"pdf\" requires clean = true, since the original text will be modified",
            ));
        }

        let lang = language::get(&self.language)
            .ok_or_else(|| SegmenterError::UnknownLanguage(self.language.clone(), "see SUPPORTED_LANGUAGES"))?;

        Ok(Segmenter {
            lang,
            lang_code: lang.iso_code,
            clean: self.clean,
            pdf,
            char_span: self.char_span,
        })
    }
}

impl Segmenter {
    /// Shorthand for `Segmenter::builder(language).build()`.
    pub fn new(language: &str) -> Result<Self, SegmenterError> {
        Self::builder(language).build()
    }

    pub fn builder(language: impl Into<String>) -> SegmenterBuilder {
        SegmenterBuilder::new(language)
    }

    /// The ISO 639-1 code this instance was built with.
    pub fn language(&self) -> &'static str {
        self.lang_code
    }

    /// Segments `text` according to this instance's `clean`/`char_span`
    /// configuration (spec §6). Empty input returns an empty `Vec`.
    pub fn segment(&self, text: &str) -> Vec<String> {
        if self.char_span {
            return self.spans(text).into_iter().map(|span| span.sent).collect();
        }
        self.segment_sentences(text)
    }

    /// Always returns character-offset spans, regardless of this instance's
    /// `char_span` flag. Mirrors `Segmenter.segment_spans` in the source,
    /// which rejects `clean = true` because cleaning invalidates offsets
    /// into the original text.
    pub fn segment_spans(&self, text: &str) -> Result<Vec<TextSpan>, SegmenterError> {
        if self.clean {
            return Err(SegmenterError::IncompatibleOptions(
                "segment_spans requires clean = false",
            ));
        }
        Ok(self.spans(text))
    }

    /// Always runs [`cleaner::clean`] first, regardless of this instance's
    /// `clean` flag. Mirrors `Segmenter.segment_clean` in the source.
    pub fn segment_clean(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let cleaned = cleaner::clean(text, self.lang_code, self.pdf);
        Processor::new(self.lang).process(&cleaned)
    }

    fn segment_sentences(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        if self.clean || self.pdf {
            return self.segment_clean(text);
        }

        // Non-destructive path: recover each processed sentence's exact
        // slice (including trailing whitespace) from the original text so
        // the spec §3 invariant "concatenation reproduces the input" holds.
        match_spans(&Processor::new(self.lang).process(text), text)
            .into_iter()
            .map(|span| span.sent)
            .collect()
    }

    fn spans(&self, text: &str) -> Vec<TextSpan> {
        if text.is_empty() {
            return Vec::new();
        }
        let processed = if self.clean || self.pdf {
            cleaner::clean(text, self.lang_code, self.pdf)
        } else {
            text.to_string()
        };
        let sentences = Processor::new(self.lang).process(&processed);
        match_spans(&sentences, text)
    }
}

/// Rust counterpart of `Segmenter._match_spans` (spec §4.7 "Span recovery"):
/// locates each processed sentence verbatim in the original text starting
/// from the previous match's end, extending over trailing whitespace so
/// spans tile the input. Falls back to a regex search over the escaped
/// sentence when an exact `find` misses (e.g. a sentinel leaked through).
fn match_spans(sentences: &[String], original: &str) -> Vec<TextSpan> {
    let mut spans = Vec::with_capacity(sentences.len());
    let mut prior_end = 0usize;

    for sent in sentences {
        if sent.is_empty() {
            continue;
        }

        if let Some(rel_start) = original[prior_end..].find(sent.as_str()) {
            let start = prior_end + rel_start;
            let mut end = start + sent.len();
            while end < original.len() {
                let next = original[end..].chars().next().unwrap();
                if next.is_whitespace() {
                    end += next.len_utf8();
                } else {
                    break;
                }
            }
            spans.push(TextSpan::new(&original[start..end], start, end));
            prior_end = end;
            continue;
        }

        if let Some((text, start, end)) = find_with_trailing_whitespace(original, sent, prior_end) {
            spans.push(TextSpan::new(text, start, end));
            prior_end = end;
        }
    }

    spans
}

/// Fallback used when a processed sentence is not found verbatim past
/// `prior_end` (rare: only when a sentinel leaked into output). Scans for
/// the escaped sentence followed by optional whitespace, accepting the
/// first match that ends after `prior_end`.
fn find_with_trailing_whitespace(original: &str, sent: &str, prior_end: usize) -> Option<(String, usize, usize)> {
    let mut search_from = 0usize;
    while let Some(rel_start) = original[search_from..].find(sent) {
        let start = search_from + rel_start;
        let mut end = start + sent.len();
        while end < original.len() {
            let next = original[end..].chars().next().unwrap();
            if next.is_whitespace() {
                end += next.len_utf8();
            } else {
                break;
            }
        }
        if end > prior_end {
            return Some((original[start..end].to_string(), start, end));
        }
        search_from = start + original[start..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jonas_smith_example() {
        let seg = Segmenter::new("en").unwrap();
        assert_eq!(
            seg.segment("My name is Jonas E. Smith. Please turn to p. 55."),
            vec!["My name is Jonas E. Smith.", "Please turn to p. 55."],
        );
    }

    #[test]
    fn timezone_guard() {
        let seg = Segmenter::new("en").unwrap();
        assert_eq!(
            seg.segment("The call is at 3 p.m. AST. Please join on time."),
            vec!["The call is at 3 p.m. AST.", "Please join on time."],
        );
    }

    #[test]
    fn am_pm_before_capital_non_timezone_splits() {
        let seg = Segmenter::new("en").unwrap();
        assert_eq!(
            seg.segment("The flight departs at 6:30 a.m. Please arrive two hours early."),
            vec![
                "The flight departs at 6:30 a.m.",
                "Please arrive two hours early.",
            ],
        );
    }

    #[test]
    fn empty_input_returns_empty_vec() {
        let seg = Segmenter::new("en").unwrap();
        assert!(seg.segment("").is_empty());
        assert!(seg.segment_spans("").unwrap().is_empty());
        assert!(seg.segment_clean("").is_empty());
    }

    #[test]
    fn unknown_language_is_a_configuration_error() {
        assert!(matches!(
            Segmenter::new("xx"),
            Err(SegmenterError::UnknownLanguage(code, _)) if code == "xx"
        ));
    }

    #[test]
    fn clean_and_char_span_conflict() {
        let err = Segmenter::builder("en").clean(true).char_span(true).build().unwrap_err();
        assert!(matches!(err, SegmenterError::IncompatibleOptions(_)));
    }

    #[test]
    fn pdf_without_clean_conflicts() {
        let err = Segmenter::builder("en").doc_type("pdf").build().unwrap_err();
        assert!(matches!(err, SegmenterError::IncompatibleOptions(_)));
    }

    #[test]
    fn non_destructive_round_trip_preserves_whitespace() {
        let seg = Segmenter::new("en").unwrap();
        let input = "Hello world.  How are you?\nFine, thanks.";
        let sentences = seg.segment(input);
        assert_eq!(sentences.concat(), input);
    }

    #[test]
    fn span_tiling_matches_original() {
        let seg = Segmenter::new("en").unwrap();
        let input = "Hello world. How are you?";
        let spans = seg.segment_spans(input).unwrap();
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans.last().unwrap().end, input.len());
        for span in &spans {
            assert_eq!(&input[span.start..span.end], span.sent);
        }
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn idempotent_on_its_own_output() {
        let seg = Segmenter::new("en").unwrap();
        let sentences = seg.segment("Dr. Smith arrived. He was early.");
        for sent in sentences {
            assert_eq!(seg.segment(sent.trim()), vec![sent.trim().to_string()]);
        }
    }

    #[test]
    fn chinese_bracketed_exclamation_is_protected() {
        let seg = Segmenter::new("zh").unwrap();
        assert_eq!(
            seg.segment("我们明天一起去看《摔跤吧!爸爸》好吗?好!"),
            vec!["我们明天一起去看《摔跤吧!爸爸》好吗?", "好!"],
        );
    }

    #[test]
    fn japanese_spans_cover_whole_input() {
        let seg = Segmenter::new("ja").unwrap();
        let input = "これはペンです。それはマーカーです。";
        let spans = seg.segment_spans(input).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans.last().unwrap().end, input.len());
    }

    #[test]
    fn numbered_list_items_each_become_one_sentence() {
        let seg = Segmenter::new("en").unwrap();
        let sentences = seg.segment("The steps are: 1. Open. 2. Close. 3. Submit. After that, wait.");
        assert_eq!(sentences.len(), 4);
        assert!(sentences[3].trim_start().starts_with("After that"));
    }

    #[test]
    fn segment_clean_strips_html_regardless_of_instance_flag() {
        let seg = Segmenter::new("en").unwrap();
        let sentences = seg.segment_clean("<p>Hello world.</p> <p>Goodbye.</p>");
        assert!(sentences.iter().all(|s| !s.contains('<')));
    }
}
