//! Cross-language integration tests, in the style of the upstream crate's
//! `tests/test_all.rs`: black-box calls through the public `Segmenter` API
//! only, no access to crate-internal pipeline stages.

use langsplit::{Segmenter, SegmenterError, TextSpan};

#[test]
fn jonas_smith_and_p_55() {
    let seg = Segmenter::new("en").unwrap();
    assert_eq!(
        seg.segment("My name is Jonas E. Smith. Please turn to p. 55."),
        vec!["My name is Jonas E. Smith.", "Please turn to p. 55."],
    );
}

#[test]
fn list_items_each_become_their_own_sentence() {
    let seg = Segmenter::new("en").unwrap();
    let sentences = seg.segment("The steps are: 1. Open. 2. Close. 3. Submit. After that, wait.");
    assert_eq!(sentences.len(), 4);
    assert!(sentences[0].contains("steps are"));
    assert!(sentences[1].trim().starts_with("2. Close"));
    assert!(sentences[3].trim_start().starts_with("After that"));
}

#[test]
fn abbreviation_followed_by_non_starter_does_not_split() {
    let seg = Segmenter::new("en").unwrap();
    let sentences = seg.segment("He works at Acme Corp. every day of the week.");
    assert_eq!(sentences.len(), 1);
}

#[test]
fn number_with_interior_period_does_not_split() {
    let seg = Segmenter::new("en").unwrap();
    let sentences = seg.segment("The package weighs 3.5 kg in total.");
    assert_eq!(sentences.len(), 1);
}

#[test]
fn spanish_prepositive_abbreviation_does_not_split() {
    let seg = Segmenter::new("es").unwrap();
    let sentences = seg.segment("El Dr. Pérez llegó tarde. El resultado fue positivo.");
    assert_eq!(sentences.len(), 2);
    assert!(sentences[0].contains("Dr. Pérez"));
}

#[test]
fn chinese_bracketed_punctuation_is_protected() {
    let seg = Segmenter::new("zh").unwrap();
    assert_eq!(
        seg.segment("我们明天一起去看《摔跤吧!爸爸》好吗?好!"),
        vec!["我们明天一起去看《摔跤吧!爸爸》好吗?", "好!"],
    );
}

#[test]
fn japanese_two_sentence_spans_tile_the_input() {
    let seg = Segmenter::new("ja").unwrap();
    let input = "これはペンです。それはマーカーです。";
    let spans = seg.segment_spans(input).unwrap();
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].start, 0);
    assert_eq!(spans.last().unwrap().end, input.len());
    for pair in spans.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn arabic_colon_between_digits_does_not_split() {
    let seg = Segmenter::new("ar").unwrap();
    let sentences = seg.segment("الاجتماع الساعة 3:15 اليوم.");
    assert_eq!(sentences.len(), 1);
}

#[test]
fn every_declared_language_builds_and_segments() {
    for &code in langsplit::SUPPORTED_LANGUAGES {
        let seg = Segmenter::new(code).unwrap_or_else(|e| panic!("language {code} failed to build: {e}"));
        let out = seg.segment("Hello world.");
        assert!(!out.is_empty(), "language {code} produced no sentences");
    }
}

#[test]
fn unknown_language_code_is_rejected_at_construction() {
    let err = Segmenter::new("xx").unwrap_err();
    assert!(matches!(err, SegmenterError::UnknownLanguage(code, _) if code == "xx"));
}

#[test]
fn clean_and_char_span_together_is_rejected() {
    let err = Segmenter::builder("en").clean(true).char_span(true).build().unwrap_err();
    assert!(matches!(err, SegmenterError::IncompatibleOptions(_)));
}

#[test]
fn non_destructive_round_trip_reproduces_input_verbatim() {
    let seg = Segmenter::new("en").unwrap();
    let input = "Dr. Smith arrived at 6:30 a.m.  The meeting ran long.\nEveryone left tired.";
    let sentences = seg.segment(input);
    assert_eq!(sentences.concat(), input);
}

#[test]
fn segment_clean_strips_html_and_collapses_toc_dots() {
    let seg = Segmenter::new("en").unwrap();
    let sentences = seg.segment_clean("<b>Chapter One</b>..........5. See page 5 for details.");
    let joined = sentences.join(" ");
    assert!(!joined.contains('<'));
    assert!(!joined.contains(".........."));
}

#[test]
fn pdf_doc_type_without_clean_is_rejected() {
    let err = Segmenter::builder("en").doc_type("pdf").build().unwrap_err();
    assert!(matches!(err, SegmenterError::IncompatibleOptions(_)));
}

#[test]
fn pdf_doc_type_with_clean_joins_hyphenated_linebreaks() {
    let seg = Segmenter::builder("en").clean(true).doc_type("pdf").build().unwrap();
    let sentences = seg.segment_clean("This is a hyphen-\nated word that con-\ntinues here.");
    assert!(sentences.iter().any(|s| s.contains("hyphenated")));
}

#[test]
fn empty_input_is_always_an_empty_vec() {
    let seg = Segmenter::new("en").unwrap();
    assert_eq!(seg.segment(""), Vec::<String>::new());
    assert_eq!(seg.segment_spans("").unwrap(), Vec::<TextSpan>::new());
    assert_eq!(seg.segment_clean(""), Vec::<String>::new());
}

#[test]
fn idempotent_on_a_previously_returned_sentence() {
    let seg = Segmenter::new("en").unwrap();
    for sent in seg.segment("Mr. Smith went home. He was tired.") {
        let trimmed = sent.trim().to_string();
        assert_eq!(seg.segment(&trimmed), vec![trimmed]);
    }
}
