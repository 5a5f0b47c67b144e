//! Per-language profiles: the "configuration" half of the engine (spec §1).
//!
//! Each profile bundles everything that varies by language — abbreviation
//! tables, the boundary-matching regex, the punctuation set, and a handful
//! of capability flags standing in for the Python lineage's subclass
//! overrides (`hasattr(lang, "BetweenPunctuation")` and friends, see
//! `original_source/sentencesplit/processor.py`). Profiles are immutable
//! after construction and built eagerly, once, behind a process-wide
//! registry (spec §5).

use std::collections::HashMap;

use once_cell::sync::Lazy;
use onig::Regex;

use crate::abbreviation_replacer::{AbbrScanMode, AbbrTables, AbbreviationReplacer, EMPTY_ABBR_TABLES};
use crate::between_punctuation::BracketSet;
use crate::error::BuildResult;
use crate::rule::Rule;
use crate::util::re;

/// The two-character ISO 639-1 codes this crate ships a profile for.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "hi", "mr", "zh", "es", "am", "ar", "hy", "bg", "ur", "ru", "pl", "fa", "nl", "da", "fr", "my", "el", "it",
    "ja", "de", "kk", "sk",
];

/// Which flavor of `SENTENCE_BOUNDARY_REGEX` a profile uses. Most non-English,
/// non-CJK languages in `original_source/` replace the whole nine-part Latin
/// alternation with a single `".*?[punct]|.*?$"` scan (spec §4.6 step 10h),
/// so that shape is modeled directly rather than threaded through the
/// generic Latin builder.
#[derive(Clone, Copy)]
enum BoundaryGrammar {
    /// The full nine-part alternation in
    /// `original_source/sentencesplit/lang/common/common.py`.
    Latin,
    /// `original_source/sentencesplit/lang/common/cjk.py`'s closer-aware scan.
    Cjk,
    /// A minimal `".*?[chars]|.*?$"` scan over a language-specific punctuation
    /// class (Arabic, Persian, Armenian, Burmese, Greek, Hindi, Marathi, Urdu).
    Simple(&'static str),
}

/// Extra per-language quirks beyond the abbreviation table and boundary
/// grammar, generalizing the `hasattr(lang, ...)` dynamic dispatch described
/// in spec §3 "Language profile capability hooks".
#[derive(Default)]
struct Overrides {
    brackets: Option<BracketSet>,
    /// Arabic/Persian mask a colon between two digits so `3:15` doesn't read
    /// as a sentence-ending colon.
    colon_between_numbers: bool,
    /// Arabic/Persian mask a non-boundary Arabic comma (`،`) that separates
    /// clauses within one list-like sentence.
    non_boundary_comma: bool,
    /// Chinese/Japanese additionally fold a period directly before a CJK
    /// character into an already-masked multi-period abbreviation (see
    /// `CjkAbbreviationRules` in `original_source/sentencesplit/lang/chinese.py`).
    cjk_abbreviation_rules: bool,
}

pub struct LanguageProfile {
    pub iso_code: &'static str,
    pub punctuations: &'static [char],

    pub abbreviation_replacer: AbbreviationReplacer,

    boundary_regex: Regex,
    brackets: BracketSet,

    colon_between_numbers_rule: Option<Rule>,
    non_boundary_comma_rule: Option<Rule>,
    cjk_abbreviation_rules: Option<[Rule; 2]>,

    pub quotation_at_end_of_sentence_regex: Regex,
    pub split_space_quotation_at_end_of_sentence_regex: Regex,
    pub parens_between_double_quotes_regex: Regex,
}

impl LanguageProfile {
    fn build(
        iso_code: &'static str,
        punctuations: &'static [char],
        grammar: BoundaryGrammar,
        abbr: AbbrTables,
        overrides: Overrides,
    ) -> BuildResult<Self> {
        let boundary_regex = match grammar {
            BoundaryGrammar::Latin => latin_boundary_regex()?,
            BoundaryGrammar::Cjk => cjk_boundary_regex()?,
            BoundaryGrammar::Simple(chars) => re(&format!(r".*?[{}]|.*?$", chars))?,
        };

        let (quotation_at_end_of_sentence_regex, split_space_quotation_at_end_of_sentence_regex) = match grammar {
            BoundaryGrammar::Cjk => (
                re(r#"[。．.！!?？]["'“”’」』》〉】）〕〗〙〛]\s+[^\s]"#)?,
                re(r#"(?<=[。．.！!?？]["'“”’」』》〉】）〕〗〙〛])\s+(?=[^\s])"#)?,
            ),
            _ => (
                re(r#"[!?\.\-]["'“”]\s{1}[A-Z]"#)?,
                re(r#"(?<=[!?\.\-]["'“”])\s{1}(?=[A-Z])"#)?,
            ),
        };

        Ok(LanguageProfile {
            iso_code,
            punctuations,
            abbreviation_replacer: AbbreviationReplacer::new(&abbr)?,
            boundary_regex,
            brackets: overrides.brackets.unwrap_or(BracketSet::Standard),
            colon_between_numbers_rule: overrides
                .colon_between_numbers
                .then(|| Rule::new(r"(?<=\d):(?=\d)", "♭"))
                .transpose()?,
            non_boundary_comma_rule: overrides
                .non_boundary_comma
                .then(|| Rule::new(r"،(?=\s\S+،)", "♬"))
                .transpose()?,
            cjk_abbreviation_rules: if overrides.cjk_abbreviation_rules {
                Some([
                    Rule::new(r"(?<=[A-Za-z])\.(?=[A-Za-z]\.)", "∯")?,
                    Rule::new(r"(?<=[A-Za-z]∯[A-Za-z])\.(?=[\x{3040}-\x{30ff}\x{4e00}-\x{9fff}])", "∯")?,
                ])
            } else {
                None
            },
            quotation_at_end_of_sentence_regex,
            split_space_quotation_at_end_of_sentence_regex,
            // Rubular: http://rubular.com/r/6flGnUMEVl
            parens_between_double_quotes_regex: re(r#"["”]\s\(.*\)\s["“]"#)?,
        })
    }

    pub fn brackets(&self) -> BracketSet {
        self.brackets
    }

    pub fn contains_punctuation(&self, text: &str) -> bool {
        text.chars().any(|c| self.punctuations.contains(&c))
    }

    pub fn apply_colon_and_comma_rules(&self, text: &str) -> String {
        let text = match &self.colon_between_numbers_rule {
            Some(rule) => rule.replace_all(text),
            None => text.to_string(),
        };
        match &self.non_boundary_comma_rule {
            Some(rule) => rule.replace_all(&text),
            None => text,
        }
    }

    pub fn apply_cjk_abbreviation_rules(&self, text: &str) -> String {
        match &self.cjk_abbreviation_rules {
            Some([a, b]) => b.replace_all(&a.replace_all(text)),
            None => text.to_string(),
        }
    }

    pub fn boundary_matches<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.boundary_regex.find_iter(text).map(|(s, e)| &text[s..e]).collect()
    }
}

fn latin_boundary_regex() -> BuildResult<Regex> {
    const SENTENCE_END: &str = r"[。．.！!?？ȸȹ☉☈☇☄]";
    let parts = [
        r"（(?:[^）])*）(?=\s?[A-Z])".to_string(),
        r"「(?:[^」])*」(?=\s[A-Z])".to_string(),
        r"\((?:[^\)]){2,}\)(?=\s[A-Z])".to_string(),
        r"'(?:[^'])*[^,]'(?=\s[A-Z])".to_string(),
        r#""(?:[^"])*[^,]"(?=\s[A-Z])"#.to_string(),
        r#"“(?:[^”])*[^,]”(?=\s[A-Z])"#.to_string(),
        r"[。．.！!?？ ]{2,}".to_string(),
        format!(r"\S[^\n。．.！!?？ȸȹ☉☈☇☄]*{}", SENTENCE_END),
        r"[。．.！!?？]".to_string(),
    ];
    re(&parts.join("|"))
}

fn cjk_boundary_regex() -> BuildResult<Regex> {
    re(r#"\S[^\n。．.！!?？]*[。．.！!?？]["'“”’」』》〉】）〕〗〙〛]*|.+$"#)
}

macro_rules! abbr {
    () => {
        EMPTY_ABBR_TABLES
    };
}

#[rustfmt::skip]
const EN_ABBREVIATIONS: &[&str] = &[
    "adj", "adm", "adv", "al", "ala", "alta", "amt", "apr", "approx", "assn", "asst", "atty", "aug",
    "ave", "bart", "bldg", "blvd", "brig", "bros", "capt", "cl", "cmdr", "co", "col", "comdr", "con",
    "corp", "cpl", "cres", "ct", "d.c", "dec", "dept", "dist", "dr", "e.g", "eg", "esp", "esq", "etc",
    "exec", "feb", "fed", "fig", "figs", "fri", "ft", "gen", "gov", "hon", "hr", "hrs", "hwy", "i.e",
    "inc", "insp", "jan", "jr", "jul", "jun", "lib", "lt", "ltd", "maj", "mar", "mass", "may", "md",
    "messrs", "mlle", "mm", "mme", "mon", "mr", "mrs", "ms", "msgr", "mssrs", "mt", "mtn", "no", "nov",
    "oct", "op", "ord", "pa", "pde", "ph.d", "phd", "pp", "prof", "pvt", "rep", "reps", "res", "rev",
    "rt", "sat", "sec", "sen", "sens", "sep", "sept", "sfc", "sgt", "sr", "st", "supt", "surg", "sun",
    "tel", "thu", "thurs", "tue", "tues", "univ", "u.s", "u.s.a", "u.k", "ups", "vs", "v", "viz", "vol",
    "vols", "wed", "yr",
];

#[rustfmt::skip]
const EN_PREPOSITIVE: &[&str] = &[
    "adm", "attu", "brig", "capt", "cmdr", "col", "cpl", "det", "dr", "gen", "gov", "ins", "lt", "maj",
    "messrs", "mlle", "mm", "mme", "mr", "mrs", "ms", "msgr", "prof", "rep", "reps", "rev", "sen",
    "sens", "sfc", "sgt", "sr", "st",
];

#[rustfmt::skip]
const EN_NUMBER_ABBR: &[&str] = &["art", "ch", "no", "nos", "p", "pp"];

#[rustfmt::skip]
const EN_SENTENCE_STARTERS: &[&str] = &[
    "A", "Being", "Did", "For", "He", "How", "However", "I", "In", "It", "Millions", "More", "She",
    "That", "The", "There", "They", "We", "What", "When", "Where", "Who", "Why",
];

#[rustfmt::skip]
const ES_ABBREVIATIONS: &[&str] = &[
    "a.c", "a/c", "abr", "adj", "admón", "afmo", "ago", "almte", "ap", "apdo", "arq", "art", "atte", "av",
    "avda", "bco", "bibl", "bs. as", "c", "c.f", "c.g", "c/c", "c/u", "cap", "cc.aa", "cdad", "cm", "co",
    "cra", "cta", "cv", "d.e.p", "da", "dcha", "dcho", "dep", "dic", "dicc", "dir", "dn", "doc", "dom",
    "dpto", "dr", "dra", "dto", "ee", "ej", "en", "entlo", "esq", "etc", "excmo", "ext", "f.c", "fca",
    "fdo", "febr", "ff. aa", "ff.cc", "fig", "fil", "fra", "g.p", "g/p", "gob", "gr", "gral", "grs",
    "hnos", "hs", "igl", "iltre", "imp", "impr", "impto", "incl", "ing", "inst", "izdo", "izq", "izqdo",
    "j.c", "jue", "jul", "jun", "kg", "km", "lcdo", "ldo", "let", "lic", "ltd", "lun", "mar", "may", "mg",
    "min", "mié", "mm", "máx", "mín", "mt", "n. del t", "n.b", "no", "nov", "ntra. sra", "núm", "oct",
    "p", "p.a", "p.d", "p.ej", "p.v.p", "párrf", "ph.d", "ppal", "prev", "prof", "prov", "ptas", "pts",
    "pza", "pág", "págs", "párr", "q.e.g.e", "q.e.p.d", "q.e.s.m", "reg", "rep", "rr. hh", "rte", "s",
    "s. a", "s.a.r", "s.e", "s.l", "s.r.c", "s.r.l", "s.s.s", "s/n", "sdad", "seg", "sept", "sig", "sr",
    "sra", "sres", "srta", "sta", "sto", "sáb", "t.v.e", "tamb", "tel", "tfno", "ud", "uu", "uds", "univ",
    "v.b", "v.e", "vd", "vds", "vid", "vie", "vol", "vs", "vto",
];

#[rustfmt::skip]
const ES_PREPOSITIVE: &[&str] = &["dr", "ee", "lic", "mt", "prof", "sra", "srta"];

#[rustfmt::skip]
const ES_NUMBER_ABBR: &[&str] = &["cra", "ext", "no", "nos", "p", "pp", "tel"];

#[rustfmt::skip]
const ES_SENTENCE_STARTERS: &[&str] = &[
    "A", "Al", "Como", "Con", "De", "El", "Ella", "En", "Es", "Esta", "Esto", "Fue", "La", "Las", "Lo",
    "Los", "No", "Para", "Por", "Se", "Su", "Trabaja", "Un", "Una", "Y", "Yo",
];

const ES_EXTRA_BOUNDARY_TOKENS: &[&str] = &[
    "Ph∯D", "Ph\\.D", "M∯D", "M\\.D", "B∯A", "B\\.A", "B∯S", "B\\.S", "M∯A", "M\\.A", "M∯B∯A", "M\\.B\\.A",
];

#[rustfmt::skip]
const AR_ABBREVIATIONS: &[&str] = &[
    "ا", "ا. د", "ا.د", "ا.ش.ا", "إلخ", "ت.ب", "ج.ب", "جم", "ج.م.ع", "س.ت", "سم", "ص.ب.", "ص.ب", "كج.",
    "كلم.", "م", "م.ب", "ه",
];

const JA_NEWLINE_IN_WORD_CHARS: &str = r"\x{3041}-\x{3096}\x{30a1}-\x{30fa}\x{30fc}\x{4e00}-\x{9fff}\x{3005}\x{3006}\x{3024}";

fn build_registry() -> BuildResult<HashMap<&'static str, LanguageProfile>> {
    let mut m = HashMap::new();

    m.insert(
        "en",
        LanguageProfile::build(
            "en",
            &['.', '!', '?'],
            BoundaryGrammar::Latin,
            AbbrTables {
                abbreviations: EN_ABBREVIATIONS,
                prepositive_abbreviations: EN_PREPOSITIVE,
                number_abbreviations: EN_NUMBER_ABBR,
                sentence_starters: EN_SENTENCE_STARTERS,
                scan_mode: AbbrScanMode::Standard,
                spaced_am_pm: false,
                extra_boundary_tokens: &[],
            },
            Overrides::default(),
        )?,
    );

    m.insert(
        "es",
        LanguageProfile::build(
            "es",
            &['.', '!', '?'],
            BoundaryGrammar::Latin,
            AbbrTables {
                abbreviations: ES_ABBREVIATIONS,
                prepositive_abbreviations: ES_PREPOSITIVE,
                number_abbreviations: ES_NUMBER_ABBR,
                sentence_starters: ES_SENTENCE_STARTERS,
                scan_mode: AbbrScanMode::Standard,
                spaced_am_pm: true,
                extra_boundary_tokens: ES_EXTRA_BOUNDARY_TOKENS,
            },
            Overrides::default(),
        )?,
    );

    m.insert(
        "zh",
        LanguageProfile::build(
            "zh",
            &['。', '．', '！', '？', '!', '?'],
            BoundaryGrammar::Cjk,
            abbr!(),
            Overrides {
                brackets: Some(BracketSet::Chinese),
                cjk_abbreviation_rules: true,
                ..Default::default()
            },
        )?,
    );

    m.insert(
        "ja",
        LanguageProfile::build(
            "ja",
            &['。', '．', '！', '？', '!', '?'],
            BoundaryGrammar::Cjk,
            abbr!(),
            Overrides {
                brackets: Some(BracketSet::Japanese),
                cjk_abbreviation_rules: true,
                ..Default::default()
            },
        )?,
    );

    m.insert(
        "ar",
        LanguageProfile::build(
            "ar",
            &['?', '!', ':', '.', '؟', '،'],
            BoundaryGrammar::Simple(r":\.!\?؟"),
            AbbrTables {
                abbreviations: AR_ABBREVIATIONS,
                scan_mode: AbbrScanMode::AlwaysMaskAfterAbbr,
                ..EMPTY_ABBR_TABLES
            },
            Overrides {
                colon_between_numbers: true,
                non_boundary_comma: true,
                ..Default::default()
            },
        )?,
    );

    m.insert(
        "fa",
        LanguageProfile::build(
            "fa",
            &['?', '!', ':', '.', '؟'],
            BoundaryGrammar::Simple(r":\.!\?؟"),
            AbbrTables { scan_mode: AbbrScanMode::AlwaysMaskAfterAbbr, ..EMPTY_ABBR_TABLES },
            Overrides {
                colon_between_numbers: true,
                non_boundary_comma: true,
                ..Default::default()
            },
        )?,
    );

    m.insert(
        "hy",
        LanguageProfile::build("hy", &['։', '՜', ':'], BoundaryGrammar::Simple(r"։՜:"), abbr!(), Overrides::default())?,
    );

    m.insert(
        "my",
        LanguageProfile::build(
            "my",
            &['။', '၏', '?', '!'],
            BoundaryGrammar::Simple(r"။၏!\?"),
            abbr!(),
            Overrides::default(),
        )?,
    );

    m.insert(
        "el",
        LanguageProfile::build("el", &['.', '!', ';', '?'], BoundaryGrammar::Simple(r"\.;!\?"), abbr!(), Overrides::default())?,
    );

    m.insert(
        "hi",
        LanguageProfile::build(
            "hi",
            &['।', '|', '.', '!', '?'],
            BoundaryGrammar::Simple(r"।\|!\?"),
            abbr!(),
            Overrides::default(),
        )?,
    );

    m.insert(
        "mr",
        LanguageProfile::build("mr", &['.', '!', '?'], BoundaryGrammar::Simple(r"\.!\?"), abbr!(), Overrides::default())?,
    );

    m.insert(
        "ur",
        LanguageProfile::build(
            "ur",
            &['?', '!', '۔', '؟'],
            BoundaryGrammar::Simple(r"۔؟!\?"),
            abbr!(),
            Overrides::default(),
        )?,
    );

    // Remaining declared codes reuse the Standard Latin boundary grammar with
    // an empty abbreviation table — matching every non-English, non-CJK
    // profile actually present in `original_source/` (see SPEC_FULL.md §6).
    for code in ["am", "bg", "ru", "pl", "nl", "da", "fr", "it", "de", "kk", "sk"] {
        m.insert(
            code,
            LanguageProfile::build(code, &['.', '!', '?'], BoundaryGrammar::Latin, abbr!(), Overrides::default())?,
        );
    }

    Ok(m)
}

static REGISTRY: Lazy<HashMap<&'static str, LanguageProfile>> =
    Lazy::new(|| build_registry().expect("every shipped language profile must compile"));

pub fn get(iso_code: &str) -> Option<&'static LanguageProfile> {
    REGISTRY.get(iso_code)
}

/// Used by `Cleaner`'s Japanese override (`remove_newline_in_middle_of_word`):
/// a newline surrounded by CJK word characters on both sides is deleted
/// rather than turned into a carriage return.
pub fn japanese_word_char_class() -> &'static str {
    JA_NEWLINE_IN_WORD_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_returns_none() {
        assert!(get("xx").is_none());
    }

    #[test]
    fn every_supported_language_builds() {
        for &code in SUPPORTED_LANGUAGES {
            assert!(get(code).is_some(), "missing profile for {code}");
        }
    }

    #[test]
    fn english_boundary_regex_splits_on_period() {
        let en = get("en").unwrap();
        let out = en.boundary_matches("Hello world. Goodbye.");
        assert_eq!(out.len(), 2);
    }
}
