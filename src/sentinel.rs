//! The canonical sentinel alphabet (spec §3). Every pipeline stage that
//! protects punctuation from the boundary regex rewrites it to one of these
//! code points, and `Processor::sub_symbols` is the only place that rewrites
//! them back.

/// Suppressed sentence-ending period.
pub const PERIOD: char = '∯';
/// First ellipsis escape, used while normalizing `...`/`. . .`/`…` variants.
pub const ELLIPSIS_1: char = 'ȸ';
/// Second ellipsis escape.
pub const ELLIPSIS_2: char = 'ȹ';

/// Masked `!`.
pub const BANG: &str = "&ᓴ&";
/// Masked `?`.
pub const QUESTION: &str = "&ᓷ&";
/// Masked CJK `！`.
pub const CJK_BANG: &str = "&ᓳ&";
/// Masked CJK `？`.
pub const CJK_QUESTION: &str = "&ᓸ&";
/// Masked `。`.
pub const CJK_PERIOD: &str = "&ᓰ&";
/// Masked `．`.
pub const CJK_FULLWIDTH_PERIOD: &str = "&ᓱ&";
/// Masked apostrophe.
pub const APOSTROPHE: &str = "&⎋&";

/// List-item period, rewritten to [`PERIOD`] once a list item is confirmed.
pub const LIST_PERIOD: char = '♨';
/// List-item closing paren marker, dropped once a list item is confirmed.
pub const LIST_PAREN: char = '☝';
/// Roman-numeral-in-parentheses left guard.
pub const ROMAN_GUARD_LEFT: &str = "&✂&";
/// Roman-numeral-in-parentheses right guard.
pub const ROMAN_GUARD_RIGHT: &str = "&⌬&";

/// Colon between digits, masked so it is not read as a sentence boundary.
pub const COLON_NUMERIC: char = '♭';
/// Comma that separates list-like clauses rather than ending a sentence.
pub const COMMA_NON_BOUNDARY: char = '♬';

/// `(sentinel, real)` pairs applied, in order, by the terminal restoration
/// pass (`Processor::sub_symbols`). None of these strings overlap, so plain
/// sequential `str::replace` is sufficient and matches the reference
/// implementation's "fastest path" comment. The roman-numeral guards are not
/// a stand-in for a removed character — they only wrap text that survived
/// unchanged — so they are restored to the empty string.
pub const SUB_SYMBOLS_TABLE: &[(&str, &str)] = &[
    ("∯", "."),
    (CJK_PERIOD, "。"),
    (CJK_FULLWIDTH_PERIOD, "．"),
    (CJK_BANG, "！"),
    (BANG, "!"),
    (QUESTION, "?"),
    (CJK_QUESTION, "？"),
    (APOSTROPHE, "'"),
    (ROMAN_GUARD_LEFT, ""),
    (ROMAN_GUARD_RIGHT, ""),
    ("♭", ":"),
    ("♬", ","),
];
