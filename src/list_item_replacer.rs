//! Detects alphabetical, Roman-numeral, and numbered list markers and
//! neutralizes their periods/parens so they don't register as sentence
//! boundaries.
//!
//! Unlike the rest of the pipeline this stage carries no per-language
//! knowledge, so it is exposed as a lazily built singleton rather than a
//! field on every [`crate::language::LanguageProfile`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use onig::{Captures, Regex};

use crate::error::BuildResult;
use crate::rule::Rule;
use crate::sentinel;
use crate::util::{re, re_i};

#[rustfmt::skip]
const ROMAN_NUMERALS: &[&str] = &[
    "i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x", "xi", "xii",
    "xiii", "xiv", "xv", "xvi", "xvii", "xviii", "xix", "xx",
];

const LATIN_NUMERALS: &[&str] = &[
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o",
    "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z",
];

/// Maximum distance, in characters, two numbered-list markers may be apart
/// and still count as belonging to the same list.
const LIST_WINDOW: usize = 200;

struct ListItemReplacer {
    roman_numerals: HashMap<&'static str, i32>,
    latin_numerals: HashMap<&'static str, i32>,

    alphabetical_list_with_periods: Regex,
    alphabetical_list_with_parens: Regex,

    alphabetical_list_letters_and_periods_regex: Regex,
    extract_alphabetical_list_letters_regex: Regex,

    numbered_list_regex_1: Regex,
    numbered_list_regex_2: Regex,
    numbered_list_parens_regex: Regex,

    roman_numerals_in_parentheses: Regex,

    find_numbered_list_1: Regex,
    find_numbered_list_2: Regex,
    find_numbered_list_parens: Regex,

    space_between_list_items_first_rule: Rule,
    space_between_list_items_second_rule: Rule,
    space_between_list_items_third_rule: Rule,

    substitute_list_period_rule: Rule,
    list_marker_rule: Rule,
}

fn map_from_list(list: &[&'static str]) -> HashMap<&'static str, i32> {
    list.iter().enumerate().map(|(idx, &s)| (s, idx as i32)).collect()
}

impl ListItemReplacer {
    fn new() -> BuildResult<Self> {
        Ok(ListItemReplacer {
            roman_numerals: map_from_list(ROMAN_NUMERALS),
            latin_numerals: map_from_list(LATIN_NUMERALS),

            // Example: https://rubular.com/r/XcpaJKH0sz
            alphabetical_list_with_periods: re_i(
                r"(?<=^)[a-z](?=\.)|(?<=\A)[a-z](?=\.)|(?<=\s)[a-z](?=\.)",
            )?,

            // Example: https://rubular.com/r/Gu5rQapywf
            alphabetical_list_with_parens: re_i(
                r"(?<=\()[a-z]+(?=\))|(?<=^)[a-z]+(?=\))|(?<=\A)[a-z]+(?=\))|(?<=\s)[a-z]+(?=\))",
            )?,

            // Example: https://rubular.com/r/wMpnVedEIb
            alphabetical_list_letters_and_periods_regex: re_i(
                r"(?<=^)[a-z]\.|(?<=\A)[a-z]\.|(?<=\s)[a-z]\.",
            )?,

            // Example: https://rubular.com/r/NsNFSqrNvJ
            extract_alphabetical_list_letters_regex: re_i(
                r"\([a-z]+(?=\))|(?<=^)[a-z]+(?=\))|(?<=\A)[a-z]+(?=\))|(?<=\s)[a-z]+(?=\))",
            )?,

            // Example: https://regex101.com/r/cd3yNz/2
            numbered_list_regex_1: re(
                r"\s\d{1,2}(?=\.\s)|^\d{1,2}(?=\.\s)|\s\d{1,2}(?=\.\))|^\d{1,2}(?=\.\))|(?<=\s\-)\d{1,2}(?=\.\s)|(?<=^\-)\d{1,2}(?=\.\s)|(?<=\s\⁃)\d{1,2}(?=\.\s)|(?<=^\⁃)\d{1,2}(?=\.\s)|(?<=s\-)\d{1,2}(?=\.\))|(?<=^\-)\d{1,2}(?=\.\))|(?<=\s\⁃)\d{1,2}(?=\.\))|(?<=^\⁃)\d{1,2}(?=\.\))",
            )?,

            // Example: https://regex101.com/r/cd3yNz/1
            numbered_list_regex_2: re(
                r"(?<=\s)\d{1,2}\.(?=\s)|^\d{1,2}\.(?=\s)|(?<=\s)\d{1,2}\.(?=\))|^\d{1,2}\.(?=\))|(?<=\s\-)\d{1,2}\.(?=\s)|(?<=^\-)\d{1,2}\.(?=\s)|(?<=\s\⁃)\d{1,2}\.(?=\s)|(?<=^\⁃)\d{1,2}\.(?=\s)|(?<=\s\-)\d{1,2}\.(?=\))|(?<=^\-)\d{1,2}\.(?=\))|(?<=\s\⁃)\d{1,2}\.(?=\))|(?<=^\⁃)\d{1,2}\.(?=\))",
            )?,

            // Example: https://regex101.com/r/O8bLbW/1
            numbered_list_parens_regex: re(r"\d{1,2}(?=\)\s)")?,

            // Full Roman-numeral grammar (through low thousands), guarded by
            // a capitalized follower so a bare "(v)" mid-sentence is left
            // alone.
            roman_numerals_in_parentheses: re(
                r"\(((?=[mdclxvi])m*(c[md]|d?c*)(x[cl]|l?x*)(i[xv]|v?i*))\)(?=\s[A-Z])",
            )?,

            find_numbered_list_1: re(r"♨.+[\n\r].+♨")?,
            find_numbered_list_2: re(r"for\s\d{1,2}♨\s[a-z]")?,
            find_numbered_list_parens: re(r"☝.+[\n\r].+☝")?,

            // Example: https://rubular.com/r/Wv4qLdoPx7
            space_between_list_items_first_rule: Rule::new(r"(?<=\S\S)\s(?=\S\s*\d+♨)", "\r")?,
            // Example: https://rubular.com/r/AizHXC6HxK
            space_between_list_items_second_rule: Rule::new(r"(?<=\S\S)\s(?=\d{1,2}♨)", "\r")?,
            // Example: https://rubular.com/r/GE5q6yID2j
            space_between_list_items_third_rule: Rule::new(r"(?<=\S\S)\s(?=\d{1,2}☝)", "\r")?,

            substitute_list_period_rule: Rule::new("♨", "∯")?,
            list_marker_rule: Rule::new("☝", "")?,
        })
    }

    fn add_line_break(&self, text: &str) -> String {
        let text = self.iterate_alphabet_array(text, &self.alphabetical_list_with_periods, false, false);
        let text = self.iterate_alphabet_array(&text, &self.alphabetical_list_with_parens, true, false);
        let text = self.iterate_alphabet_array(&text, &self.alphabetical_list_with_periods, false, true);
        let text = self.iterate_alphabet_array(&text, &self.alphabetical_list_with_parens, true, true);

        let text = self.scan_lists(
            &text,
            &self.numbered_list_regex_1,
            &self.numbered_list_regex_2,
            sentinel::LIST_PERIOD,
            true,
        );
        let text = self.add_line_breaks_for_numbered_list_with_periods(&text);
        let text = self.substitute_list_period_rule.replace_all(&text);

        let text = self.scan_lists(
            &text,
            &self.numbered_list_parens_regex,
            &self.numbered_list_parens_regex,
            sentinel::LIST_PAREN,
            false,
        );
        let text = self.add_line_breaks_for_numbered_list_with_parens(&text);
        self.list_marker_rule.replace_all(&text)
    }

    fn replace_parens(&self, text: &str) -> String {
        self.roman_numerals_in_parentheses.replace_all(text, |c: &Captures| {
            format!(
                "{}{}{}",
                sentinel::ROMAN_GUARD_LEFT,
                c.at(1).unwrap_or(""),
                sentinel::ROMAN_GUARD_RIGHT
            )
        })
    }

    fn replace_alphabet_list(&self, text: &str, what_to_replace: &str) -> String {
        self.alphabetical_list_letters_and_periods_regex
            .replace_all(text, |m: &Captures| {
                let mat = m.at(0).unwrap();
                let match_wo_period = mat.strip_suffix('.').unwrap_or(mat);
                if match_wo_period == what_to_replace {
                    format!("\r{}∯", match_wo_period)
                } else {
                    mat.to_string()
                }
            })
    }

    fn replace_alphabet_list_parens(&self, text: &str, what_to_replace: &str) -> String {
        self.extract_alphabetical_list_letters_regex
            .replace_all(text, |m: &Captures| {
                let mat = m.at(0).unwrap();
                if let Some(match_wo_paren) = mat.strip_prefix('(') {
                    if match_wo_paren == what_to_replace {
                        format!("\r{}{}", sentinel::ROMAN_GUARD_LEFT, match_wo_paren)
                    } else {
                        mat.to_string()
                    }
                } else if mat == what_to_replace {
                    format!("\r{}", mat)
                } else {
                    mat.to_string()
                }
            })
    }

    fn iterate_alphabet_array(&self, text: &str, regex: &Regex, parens: bool, use_roman_numeral: bool) -> String {
        let alphabet = if use_roman_numeral { &self.roman_numerals } else { &self.latin_numerals };

        let list_array: Vec<(&str, i32)> = regex
            .find_iter(text)
            .filter_map(|x| alphabet.get(&text[x.0..x.1]).map(|&v| (&text[x.0..x.1], v)))
            .collect();

        let len = list_array.len();
        let mut result = text.to_string();
        for ind in 0..len {
            let is_strange = if len <= 1 {
                // A solitary marker never confirms: its only possible
                // "previous" neighbor is itself, at distance zero.
                true
            } else if ind == len - 1 {
                (list_array[len - 2].1 - list_array[len - 1].1).abs() != 1
            } else if ind == 0 {
                // Index 0's "previous" neighbor wraps to the list's last
                // entry, mirroring a negative-index lookup in the lineage
                // this was ported from (list_array[-1] == list_array[len-1]).
                list_array[1].1 - list_array[0].1 != 1
                    && (list_array[len - 1].1 - list_array[0].1).abs() != 1
            } else {
                list_array[ind + 1].1 - list_array[ind].1 != 1
                    && (list_array[ind - 1].1 - list_array[ind].1).abs() != 1
            };
            if is_strange {
                continue;
            }

            let each = list_array[ind].0;
            result = if parens {
                self.replace_alphabet_list_parens(&result, each)
            } else {
                self.replace_alphabet_list(&result, each)
            };
        }
        result
    }

    fn scan_lists(&self, text: &str, regex1: &Regex, regex2: &Regex, replacement: char, strip: bool) -> String {
        let list_array: Vec<(i32, usize)> = regex1
            .find_iter(text)
            .filter_map(|r| text[r.0..r.1].trim().parse::<i32>().ok().map(|v| (v, r.0)))
            .collect();

        let mut result = text.to_string();
        for (ind, &(item, pos)) in list_array.iter().enumerate() {
            let mut confirmed = false;
            if let Some(&(next_item, next_pos)) = list_array.get(ind + 1) {
                if next_item == item + 1 && next_pos - pos < LIST_WINDOW {
                    confirmed = true;
                }
            }
            if !confirmed && ind > 0 {
                let (prev_item, prev_pos) = list_array[ind - 1];
                if pos - prev_pos < LIST_WINDOW
                    && ((item - 1 == prev_item) || (item == 0 && prev_item == 9) || (item == 9 && prev_item == 0))
                {
                    confirmed = true;
                }
            }
            if !confirmed {
                continue;
            }

            result = regex2.replace_all(&result, |m: &Captures| {
                let mut mat = m.at(0).unwrap();
                if strip {
                    mat = mat.trim();
                }
                let chomped = if mat.len() == 1 { mat } else { mat.trim_matches(|c| c == '.' || c == ']' || c == ')') };
                if chomped.parse::<i32>() == Ok(item) {
                    format!("{}{}", item, replacement)
                } else {
                    mat.to_string()
                }
            });
        }
        result
    }

    fn add_line_breaks_for_numbered_list_with_periods(&self, text: &str) -> String {
        if text.contains(sentinel::LIST_PERIOD)
            && self.find_numbered_list_1.find(text).is_none()
            && self.find_numbered_list_2.find(text).is_none()
        {
            let text = self.space_between_list_items_first_rule.replace_all(text);
            return self.space_between_list_items_second_rule.replace_all(&text);
        }
        text.to_string()
    }

    fn add_line_breaks_for_numbered_list_with_parens(&self, text: &str) -> String {
        if text.contains(sentinel::LIST_PAREN) && self.find_numbered_list_parens.find(text).is_none() {
            return self.space_between_list_items_third_rule.replace_all(text);
        }
        text.to_string()
    }
}

static REPLACER: Lazy<ListItemReplacer> =
    Lazy::new(|| ListItemReplacer::new().expect("list item replacer regexes are static and must compile"));

/// Detects list markers (numbered, parenthesized, alphabetical, Roman
/// numeral) and neutralizes the ones confirmed to belong to a real list.
pub fn add_line_break(text: &str) -> String {
    REPLACER.add_line_break(text)
}

/// Wraps `(roman-numeral)` markers followed by a capitalized word in guard
/// sentinels so the boundary regex does not mistake them for a closing
/// parenthesis ending a sentence.
pub fn replace_parens(text: &str) -> String {
    REPLACER.replace_parens(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabetical_list_with_periods() {
        let list = ListItemReplacer::new().unwrap();
        let text = "a. The first item b. The second item c. The third list item D. case insesitive \
E. Don't select the nextF.dont't select this G should be followed by dot";

        assert_eq!(
            list.alphabetical_list_with_periods.find_iter(text).collect::<Vec<_>>(),
            vec![(0, 1), (18, 19), (37, 38), (60, 61), (79, 80)]
        );
    }

    #[test]
    fn test_numbered_list_regex_1() {
        let list = ListItemReplacer::new().unwrap();
        let text = "\
Match below

1.  abcd
2.  xyz
    1. as
    2. yo
3.  asdf
4.  asdf

Dont match below

1.abc
2) asdf
333. asdf
";

        assert_eq!(
            list.numbered_list_regex_1.find_iter(text).collect::<Vec<_>>(),
            vec![(12, 14), (21, 23), (33, 35), (43, 45), (49, 51), (58, 60)]
        );
    }

    #[test]
    fn test_replace_alphabet_list() {
        let list = ListItemReplacer::new().unwrap();
        assert_eq!(
            list.replace_alphabet_list("a. ffegnog b. fgegkl c.", "b"),
            "a. ffegnog \rb∯ fgegkl c."
        );
    }

    #[test]
    fn test_replace_alphabet_list_parens() {
        let list = ListItemReplacer::new().unwrap();
        assert_eq!(
            list.replace_alphabet_list_parens("a) ffegnog (b) fgegkl c)", "a"),
            "\ra) ffegnog (b) fgegkl c)"
        );
        assert_eq!(
            list.replace_alphabet_list_parens("a) ffegnog (b) fgegkl c)", "b"),
            "a) ffegnog \r&✂&b) fgegkl c)"
        );
    }

    #[test]
    fn test_iterate_alphabet_array() {
        let list = ListItemReplacer::new().unwrap();
        assert_eq!(
            list.iterate_alphabet_array("i. Hi", &list.alphabetical_list_with_periods, false, true),
            "i. Hi"
        );

        let input = "\
Replace

a. Lorem
b. Donec
c. Aenean

Don't

A. Vestibulum
B. Proin
C. Maecenas
";
        let output = "\
Replace

\ra∯ Lorem
\rb∯ Donec
\rc∯ Aenean

Don't

A. Vestibulum
B. Proin
C. Maecenas
";
        assert_eq!(
            list.iterate_alphabet_array(input, &list.alphabetical_list_with_periods, false, false),
            output,
        );
    }

    #[test]
    fn test_scan_lists() {
        let list = ListItemReplacer::new().unwrap();

        let input = "\
Match below

1.  abcd
2.  xyz
    1. as
    2. yo
3.  asdf
4.  asdf

Dont match below

1.abc
2) asdf
333. asdf
";
        let output = "\
Match below

1♨  abcd
2♨  xyz
    1♨ as
    2♨ yo
3♨  asdf
4♨  asdf

Dont match below

1.abc
2) asdf
333. asdf
";
        assert_eq!(
            list.scan_lists(input, &list.numbered_list_regex_1, &list.numbered_list_regex_2, '♨', true),
            output
        );

        let input = "\
1) a
2) b
    1) b1
    2) b2
3) c
4) 5)
55) d
666) e
f77) f
8888) f
10)nomatch
-10) ignore sign
";
        let output = "\
1☝) a
2☝) b
    1☝) b1
    2☝) b2
3☝) c
4☝) 5☝)
55) d
666) e
f77) f
8888) f
10)nomatch
-10) ignore sign
";
        assert_eq!(
            list.scan_lists(input, &list.numbered_list_parens_regex, &list.numbered_list_parens_regex, '☝', false),
            output
        );
    }

    #[test]
    fn test_add_line_breaks_for_numbered_list_with_periods() {
        let list = ListItemReplacer::new().unwrap();

        let input = "1♨ abcd 2♨ xyz 3♨ asdf 4♨ asdf";
        let output = "1♨ abcd\r2♨ xyz\r3♨ asdf\r4♨ asdf";

        assert_eq!(list.add_line_breaks_for_numbered_list_with_periods(input), output);
    }

    #[test]
    fn test_add_line_breaks_for_numbered_list_with_parens() {
        let list = ListItemReplacer::new().unwrap();

        let input = "1☝) The first item 2☝) The second item";
        let output = "1☝) The first item\r2☝) The second item";

        assert_eq!(list.add_line_breaks_for_numbered_list_with_parens(input), output);
    }

    #[test]
    fn add_line_break_end_to_end_confirms_numbered_list() {
        let input = "The steps are: 1. Open. 2. Close. 3. Submit. After that, wait.";
        let out = add_line_break(input);
        assert!(out.contains("1∯ Open"));
        assert!(out.contains("2∯ Close"));
        assert!(out.contains("3∯ Submit"));
    }

    #[test]
    fn add_line_break_leaves_lone_numbered_reference_alone() {
        let input = "See item 5. It was fine.";
        assert_eq!(add_line_break(input), input);
    }

    #[test]
    fn replace_parens_guards_roman_numerals_before_capital() {
        let out = replace_parens("See (ii) Summary for details.");
        assert!(out.contains("&✂&ii&⌬&"));
    }
}
