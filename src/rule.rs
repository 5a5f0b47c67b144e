use onig::{Regex, RegexOptions, Syntax};

use crate::error::BuildResult;

/// An immutable `(pattern, replacement)` pair, compiled once and applied by
/// regex substitution over a whole buffer. `apply_rules` folds a sequence of
/// these, each rule seeing the output of the previous one.
pub struct Rule(Regex, &'static str);

impl Rule {
    #[must_use]
    pub fn new(regex: &str, replace: &'static str) -> BuildResult<Self> {
        Ok(Rule(
            Regex::with_options(regex, RegexOptions::REGEX_OPTION_NONE, Syntax::ruby())?,
            replace,
        ))
    }

    #[must_use]
    pub fn new_i(regex: &str, replace: &'static str) -> BuildResult<Self> {
        Ok(Rule(
            Regex::with_options(regex, RegexOptions::REGEX_OPTION_IGNORECASE, Syntax::ruby())?,
            replace,
        ))
    }

    #[must_use]
    pub fn replace_all(&self, text: &str) -> String {
        self.0.replace_all(text, self.1)
    }
}

/// Folds a sequence of rules over `text`, each seeing the previous one's
/// output. Order is significant and callers must not reorder rule lists.
pub fn apply_rules(mut text: String, rules: &[Rule]) -> String {
    for rule in rules {
        text = rule.replace_all(&text);
    }
    text
}
