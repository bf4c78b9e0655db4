//! String rule functions

use regex::Regex;

/// Passes when the string is non-empty and made only of ASCII digits.
///
/// ```rust
/// use fluentval_validator::rules::numeric;
///
/// assert!(numeric("12345678911"));
/// assert!(!numeric("1234-5678"));
/// assert!(!numeric(""));
/// ```
#[inline]
pub fn numeric(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// A compiled regular-expression rule.
///
/// Build one with [`matches_pattern`], then hand [`PatternRule::into_rule`]
/// to a chain registration.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: Regex,
}

impl PatternRule {
    /// Returns true if `value` matches the pattern.
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.pattern.is_match(value)
    }

    /// Returns the source pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Converts the rule into a rule function.
    pub fn into_rule(self) -> impl Fn(&str) -> bool + Clone {
        move |value: &str| self.pattern.is_match(value)
    }
}

/// Compiles `pattern` into a [`PatternRule`].
///
/// ```rust
/// use fluentval_validator::rules::matches_pattern;
///
/// let rule = matches_pattern(r"^\d{3}-\d{4}$").unwrap();
/// assert!(rule.is_match("123-4567"));
/// assert!(!rule.is_match("1234567"));
/// ```
pub fn matches_pattern(pattern: &str) -> Result<PatternRule, regex::Error> {
    Ok(PatternRule {
        pattern: Regex::new(pattern)?,
    })
}
