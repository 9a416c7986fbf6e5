//! Compilation of user-supplied filter patterns into name matchers.

use regex::Regex;
use thiserror::Error;

/// A filter pattern was not valid regex syntax.
#[derive(Debug, Error)]
#[error("invalid pattern '{pattern}': {source}")]
pub struct InvalidPattern {
    /// The offending pattern text.
    pub pattern: String,
    #[source]
    source: regex::Error,
}

/// User-supplied filter input: a single pattern, an ordered list of
/// patterns (combined as a logical OR), or an already-compiled regex.
#[derive(Debug, Clone)]
pub enum PatternSpec {
    One(String),
    Any(Vec<String>),
    Compiled(Regex),
}

impl From<&str> for PatternSpec {
    fn from(pattern: &str) -> Self {
        PatternSpec::One(pattern.to_string())
    }
}

impl From<String> for PatternSpec {
    fn from(pattern: String) -> Self {
        PatternSpec::One(pattern)
    }
}

impl From<Vec<String>> for PatternSpec {
    fn from(patterns: Vec<String>) -> Self {
        PatternSpec::Any(patterns)
    }
}

impl From<&[&str]> for PatternSpec {
    fn from(patterns: &[&str]) -> Self {
        PatternSpec::Any(patterns.iter().map(|p| p.to_string()).collect())
    }
}

impl From<Regex> for PatternSpec {
    fn from(regex: Regex) -> Self {
        PatternSpec::Compiled(regex)
    }
}

/// A compiled entry-name matcher. Matching uses search semantics: the
/// pattern may match anywhere in the name unless anchored.
#[derive(Debug, Clone)]
pub struct NameMatcher(Option<Regex>);

impl NameMatcher {
    /// A matcher that matches no name at all.
    pub fn match_nothing() -> Self {
        NameMatcher(None)
    }

    /// A matcher that matches every name.
    pub fn match_everything() -> Self {
        // ".*" is a valid literal pattern, so this is always Some.
        NameMatcher(Regex::new(".*").ok())
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.0.as_ref().is_some_and(|re| re.is_match(name))
    }
}

/// Compile a pattern spec into a `NameMatcher`.
///
/// `None` and an empty list both compile to a match-nothing matcher. A
/// list is OR-combined with each element parenthesized so that alternation
/// precedence cannot bleed between elements. A pre-compiled regex is used
/// as-is.
pub fn compile(spec: Option<&PatternSpec>) -> Result<NameMatcher, InvalidPattern> {
    match spec {
        None => Ok(NameMatcher::match_nothing()),
        Some(PatternSpec::Compiled(regex)) => Ok(NameMatcher(Some(regex.clone()))),
        Some(PatternSpec::One(pattern)) => compile_one(pattern).map(|re| NameMatcher(Some(re))),
        Some(PatternSpec::Any(patterns)) => {
            if patterns.is_empty() {
                return Ok(NameMatcher::match_nothing());
            }
            // Validate each element on its own so the error names the
            // offending fragment rather than the whole joined pattern.
            for pattern in patterns {
                compile_one(pattern)?;
            }
            let joined = patterns
                .iter()
                .map(|p| format!("({p})"))
                .collect::<Vec<_>>()
                .join("|");
            compile_one(&joined).map(|re| NameMatcher(Some(re)))
        }
    }
}

fn compile_one(pattern: &str) -> Result<Regex, InvalidPattern> {
    Regex::new(pattern).map_err(|source| InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
