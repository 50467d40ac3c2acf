//! crates/logging/src/scanner/pattern.rs
//! Token matchers accepted by the flag scanner.

use std::fmt;

use regex::Regex;

use crate::error::LevelError;

/// A single token matcher: an exact literal or a compiled regular expression.
#[derive(Clone)]
pub enum Pattern {
    /// Matches a token equal to the string.
    Literal(String),
    /// Matches a token the expression finds a match in. Anchor explicitly
    /// (`^...$`) for whole-token matching.
    Regex(Regex),
}

impl Pattern {
    /// Creates an exact-match pattern.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Compiles a regular-expression pattern.
    pub fn regex(source: &str) -> Result<Self, LevelError> {
        Regex::new(source)
            .map(Self::Regex)
            .map_err(|error| LevelError::InvalidPattern {
                pattern: source.to_owned(),
                reason: error.to_string(),
            })
    }

    /// Parses pattern text from configuration.
    ///
    /// Text wrapped in slashes (`/^-v+$/`) is compiled as a regular
    /// expression; anything else is an exact literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Pattern;
    ///
    /// let verbose = Pattern::parse("/^--verb(ose)?$/")?;
    /// assert!(verbose.matches("--verb"));
    /// assert!(!verbose.matches("--verbosity"));
    ///
    /// assert!(Pattern::parse("-v")?.matches("-v"));
    /// assert!(Pattern::parse("/(/").is_err());
    /// # Ok::<(), logging::LevelError>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        match text
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
        {
            Some(source) if text.len() >= 2 => Self::regex(source),
            _ => Ok(Self::literal(text)),
        }
    }

    /// Reports whether `token` matches.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == token,
            Self::Regex(regex) => regex.is_match(token),
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.debug_tuple("Literal").field(literal).finish(),
            Self::Regex(regex) => f.debug_tuple("Regex").field(&regex.as_str()).finish(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.write_str(literal),
            Self::Regex(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self::Regex(regex)
    }
}

/// An ordered list of patterns combined with OR. An empty set matches nothing.
#[derive(Clone, Debug, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Parses every entry with [`Pattern::parse`].
    pub fn parse<I, S>(entries: I) -> Result<Self, LevelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        entries
            .into_iter()
            .map(|entry| Pattern::parse(entry.as_ref()))
            .collect()
    }

    /// Appends a pattern.
    pub fn push(&mut self, pattern: impl Into<Pattern>) {
        self.patterns.push(pattern.into());
    }

    /// Reports whether any pattern matches `token`.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(token))
    }

    /// Returns the patterns in order.
    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Reports whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<P> FromIterator<P> for PatternSet
where
    P: Into<Pattern>,
{
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
        Self {
            patterns: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Pattern> for PatternSet {
    fn from(pattern: Pattern) -> Self {
        Self {
            patterns: vec![pattern],
        }
    }
}

impl From<&str> for PatternSet {
    fn from(text: &str) -> Self {
        Pattern::literal(text).into()
    }
}

impl<P, const N: usize> From<[P; N]> for PatternSet
where
    P: Into<Pattern>,
{
    fn from(patterns: [P; N]) -> Self {
        patterns.into_iter().collect()
    }
}

impl From<Vec<Pattern>> for PatternSet {
    fn from(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }
}
