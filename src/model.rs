use std::str::FromStr;

use thiserror::Error;

use crate::spec::{self, SpecError};

/// How a parameter receives its value on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Supplied by position, before any keyword operands.
    Positional,
    /// Supplied by name, optionally with a parenthesized value.
    Keyword,
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A single declared parameter: name, kind, default value, and whether a
/// supplied occurrence must carry a value.
///
/// Instances only come from parsing a PROC statement (see [`ProcSpec`]); they
/// are immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    name: String,
    kind: ParamKind,
    default: String,
    value_required: bool,
}

impl ParamSpec {
    pub(crate) fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Positional,
            default: String::default(),
            value_required: false,
        }
    }

    pub(crate) fn keyword(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Keyword,
            default: String::default(),
            value_required: false,
        }
    }

    pub(crate) fn keyword_with_value(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Keyword,
            default: default.into(),
            value_required: true,
        }
    }

    /// The uppercase parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this parameter is positional or keyword.
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// The declared default value; empty when none was declared.
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// `true` iff the parameter was declared as `KEY(default)`, even with an
    /// empty default (`KEY()`).
    pub fn value_required(&self) -> bool {
        self.value_required
    }
}

/// A parsed PROC statement: the ordered positional parameters followed by the
/// ordered keyword parameters.
///
/// Keyword declaration order defines both the minimum-abbreviation computation
/// and the order in which keywords are matched against the input.
///
/// ```
/// use procarg::ProcSpec;
///
/// let spec: ProcSpec = "PROC 1 DSN LIST CHARS(80)".parse().unwrap();
/// assert_eq!(spec.positional_count(), 1);
/// assert_eq!(spec.keywords().len(), 2);
/// assert!(spec.keywords()[1].value_required());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcSpec {
    positionals: Vec<ParamSpec>,
    keywords: Vec<ParamSpec>,
}

impl ProcSpec {
    pub(crate) fn new(positionals: Vec<ParamSpec>, keywords: Vec<ParamSpec>) -> Self {
        Self {
            positionals,
            keywords,
        }
    }

    /// The number of declared positional parameters.
    pub fn positional_count(&self) -> usize {
        self.positionals.len()
    }

    /// The declared positional parameters, in order.
    pub fn positionals(&self) -> &[ParamSpec] {
        &self.positionals
    }

    /// The declared keyword parameters, in order.
    pub fn keywords(&self) -> &[ParamSpec] {
        &self.keywords
    }

    pub(crate) fn keyword(&self, name: &str) -> Option<&ParamSpec> {
        self.keywords.iter().find(|keyword| keyword.name() == name)
    }

    /// The smallest prefix length of `target` that no other declared keyword
    /// shares, capped at the full name length.
    pub(crate) fn min_abbrev(&self, target: &str) -> usize {
        spec::min_abbrev(target, &self.keywords)
    }
}

impl FromStr for ProcSpec {
    type Err = SpecError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        spec::parse(text)
    }
}

/// The ways resolving an argument string against a PROC statement can fail.
///
/// Every variant renders a human-readable message via `Display`; nothing is
/// swallowed or auto-corrected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// A keyword declared to require a value was supplied bare.
    #[error("Keyword '{name}' requires a value.")]
    MissingValue {
        /// The full declared keyword name.
        name: String,
    },

    /// A keyword declared to take no value was supplied with `(value)`.
    #[error("Keyword '{name}' does not take a value.")]
    UnexpectedValue {
        /// The full declared keyword name.
        name: String,
    },

    /// An unquoted `(value)` contains an embedded blank or single quote.
    #[error("Invalid value '{value}' for '{word}': embedded blank or quote.")]
    InvalidValue {
        /// The keyword token as typed.
        word: String,
        /// The offending value text.
        value: String,
    },

    /// A quoted `('value')` form never closes.
    #[error("Unterminated quoted value for '{word}'.")]
    UnterminatedQuote {
        /// The keyword token as typed.
        word: String,
    },

    /// A specific key was requested which the PROC statement never declares.
    #[error("Key '{name}' is not declared by the PROC statement.")]
    UnknownKey {
        /// The requested key name.
        name: String,
    },

    /// Input text remained after every declared keyword was scanned.
    #[error("Unrecognized input '{leftover}'.")]
    UnrecognizedInput {
        /// The unconsumed text.
        leftover: String,
    },

    /// A scanning loop failed to terminate within its iteration bound.
    #[error("Scan iteration limit exceeded.")]
    IterationLimit,

    /// The PROC statement itself is malformed.
    #[error(transparent)]
    Spec(#[from] SpecError),
}
