//! Error types for the regex engine
//!
//! Failures fall into two categories: syntax errors raised while lexing or
//! parsing a pattern, and semantic errors raised while building or running
//! the automaton. A pattern that compiles but does not match is not an
//! error; matching reports that as a plain `false` / `None`.

use thiserror::Error;

/// The main error type for the regex engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegexError {
    /// The pattern string itself is malformed
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// The pattern is well formed but names something impossible
    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),
}

/// Errors raised while lexing or parsing a pattern
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A `\` with nothing after it
    #[error("dangling backslash")]
    DanglingBackslash,

    /// A `\` at the end of a `[...]` body
    #[error("dangling backslash inside character set")]
    DanglingBackslashInSet,

    /// A `[` with no closing `]`
    #[error("unmatched character set opener `[`")]
    UnmatchedSetOpener,

    /// A `(` with no closing `)`
    #[error("unmatched group opener `(`")]
    UnmatchedGroupOpener,

    /// A `)` with no opening `(`
    #[error("unmatched group closer `)`")]
    UnmatchedGroupCloser,

    /// A token that cannot start or continue an expression
    #[error("unexpected token {0}")]
    UnexpectedToken(String),

    /// The pattern ended where an expression was required
    #[error("unexpected end of pattern")]
    UnexpectedEnd,
}

/// Errors raised while building the automaton or resolving backreferences
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    /// A character-set range whose low end is above its high end
    #[error("reversed range `{0}-{1}` in character set")]
    ReversedRange(char, char),

    /// A backreference to a group the pattern never captured
    #[error("reference to non-existing group '{0}'")]
    GroupOutOfRange(usize),

    /// A backreference index below 1
    #[error("invalid group index '{0}'")]
    InvalidGroupIndex(usize),

    /// Capture reporting requested for a backreference pattern, which
    /// only supports match / no-match testing
    #[error("backreference patterns report match or no match only")]
    CapturesUnavailable,
}

/// Result type alias for regex operations
pub type Result<T> = std::result::Result<T, RegexError>;
