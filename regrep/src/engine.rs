//! The public matching interface
//!
//! [`Regex`] compiles a pattern once and matches it against byte lines.
//! Ordinary patterns run on the NFA simulator with full capture
//! reporting; patterns containing backreferences run on the backtracking
//! driver and report match / no-match only.

use crate::backtrack;
use crate::error::{RegexError, Result, SemanticError};
use crate::lexer::{tokenize, Token};
use crate::nfa::{build, Nfa};
use crate::parser::parse;
use crate::simulate::{Capture, Simulation};

/// One match with its capture spans
///
/// Index 0 is the whole match; indices 1.. are the pattern's groups in
/// opener order. Groups that never closed on the matched path report
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    captures: Vec<Capture>,
}

impl Match {
    fn new(captures: Vec<Capture>) -> Self {
        Match { captures }
    }

    /// Byte offset where the match begins
    pub fn start(&self) -> usize {
        self.span().0
    }

    /// Byte offset one past the end of the match
    pub fn end(&self) -> usize {
        self.span().1
    }

    /// The whole-match span
    pub fn span(&self) -> (usize, usize) {
        self.captures[0].as_span().unwrap_or((0, 0))
    }

    /// The span of capture group `index`, or `None` when unset
    pub fn group(&self, index: usize) -> Option<(usize, usize)> {
        self.captures.get(index)?.as_span()
    }

    /// The bytes capture group `index` matched
    pub fn group_bytes<'l>(&self, line: &'l [u8], index: usize) -> Option<&'l [u8]> {
        let (start, end) = self.group(index)?;
        line.get(start..end)
    }

    /// The raw capture array, group 0 included
    pub fn captures(&self) -> &[Capture] {
        &self.captures
    }

    /// Number of capture slots, group 0 included
    pub fn group_count(&self) -> usize {
        self.captures.len()
    }
}

/// A compiled pattern
#[derive(Debug)]
pub struct Regex {
    tokens: Vec<Token>,
    /// `None` when the pattern contains backreferences
    nfa: Option<Nfa>,
    capture_count: usize,
}

impl Regex {
    /// Compile a pattern: lex, parse, and build the automaton.
    ///
    /// Backreference patterns stop after lexing; their sub-patterns are
    /// parsed and built per match attempt by the backtracking driver.
    pub fn new(pattern: &str) -> Result<Regex> {
        let tokens = tokenize(pattern)?;

        if tokens.iter().any(|t| matches!(t, Token::Backref(_))) {
            let groups = tokens
                .iter()
                .filter(|t| matches!(t, Token::OpenGroup))
                .count();
            return Ok(Regex {
                tokens,
                nfa: None,
                capture_count: groups + 1,
            });
        }

        let (tree, capture_count) = parse(&tokens)?;
        let nfa = build(&tree, capture_count)?;
        Ok(Regex {
            tokens,
            nfa: Some(nfa),
            capture_count,
        })
    }

    /// Number of capture slots, whole-match group 0 included
    pub fn capture_count(&self) -> usize {
        self.capture_count
    }

    /// Whether the pattern contains `\1`..`\9`
    pub fn has_backreferences(&self) -> bool {
        self.nfa.is_none()
    }

    /// Does the pattern match anywhere in `line`?
    pub fn is_match(&self, line: &[u8]) -> Result<bool> {
        match &self.nfa {
            Some(nfa) => Ok(Simulation::new(nfa, line).next().is_some()),
            None => backtrack::run(line, &self.tokens),
        }
    }

    /// The first match in `line`, captures included.
    pub fn find(&self, line: &[u8]) -> Result<Option<Match>> {
        let nfa = self.nfa()?;
        Ok(Simulation::new(nfa, line).next().map(Match::new))
    }

    /// A lazy iterator over every match the simulator emits, greedy-first
    /// per start index, start indices ascending.
    pub fn matches<'r, 'l>(&'r self, line: &'l [u8]) -> Result<Matches<'r, 'l>> {
        let nfa = self.nfa()?;
        Ok(Matches {
            inner: Simulation::new(nfa, line),
        })
    }

    /// Collect every match in `line`.
    pub fn find_all(&self, line: &[u8]) -> Result<Vec<Match>> {
        Ok(self.matches(line)?.collect())
    }

    fn nfa(&self) -> Result<&Nfa> {
        self.nfa
            .as_ref()
            .ok_or_else(|| RegexError::from(SemanticError::CapturesUnavailable))
    }
}

/// Lazy match stream returned by [`Regex::matches`]
pub struct Matches<'r, 'l> {
    inner: Simulation<'r, 'l>,
}

impl Iterator for Matches<'_, '_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        self.inner.next().map(Match::new)
    }
}
