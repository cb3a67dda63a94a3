//! Backtracking driver for backreference patterns
//!
//! A backreference needs the text a group captured earlier in the same
//! attempt, which a pure automaton cannot express. The driver splits the
//! token sequence at the first backreference, runs the prefix through the
//! ordinary pipeline, verifies the referenced bytes against the line, and
//! recurses on the suffix with the captures accumulated so far. Token
//! sequences without backreferences fall through to a plain simulation.

use crate::error::{RegexError, SemanticError};
use crate::lexer::Token;
use crate::nfa;
use crate::parser;
use crate::simulate::{Capture, Simulation};

/// Decide whether `tokens` match anywhere in `line`.
///
/// This is the entry point for patterns containing `\1`..`\9`; it reports
/// existence only, not captures.
pub fn run(line: &[u8], tokens: &[Token]) -> Result<bool, RegexError> {
    process(line, 0, tokens, &[])
}

fn process(
    line: &[u8],
    line_index: usize,
    tokens: &[Token],
    captured: &[Capture],
) -> Result<bool, RegexError> {
    if tokens.is_empty() {
        return Ok(true);
    }
    if line_index > line.len() {
        return Ok(false);
    }

    let backref = tokens.iter().enumerate().find_map(|(i, t)| match t {
        Token::Backref(k) => Some((i, *k)),
        _ => None,
    });

    let Some((split_at, group_index)) = backref else {
        // no backreferences left; the automaton decides
        let (tree, capture_count) = parser::parse(tokens)?;
        let nfa = nfa::build(&tree, capture_count)?;
        return Ok(Simulation::new(&nfa, &line[line_index..]).next().is_some());
    };

    let prefix = &tokens[..split_at];
    let suffix = &tokens[split_at + 1..];

    if prefix.is_empty() {
        // the backreference leads: the prefix matches the empty string
        // right at the current index
        let synthetic = vec![Capture { start: 0, end: 0 }];
        return check_prefix_match(line, line_index, &synthetic, group_index, suffix, captured);
    }

    let (tree, capture_count) = parser::parse(prefix)?;
    let nfa = nfa::build(&tree, capture_count)?;
    for prefix_match in Simulation::new(&nfa, &line[line_index..]) {
        if check_prefix_match(line, line_index, &prefix_match, group_index, suffix, captured)? {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Verify the referenced bytes after one prefix match and recurse on the
/// suffix. Returns `Ok(false)` to let the caller try the next prefix
/// match.
fn check_prefix_match(
    line: &[u8],
    line_index: usize,
    prefix_match: &[Capture],
    group_index: usize,
    suffix: &[Token],
    captured: &[Capture],
) -> Result<bool, RegexError> {
    // prefix captures are relative to the sliced line; rebase the set ones
    let adjusted: Vec<Capture> = prefix_match
        .iter()
        .map(|capture| rebase(capture, line_index))
        .collect();

    let mut current = captured.to_vec();
    if adjusted.len() > 1 {
        current.extend_from_slice(&adjusted[1..]);
    }

    let Some((_, prefix_end)) = adjusted[0].as_span() else {
        return Ok(false);
    };

    let referenced = referenced_group(&current, group_index)?;
    // a group that never closed captures the empty string
    let (ref_start, ref_end) = referenced.as_span().unwrap_or((0, 0));
    let length = ref_end - ref_start;

    if prefix_end + length > line.len() {
        return Ok(false);
    }
    if line[prefix_end..prefix_end + length] != line[ref_start..ref_end] {
        return Ok(false);
    }

    process(line, prefix_end + length, suffix, &current)
}

fn rebase(capture: &Capture, base: usize) -> Capture {
    if capture.is_set() {
        Capture {
            start: capture.start + base as isize,
            end: capture.end + base as isize,
        }
    } else {
        *capture
    }
}

fn referenced_group(captured: &[Capture], index: usize) -> Result<Capture, RegexError> {
    if index < 1 {
        return Err(SemanticError::InvalidGroupIndex(index).into());
    }
    if index > captured.len() {
        return Err(SemanticError::GroupOutOfRange(index).into());
    }
    Ok(captured[index - 1])
}
