//! NFA simulation with capture tracking
//!
//! [`Simulation`] walks the automaton against a line of bytes and lazily
//! yields one capture-array snapshot per accepting path. Matching is a
//! depth-first search driven by an explicit task stack. All live paths of
//! one attempt share a single capture array, mutated in place; every
//! capture write pushes a revert task that restores the previous value
//! when the search unwinds past it. Accepting states hand out deep copies,
//! so consumers always see stable snapshots.
//!
//! Matches are produced greedy-first within a start index (each split
//! pushes its exit branch below its body branch) and start indices ascend.
//! Once a start index has produced matches, the search jumps past the
//! furthest match end before trying further start positions.

use std::collections::HashSet;

use crate::nfa::{Nfa, State, StateId};

/// One captured span, as byte offsets into the line
///
/// Half-open `[start, end)`. `(-1, -1)` means the group never closed on
/// the matched path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub start: isize,
    pub end: isize,
}

impl Capture {
    pub const UNSET: Capture = Capture { start: -1, end: -1 };

    pub fn is_set(&self) -> bool {
        self.start >= 0 && self.end >= 0
    }

    /// The captured span as unsigned offsets, or `None` when unset
    pub fn as_span(&self) -> Option<(usize, usize)> {
        if self.is_set() {
            Some((self.start as usize, self.end as usize))
        } else {
            None
        }
    }
}

/// Which half of a capture an undo entry restores
#[derive(Debug, Clone, Copy)]
enum Field {
    Start,
    End,
}

/// Saved state for rolling one capture write back
#[derive(Debug, Clone, Copy)]
struct UndoEntry {
    group: usize,
    field: Field,
    old: isize,
}

/// A unit of depth-first work
#[derive(Debug)]
enum Task {
    /// Process `state` with the read head at byte offset `at`
    Enter { state: StateId, at: usize },
    /// Restore a capture field overwritten on the path above
    Revert(UndoEntry),
}

/// The search state for one start index
struct Attempt {
    stack: Vec<Task>,
    /// Threads already explored, keyed by (state, line index)
    visited: HashSet<(StateId, usize)>,
    /// The capture array shared by every path of this attempt
    captures: Vec<Capture>,
    found_any: bool,
    /// Furthest whole-match end seen at this start index
    max_end: usize,
}

impl Attempt {
    fn new(nfa: &Nfa, start_index: usize) -> Self {
        Attempt {
            stack: vec![Task::Enter {
                state: nfa.start(),
                at: start_index,
            }],
            visited: HashSet::new(),
            captures: vec![Capture::UNSET; nfa.capture_count()],
            found_any: false,
            max_end: start_index,
        }
    }

    /// Run the search until the next accepting path or exhaustion.
    fn drive(&mut self, nfa: &Nfa, line: &[u8]) -> Option<Vec<Capture>> {
        while let Some(task) = self.stack.pop() {
            let (state_id, at) = match task {
                Task::Revert(entry) => {
                    let capture = &mut self.captures[entry.group];
                    match entry.field {
                        Field::Start => capture.start = entry.old,
                        Field::End => capture.end = entry.old,
                    }
                    continue;
                }
                Task::Enter { state, at } => (state, at),
            };

            if !self.visited.insert((state_id, at)) {
                continue;
            }

            match nfa.state(state_id) {
                State::Accepting => {
                    return Some(self.captures.clone());
                }
                State::Matcher { matcher, out } => {
                    if at < line.len() {
                        let (rune, width) = decode_rune(&line[at..]);
                        if matcher.matches(rune) {
                            if let Some(next) = out {
                                self.stack.push(Task::Enter {
                                    state: *next,
                                    at: at + width,
                                });
                            }
                        }
                    }
                }
                State::Split { first, second } => {
                    // second lands below first, so the greedy branch is
                    // explored first
                    if let Some(second) = second {
                        self.stack.push(Task::Enter { state: *second, at });
                    }
                    if let Some(first) = first {
                        self.stack.push(Task::Enter { state: *first, at });
                    }
                }
                State::CaptureStart { group, out } => {
                    let old = self.captures[*group].start;
                    self.captures[*group].start = at as isize;
                    self.stack.push(Task::Revert(UndoEntry {
                        group: *group,
                        field: Field::Start,
                        old,
                    }));
                    if let Some(next) = out {
                        self.stack.push(Task::Enter { state: *next, at });
                    }
                }
                State::CaptureEnd { group, out } => {
                    let old = self.captures[*group].end;
                    self.captures[*group].end = at as isize;
                    self.stack.push(Task::Revert(UndoEntry {
                        group: *group,
                        field: Field::End,
                        old,
                    }));
                    if let Some(next) = out {
                        self.stack.push(Task::Enter { state: *next, at });
                    }
                }
                State::StartAnchor { out } => {
                    if at == 0 {
                        if let Some(next) = out {
                            self.stack.push(Task::Enter { state: *next, at });
                        }
                    }
                }
                State::EndAnchor { out } => {
                    if at == line.len() {
                        if let Some(next) = out {
                            self.stack.push(Task::Enter { state: *next, at });
                        }
                    }
                }
            }
        }

        None
    }
}

/// A lazy stream of capture-array snapshots, one per accepting path
///
/// Drop the iterator to abandon the search; no work happens beyond the
/// matches already pulled.
pub struct Simulation<'n, 'l> {
    nfa: &'n Nfa,
    line: &'l [u8],
    search_index: usize,
    attempt: Option<Attempt>,
    exhausted: bool,
}

impl<'n, 'l> Simulation<'n, 'l> {
    pub fn new(nfa: &'n Nfa, line: &'l [u8]) -> Self {
        Simulation {
            nfa,
            line,
            search_index: 0,
            attempt: None,
            exhausted: false,
        }
    }
}

impl Iterator for Simulation<'_, '_> {
    type Item = Vec<Capture>;

    fn next(&mut self) -> Option<Vec<Capture>> {
        let nfa = self.nfa;
        let line = self.line;

        while !self.exhausted {
            let search_index = self.search_index;
            let attempt = self
                .attempt
                .get_or_insert_with(|| Attempt::new(nfa, search_index));

            if let Some(snapshot) = attempt.drive(nfa, line) {
                attempt.found_any = true;
                if let Some((_, end)) = snapshot[0].as_span() {
                    if end > attempt.max_end {
                        attempt.max_end = end;
                    }
                }
                return Some(snapshot);
            }

            // this start index is exhausted; jump past the furthest match
            // it produced, or move one byte forward
            if attempt.found_any && attempt.max_end > self.search_index {
                self.search_index = attempt.max_end;
            } else {
                self.search_index += 1;
            }
            self.attempt = None;

            if self.search_index > line.len() {
                self.exhausted = true;
            }
        }

        None
    }
}

/// Decode one UTF-8 rune from the front of `bytes`.
///
/// Invalid or truncated sequences decode as U+FFFD with width 1, so the
/// search always makes progress.
fn decode_rune(bytes: &[u8]) -> (char, usize) {
    for width in 1..=bytes.len().min(4) {
        if let Ok(s) = std::str::from_utf8(&bytes[..width]) {
            if let Some(c) = s.chars().next() {
                return (c, width);
            }
        }
    }
    (char::REPLACEMENT_CHARACTER, 1)
}
