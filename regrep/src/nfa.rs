//! NFA construction
//!
//! Thompson-style construction over an arena of states addressed by stable
//! indices. A partially built piece of the automaton is a [`Fragment`]: an
//! entry state plus the list of holes (state + edge slot) still waiting
//! for a target. Combining fragments patches one fragment's holes with the
//! next fragment's entry, so the finished automaton has every edge wired
//! and at most two outgoing edges per state.

use crate::ast::AstNode;
use crate::error::RegexError;
use crate::matcher::Matcher;

/// An NFA state index into the arena
pub type StateId = usize;

/// An NFA state
///
/// Edges are `Option<StateId>`: `None` marks a dangling edge that
/// construction has not patched yet. After [`build`] returns, every edge
/// of every reachable state is `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Consumes one character when its matcher accepts it
    Matcher { matcher: Matcher, out: Option<StateId> },
    /// Forks the search; the `first` branch is explored before `second`,
    /// which is what makes quantifiers greedy
    Split {
        first: Option<StateId>,
        second: Option<StateId>,
    },
    /// Records where capture group `group` begins
    CaptureStart { group: usize, out: Option<StateId> },
    /// Records where capture group `group` ends
    CaptureEnd { group: usize, out: Option<StateId> },
    /// Passes only at line index 0
    StartAnchor { out: Option<StateId> },
    /// Passes only at the end of the line
    EndAnchor { out: Option<StateId> },
    /// Terminal state, no outgoing edges
    Accepting,
}

/// Which edge of a state a hole refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The single `out` edge of a non-split state
    Out,
    /// The greedy branch of a split
    First,
    /// The skip/exit branch of a split
    Second,
}

/// A dangling edge awaiting a target
#[derive(Debug, Clone, Copy)]
pub struct Hole {
    pub state: StateId,
    pub slot: Slot,
}

/// A partially wired automaton piece
#[derive(Debug)]
pub struct Fragment {
    /// Entry state
    pub start: StateId,
    /// Dangling edges to be patched into whatever follows
    pub holes: Vec<Hole>,
}

/// A fully constructed automaton
#[derive(Debug)]
pub struct Nfa {
    states: Vec<State>,
    start: StateId,
    capture_count: usize,
}

impl Nfa {
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of capture slots, whole-match group 0 included
    pub fn capture_count(&self) -> usize {
        self.capture_count
    }
}

struct Builder {
    states: Vec<State>,
}

impl Builder {
    fn push(&mut self, state: State) -> StateId {
        let id = self.states.len();
        self.states.push(state);
        id
    }

    /// Assign `target` into every listed hole.
    fn patch(&mut self, holes: &[Hole], target: StateId) {
        for hole in holes {
            let edge = match (&mut self.states[hole.state], hole.slot) {
                (
                    State::Matcher { out, .. }
                    | State::CaptureStart { out, .. }
                    | State::CaptureEnd { out, .. }
                    | State::StartAnchor { out }
                    | State::EndAnchor { out },
                    Slot::Out,
                ) => out,
                (State::Split { first, .. }, Slot::First) => first,
                (State::Split { second, .. }, Slot::Second) => second,
                _ => unreachable!("hole slot does not exist on its state"),
            };
            *edge = Some(target);
        }
    }

    fn matcher_fragment(&mut self, matcher: Matcher) -> Fragment {
        let id = self.push(State::Matcher { matcher, out: None });
        Fragment {
            start: id,
            holes: vec![Hole {
                state: id,
                slot: Slot::Out,
            }],
        }
    }

    fn node(&mut self, node: &AstNode) -> Result<Fragment, RegexError> {
        match node {
            AstNode::Literal(c) => Ok(self.matcher_fragment(Matcher::Literal(*c))),
            AstNode::Digit => Ok(self.matcher_fragment(Matcher::Digit)),
            AstNode::Word => Ok(self.matcher_fragment(Matcher::Word)),
            AstNode::Wildcard => Ok(self.matcher_fragment(Matcher::Wildcard)),
            AstNode::Set(set) => {
                set.check_ranges()?;
                Ok(self.matcher_fragment(Matcher::Set(set.clone())))
            }
            AstNode::StartAnchor => {
                let id = self.push(State::StartAnchor { out: None });
                Ok(Fragment {
                    start: id,
                    holes: vec![Hole {
                        state: id,
                        slot: Slot::Out,
                    }],
                })
            }
            AstNode::EndAnchor => {
                let id = self.push(State::EndAnchor { out: None });
                Ok(Fragment {
                    start: id,
                    holes: vec![Hole {
                        state: id,
                        slot: Slot::Out,
                    }],
                })
            }
            AstNode::Concat(left, right) => {
                let left = self.node(left)?;
                let right = self.node(right)?;
                self.patch(&left.holes, right.start);
                Ok(Fragment {
                    start: left.start,
                    holes: right.holes,
                })
            }
            AstNode::Alternate(left, right) => {
                let left = self.node(left)?;
                let right = self.node(right)?;
                let split = self.push(State::Split {
                    first: Some(left.start),
                    second: Some(right.start),
                });
                let mut holes = left.holes;
                holes.extend(right.holes);
                Ok(Fragment {
                    start: split,
                    holes,
                })
            }
            AstNode::Star(child) => {
                let inner = self.node(child)?;
                let split = self.push(State::Split {
                    first: Some(inner.start),
                    second: None,
                });
                self.patch(&inner.holes, split);
                Ok(Fragment {
                    start: split,
                    holes: vec![Hole {
                        state: split,
                        slot: Slot::Second,
                    }],
                })
            }
            AstNode::Plus(child) => {
                // like star, but entered through the body so it runs at
                // least once
                let inner = self.node(child)?;
                let split = self.push(State::Split {
                    first: Some(inner.start),
                    second: None,
                });
                self.patch(&inner.holes, split);
                Ok(Fragment {
                    start: inner.start,
                    holes: vec![Hole {
                        state: split,
                        slot: Slot::Second,
                    }],
                })
            }
            AstNode::Optional(child) => {
                let inner = self.node(child)?;
                let split = self.push(State::Split {
                    first: Some(inner.start),
                    second: None,
                });
                let mut holes = inner.holes;
                holes.push(Hole {
                    state: split,
                    slot: Slot::Second,
                });
                Ok(Fragment {
                    start: split,
                    holes,
                })
            }
            AstNode::Group { child, index } => {
                let inner = self.node(child)?;
                let open = self.push(State::CaptureStart {
                    group: *index,
                    out: Some(inner.start),
                });
                let close = self.push(State::CaptureEnd {
                    group: *index,
                    out: None,
                });
                self.patch(&inner.holes, close);
                Ok(Fragment {
                    start: open,
                    holes: vec![Hole {
                        state: close,
                        slot: Slot::Out,
                    }],
                })
            }
        }
    }
}

/// Build the automaton for a parsed pattern.
///
/// The expression is wrapped in the group-0 capture pair so every match
/// reports the whole-match span, and terminated with the accepting state.
/// `capture_count` is the count the parser returned for this tree.
pub fn build(tree: &AstNode, capture_count: usize) -> Result<Nfa, RegexError> {
    let mut builder = Builder { states: Vec::new() };

    let body = builder.node(tree)?;

    let open = builder.push(State::CaptureStart {
        group: 0,
        out: Some(body.start),
    });
    let close = builder.push(State::CaptureEnd {
        group: 0,
        out: None,
    });
    builder.patch(&body.holes, close);

    let accept = builder.push(State::Accepting);
    builder.patch(
        &[Hole {
            state: close,
            slot: Slot::Out,
        }],
        accept,
    );

    Ok(Nfa {
        states: builder.states,
        start: open,
        capture_count,
    })
}
