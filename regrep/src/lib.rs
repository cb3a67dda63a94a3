//! regrep — a small regex engine for line-oriented search
//!
//! The pipeline is classic: a pattern is lexed into tokens, parsed into a
//! syntax tree with capture indices, compiled into a Thompson NFA over an
//! arena of states, and simulated against a line of bytes by a
//! capture-aware depth-first backtracker. Patterns containing
//! backreferences run on a separate driver that splits the token stream
//! around each `\k` and delegates the backreference-free pieces to the
//! NFA pipeline.
//!
//! Supported syntax: literals, `\d`, `\w`, `\1`..`\9`, escaped literals,
//! `[...]` / `[^...]` with ranges and embedded classes, `.`, `^`, `$`,
//! `*`, `+`, `?`, `|`, and `(...)` capture groups.
//!
//! ```
//! use regrep::Regex;
//!
//! let regex = Regex::new("w(o)rld").unwrap();
//! let m = regex.find(b"hello world").unwrap().unwrap();
//! assert_eq!(m.span(), (6, 11));
//! assert_eq!(m.group(1), Some((7, 8)));
//! ```

pub mod ast;
pub mod backtrack;
pub mod engine;
pub mod error;
pub mod lexer;
pub mod matcher;
pub mod nfa;
pub mod parser;
pub mod simulate;

pub use ast::AstNode;
pub use engine::{Match, Matches, Regex};
pub use error::{RegexError, Result, SemanticError, SyntaxError};
pub use lexer::{tokenize, Token};
pub use matcher::{CharSet, ClassKind, Matcher};
pub use nfa::{build, Fragment, Hole, Nfa, Slot, State, StateId};
pub use parser::{parse, Parser};
pub use simulate::{Capture, Simulation};
