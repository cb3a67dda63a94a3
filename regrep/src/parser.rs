//! Parser for token sequences
//!
//! Recursive descent over the grammar, lowest precedence first:
//!
//! ```text
//! expression := term ( '|' term )*
//! term       := factor factor*            (implicit concatenation)
//! factor     := atom ( '*' | '+' | '?' )*
//! atom       := literal | set | '.' | '\d' | '\w'
//!             | '^' | '$'
//!             | '(' expression ')'
//! ```
//!
//! Concatenation binds tighter than alternation and quantifiers bind
//! tighter than concatenation. Each `(` bumps a running capture counter
//! and stamps its group with the new value, so indices follow opener
//! order. The count handed back to callers is `counter + 1`: index 0 is
//! reserved for the whole-match group the automaton builder inserts.

use crate::ast::AstNode;
use crate::error::{RegexError, SyntaxError};
use crate::lexer::Token;

/// Parser state over a borrowed token slice
pub struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    capture_index: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            position: 0,
            capture_index: 0,
        }
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn parse_expression(&mut self) -> Result<AstNode, RegexError> {
        let mut node = self.parse_term()?;

        while matches!(self.current(), Some(Token::Pipe)) {
            self.advance();
            let right = self.parse_term()?;
            node = AstNode::Alternate(Box::new(node), Box::new(right));
        }

        Ok(node)
    }

    fn parse_term(&mut self) -> Result<AstNode, RegexError> {
        let mut node = self.parse_factor()?;

        while self.current().is_some_and(Token::starts_atom) {
            let right = self.parse_factor()?;
            node = AstNode::Concat(Box::new(node), Box::new(right));
        }

        Ok(node)
    }

    fn parse_factor(&mut self) -> Result<AstNode, RegexError> {
        let mut node = self.parse_atom()?;

        loop {
            match self.current() {
                Some(Token::Star) => {
                    self.advance();
                    node = AstNode::Star(Box::new(node));
                }
                Some(Token::Plus) => {
                    self.advance();
                    node = AstNode::Plus(Box::new(node));
                }
                Some(Token::Question) => {
                    self.advance();
                    node = AstNode::Optional(Box::new(node));
                }
                _ => break,
            }
        }

        Ok(node)
    }

    fn parse_atom(&mut self) -> Result<AstNode, RegexError> {
        match self.current() {
            None => Err(SyntaxError::UnexpectedEnd.into()),
            Some(Token::OpenGroup) => {
                self.advance();

                self.capture_index += 1;
                let index = self.capture_index;

                let child = self.parse_expression()?;

                if !matches!(self.current(), Some(Token::CloseGroup)) {
                    return Err(SyntaxError::UnmatchedGroupOpener.into());
                }
                self.advance();

                Ok(AstNode::Group {
                    child: Box::new(child),
                    index,
                })
            }
            Some(Token::Literal(c)) => {
                let c = *c;
                self.advance();
                Ok(AstNode::Literal(c))
            }
            Some(Token::Set(set)) => {
                let set = set.clone();
                self.advance();
                Ok(AstNode::Set(set))
            }
            Some(Token::Wildcard) => {
                self.advance();
                Ok(AstNode::Wildcard)
            }
            Some(Token::Digit) => {
                self.advance();
                Ok(AstNode::Digit)
            }
            Some(Token::Word) => {
                self.advance();
                Ok(AstNode::Word)
            }
            Some(Token::StartAnchor) => {
                self.advance();
                Ok(AstNode::StartAnchor)
            }
            Some(Token::EndAnchor) => {
                self.advance();
                Ok(AstNode::EndAnchor)
            }
            Some(Token::CloseGroup) => Err(SyntaxError::UnmatchedGroupCloser.into()),
            Some(other) => Err(SyntaxError::UnexpectedToken(other.to_string()).into()),
        }
    }
}

/// Parse a full token sequence into a syntax tree plus its capture count
/// (pattern groups + 1 for the implicit whole-match group).
///
/// The entire sequence must be consumed; a leftover token is an error, so
/// a successful parse guarantees every opener met its closer and vice
/// versa.
pub fn parse(tokens: &[Token]) -> Result<(AstNode, usize), RegexError> {
    let mut parser = Parser::new(tokens);
    let tree = parser.parse_expression()?;

    match parser.current() {
        None => Ok((tree, parser.capture_index + 1)),
        Some(Token::CloseGroup) => Err(SyntaxError::UnmatchedGroupCloser.into()),
        Some(other) => Err(SyntaxError::UnexpectedToken(other.to_string()).into()),
    }
}
