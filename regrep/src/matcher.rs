//! Rune-level matching predicates
//!
//! A [`Matcher`] decides whether a single decoded character satisfies one
//! atom of the pattern. Matching is total: reversed set ranges are rejected
//! when the automaton is built, so no probe can fail at match time.

use crate::error::SemanticError;

/// A predefined character class embeddable in a character set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// `\d` — ASCII decimal digit
    Digit,
    /// `\w` — ASCII alphanumeric or underscore
    Word,
}

impl ClassKind {
    pub fn matches(self, r: char) -> bool {
        match self {
            ClassKind::Digit => r.is_ascii_digit(),
            ClassKind::Word => r.is_ascii_alphanumeric() || r == '_',
        }
    }
}

/// The body of a `[...]` or `[^...]` character set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet {
    /// False for `[^...]`
    pub positive: bool,
    /// Individual member characters
    pub literals: Vec<char>,
    /// Inclusive `lo-hi` ranges
    pub ranges: Vec<(char, char)>,
    /// Embedded predefined classes
    pub classes: Vec<ClassKind>,
}

impl CharSet {
    /// Membership test. The union of literals, ranges, and embedded
    /// classes, inverted for a negative set.
    pub fn contains(&self, r: char) -> bool {
        let in_union = self.literals.contains(&r)
            || self.ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&r))
            || self.classes.iter().any(|class| class.matches(r));
        if self.positive {
            in_union
        } else {
            !in_union
        }
    }

    /// A range `lo-hi` is only valid when `lo <= hi`.
    pub fn check_ranges(&self) -> Result<(), SemanticError> {
        for &(lo, hi) in &self.ranges {
            if lo > hi {
                return Err(SemanticError::ReversedRange(lo, hi));
            }
        }
        Ok(())
    }
}

/// A single-character predicate attached to an automaton state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// One exact character
    Literal(char),
    /// `.` — anything except a newline
    Wildcard,
    /// `\d`
    Digit,
    /// `\w`
    Word,
    /// `[...]` / `[^...]`
    Set(CharSet),
}

impl Matcher {
    pub fn matches(&self, r: char) -> bool {
        match self {
            Matcher::Literal(c) => *c == r,
            Matcher::Wildcard => r != '\n',
            Matcher::Digit => ClassKind::Digit.matches(r),
            Matcher::Word => ClassKind::Word.matches(r),
            Matcher::Set(set) => set.contains(r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(positive: bool, literals: &[char], ranges: &[(char, char)], classes: &[ClassKind]) -> CharSet {
        CharSet {
            positive,
            literals: literals.to_vec(),
            ranges: ranges.to_vec(),
            classes: classes.to_vec(),
        }
    }

    #[test]
    fn literal_matches_only_itself() {
        let m = Matcher::Literal('a');
        assert!(m.matches('a'));
        assert!(!m.matches('b'));
    }

    #[test]
    fn wildcard_rejects_newline() {
        let m = Matcher::Wildcard;
        assert!(m.matches('x'));
        assert!(m.matches(' '));
        assert!(!m.matches('\n'));
    }

    #[test]
    fn digit_is_ascii_only() {
        let m = Matcher::Digit;
        assert!(m.matches('0'));
        assert!(m.matches('9'));
        assert!(!m.matches('a'));
        assert!(!m.matches('٣')); // ARABIC-INDIC DIGIT THREE
    }

    #[test]
    fn word_covers_alnum_and_underscore() {
        let m = Matcher::Word;
        for r in ['a', 'Z', '5', '_'] {
            assert!(m.matches(r), "{r} should be a word character");
        }
        for r in ['-', ' ', '$'] {
            assert!(!m.matches(r), "{r} should not be a word character");
        }
    }

    #[test]
    fn positive_set_union() {
        let s = set(true, &['x'], &[('a', 'c')], &[ClassKind::Digit]);
        assert!(s.contains('x'));
        assert!(s.contains('b'));
        assert!(s.contains('7'));
        assert!(!s.contains('z'));
    }

    #[test]
    fn negative_set_complements() {
        let s = set(false, &['x'], &[], &[]);
        assert!(!s.contains('x'));
        assert!(s.contains('y'));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let s = set(true, &[], &[('z', 'a')], &[]);
        assert_eq!(s.check_ranges(), Err(SemanticError::ReversedRange('z', 'a')));
    }

    #[test]
    fn range_endpoints_are_inclusive() {
        let s = set(true, &[], &[('a', 'c')], &[]);
        assert!(s.contains('a'));
        assert!(s.contains('c'));
        assert!(!s.contains('d'));
    }
}
