//! Property-based matching laws

use proptest::prelude::*;
use regrep::Regex;

proptest! {
    /// Matching is a pure function of pattern and line.
    #[test]
    fn matching_is_deterministic(line in "[a-z ]{0,20}") {
        let regex = Regex::new("a+b?").unwrap();
        let first = regex.find(line.as_bytes()).unwrap();
        let second = regex.find(line.as_bytes()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// `\X` for X outside {d, w, 1..9} matches exactly the literal X.
    #[test]
    fn escaped_character_matches_itself(c in proptest::char::ranges(
        // printable ASCII minus the class escapes d, w and backrefs 1-9
        vec!['!'..='0', ':'..='c', 'e'..='v', 'x'..='~'].into()
    )) {
        let pattern = format!("\\{c}");
        let line = c.to_string();
        let regex = Regex::new(&pattern).unwrap();
        prop_assert_eq!(regex.is_match(line.as_bytes()), Ok(true));
    }

    /// `[c]` and `[^c]` give opposite answers on any single character.
    #[test]
    fn negated_set_complements(c in proptest::char::range('a', 'z'), probe in proptest::char::range('a', 'z')) {
        let positive = Regex::new(&format!("[{c}]")).unwrap();
        let negative = Regex::new(&format!("[^{c}]")).unwrap();
        let line = probe.to_string();
        let hit = positive.is_match(line.as_bytes()).unwrap();
        let miss = negative.is_match(line.as_bytes()).unwrap();
        prop_assert_ne!(hit, miss);
    }

    /// A match reports one capture slot per group plus the whole match.
    #[test]
    fn capture_count_law(depth in 1usize..6) {
        let pattern = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
        let regex = Regex::new(&pattern).unwrap();
        prop_assert_eq!(regex.capture_count(), depth + 1);

        let m = regex.find(b"a").unwrap().unwrap();
        prop_assert_eq!(m.group_count(), depth + 1);
        for index in 0..=depth {
            prop_assert_eq!(m.group(index), Some((0, 1)));
        }
    }

    /// `^`-anchored matches begin at offset 0; `$`-anchored matches end at
    /// the line length.
    #[test]
    fn anchoring_law(line in "[a-c]{0,12}") {
        let bytes = line.as_bytes();

        let start_anchored = Regex::new("^a").unwrap();
        if let Some(m) = start_anchored.find(bytes).unwrap() {
            prop_assert_eq!(m.start(), 0);
        }
        prop_assert_eq!(
            start_anchored.is_match(bytes).unwrap(),
            bytes.first() == Some(&b'a')
        );

        let end_anchored = Regex::new("a$").unwrap();
        if let Some(m) = end_anchored.find(bytes).unwrap() {
            prop_assert_eq!(m.end(), bytes.len());
        }
        prop_assert_eq!(
            end_anchored.is_match(bytes).unwrap(),
            bytes.last() == Some(&b'a')
        );
    }

    /// `(w)\1` accepts a doubled word.
    #[test]
    fn backreference_accepts_doubling(word in "[a-z]{1,4}") {
        let regex = Regex::new(&format!("({word})\\1")).unwrap();
        let doubled = format!("{word}{word}");
        prop_assert_eq!(regex.is_match(doubled.as_bytes()), Ok(true));
    }

    /// The first match at a start index is the greedy one.
    #[test]
    fn greedy_law(line in "a{0,10}") {
        let regex = Regex::new("a*").unwrap();
        let longest = line.len();
        let m = regex.find(line.as_bytes()).unwrap().unwrap();
        prop_assert_eq!(m.span(), (0, longest));
    }
}
