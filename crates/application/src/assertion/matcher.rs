//! Predicate phrases and their evaluation.
//!
//! A predicate is the tail of an assertion, e.g. `starts with "text/html"`
//! or `is not set`. Phrases are recognized case-insensitively; the longest
//! phrase is tried first and a phrase only applies when the number of
//! remaining tokens equals its operand count.

use hra_domain::{Actual, Outcome};
use regex::Regex;

use crate::error::MalformedAssertion;

/// The comparison a [`Matcher`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// `is`, `equals`
    Equals,
    /// `contains`
    Contains,
    /// `does not contain`, `not contains`, `contains not`
    NotContains,
    /// `starts with`
    StartsWith,
    /// `matches`
    Matches,
    /// `matches not`, `not matches`, `does not match`
    NotMatches,
    /// `is set`, `exists`, `is present`
    Present,
    /// `is not set`, `does not exist`, `not exists`, `exists not`, `is not present`
    Absent,
}

impl Predicate {
    /// Number of operand tokens following the phrase.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Present | Self::Absent => 0,
            _ => 1,
        }
    }
}

/// Known phrases, longest first.
const PHRASES: &[(&[&str], Predicate)] = &[
    (&["is", "not", "present"], Predicate::Absent),
    (&["is", "not", "set"], Predicate::Absent),
    (&["does", "not", "exist"], Predicate::Absent),
    (&["does", "not", "contain"], Predicate::NotContains),
    (&["does", "not", "match"], Predicate::NotMatches),
    (&["not", "exists"], Predicate::Absent),
    (&["exists", "not"], Predicate::Absent),
    (&["not", "contains"], Predicate::NotContains),
    (&["contains", "not"], Predicate::NotContains),
    (&["not", "matches"], Predicate::NotMatches),
    (&["matches", "not"], Predicate::NotMatches),
    (&["starts", "with"], Predicate::StartsWith),
    (&["is", "set"], Predicate::Present),
    (&["is", "present"], Predicate::Present),
    (&["exists"], Predicate::Present),
    (&["contains"], Predicate::Contains),
    (&["matches"], Predicate::Matches),
    (&["equals"], Predicate::Equals),
    (&["is"], Predicate::Equals),
];

/// A parsed predicate, ready to be evaluated against any number of values.
#[derive(Debug, Clone)]
pub struct Matcher {
    predicate: Predicate,
    operand: String,
    pattern: Option<Regex>,
}

impl Matcher {
    /// Parses predicate tokens, e.g. `["starts", "with", "text/html"]`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedAssertion::UnknownPredicate`] if no phrase fits the
    /// tokens and [`MalformedAssertion::InvalidPattern`] if a `matches`
    /// operand is not a valid regular expression.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, MalformedAssertion> {
        let Some((phrase, predicate)) = PHRASES.iter().find(|(phrase, predicate)| {
            tokens.len() == phrase.len() + predicate.arity()
                && phrase
                    .iter()
                    .zip(tokens)
                    .all(|(word, token)| token.as_ref().eq_ignore_ascii_case(word))
        }) else {
            let joined: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
            return Err(MalformedAssertion::UnknownPredicate(joined.join(" ")));
        };

        let operand = tokens
            .get(phrase.len())
            .map(|t| t.as_ref().to_string())
            .unwrap_or_default();

        let pattern = match predicate {
            Predicate::Matches | Predicate::NotMatches => {
                Some(
                    Regex::new(&operand).map_err(|e| MalformedAssertion::InvalidPattern {
                        pattern: operand.clone(),
                        message: e.to_string(),
                    })?,
                )
            }
            _ => None,
        };

        Ok(Self {
            predicate: *predicate,
            operand,
            pattern,
        })
    }

    /// The recognized predicate.
    #[must_use]
    pub const fn predicate(&self) -> Predicate {
        self.predicate
    }

    /// The operand (empty for presence predicates).
    #[must_use]
    pub fn operand(&self) -> &str {
        &self.operand
    }

    /// Evaluates the predicate.
    ///
    /// Valued predicates return [`Outcome::Undefined`] for an undefined
    /// actual value; presence predicates always decide.
    #[must_use]
    pub fn evaluate(&self, actual: Actual<'_>) -> Outcome {
        let expected = self.operand.as_str();

        match self.predicate {
            Predicate::Present => {
                return if actual.is_undefined() {
                    Outcome::Fail("Expected to exist".to_string())
                } else {
                    Outcome::Pass
                };
            }
            Predicate::Absent => {
                return if actual.is_undefined() {
                    Outcome::Pass
                } else {
                    Outcome::Fail("Expected to be not set".to_string())
                };
            }
            _ if actual.is_undefined() => return Outcome::Undefined,
            _ => {}
        }

        let text = actual.to_string();
        let (holds, verb) = match self.predicate {
            Predicate::Contains => (contains(actual, expected), "to contain"),
            Predicate::NotContains => (!contains(actual, expected), "to not contain"),
            Predicate::StartsWith => (text.starts_with(expected), "to start with"),
            Predicate::Matches => (self.is_match(&text), "to match"),
            Predicate::NotMatches => (!self.is_match(&text), "to not match"),
            Predicate::Equals | Predicate::Present | Predicate::Absent => {
                (text == expected, "to equal")
            }
        };

        if holds {
            return Outcome::Pass;
        }

        Outcome::Fail(match self.predicate {
            Predicate::Matches | Predicate::NotMatches => {
                format!("Expected \"{text}\" {verb} /{expected}/")
            }
            _ => format!("Expected \"{text}\" {verb} \"{expected}\""),
        })
    }

    fn is_match(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|re| re.is_match(text))
    }
}

/// Substring test on text, membership test on lists.
fn contains(actual: Actual<'_>, needle: &str) -> bool {
    match actual {
        Actual::Text(text) => text.contains(needle),
        Actual::List(items) => items.iter().any(|item| item == needle),
        Actual::Undefined => false,
    }
}

/// Parses `tokens` and evaluates them against `actual` in one go.
///
/// # Errors
///
/// See [`Matcher::parse`].
pub fn evaluate<S: AsRef<str>>(
    actual: Actual<'_>,
    tokens: &[S],
) -> Result<Outcome, MalformedAssertion> {
    Ok(Matcher::parse(tokens)?.evaluate(actual))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(phrase: &str) -> Vec<String> {
        phrase.split(' ').map(String::from).collect()
    }

    fn with_operand(phrase: &str, operand: &str) -> Vec<String> {
        let mut tokens = words(phrase);
        tokens.push(operand.to_string());
        tokens
    }

    fn fail(message: &str) -> Outcome {
        Outcome::Fail(message.to_string())
    }

    const ABSENT: [&str; 5] = [
        "is not set",
        "does not exist",
        "not exists",
        "exists not",
        "is not present",
    ];
    const PRESENT: [&str; 3] = ["is set", "exists", "is present"];

    #[test]
    fn test_absence_phrases() {
        for phrase in ABSENT {
            assert_eq!(evaluate(Actual::Undefined, &words(phrase)).unwrap(), Outcome::Pass);
            assert_eq!(
                evaluate(Actual::Text(""), &words(phrase)).unwrap(),
                fail("Expected to be not set"),
                "{phrase}"
            );
        }
    }

    #[test]
    fn test_presence_phrases() {
        for phrase in PRESENT {
            assert_eq!(evaluate(Actual::Text(""), &words(phrase)).unwrap(), Outcome::Pass);
            assert_eq!(
                evaluate(Actual::Undefined, &words(phrase)).unwrap(),
                fail("Expected to exist"),
                "{phrase}"
            );
        }
    }

    #[test]
    fn test_equality() {
        for phrase in ["is", "equals", "IS", "Equals"] {
            assert_eq!(
                evaluate(Actual::Text("Blah"), &with_operand(phrase, "Blah")).unwrap(),
                Outcome::Pass
            );
            assert_eq!(
                evaluate(Actual::Text("foobar"), &with_operand(phrase, "Blah")).unwrap(),
                fail(r#"Expected "foobar" to equal "Blah""#)
            );
        }
    }

    #[test]
    fn test_contains() {
        let tokens = with_operand("contains", "ooba");
        assert_eq!(evaluate(Actual::Text("Foobar"), &tokens).unwrap(), Outcome::Pass);
        assert_eq!(
            evaluate(Actual::Text("Foobar"), &with_operand("contains", "FooBar")).unwrap(),
            fail(r#"Expected "Foobar" to contain "FooBar""#)
        );
    }

    #[test]
    fn test_contains_on_lists_is_membership() {
        let items = vec!["a".to_string(), "bc".to_string()];
        assert_eq!(
            evaluate(Actual::List(&items), &with_operand("contains", "bc")).unwrap(),
            Outcome::Pass
        );
        assert_eq!(
            evaluate(Actual::List(&items), &with_operand("contains", "b")).unwrap(),
            fail(r#"Expected "a,bc" to contain "b""#)
        );
        assert_eq!(
            evaluate(Actual::List(&items), &with_operand("does not contain", "b")).unwrap(),
            Outcome::Pass
        );
    }

    #[test]
    fn test_negated_contains() {
        for phrase in ["not contains", "does not contain", "contains not"] {
            assert_eq!(
                evaluate(Actual::Text("Foobar"), &with_operand(phrase, "Bar")).unwrap(),
                Outcome::Pass
            );
            assert_eq!(
                evaluate(Actual::Text("Foobar"), &with_operand(phrase, "bar")).unwrap(),
                fail(r#"Expected "Foobar" to not contain "bar""#)
            );
        }
    }

    #[test]
    fn test_starts_with() {
        let tokens = with_operand("starts with", "Foo");
        assert_eq!(evaluate(Actual::Text("Foobar"), &tokens).unwrap(), Outcome::Pass);
        assert_eq!(
            evaluate(Actual::Text("Foobar"), &with_operand("starts with", "foo")).unwrap(),
            fail(r#"Expected "Foobar" to start with "foo""#)
        );
    }

    #[test]
    fn test_matches() {
        assert_eq!(
            evaluate(
                Actual::Text("Hello world"),
                &with_operand("matches", "^Hel+o +[wW]orld$")
            )
            .unwrap(),
            Outcome::Pass
        );
        assert_eq!(
            evaluate(
                Actual::Text("Hello world"),
                &with_operand("matches", "^Hel+o World$")
            )
            .unwrap(),
            fail(r#"Expected "Hello world" to match /^Hel+o World$/"#)
        );
    }

    #[test]
    fn test_matches_searches_anywhere() {
        assert_eq!(
            evaluate(
                Actual::Text("You may use this domain"),
                &with_operand("matches", "You [a-z ]+ domain")
            )
            .unwrap(),
            Outcome::Pass
        );
    }

    #[test]
    fn test_negated_matches() {
        for phrase in ["matches not", "not matches", "does not match"] {
            assert_eq!(
                evaluate(
                    Actual::Text("Hello world"),
                    &with_operand(phrase, "^Hel+o +World$")
                )
                .unwrap(),
                Outcome::Pass
            );
            assert_eq!(
                evaluate(
                    Actual::Text("Hello world"),
                    &with_operand(phrase, "^Hel+o world$")
                )
                .unwrap(),
                fail(r#"Expected "Hello world" to not match /^Hel+o world$/"#)
            );
        }
    }

    #[test]
    fn test_valued_predicates_signal_undefined() {
        for tokens in [
            with_operand("is", "x"),
            with_operand("contains", "x"),
            with_operand("starts with", "x"),
            with_operand("matches", "x"),
            with_operand("does not contain", "x"),
        ] {
            assert_eq!(
                evaluate(Actual::Undefined, &tokens).unwrap(),
                Outcome::Undefined
            );
        }
    }

    #[test]
    fn test_longest_phrase_wins() {
        let matcher = Matcher::parse(&with_operand("does not contain", "x")).unwrap();
        assert_eq!(matcher.predicate(), Predicate::NotContains);

        let matcher = Matcher::parse(&words("is not set")).unwrap();
        assert_eq!(matcher.predicate(), Predicate::Absent);

        // A quoted operand is never mistaken for part of the phrase.
        let matcher = Matcher::parse(&["is", "not set"]).unwrap();
        assert_eq!(matcher.predicate(), Predicate::Equals);
        assert_eq!(matcher.operand(), "not set");

        let matcher = Matcher::parse(&["contains", "not"]).unwrap();
        assert_eq!(matcher.predicate(), Predicate::Contains);
    }

    #[test]
    fn test_negations_have_opposite_outcomes() {
        let pairs = [
            ("contains", "does not contain", "oo"),
            ("matches", "does not match", "^F"),
        ];
        for (positive, negative, operand) in pairs {
            for actual in ["Foobar", "bar"] {
                let yes = evaluate(Actual::Text(actual), &with_operand(positive, operand)).unwrap();
                let no = evaluate(Actual::Text(actual), &with_operand(negative, operand)).unwrap();
                assert_ne!(yes.is_pass(), no.is_pass(), "{positive} / {actual}");
            }
        }
        for (present, absent) in PRESENT.iter().zip(ABSENT) {
            for actual in [Actual::Undefined, Actual::Text("x")] {
                let yes = evaluate(actual, &words(present)).unwrap();
                let no = evaluate(actual, &words(absent)).unwrap();
                assert_ne!(yes.is_pass(), no.is_pass());
            }
        }
    }

    #[test]
    fn test_unknown_predicate() {
        assert_eq!(
            Matcher::parse(&["foobar"]).unwrap_err(),
            MalformedAssertion::UnknownPredicate("foobar".to_string())
        );
        assert!(Matcher::parse(&["is"]).is_err());
        assert!(Matcher::parse(&["is", "a", "b"]).is_err());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            Matcher::parse(&["matches", "(unclosed"]),
            Err(MalformedAssertion::InvalidPattern { .. })
        ));
    }
}
