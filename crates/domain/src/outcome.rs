//! Values and outcomes of a single predicate evaluation.

use std::fmt;

/// `None` when an assertion holds, otherwise a human-readable mismatch.
pub type FailureMessage = Option<String>;

/// The value a predicate is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actual<'a> {
    /// Nothing was found (missing header, unresolved JSON pointer, no node).
    Undefined,
    /// A single string value.
    Text(&'a str),
    /// A sequence of values, e.g. a JSON array.
    List(&'a [String]),
}

impl Actual<'_> {
    /// Returns true for [`Actual::Undefined`].
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl<'a> From<&'a str> for Actual<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<Option<&'a str>> for Actual<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(Self::Undefined, Self::Text)
    }
}

impl<'a> From<&'a [String]> for Actual<'a> {
    fn from(value: &'a [String]) -> Self {
        Self::List(value)
    }
}

impl fmt::Display for Actual<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Text(text) => f.write_str(text),
            Self::List(items) => f.write_str(&items.join(",")),
        }
    }
}

/// Tri-state result of a predicate.
///
/// `Undefined` is returned when a valued predicate (`is`, `contains`,
/// `starts with`, `matches` and their negations) meets an undefined actual
/// value. Callers decide what that means in their context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The predicate holds.
    Pass,
    /// The predicate does not hold.
    Fail(String),
    /// The predicate needs a value but none was there.
    Undefined,
}

impl Outcome {
    /// Returns true for [`Outcome::Pass`].
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Converts a decided outcome into a [`FailureMessage`].
    ///
    /// Returns `None` for [`Outcome::Undefined`], which has no message yet.
    #[must_use]
    pub fn decided(self) -> Option<FailureMessage> {
        match self {
            Self::Pass => Some(None),
            Self::Fail(message) => Some(Some(message)),
            Self::Undefined => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_actual_display() {
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(Actual::Text("x").to_string(), "x");
        assert_eq!(Actual::List(&items).to_string(), "a,b");
        assert_eq!(Actual::from(None).to_string(), "undefined");
    }

    #[test]
    fn test_decided() {
        assert_eq!(Outcome::Pass.decided(), Some(None));
        assert_eq!(
            Outcome::Fail("nope".to_string()).decided(),
            Some(Some("nope".to_string()))
        );
        assert_eq!(Outcome::Undefined.decided(), None);
    }
}
