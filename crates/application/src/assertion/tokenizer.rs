//! Quote-aware splitting of assertion text.

use crate::error::MalformedAssertion;

/// Splits an assertion into tokens.
///
/// Whitespace separates tokens; a double- or single-quoted run forms one
/// token with its quotes removed. Backslash escapes follow POSIX shell word
/// rules, but `#` is an ordinary character: `Selector #main exists` keeps
/// all three tokens.
///
/// # Errors
///
/// Returns [`MalformedAssertion::UnbalancedQuotes`] for unterminated quotes
/// and [`MalformedAssertion::Empty`] if nothing is left to tokenize.
pub fn tokenize(assertion: &str) -> Result<Vec<String>, MalformedAssertion> {
    let trimmed = assertion.trim();
    let tokens = shlex::split(&escape_comments(trimmed))
        .ok_or_else(|| MalformedAssertion::UnbalancedQuotes(trimmed.to_string()))?;

    if tokens.is_empty() {
        return Err(MalformedAssertion::Empty);
    }

    Ok(tokens)
}

/// Backslash-escapes every `#` that would start a shell comment, i.e. one
/// that opens an unquoted word.
fn escape_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut quote: Option<char> = None;
    let mut word_start = true;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (None, '#') if word_start => out.push_str("\\#"),
            (None | Some('"'), '\\') => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            (None, '"' | '\'') => {
                quote = Some(c);
                out.push(c);
            }
            (Some(open), _) if c == open => {
                quote = None;
                out.push(c);
            }
            _ => out.push(c),
        }
        word_start = quote.is_none() && c.is_whitespace();
    }
    out
}
