//! Assertion text: tokenizing and predicate matching.

mod matcher;
mod tokenizer;

pub use matcher::{Matcher, Predicate, evaluate};
pub use tokenizer::tokenize;
