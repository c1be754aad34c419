//! In-memory document collaborators for handler tests.

use std::collections::HashMap;

use crate::ports::{DocumentError, DomEvaluator, PlaintextConverter};

/// Returns canned node texts per selector or expression.
#[derive(Debug, Default)]
pub struct FakeDom {
    nodes: HashMap<String, Vec<String>>,
}

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, nodes: &[&str]) -> Self {
        self.nodes.insert(
            query.to_string(),
            nodes.iter().map(ToString::to_string).collect(),
        );
        self
    }

    fn lookup(&self, query: &str) -> Vec<String> {
        self.nodes.get(query).cloned().unwrap_or_default()
    }
}

impl DomEvaluator for FakeDom {
    fn select(&self, _markup: &str, selector: &str) -> Result<Vec<String>, DocumentError> {
        if selector.starts_with('!') {
            return Err(DocumentError::InvalidSelector {
                selector: selector.to_string(),
                message: "unexpected token".to_string(),
            });
        }
        Ok(self.lookup(selector))
    }

    fn evaluate_xpath(
        &self,
        _markup: &str,
        expression: &str,
    ) -> Result<Vec<String>, DocumentError> {
        if expression.starts_with('!') {
            return Err(DocumentError::InvalidXPath {
                expression: expression.to_string(),
                message: "unsupported".to_string(),
            });
        }
        Ok(self.lookup(expression))
    }
}

/// Strips everything between `<` and `>`.
#[derive(Debug, Default)]
pub struct TagStripper;

impl PlaintextConverter for TagStripper {
    fn to_plaintext(&self, markup: &str) -> String {
        let mut out = String::with_capacity(markup.len());
        let mut in_tag = false;
        for c in markup.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                c if !in_tag => out.push(c),
                _ => {}
            }
        }
        out.trim().to_string()
    }
}

/// Converts string slices into owned operands.
pub fn operands(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(ToString::to_string).collect()
}
