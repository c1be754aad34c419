//! A subset of XPath 1.0 over `scraper` documents.
//!
//! Supported: absolute and relative location paths with `/` and `//`,
//! name tests and `*`, `.` and `..`, a final `text()` or `@name` step, and
//! the predicates `[n]`, `[last()]`, `[@a]`, `[@a='v']`, `[text()='v']`,
//! `[.='v']` and `[contains(@a | text() | ., 'v')]`. Relative paths start
//! at the document element.

use std::collections::HashMap;

use hra_application::ports::DocumentError;
use scraper::{ElementRef, Html};

/// Where a step starts from.
#[derive(Debug, Clone, Copy)]
enum Context<'a> {
    /// The document node, parent of the document element.
    Document,
    Element(ElementRef<'a>),
}

/// A selected item.
#[derive(Debug, Clone)]
enum Item<'a> {
    Node(Context<'a>),
    Value(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeTest {
    SelfNode,
    Parent,
    Name(String),
    AnyElement,
    Text,
    Attribute(String),
}

impl NodeTest {
    const fn is_terminal(&self) -> bool {
        matches!(self, Self::Text | Self::Attribute(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Operand {
    Attribute(String),
    Text,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Filter {
    Position(usize),
    Last,
    Has(String),
    Equals(Operand, String),
    Contains(Operand, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    /// Preceded by `//`.
    descendant: bool,
    test: NodeTest,
    filters: Vec<Filter>,
}

/// A parsed XPath expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XPath {
    absolute: bool,
    steps: Vec<Step>,
}

impl XPath {
    /// Parses an expression.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidXPath`] for syntax errors and for
    /// anything outside the supported subset.
    pub fn parse(expression: &str) -> Result<Self, DocumentError> {
        Parser::new(expression)
            .path()
            .map_err(|message| DocumentError::InvalidXPath {
                expression: expression.to_string(),
                message,
            })
    }

    /// Returns the string value of every selected node in document order.
    #[must_use]
    pub fn evaluate(&self, document: &Html) -> Vec<String> {
        let root = document.root_element();
        let order: HashMap<_, usize> = root
            .descendants()
            .enumerate()
            .map(|(index, node)| (node.id(), index + 1))
            .collect();
        let rank = |context: &Context<'_>| match context {
            Context::Document => 0,
            Context::Element(element) => order.get(&element.id()).copied().unwrap_or(usize::MAX),
        };
        let evaluator = Evaluator { root, rank: &rank };

        let start = if self.absolute {
            Context::Document
        } else {
            Context::Element(root)
        };

        let mut items = vec![Item::Node(start)];
        for step in &self.steps {
            let contexts: Vec<Context<'_>> = items
                .iter()
                .filter_map(|item| match item {
                    Item::Node(context) => Some(*context),
                    Item::Value(_) => None,
                })
                .collect();
            items = evaluator.step(step, contexts);
        }

        items
            .into_iter()
            .map(|item| match item {
                Item::Node(Context::Document) => root.text().collect(),
                Item::Node(Context::Element(element)) => element.text().collect(),
                Item::Value(value) => value,
            })
            .collect()
    }
}

struct Evaluator<'a, 'r> {
    root: ElementRef<'a>,
    /// Document-order rank of a context node.
    rank: &'r dyn Fn(&Context<'a>) -> usize,
}

impl<'a> Evaluator<'a, '_> {
    /// Sorts into document order and drops duplicates.
    fn normalize(&self, mut contexts: Vec<Context<'a>>) -> Vec<Context<'a>> {
        contexts.sort_by_key(|context| (self.rank)(context));
        contexts.dedup_by_key(|context| (self.rank)(context));
        contexts
    }

    fn descendants_or_self(&self, contexts: &[Context<'a>]) -> Vec<Context<'a>> {
        let mut expanded = Vec::new();
        for context in contexts {
            let element = match context {
                Context::Document => {
                    expanded.push(Context::Document);
                    self.root
                }
                Context::Element(element) => *element,
            };
            expanded.extend(
                element
                    .descendants()
                    .filter_map(ElementRef::wrap)
                    .map(Context::Element),
            );
        }
        self.normalize(expanded)
    }

    fn children(&self, context: &Context<'a>) -> Vec<ElementRef<'a>> {
        match context {
            Context::Document => vec![self.root],
            Context::Element(element) => element.children().filter_map(ElementRef::wrap).collect(),
        }
    }

    fn parent(&self, context: &Context<'a>) -> Option<Context<'a>> {
        match context {
            Context::Document => None,
            Context::Element(element) => Some(
                element
                    .parent()
                    .and_then(ElementRef::wrap)
                    .map_or(Context::Document, Context::Element),
            ),
        }
    }

    fn step(&self, step: &Step, contexts: Vec<Context<'a>>) -> Vec<Item<'a>> {
        let contexts = if step.descendant {
            self.descendants_or_self(&contexts)
        } else {
            contexts
        };

        match &step.test {
            NodeTest::Text => contexts
                .iter()
                .filter_map(|context| match context {
                    Context::Element(element) => Some(*element),
                    Context::Document => None,
                })
                .flat_map(|element| direct_texts(element).into_iter().map(Item::Value))
                .collect(),
            NodeTest::Attribute(name) => contexts
                .iter()
                .filter_map(|context| match context {
                    Context::Element(element) => element.value().attr(name).map(String::from),
                    Context::Document => None,
                })
                .map(Item::Value)
                .collect(),
            NodeTest::SelfNode | NodeTest::Parent => {
                // One candidate per context node, so `[1]` and `[last()]`
                // keep it and `[2]` drops it.
                let selected = contexts
                    .iter()
                    .filter_map(|context| match step.test {
                        NodeTest::Parent => self.parent(context),
                        _ => Some(*context),
                    })
                    .flat_map(|candidate| apply_filters(vec![candidate], &step.filters))
                    .collect();
                self.normalize(selected).into_iter().map(Item::Node).collect()
            }
            NodeTest::Name(_) | NodeTest::AnyElement => {
                let mut selected = Vec::new();
                for context in &contexts {
                    let candidates: Vec<Context<'a>> = self
                        .children(context)
                        .into_iter()
                        .filter(|child| match &step.test {
                            NodeTest::Name(name) => child.value().name().eq_ignore_ascii_case(name),
                            _ => true,
                        })
                        .map(Context::Element)
                        .collect();
                    selected.extend(apply_filters(candidates, &step.filters));
                }
                self.normalize(selected).into_iter().map(Item::Node).collect()
            }
        }
    }
}

/// The text nodes directly below `element`.
fn direct_texts(element: ElementRef<'_>) -> Vec<String> {
    element
        .children()
        .filter_map(|node| node.value().as_text().map(|text| String::from(&**text)))
        .collect()
}

fn apply_filters<'a>(mut candidates: Vec<Context<'a>>, filters: &[Filter]) -> Vec<Context<'a>> {
    for filter in filters {
        candidates = match filter {
            Filter::Position(n) => candidates.get(n - 1).copied().into_iter().collect(),
            Filter::Last => candidates.last().copied().into_iter().collect(),
            _ => candidates
                .into_iter()
                .filter(|candidate| matches_filter(candidate, filter))
                .collect(),
        };
    }
    candidates
}

fn matches_filter(context: &Context<'_>, filter: &Filter) -> bool {
    let Context::Element(element) = context else {
        return false;
    };
    match filter {
        Filter::Has(name) => element.value().attr(name).is_some(),
        Filter::Equals(operand, expected) => {
            operand_values(*element, operand).iter().any(|value| value == expected)
        }
        Filter::Contains(operand, needle) => operand_values(*element, operand)
            .first()
            .is_some_and(|value| value.contains(needle.as_str())),
        Filter::Position(_) | Filter::Last => true,
    }
}

/// The values an operand denotes on `element`.
fn operand_values(element: ElementRef<'_>, operand: &Operand) -> Vec<String> {
    match operand {
        Operand::Attribute(name) => element
            .value()
            .attr(name)
            .map(String::from)
            .into_iter()
            .collect(),
        Operand::Text => direct_texts(element),
        Operand::Value => vec![element.text().collect()],
    }
}

fn is_name_char(c: char, first: bool) -> bool {
    c.is_ascii_alphabetic() || c == '_' || (!first && (c.is_ascii_digit() || c == '-' || c == '.'))
}

/// Recursive-descent parser for the supported subset.
struct Parser<'s> {
    input: &'s str,
    pos: usize,
}

impl<'s> Parser<'s> {
    const fn new(input: &'s str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'s str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), String> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(format!("expected '{token}' at offset {}", self.pos))
        }
    }

    fn name(&mut self) -> Result<String, String> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(i, c)| !is_name_char(c, i == 0))
            .map_or(rest.len(), |(i, _)| i);
        if len == 0 {
            return Err(format!("expected a name at offset {}", self.pos));
        }
        self.pos += len;
        Ok(rest[..len].to_string())
    }

    fn literal(&mut self) -> Result<String, String> {
        self.skip_whitespace();
        let rest = self.rest();
        let quote = rest
            .chars()
            .next()
            .filter(|c| matches!(c, '\'' | '"'))
            .ok_or_else(|| format!("expected a string literal at offset {}", self.pos))?;
        let end = rest[1..]
            .find(quote)
            .ok_or_else(|| "unterminated string literal".to_string())?;
        self.pos += end + 2;
        Ok(rest[1..=end].to_string())
    }

    fn number(&mut self) -> Option<usize> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let value = rest[..len].parse().ok()?;
        self.pos += len;
        Some(value)
    }

    fn path(mut self) -> Result<XPath, String> {
        self.skip_whitespace();
        if self.rest().is_empty() {
            return Err("empty expression".to_string());
        }

        let mut descendant = self.eat("//");
        let absolute = descendant || self.eat("/");
        let mut steps = Vec::new();

        loop {
            if steps.last().is_some_and(|step: &Step| step.test.is_terminal()) {
                return Err("text() and attribute steps must come last".to_string());
            }
            steps.push(self.step(descendant)?);

            self.skip_whitespace();
            if self.rest().is_empty() {
                break;
            }
            descendant = self.eat("//");
            if !descendant {
                self.expect("/")?;
            }
        }

        Ok(XPath { absolute, steps })
    }

    fn step(&mut self, descendant: bool) -> Result<Step, String> {
        let test = if self.eat("..") {
            NodeTest::Parent
        } else if self.eat(".") {
            NodeTest::SelfNode
        } else if self.eat("@") {
            NodeTest::Attribute(self.name()?)
        } else if self.eat("*") {
            NodeTest::AnyElement
        } else if self.eat("text()") {
            NodeTest::Text
        } else {
            let name = self.name()?;
            self.skip_whitespace();
            if self.rest().starts_with("::") || self.rest().starts_with('(') {
                return Err(format!("unsupported axis or function '{name}'"));
            }
            NodeTest::Name(name.to_ascii_lowercase())
        };

        let mut filters = Vec::new();
        while self.eat("[") {
            if test.is_terminal() {
                return Err("predicates on text() or attribute steps are not supported".to_string());
            }
            filters.push(self.filter()?);
            self.expect("]")?;
        }

        Ok(Step {
            descendant,
            test,
            filters,
        })
    }

    fn operand(&mut self) -> Result<Operand, String> {
        if self.eat("@") {
            Ok(Operand::Attribute(self.name()?))
        } else if self.eat("text()") {
            Ok(Operand::Text)
        } else if self.eat(".") {
            Ok(Operand::Value)
        } else {
            Err(format!("unsupported predicate at offset {}", self.pos))
        }
    }

    fn filter(&mut self) -> Result<Filter, String> {
        if let Some(n) = self.number() {
            if n == 0 {
                return Err("positions start at 1".to_string());
            }
            return Ok(Filter::Position(n));
        }
        if self.eat("last()") {
            return Ok(Filter::Last);
        }
        if self.eat("contains(") {
            let operand = self.operand()?;
            self.expect(",")?;
            let needle = self.literal()?;
            self.expect(")")?;
            return Ok(Filter::Contains(operand, needle));
        }

        let operand = self.operand()?;
        if self.eat("=") {
            return Ok(Filter::Equals(operand, self.literal()?));
        }
        match operand {
            Operand::Attribute(name) => Ok(Filter::Has(name)),
            _ => Err(format!("unsupported predicate at offset {}", self.pos)),
        }
    }
}
