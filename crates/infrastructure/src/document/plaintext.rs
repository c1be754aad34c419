//! HTML to plaintext.

use scraper::{ElementRef, Html, Node};

/// Elements whose content is never shown.
const HIDDEN: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that start a new line.
const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "title", "tr", "ul",
];

/// Returns the visible text of a document.
///
/// Comments, attributes and the content of `script` and `style` elements are
/// dropped. Block elements start a new line; whitespace within a line is
/// collapsed and blank lines are removed.
#[must_use]
pub fn to_plaintext(document: &Html) -> String {
    let mut raw = String::new();
    collect(document.root_element(), &mut raw);

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if HIDDEN.contains(&name) {
        return;
    }

    let block = BLOCKS.contains(&name);
    if block {
        out.push('\n');
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                // Newlines in source markup are plain whitespace.
                out.extend(text.chars().map(|c| if c == '\n' { ' ' } else { c }));
            }
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    collect(child, out);
                }
            }
            _ => {}
        }
    }

    if block {
        out.push('\n');
    }
}
