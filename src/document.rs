//! Document model adapter
//!
//! Thin wrapper over `scraper::Html` exposing the handful of queries the
//! extraction strategies and the listing parser need.

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text never counts as page content
const NON_CONTENT: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Heading levels tried for the title, largest first
const TITLE_HEADINGS: &[&str] = &["h1", "h2", "h3"];

/// A parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse an HTML string. Never fails: html5ever repairs malformed input.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// All elements matching a CSS selector, in document order.
    /// An invalid selector matches nothing.
    pub fn select(&self, selector_str: &str) -> Vec<ElementRef<'_>> {
        let selector = match Selector::parse(selector_str) {
            Ok(s) => s,
            Err(_) => return vec![],
        };

        self.html.select(&selector).collect()
    }

    /// First element matching a CSS selector
    pub fn select_first(&self, selector_str: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(selector_str).ok()?;
        self.html.select(&selector).next()
    }

    /// Every non-blank text node in document order, trimmed.
    /// Text under `head`, `script`, `style` and the like is skipped.
    pub fn fragments(&self) -> Vec<String> {
        self.html
            .root_element()
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }

                let hidden = node.ancestors().any(|a| {
                    a.value()
                        .as_element()
                        .is_some_and(|el| NON_CONTENT.contains(&el.name()))
                });
                if hidden {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect()
    }

    /// Text of the first non-empty top-level heading, largest level first
    pub fn first_heading(&self) -> Option<String> {
        TITLE_HEADINGS.iter().find_map(|tag| {
            self.select(tag)
                .into_iter()
                .map(|el| text_of(&el))
                .find(|text| !text.is_empty())
        })
    }
}

/// Rendered text of an element with whitespace collapsed to single spaces
pub fn text_of(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Elements matching a selector inside `element`; empty on a bad selector
pub fn select_within<'a>(element: &ElementRef<'a>, selector_str: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector_str) {
        Ok(selector) => element.select(&selector).collect(),
        Err(_) => vec![],
    }
}

/// Following sibling elements (text and comment nodes skipped)
pub fn next_element_siblings<'a>(element: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.next_siblings().filter_map(ElementRef::wrap)
}

/// Parent element, if the parent is an element (not the document root)
pub fn parent_element<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    let parent = element.parent()?;
    match parent.value() {
        Node::Element(_) => ElementRef::wrap(parent),
        _ => None,
    }
}

/// Tag name of an element, lowercase as parsed
pub fn tag_name<'a>(element: &ElementRef<'a>) -> &'a str {
    element.value().name()
}
