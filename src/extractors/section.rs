//! Compound fields collected from whole page sections
//!
//! Skills and descriptions rarely sit in a single cell. They live in a
//! container that is either known by selector (`.job-description`) or
//! introduced by a short label such as "Required Skills", followed by a
//! list or a run of paragraphs.

use scraper::ElementRef;

use crate::config::{FieldKind, FieldSpec};
use crate::document::{
    next_element_siblings, parent_element, select_within, tag_name, text_of, Document,
};

use super::Strategy;

pub const SECTIONS: &str = "sections";

/// Elements that can act as a section label
const LABEL_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, strong, b, label, legend, p, span, div";

/// Longer text is content, not a label
const MAX_LABEL_LEN: usize = 80;

/// How far up from a label to look for the section body
const MAX_CLIMB: usize = 3;

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

pub struct SectionStrategy;

impl Strategy for SectionStrategy {
    fn name(&self) -> &'static str {
        SECTIONS
    }

    fn applies_to(&self, kind: FieldKind) -> bool {
        kind.is_compound()
    }

    fn find(&self, document: &Document, spec: &FieldSpec) -> Option<String> {
        let items = named_container_items(document, spec)
            .or_else(|| labelled_section_items(document, spec))?;

        let separator = match spec.kind {
            FieldKind::Skills => ", ",
            _ => " ",
        };
        Some(items.join(separator))
    }
}

/// Items from the first configured container selector that yields any
fn named_container_items(document: &Document, spec: &FieldSpec) -> Option<Vec<String>> {
    spec.containers.iter().find_map(|selector| {
        document
            .select(selector)
            .into_iter()
            .map(|container| container_items(&container))
            .find(|items| !items.is_empty())
    })
}

/// Items following the first short element whose text names the field
fn labelled_section_items(document: &Document, spec: &FieldSpec) -> Option<Vec<String>> {
    document
        .select(LABEL_SELECTOR)
        .into_iter()
        .filter(|el| {
            let text = text_of(el);
            text.chars().count() <= MAX_LABEL_LEN && spec.matches(&text.to_lowercase())
        })
        .find_map(|label| items_after_label(&label))
}

/// List items, else paragraphs, else the container's whole text
fn container_items(container: &ElementRef) -> Vec<String> {
    let items = texts(select_within(container, "li"));
    if !items.is_empty() {
        return items;
    }

    let paragraphs = texts(select_within(container, "p"));
    if !paragraphs.is_empty() {
        return paragraphs;
    }

    let whole = text_of(container);
    if whole.is_empty() {
        vec![]
    } else {
        vec![whole]
    }
}

/// Walk the label's following siblings, climbing to its parent when the
/// label is wrapped (e.g. `<p><strong>Skills</strong></p><ul>..</ul>`)
fn items_after_label(label: &ElementRef) -> Option<Vec<String>> {
    let mut current = *label;

    for _ in 0..=MAX_CLIMB {
        let items = items_in_siblings(&current);
        if !items.is_empty() {
            return Some(items);
        }

        current = parent_element(&current)?;
        if matches!(tag_name(&current), "body" | "html") {
            return None;
        }
    }

    None
}

fn items_in_siblings(label: &ElementRef) -> Vec<String> {
    let mut run = Vec::new();

    for sibling in next_element_siblings(label) {
        let tag = tag_name(&sibling);
        if HEADINGS.contains(&tag) {
            break;
        }

        // A run of bare paragraphs or list items forms the section body
        if tag == "p" || tag == "li" {
            let text = text_of(&sibling);
            if !text.is_empty() {
                run.push(text);
            }
            continue;
        }

        if !run.is_empty() {
            break;
        }

        let items = container_items(&sibling);
        if !items.is_empty() {
            return items;
        }
    }

    run
}

fn texts(elements: Vec<ElementRef>) -> Vec<String> {
    elements
        .iter()
        .map(text_of)
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills() -> FieldSpec {
        FieldSpec::new("skills", ["required skills", "skills"])
            .with_kind(FieldKind::Skills)
            .with_containers([".skills"])
    }

    fn description() -> FieldSpec {
        FieldSpec::new("description", ["job description"])
            .with_kind(FieldKind::Description)
            .with_containers([".job-description"])
    }

    #[test]
    fn test_named_container_list() {
        let html = r#"
        <div class="skills">
            <ul><li>Rust</li><li> </li><li>PostgreSQL</li></ul>
        </div>
        "#;

        let doc = Document::parse(html);
        assert_eq!(SectionStrategy.find(&doc, &skills()).unwrap(), "Rust, PostgreSQL");
    }

    #[test]
    fn test_named_container_plain_text() {
        let doc = Document::parse(r#"<div class="job-description">  Write   code.  </div>"#);
        assert_eq!(SectionStrategy.find(&doc, &description()).unwrap(), "Write code.");
    }

    #[test]
    fn test_heading_then_list() {
        let html = r#"
        <h4>Required Skills</h4>
        <ul><li>Java</li><li>Spring</li></ul>
        <h4>Benefits</h4>
        <ul><li>Insurance</li></ul>
        "#;

        let doc = Document::parse(html);
        assert_eq!(SectionStrategy.find(&doc, &skills()).unwrap(), "Java, Spring");
    }

    #[test]
    fn test_heading_then_paragraph_run() {
        let html = r#"
        <h3>Job Description</h3>
        <p>We are hiring.</p>
        <p>Join us.</p>
        <div class="footer">Contact HR</div>
        "#;

        let doc = Document::parse(html);
        assert_eq!(
            SectionStrategy.find(&doc, &description()).unwrap(),
            "We are hiring. Join us."
        );
    }

    #[test]
    fn test_wrapped_label_climbs_to_parent() {
        let html = r#"
        <div>
            <p><strong>Skills:</strong></p>
        </div>
        <ul><li>Go</li><li>Kubernetes</li></ul>
        "#;

        let doc = Document::parse(html);
        assert_eq!(SectionStrategy.find(&doc, &skills()).unwrap(), "Go, Kubernetes");
    }

    #[test]
    fn test_long_text_is_not_a_label() {
        let long = format!("<p>{} skills {}</p><ul><li>Noise</li></ul>", "x".repeat(60), "y".repeat(60));
        let doc = Document::parse(&long);
        assert!(SectionStrategy.find(&doc, &skills()).is_none());
    }

    #[test]
    fn test_only_compound_fields() {
        assert!(SectionStrategy.applies_to(FieldKind::Skills));
        assert!(SectionStrategy.applies_to(FieldKind::Description));
        assert!(!SectionStrategy.applies_to(FieldKind::Text));
        assert!(!SectionStrategy.applies_to(FieldKind::Title));
    }
}
