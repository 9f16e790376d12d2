//! Title from the page's top-level heading

use crate::config::{FieldKind, FieldSpec};
use crate::document::Document;

use super::Strategy;

pub const HEADING: &str = "heading";

/// First non-empty h1 (then h2, h3). Runs ahead of every label search, so a
/// heading always wins for title fields when the page has one.
pub struct HeadingStrategy;

impl Strategy for HeadingStrategy {
    fn name(&self) -> &'static str {
        HEADING
    }

    fn applies_to(&self, kind: FieldKind) -> bool {
        kind == FieldKind::Title
    }

    fn find(&self, document: &Document, _spec: &FieldSpec) -> Option<String> {
        document.first_heading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_beats_labelled_title() {
        let doc = Document::parse(
            "<h1>Data Engineer</h1><table><tr><td>Job Title</td><td>Other</td></tr></table>",
        );
        let spec = FieldSpec::new("title", ["job title"]).with_kind(FieldKind::Title);
        assert_eq!(HeadingStrategy.find(&doc, &spec).unwrap(), "Data Engineer");
    }

    #[test]
    fn test_only_for_title_fields() {
        assert!(HeadingStrategy.applies_to(FieldKind::Title));
        assert!(!HeadingStrategy.applies_to(FieldKind::Text));
        assert!(!HeadingStrategy.applies_to(FieldKind::Description));
    }
}
