//! Label/value pairs laid out as `<dt>`/`<dd>`

use crate::config::FieldSpec;
use crate::document::{next_element_siblings, tag_name, text_of, Document};

use super::Strategy;

pub const DEFINITION_LIST: &str = "definition_list";

pub struct DefinitionListStrategy;

impl Strategy for DefinitionListStrategy {
    fn name(&self) -> &'static str {
        DEFINITION_LIST
    }

    fn find(&self, document: &Document, spec: &FieldSpec) -> Option<String> {
        for term in document.select("dt") {
            let label = text_of(&term).to_lowercase();
            if !spec.matches(&label) {
                continue;
            }

            let Some(definition) = next_element_siblings(&term).find(|el| tag_name(el) == "dd")
            else {
                continue;
            };

            let value = text_of(&definition);
            if !value.is_empty() {
                return Some(value);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_following_dd() {
        let html = r#"
        <dl>
            <dt>Location</dt><dd>Kochi</dd>
            <dt>Experience (Yrs)</dt>
            <dd> 2-4 </dd>
        </dl>
        "#;

        let doc = Document::parse(html);
        let spec = FieldSpec::new("experience", ["experience", "exp"]);
        assert_eq!(DefinitionListStrategy.find(&doc, &spec).unwrap(), "2-4");
    }

    #[test]
    fn test_empty_dd_continues_search() {
        let html = r#"
        <dl><dt>Salary</dt><dd></dd></dl>
        <dl><dt>Salary Range</dt><dd>3-5 LPA</dd></dl>
        "#;

        let doc = Document::parse(html);
        let spec = FieldSpec::new("salary", ["salary"]);
        assert_eq!(DefinitionListStrategy.find(&doc, &spec).unwrap(), "3-5 LPA");
    }

    #[test]
    fn test_dt_without_dd() {
        let doc = Document::parse("<dl><dt>Location</dt></dl>");
        assert!(DefinitionListStrategy
            .find(&doc, &FieldSpec::new("location", ["location"]))
            .is_none());
    }
}
