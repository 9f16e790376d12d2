//! Label-driven field extraction
//!
//! Each strategy knows one way of finding the value that belongs to a label
//! (table rows, definition lists, page sections, plain text adjacency). The
//! [`Extractor`] runs them as an ordered cascade per field: the first
//! strategy producing a non-empty value wins.

mod adjacency;
mod definition_list;
mod heading;
mod section;
mod table;
pub mod transform;

pub use adjacency::*;
pub use definition_list::*;
pub use heading::*;
pub use section::*;
pub use table::*;

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{FieldKind, FieldSpec, DEFAULT_DESCRIPTION_CAP};
use crate::document::Document;

/// One way of locating a field's value in a document
pub trait Strategy: Send + Sync {
    /// Short name used in logs and for removing a strategy from the cascade
    fn name(&self) -> &'static str;

    /// Whether this strategy should be tried for fields of `kind`
    fn applies_to(&self, _kind: FieldKind) -> bool {
        true
    }

    /// Raw value for `spec`, before post-processing
    fn find(&self, document: &Document, spec: &FieldSpec) -> Option<String>;
}

/// Field name -> extracted value, `None` when nothing was found.
/// Always holds exactly the configured field names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExtractionResult {
    pub values: BTreeMap<String, Option<String>>,
}

impl ExtractionResult {
    /// Result with every configured field marked as not found
    pub fn not_found(specs: &[FieldSpec]) -> Self {
        Self {
            values: specs.iter().map(|s| (s.name.clone(), None)).collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).and_then(|v| v.as_deref())
    }

    pub fn is_found(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Ordered cascade of strategies plus field post-processing
pub struct Extractor {
    strategies: Vec<Box<dyn Strategy>>,
    description_cap: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::with_strategies(default_strategies())
    }
}

/// Heading, table rows, definition lists, sections, then loose adjacency
pub fn default_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(HeadingStrategy),
        Box::new(TableRowStrategy),
        Box::new(DefinitionListStrategy),
        Box::new(SectionStrategy),
        Box::new(AdjacencyStrategy),
    ]
}

impl Extractor {
    pub fn with_strategies(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self {
            strategies,
            description_cap: DEFAULT_DESCRIPTION_CAP,
        }
    }

    pub fn description_cap(mut self, cap: usize) -> Self {
        self.description_cap = cap;
        self
    }

    /// Drop a strategy from the cascade by name
    pub fn without(mut self, name: &str) -> Self {
        self.strategies.retain(|s| s.name() != name);
        self
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Extract every configured field from `document`.
    ///
    /// Never fails: a strategy that panics on odd markup is treated as
    /// having found nothing and the cascade moves on.
    pub fn extract(&self, document: &Document, specs: &[FieldSpec]) -> ExtractionResult {
        let values = specs
            .iter()
            .map(|spec| (spec.name.clone(), self.extract_field(document, spec)))
            .collect();

        ExtractionResult { values }
    }

    fn extract_field(&self, document: &Document, spec: &FieldSpec) -> Option<String> {
        for strategy in &self.strategies {
            if !strategy.applies_to(spec.kind) {
                continue;
            }

            let raw = match catch_unwind(AssertUnwindSafe(|| strategy.find(document, spec))) {
                Ok(found) => found,
                Err(_) => {
                    warn!(field = %spec.name, strategy = strategy.name(), "strategy panicked, skipping");
                    None
                }
            };

            if let Some(value) = raw.and_then(|r| self.finish(spec.kind, &r)) {
                debug!(field = %spec.name, strategy = strategy.name(), "field resolved");
                return Some(value);
            }
        }

        debug!(field = %spec.name, "field not found");
        None
    }

    fn finish(&self, kind: FieldKind, raw: &str) -> Option<String> {
        let value = match kind {
            FieldKind::Skills => transform::normalize_skills(raw),
            FieldKind::Description => transform::summarize(raw, self.description_cap),
            FieldKind::Text | FieldKind::Title => transform::collapse_whitespace(raw),
        };

        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

/// Extract with the default cascade
pub fn extract(document: &Document, specs: &[FieldSpec]) -> ExtractionResult {
    Extractor::default().extract(document, specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_field_specs;
    use proptest::{prop_assert_eq, proptest};

    struct Panicking;

    impl Strategy for Panicking {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn find(&self, _document: &Document, _spec: &FieldSpec) -> Option<String> {
            panic!("traversal fault")
        }
    }

    struct Fixed(&'static str);

    impl Strategy for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn find(&self, _document: &Document, _spec: &FieldSpec) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    const DETAIL_PAGE: &str = r#"
    <html>
    <body>
        <h1>Rust Developer</h1>
        <table>
            <tr><th>Location</th><td>Kochi</td></tr>
        </table>
        <dl>
            <dt>Experience (Yrs)</dt><dd>2-4</dd>
        </dl>
        <h3>Required Skills</h3>
        <ul><li>Python</li><li>Go</li><li>SQL</li></ul>
        <div class="job-description">
            <p>Build   crawlers.</p>
            <p>Maintain parsers.</p>
        </div>
        <p><b>Salary:</b> 4 LPA</p>
    </body>
    </html>
    "#;

    #[test]
    fn test_full_detail_page() {
        let doc = Document::parse(DETAIL_PAGE);
        let result = extract(&doc, &default_field_specs());

        assert_eq!(result.get("title"), Some("Rust Developer"));
        assert_eq!(result.get("location"), Some("Kochi"));
        assert_eq!(result.get("experience"), Some("2-4"));
        assert_eq!(result.get("skills"), Some("Python, Go, SQL"));
        assert_eq!(result.get("description"), Some("Build crawlers. Maintain parsers."));
        // Only free-form text carries the salary
        assert_eq!(result.get("salary"), Some("4 LPA"));
    }

    #[test]
    fn test_location_from_table_row() {
        let doc = Document::parse("<table><tr><td>Location</td><td>Kochi</td></tr></table>");
        let specs = vec![FieldSpec::new("location", ["location"])];

        let result = extract(&doc, &specs);
        assert_eq!(result.get("location"), Some("Kochi"));
    }

    #[test]
    fn test_experience_from_definition_list() {
        let doc = Document::parse("<dl><dt>Experience (Yrs)</dt><dd>2-4</dd></dl>");
        let specs = vec![FieldSpec::new("experience", ["experience", "exp"])];

        let result = extract(&doc, &specs);
        assert_eq!(result.get("experience"), Some("2-4"));
    }

    #[test]
    fn test_missing_fields_are_present_as_none() {
        let doc = Document::parse("<p>nothing useful here</p>");
        let result = extract(&doc, &default_field_specs());

        assert_eq!(result.len(), 6);
        assert!(result.values.values().all(Option::is_none));
        assert_eq!(result, ExtractionResult::not_found(&default_field_specs()));
    }

    #[test]
    fn test_earlier_stage_wins() {
        let html = r#"
        <p>Location</p><p>Trivandrum</p>
        <table><tr><td>Location</td><td>Kochi</td></tr></table>
        "#;
        let doc = Document::parse(html);
        let result = extract(&doc, &[FieldSpec::new("location", ["location"])]);
        assert_eq!(result.get("location"), Some("Kochi"));
    }

    #[test]
    fn test_text_values_are_single_line() {
        let doc = Document::parse("<p>Location</p><span>Kochi,\n      Kerala</span>");
        let specs = vec![FieldSpec::new("location", ["location"])];
        assert_eq!(extract(&doc, &specs).get("location"), Some("Kochi, Kerala"));
    }

    #[test]
    fn test_without_adjacency() {
        let doc = Document::parse("<p>Salary</p><p>4 LPA</p>");
        let specs = vec![FieldSpec::new("salary", ["salary"])];

        let extractor = Extractor::default().without(ADJACENCY);
        assert!(!extractor.strategy_names().contains(&ADJACENCY));
        assert_eq!(extractor.extract(&doc, &specs).get("salary"), None);
    }

    #[test]
    fn test_panicking_strategy_is_skipped() {
        let extractor = Extractor::with_strategies(vec![Box::new(Panicking), Box::new(Fixed("ok"))]);
        let doc = Document::parse("<p></p>");
        let result = extractor.extract(&doc, &[FieldSpec::new("anything", ["x"])]);
        assert_eq!(result.get("anything"), Some("ok"));
    }

    #[test]
    fn test_post_processing_applies_to_any_stage() {
        let doc = Document::parse("<table><tr><td>Skills</td><td>Rust• Tokio · Serde</td></tr></table>");
        let specs = vec![FieldSpec::new("skills", ["skills"]).with_kind(FieldKind::Skills)];
        assert_eq!(extract(&doc, &specs).get("skills"), Some("Rust, Tokio, Serde"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let doc = Document::parse(DETAIL_PAGE);
        let specs = default_field_specs();
        assert_eq!(extract(&doc, &specs), extract(&doc, &specs));
    }

    #[test]
    fn test_malformed_markup_does_not_fail() {
        let doc = Document::parse("<table><tr><td>Location<td><dl><dt>Exp</dt><dd>3</table></dl><<<>");
        let result = extract(&doc, &default_field_specs());
        assert_eq!(result.len(), 6);
    }

    proptest! {
        #[test]
        fn prop_result_keys_match_specs(
            names in proptest::collection::btree_set("[a-z]{1,8}", 1..8),
            body in "[ -~]{0,200}",
        ) {
            let specs: Vec<FieldSpec> = names
                .iter()
                .map(|n| FieldSpec::new(n, [n.as_str()]))
                .collect();
            let doc = Document::parse(&format!("<body><p>{}</p></body>", body));

            let result = extract(&doc, &specs);
            let got: Vec<&str> = result.fields().collect();
            let want: Vec<&str> = names.iter().map(String::as_str).collect();
            prop_assert_eq!(got, want);
        }
    }
}
