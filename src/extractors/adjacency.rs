//! Loose text adjacency, the last-resort fallback
//!
//! A fragment containing a keyword is followed by its value in serialization
//! order. The two need not be structurally related at all, so this matches
//! unrelated text on some pages. Remove it with
//! `Extractor::default().without(ADJACENCY)` when precision matters more
//! than coverage.

use crate::config::FieldSpec;
use crate::document::Document;

use super::Strategy;

pub const ADJACENCY: &str = "adjacency";

pub struct AdjacencyStrategy;

impl Strategy for AdjacencyStrategy {
    fn name(&self) -> &'static str {
        ADJACENCY
    }

    fn find(&self, document: &Document, spec: &FieldSpec) -> Option<String> {
        let fragments = document.fragments();

        fragments
            .windows(2)
            .find(|pair| spec.matches(&pair[0].to_lowercase()) && !pair[1].is_empty())
            .map(|pair| pair[1].clone())
    }
}
