//! Listing page parsing
//!
//! The job board lists postings in a single table, one row per job, with a
//! link to the detail page in one of the cells.

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::ListingLayout;
use crate::document::{select_within, text_of, Document};

/// One row of the listing table, before detail enrichment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowSummary {
    pub posting_date: String,
    pub job_title: String,
    pub company_name: String,
    pub last_date: String,
    /// Absolute detail page URL
    pub detail_url: Option<String>,
}

/// Parse the listing table of one page.
///
/// The listing is the first table body holding at least one row wide enough
/// to be a job. Layout tables before it are skipped. An empty result means
/// there is no such body, which is how the board signals that pagination has
/// run out.
pub fn parse_listing(document: &Document, layout: &ListingLayout, base: &Url) -> Vec<RowSummary> {
    let listing = document.select("tbody").into_iter().find(|tbody| {
        select_within(tbody, "tr")
            .iter()
            .any(|row| select_within(row, "td").len() >= layout.min_cells)
    });
    let Some(tbody) = listing else {
        debug!("no listing table found");
        return vec![];
    };

    let mut rows = Vec::new();
    for (index, row) in select_within(&tbody, "tr").into_iter().enumerate() {
        let cells = select_within(&row, "td");
        if cells.len() < layout.min_cells {
            debug!(row = index, cells = cells.len(), "skipping short listing row");
            continue;
        }

        let cell_text = |i: usize| cells.get(i).map(text_of).unwrap_or_default();

        let detail_url = cells.get(layout.link).and_then(|cell| {
            select_within(cell, "a[href]")
                .first()
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| resolve_link(base, href))
        });

        rows.push(RowSummary {
            posting_date: cell_text(layout.posting_date),
            job_title: cell_text(layout.title),
            company_name: cell_text(layout.company),
            last_date: cell_text(layout.last_date),
            detail_url,
        });
    }

    rows
}

/// Resolve an href against the base URL; only http(s) targets are kept
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
    {
        return None;
    }

    let absolute = base.join(href).ok()?;
    match absolute.scheme() {
        "http" | "https" => Some(absolute.to_string()),
        _ => None,
    }
}
