//! Job records: a listing row enriched with its detail page

use serde::Serialize;

use crate::config::{
    FIELD_DESCRIPTION, FIELD_EXPERIENCE, FIELD_LOCATION, FIELD_SALARY, FIELD_SKILLS, FIELD_TITLE,
};
use crate::extractors::ExtractionResult;
use crate::listing::RowSummary;

/// A fully populated job listing. `None` marks a value that was not found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    pub title: Option<String>,
    pub location: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
    pub salary: Option<String>,
    pub detail_url: Option<String>,
    pub description: Option<String>,
    pub posting_date: String,
    pub company_name: String,
    pub last_date: String,
}

impl JobRecord {
    /// Merge a listing row with its detail page extraction.
    /// Detail values win; the row title is the fallback title.
    pub fn merge(row: RowSummary, details: &ExtractionResult) -> Self {
        let detail = |field: &str| details.get(field).map(String::from);

        let row_title = Some(row.job_title).filter(|t| !t.is_empty());

        Self {
            title: detail(FIELD_TITLE).or(row_title),
            location: detail(FIELD_LOCATION),
            experience: detail(FIELD_EXPERIENCE),
            skills: detail(FIELD_SKILLS),
            salary: detail(FIELD_SALARY),
            detail_url: row.detail_url,
            description: detail(FIELD_DESCRIPTION),
            posting_date: row.posting_date,
            company_name: row.company_name,
            last_date: row.last_date,
        }
    }

    /// Record for a row whose detail page was never extracted
    pub fn from_row(row: RowSummary) -> Self {
        Self::merge(row, &ExtractionResult::default())
    }
}
