//! Delimited-text export of job records
//!
//! Column selection and the rendering of missing values are configuration.
//! The default export is the seven canonical columns, with missing Location
//! and Salary written as empty cells and other missing values as the
//! sentinel text.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::record::JobRecord;

pub const DEFAULT_SENTINEL: &str = "Not Available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    JobTitle,
    Location,
    ExperienceRequired,
    SkillsRequired,
    Salary,
    #[serde(rename = "JobURL")]
    JobUrl,
    JobDescriptionSummary,
    PostingDate,
    CompanyName,
    LastDate,
}

impl Column {
    /// The canonical export, in its fixed order
    pub const CANONICAL: [Column; 7] = [
        Column::JobTitle,
        Column::Location,
        Column::ExperienceRequired,
        Column::SkillsRequired,
        Column::Salary,
        Column::JobUrl,
        Column::JobDescriptionSummary,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::JobTitle => "JobTitle",
            Column::Location => "Location",
            Column::ExperienceRequired => "ExperienceRequired",
            Column::SkillsRequired => "SkillsRequired",
            Column::Salary => "Salary",
            Column::JobUrl => "JobURL",
            Column::JobDescriptionSummary => "JobDescriptionSummary",
            Column::PostingDate => "PostingDate",
            Column::CompanyName => "CompanyName",
            Column::LastDate => "LastDate",
        }
    }

    /// The record's value for this column; `None` when not found
    fn value(self, record: &JobRecord) -> Option<&str> {
        match self {
            Column::JobTitle => record.title.as_deref(),
            Column::Location => record.location.as_deref(),
            Column::ExperienceRequired => record.experience.as_deref(),
            Column::SkillsRequired => record.skills.as_deref(),
            Column::Salary => record.salary.as_deref(),
            Column::JobUrl => record.detail_url.as_deref(),
            Column::JobDescriptionSummary => record.description.as_deref(),
            Column::PostingDate => non_empty(&record.posting_date),
            Column::CompanyName => non_empty(&record.company_name),
            Column::LastDate => non_empty(&record.last_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub path: PathBuf,
    pub columns: Vec<Column>,
    pub delimiter: char,
    /// Text written for a missing value
    pub sentinel: String,
    /// Columns whose missing values are written as empty cells instead
    pub blank_when_missing: Vec<Column>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("infopark_jobs.csv"),
            columns: Column::CANONICAL.to_vec(),
            delimiter: ',',
            sentinel: DEFAULT_SENTINEL.to_string(),
            blank_when_missing: vec![Column::Location, Column::Salary],
        }
    }
}

impl ExportOptions {
    fn render<'a>(&'a self, column: Column, record: &'a JobRecord) -> &'a str {
        match column.value(record) {
            Some(value) => value,
            None if self.blank_when_missing.contains(&column) => "",
            None => &self.sentinel,
        }
    }
}

/// Write a header row and one row per record
pub fn write_records<W: Write>(mut w: W, records: &[JobRecord], options: &ExportOptions) -> io::Result<()> {
    let header: Vec<&str> = options.columns.iter().map(|c| c.header()).collect();
    write_row(&mut w, &header, options.delimiter)?;

    for record in records {
        let row: Vec<&str> = options
            .columns
            .iter()
            .map(|&c| options.render(c, record))
            .collect();
        write_row(&mut w, &row, options.delimiter)?;
    }

    w.flush()
}

/// Write records to `options.path`, creating parent directories
pub fn export_to_path(records: &[JobRecord], options: &ExportOptions) -> io::Result<()> {
    let path: &Path = &options.path;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_records(BufWriter::new(file), records, options)?;

    info!(records = records.len(), path = %path.display(), "saved job listings");
    Ok(())
}

fn non_empty(s: &str) -> Option<&str> {
    Some(s).filter(|s| !s.is_empty())
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(w: &mut W, row: &[&str], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", sep)?;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\r\n")
}
