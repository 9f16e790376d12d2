//! Scraper configuration
//!
//! Everything is loaded from JSON with serde, falling back to defaults that
//! target the Infopark job search. Field specs are fixed configuration: the
//! keyword lists are never learned or adjusted at runtime.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::export::ExportOptions;

pub const FIELD_TITLE: &str = "title";
pub const FIELD_LOCATION: &str = "location";
pub const FIELD_EXPERIENCE: &str = "experience";
pub const FIELD_SKILLS: &str = "skills";
pub const FIELD_SALARY: &str = "salary";
pub const FIELD_DESCRIPTION: &str = "description";

/// Field names that have a slot in a job record
pub const RECORD_FIELDS: [&str; 6] = [
    FIELD_TITLE,
    FIELD_LOCATION,
    FIELD_EXPERIENCE,
    FIELD_SKILLS,
    FIELD_SALARY,
    FIELD_DESCRIPTION,
];

pub const DEFAULT_BASE_URL: &str = "https://infopark.in/companies/job-search";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";
pub const DEFAULT_DESCRIPTION_CAP: usize = 300;

/// How a field's value is located and post-processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single value, taken as found
    #[default]
    Text,
    /// Resolved from the first top-level heading before any label search
    Title,
    /// Compound list, normalized to "a, b, c"
    Skills,
    /// Compound prose, whitespace-normalized and truncated
    Description,
}

impl FieldKind {
    /// Compound fields may be collected from whole sections of the page
    pub fn is_compound(self) -> bool {
        matches!(self, FieldKind::Skills | FieldKind::Description)
    }
}

/// A semantic field and the label keywords used to find it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Unique field name, used as the key in extraction results
    pub name: String,
    /// Candidate label keywords, matched as case-insensitive substrings
    pub keywords: Vec<String>,
    #[serde(default)]
    pub kind: FieldKind,
    /// CSS selectors of containers known to hold this field (compound fields)
    #[serde(default)]
    pub containers: Vec<String>,
}

impl FieldSpec {
    pub fn new<I, S>(name: &str, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.to_string(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            kind: FieldKind::Text,
            containers: vec![],
        }
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_containers<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.containers = selectors.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a lowercased label contains any of this field's keywords
    pub fn matches(&self, label_lower: &str) -> bool {
        self.keywords
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| label_lower.contains(&k.to_lowercase()))
    }
}

/// The six fields extracted from a detail page by default
pub fn default_field_specs() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(FIELD_TITLE, ["job title", "designation", "position"])
            .with_kind(FieldKind::Title),
        FieldSpec::new(FIELD_LOCATION, ["location"]),
        FieldSpec::new(FIELD_EXPERIENCE, ["experience", "exp"]),
        FieldSpec::new(FIELD_SKILLS, ["required skills", "key skills", "skills"])
            .with_kind(FieldKind::Skills)
            .with_containers([".skills", "#skills", ".job-skills"]),
        FieldSpec::new(FIELD_SALARY, ["salary", "pay", "package"]),
        FieldSpec::new(
            FIELD_DESCRIPTION,
            ["job description", "description", "responsibilities"],
        )
        .with_kind(FieldKind::Description)
        .with_containers([".job-description", "#job-description", ".description"]),
    ]
}

/// Cell positions in a listing table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingLayout {
    pub posting_date: usize,
    pub title: usize,
    pub company: usize,
    pub last_date: usize,
    /// Cell holding the detail link; the link is optional
    pub link: usize,
    /// Rows with fewer cells are skipped
    pub min_cells: usize,
}

impl Default for ListingLayout {
    fn default() -> Self {
        Self {
            posting_date: 0,
            title: 1,
            company: 2,
            last_date: 3,
            link: 4,
            min_cells: 4,
        }
    }
}

/// Top-level configuration for a scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Bound on each individual request
    pub timeout_secs: u64,
    /// Fixed pause between detail page fetches
    pub request_delay_ms: u64,
    /// Stop after this many listing pages even if more exist
    pub max_pages: Option<u32>,
    /// Skip TLS certificate verification. The source site serves a broken
    /// chain; this is a known limitation, not something to copy elsewhere.
    pub accept_invalid_certs: bool,
    /// Honor robots.txt disallow rules and crawl-delay
    pub respect_robots: bool,
    /// Maximum description summary length in characters
    pub description_cap: usize,
    pub fields: Vec<FieldSpec>,
    pub listing: ListingLayout,
    pub export: ExportOptions,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            request_delay_ms: 1000,
            max_pages: None,
            accept_invalid_certs: true,
            respect_robots: false,
            description_cap: DEFAULT_DESCRIPTION_CAP,
            fields: default_field_specs(),
            listing: ListingLayout::default(),
            export: ExportOptions::default(),
        }
    }
}

impl ScraperConfig {
    /// Load and validate a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse and validate JSON config; missing keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ScraperConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base()?;

        if self.fields.is_empty() {
            return Err(ConfigError::NoFields);
        }

        let mut seen = HashSet::new();
        for spec in &self.fields {
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::DuplicateField(spec.name.clone()));
            }
        }

        for name in self.unmapped_fields() {
            warn!(field = name, "configured field has no record column and will not be exported");
        }

        Ok(())
    }

    /// Configured field names that no record slot picks up
    pub fn unmapped_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .map(|spec| spec.name.as_str())
            .filter(|name| !RECORD_FIELDS.contains(name))
            .collect()
    }

    /// Parsed base URL
    pub fn base(&self) -> Result<url::Url, ConfigError> {
        url::Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
