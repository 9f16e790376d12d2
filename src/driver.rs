//! Pagination driver
//!
//! Walks the listing pages in order, enriches every row from its detail
//! page and accumulates the records. Strictly sequential: one request at a
//! time, with a fixed pause between requests. Nothing here aborts the run.
//! A failed page ends pagination and a failed detail page yields a record
//! with the detail fields missing.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use url::Url;

use crate::config::ScraperConfig;
use crate::document::Document;
use crate::error::ConfigError;
use crate::extractors::{ExtractionResult, Extractor};
use crate::fetch::Fetch;
use crate::listing::{parse_listing, RowSummary};
use crate::record::JobRecord;
use crate::robots::RobotsPolicy;

pub struct Driver<F: Fetch> {
    fetcher: F,
    config: ScraperConfig,
    extractor: Extractor,
    base: Url,
}

impl<F: Fetch> Driver<F> {
    pub fn new(fetcher: F, config: ScraperConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let base = config.base()?;
        let extractor = Extractor::default().description_cap(config.description_cap);

        Ok(Self {
            fetcher,
            config,
            extractor,
            base,
        })
    }

    /// Replace the default extraction cascade
    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Page 1 is the base URL itself; later pages add `page=N`
    pub fn page_url(&self, page: u32) -> String {
        if page <= 1 {
            return self.base.to_string();
        }

        let mut url = self.base.clone();
        url.query_pairs_mut().append_pair("page", &page.to_string());
        url.to_string()
    }

    /// Scrape every page until the board runs out of rows
    pub fn run(&self) -> Vec<JobRecord> {
        let robots = self.config.respect_robots.then(|| {
            RobotsPolicy::load(&self.fetcher, &self.base, &self.config.user_agent)
        });

        let delay = robots
            .as_ref()
            .and_then(RobotsPolicy::crawl_delay)
            .map_or(self.config.request_delay(), |d| d.max(self.config.request_delay()));
        let mut pacer = Pacer::new(delay);

        let mut records = Vec::new();
        let mut previous: Option<Vec<RowSummary>> = None;

        for page in 1u32.. {
            if self.config.max_pages.is_some_and(|max| page > max) {
                info!(max_pages = page - 1, "page limit reached");
                break;
            }

            pacer.wait();
            let rows = self.fetch_listing(page);
            if rows.is_empty() {
                info!(page, "no more jobs found, stopping");
                break;
            }
            if previous.as_ref() == Some(&rows) {
                warn!(page, "page repeats the previous one, stopping");
                break;
            }

            info!(page, rows = rows.len(), "scraping listing page");
            for row in &rows {
                let details = match row.detail_url.as_deref() {
                    Some(url) if robots.as_ref().map_or(true, |r| r.allowed(url)) => {
                        pacer.wait();
                        self.fetch_details(url)
                    }
                    Some(url) => {
                        warn!(url, "detail page disallowed by robots.txt");
                        ExtractionResult::not_found(&self.config.fields)
                    }
                    None => ExtractionResult::not_found(&self.config.fields),
                };

                records.push(JobRecord::merge(row.clone(), &details));
            }

            previous = Some(rows);
        }

        info!(records = records.len(), "scrape finished");
        records
    }

    /// Rows of one listing page; empty on any failure
    pub fn fetch_listing(&self, page: u32) -> Vec<RowSummary> {
        let url = self.page_url(page);
        debug!(%url, "fetching listing page");

        match self.fetcher.fetch(&url) {
            Ok(html) => parse_listing(&Document::parse(&html), &self.config.listing, &self.base),
            Err(e) => {
                warn!(error = %e, "failed to get listing page");
                vec![]
            }
        }
    }

    /// Extracted detail fields; all missing on any failure
    pub fn fetch_details(&self, url: &str) -> ExtractionResult {
        debug!(url, "fetching detail page");

        let html = match self.fetcher.fetch(url) {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "failed to get job details");
                return ExtractionResult::not_found(&self.config.fields);
            }
        };

        let extracted = catch_unwind(AssertUnwindSafe(|| {
            let document = Document::parse(&html);
            self.extractor.extract(&document, &self.config.fields)
        }));

        extracted.unwrap_or_else(|_| {
            warn!(url, "extraction panicked, using empty result");
            ExtractionResult::not_found(&self.config.fields)
        })
    }
}

/// Enforces the minimum gap between consecutive requests
struct Pacer {
    delay: Duration,
    last: Option<Instant>,
}

impl Pacer {
    fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    /// Sleep until `delay` has passed since the previous call
    fn wait(&mut self) {
        if let Some(last) = self.last {
            let remaining = self.delay.saturating_sub(last.elapsed());
            if !remaining.is_zero() {
                std::thread::sleep(remaining);
            }
        }
        self.last = Some(Instant::now());
    }
}
