//! robots.txt policy for the scraped origin

use std::time::Duration;

use texting_robots::Robot;
use tracing::{debug, info};
use url::Url;

use crate::fetch::Fetch;

/// Allow rules and crawl-delay for one origin and user agent
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    /// Raw robots.txt (Robot doesn't impl Clone, so it is re-parsed per check)
    robots_txt: String,
    user_agent: String,
    crawl_delay: Option<Duration>,
}

impl RobotsPolicy {
    /// Fetch `/robots.txt` for the origin of `base`. A missing or failed
    /// robots.txt allows everything.
    pub fn load(fetcher: &dyn Fetch, base: &Url, user_agent: &str) -> Self {
        let robots_txt = match base.join("/robots.txt") {
            Ok(robots_url) => match fetcher.fetch(robots_url.as_str()) {
                Ok(text) => text,
                Err(e) => {
                    debug!(error = %e, "no robots.txt, allowing all");
                    String::new()
                }
            },
            Err(_) => String::new(),
        };

        Self::from_text(&robots_txt, user_agent)
    }

    pub fn from_text(robots_txt: &str, user_agent: &str) -> Self {
        let crawl_delay = crawl_delay_for(robots_txt, user_agent);
        if let Some(delay) = crawl_delay {
            info!(delay_ms = delay.as_millis() as u64, "robots.txt crawl-delay");
        }

        Self {
            robots_txt: robots_txt.to_string(),
            user_agent: user_agent.to_string(),
            crawl_delay,
        }
    }

    pub fn allowed(&self, url: &str) -> bool {
        Robot::new(&self.user_agent, self.robots_txt.as_bytes())
            .map(|r| r.allowed(url))
            .unwrap_or(true)
    }

    pub fn crawl_delay(&self) -> Option<Duration> {
        self.crawl_delay
    }
}

/// Crawl-delay from the section matching `user_agent`, else the first
/// delay seen in any section
fn crawl_delay_for(robots_txt: &str, user_agent: &str) -> Option<Duration> {
    let ua_lower = user_agent.to_lowercase();
    let mut in_matching_section = false;
    let mut fallback: Option<f64> = None;

    for line in robots_txt.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let lower = line.to_lowercase();
        if let Some(agent) = lower.strip_prefix("user-agent:") {
            let agent = agent.trim();
            in_matching_section = agent == "*" || ua_lower.contains(agent);
        } else if let Some(delay) = lower.strip_prefix("crawl-delay:") {
            if let Ok(secs) = delay.trim().parse::<f64>() {
                if in_matching_section {
                    return Duration::try_from_secs_f64(secs).ok();
                }
                fallback.get_or_insert(secs);
            }
        }
    }

    fallback.and_then(|secs| Duration::try_from_secs_f64(secs).ok())
}
