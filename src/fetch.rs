//! Page fetching
//!
//! The driver only sees the [`Fetch`] trait so it can be run against
//! canned pages. [`HttpFetcher`] is the real thing, a blocking ureq agent.

use tracing::warn;

use crate::config::ScraperConfig;
use crate::error::FetchError;

/// Fetch a URL and return its body as text
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP client with a global timeout and fixed User-Agent
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Self {
        let mut builder = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .user_agent(config.user_agent.as_str());

        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled");
            builder = builder.tls_config(
                ureq::tls::TlsConfig::builder()
                    .disable_verification(true)
                    .build(),
            );
        }

        Self {
            agent: ureq::Agent::new_with_config(builder.build()),
        }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::StatusCode(status) => FetchError::Status {
                url: url.to_string(),
                status,
            },
            other => FetchError::Request {
                url: url.to_string(),
                source: Box::new(other),
            },
        })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        resp.into_body()
            .read_to_string()
            .map_err(|source| FetchError::Body {
                url: url.to_string(),
                source: Box::new(source),
            })
    }
}
