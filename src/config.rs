//! Client configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PikeError, Result};
use crate::search::SearchRequest;

/// Page size the backend applies when a request sets none.
const BACKEND_DEFAULT_SIZE: usize = 10;

/// Limits and defaults applied by [`SearchClient`](crate::client::SearchClient)
/// before a request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Upper bound for `from + size`; deeper pages are rejected locally.
    pub max_result_window: usize,

    /// Maximum number of leaf clauses in one query tree.
    pub max_clause_count: usize,

    /// Page size used when a request does not set one.
    /// If None, the backend default applies.
    pub default_size: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_result_window: 10_000,
            max_clause_count: 1024,
            default_size: None,
        }
    }
}

impl ClientConfig {
    /// Load a configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the result window.
    pub fn with_max_result_window(mut self, window: usize) -> Self {
        self.max_result_window = window;
        self
    }

    /// Set the clause limit.
    pub fn with_max_clause_count(mut self, count: usize) -> Self {
        self.max_clause_count = count;
        self
    }

    /// Set the default page size.
    pub fn with_default_size(mut self, size: usize) -> Self {
        self.default_size = Some(size);
        self
    }

    /// Check a request against the result window.
    ///
    /// A request without a size still fetches a page, the configured default
    /// or the backend's, so that page counts too.
    pub fn check_request(&self, request: &SearchRequest) -> Result<()> {
        let from = request.from().unwrap_or(0);
        let size = request
            .size()
            .or(self.default_size)
            .unwrap_or(BACKEND_DEFAULT_SIZE);
        let end = from.saturating_add(size);
        if end > self.max_result_window {
            return Err(PikeError::invalid_request(format!(
                "from + size must be at most {}, got {end}",
                self.max_result_window
            )));
        }
        Ok(())
    }

    /// Check that the limits are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_result_window == 0 {
            return Err(PikeError::invalid_request(
                "max_result_window must be positive",
            ));
        }
        if self.max_clause_count == 0 {
            return Err(PikeError::invalid_request(
                "max_clause_count must be positive",
            ));
        }
        if let Some(size) = self.default_size {
            if size > self.max_result_window {
                return Err(PikeError::invalid_request(format!(
                    "default_size {size} exceeds max_result_window {}",
                    self.max_result_window
                )));
            }
        }
        Ok(())
    }
}
