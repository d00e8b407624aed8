//! Client Configuration
//!
//! API endpoint, storage keys and UI tunables.

use std::time::Duration;

/// Hosted mock API used when no override is compiled in
pub const DEFAULT_API_URL: &str = "https://7de0b60aea9aed62.mokky.dev";

/// Per-request timeout (native targets only, fetch has no client timeout)
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const PAGE_SIZE_CHOICES: &[u32] = &[5, 10, 20, 50];

/// Delay before a typed search query is sent
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

// ========================
// Storage Keys
// ========================

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "todopy_user";
pub const TASKS_KEY: &str = "todopy_tasks";
pub const TASKS_STATE_KEY: &str = "todopy_tasks_state";
pub const NOTES_KEY: &str = "todopy_sticky_notes";

/// Colors offered for new sticky notes
pub const NOTE_COLORS: &[&str] = &["yellow", "blue", "pink", "orange", "green"];

/// Connection settings for the REST API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(option_env!("TODOPY_API_URL").unwrap_or(DEFAULT_API_URL))
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Absolute URL for an API path such as `/tasks/3`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
