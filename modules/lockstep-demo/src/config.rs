use std::env;

use lockstep_reducers::DEFAULT_BASE_URL;

/// Demo configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for the post reducer's remote fetches.
    pub posts_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            posts_base_url: env::var("POSTS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }
}
