use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::profile::HeaderProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetcherConfig {
    /// The maximum number of requests in flight
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Upper bound for a single request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Whole-batch attempts, each one using the next profile
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Header profiles fallback chain
    #[serde(default = "default_profiles")]
    pub profiles: Vec<HeaderProfile>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            profiles: default_profiles(),
        }
    }
}

impl FetcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_concurrency() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> usize {
    2
}

fn default_profiles() -> Vec<HeaderProfile> {
    HeaderProfile::fallback_chain()
}
