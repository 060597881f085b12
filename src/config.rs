//! 客户端配置：默认值与环境变量覆盖。
//!
//! Client configuration.
//!
//! Defaults can be overridden through the environment; builder setters take
//! precedence over both.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `ENREACH_DISCOVERY_URL` | `https://discover.enreachvoice.com` |
//! | `ENREACH_API_ENDPOINT` | unset (discovery is used) |
//! | `ENREACH_HTTP_TIMEOUT_SECS` | `30` |
//! | `ENREACH_TRANSCRIPT_MAX_RETRIES` | `10` |
//! | `ENREACH_TRANSCRIPT_POLL_DELAY_SECS` | `10` |

use std::env;
use std::time::Duration;

pub const DEFAULT_DISCOVERY_URL: &str = "https://discover.enreachvoice.com";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TRANSCRIPT_MAX_RETRIES: u32 = 10;
pub const DEFAULT_TRANSCRIPT_POLL_DELAY_SECS: u64 = 10;

/// How long to keep polling a transcript that reports `Pending`.
///
/// `max_retries` counts re-fetches after the initial request; `delay` is slept
/// before each of them. The defaults reflect typical transcript processing
/// latency on the service side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl PollPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn from_env() -> Self {
        let max_retries = env_parse::<u32>("ENREACH_TRANSCRIPT_MAX_RETRIES")
            .unwrap_or(DEFAULT_TRANSCRIPT_MAX_RETRIES);
        let delay_secs = env_parse::<u64>("ENREACH_TRANSCRIPT_POLL_DELAY_SECS")
            .unwrap_or(DEFAULT_TRANSCRIPT_POLL_DELAY_SECS);
        Self {
            max_retries,
            delay: Duration::from_secs(delay_secs),
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_TRANSCRIPT_MAX_RETRIES,
            delay: Duration::from_secs(DEFAULT_TRANSCRIPT_POLL_DELAY_SECS),
        }
    }
}

/// Connection-level settings shared by discovery, authentication and API calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub discovery_url: String,
    /// Skips discovery when set.
    pub api_endpoint: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
    pub transcript_poll: PollPolicy,
}

impl ClientConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let discovery_url = env::var("ENREACH_DISCOVERY_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DISCOVERY_URL.to_string());
        let api_endpoint = env::var("ENREACH_API_ENDPOINT")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let timeout_secs =
            env_parse::<u64>("ENREACH_HTTP_TIMEOUT_SECS").unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        Self {
            discovery_url,
            api_endpoint,
            timeout: Duration::from_secs(timeout_secs),
            user_agent: default_user_agent(),
            transcript_poll: PollPolicy::from_env(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            discovery_url: DEFAULT_DISCOVERY_URL.to_string(),
            api_endpoint: None,
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: default_user_agent(),
            transcript_poll: PollPolicy::default(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!("enreachvoice-rust/{}", env!("CARGO_PKG_VERSION"))
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
}
