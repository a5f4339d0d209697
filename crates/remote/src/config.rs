//! Remote endpoint configuration.

/// Configuration for [`crate::HttpTrackerApi`], loaded from environment
/// variables.
///
/// All fields have defaults suitable for a local backend; override via
/// environment variables in real deployments.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base API URL, no trailing slash (default:
    /// `http://localhost:3001/api`).
    pub base_url: String,
    /// Bearer token for the `Authorization` header. `None` sends
    /// unauthenticated requests, which the server answers with 401.
    pub token: Option<String>,
    /// Per-request timeout in seconds (default: `30`).
    pub timeout_secs: u64,
}

impl RemoteConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                     |
    /// |-------------------------|-----------------------------|
    /// | `FLOWDECK_API_URL`      | `http://localhost:3001/api` |
    /// | `FLOWDECK_TOKEN`        | (unset)                     |
    /// | `FLOWDECK_TIMEOUT_SECS` | `30`                        |
    pub fn from_env() -> Self {
        let base_url = std::env::var("FLOWDECK_API_URL")
            .unwrap_or_else(|_| "http://localhost:3001/api".into());

        let token = std::env::var("FLOWDECK_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let timeout_secs: u64 = std::env::var("FLOWDECK_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("FLOWDECK_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            token,
            timeout_secs,
        }
    }

    /// Configuration pointing at `base_url` with no token and default
    /// timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_trailing_slash(base_url.into()),
            token: None,
            timeout_secs: 30,
        }
    }

    /// Attach a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
