//! Configuration for forge connections.
use secrecy::SecretString;

use crate::config::Options;

/// Bitbucket Cloud REST API base url.
pub const DEFAULT_API_URL: &str = "https://api.bitbucket.org/2.0";
/// Default branch name prefix for dependency update branches.
pub const DEFAULT_BRANCH_PREFIX: &str = "depbump";

/// Remote repository connection configuration for authenticating and
/// interacting with the forge.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// REST API base url, without trailing slash.
    pub api_url: String,
    /// Repository owner (user or workspace).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Basic auth username.
    pub username: String,
    /// Basic auth application password.
    pub password: SecretString,
    /// Log mutating requests instead of sending them.
    pub dry_run: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            username: "".to_string(),
            password: SecretString::from("".to_string()),
            dry_run: false,
        }
    }
}

impl From<&Options> for RemoteConfig {
    fn from(options: &Options) -> Self {
        Self {
            api_url: options.api_url.trim_end_matches('/').to_string(),
            owner: options.repo_user_or_org.clone(),
            repo: options.repo_name.clone(),
            username: options.credentials.username.clone(),
            password: options.credentials.password.clone(),
            dry_run: options.dry_run,
        }
    }
}
