//! Common test helper functions shared across test modules.
use secrecy::SecretString;

use crate::{
    config::{Credentials, Options},
    forge::config::RemoteConfig,
};

/// Creates test Options as resolved for
/// `-n left-pad -v 1.3.0 -r web -o acme -b main -u bot -p app-pass`
/// at 2024-03-09T14:05:07Z.
pub fn create_test_options() -> Options {
    Options {
        package: "left-pad".to_string(),
        version: "1.3.0".to_string(),
        repo_name: "web".to_string(),
        repo_user_or_org: "acme".to_string(),
        repo_branch: "main".to_string(),
        pr_name: "Updated web to 1.3.0".to_string(),
        pr_branch_name: "depbump-20240309T140507.000Z-upd-left-pad-to-1.3.0"
            .to_string(),
        pr_commit_message: "Updated web to 1.3.0".to_string(),
        credentials: Credentials {
            username: "bot".to_string(),
            password: SecretString::from("app-pass".to_string()),
        },
        api_url: "https://api.bitbucket.org/2.0".to_string(),
        dry_run: false,
    }
}

/// Creates a test RemoteConfig matching [`create_test_options`].
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig::from(&create_test_options())
}
