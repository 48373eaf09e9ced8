//! Run options resolved from CLI arguments and the environment.
//!
//! ## Resolution Precedence (highest to lowest)
//!
//! 1. CLI flags
//! 2. Environment variables (including those loaded from `.env`)
//! 3. Derived defaults (PR title, branch name, commit message)
use chrono::{DateTime, Utc};
use log::*;
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{
    cli::Args,
    error::{DepBumpError, Result},
    forge::config::{DEFAULT_API_URL, DEFAULT_BRANCH_PREFIX},
};

/// Every option that can be read from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionName {
    Package,
    Version,
    RepoName,
    RepoUserOrOrg,
    RepoBranch,
    Username,
    Password,
    PrName,
    PrBranchName,
    PrCommitMessage,
    ApiUrl,
}

/// Declared flag / environment variable mapping for an option.
#[derive(Debug)]
pub struct OptionSpec {
    pub name: OptionName,
    /// Long CLI flag
    pub flag: &'static str,
    /// Environment variable consulted when the flag is absent
    pub env_var: &'static str,
    pub required: bool,
}

/// Indexed by `OptionName` discriminant.
pub const OPTION_SPECS: [OptionSpec; 11] = [
    OptionSpec {
        name: OptionName::Package,
        flag: "package",
        env_var: "PACKAGE",
        required: true,
    },
    OptionSpec {
        name: OptionName::Version,
        flag: "version",
        env_var: "VERSION",
        required: true,
    },
    OptionSpec {
        name: OptionName::RepoName,
        flag: "repoName",
        env_var: "REPONAME",
        required: true,
    },
    OptionSpec {
        name: OptionName::RepoUserOrOrg,
        flag: "repoUserOrOrg",
        env_var: "REPOUSERORORG",
        required: true,
    },
    OptionSpec {
        name: OptionName::RepoBranch,
        flag: "repoBranch",
        env_var: "REPOBRANCH",
        required: true,
    },
    OptionSpec {
        name: OptionName::Username,
        flag: "username",
        env_var: "USERNAME",
        required: true,
    },
    OptionSpec {
        name: OptionName::Password,
        flag: "password",
        env_var: "PASSWORD",
        required: true,
    },
    OptionSpec {
        name: OptionName::PrName,
        flag: "prName",
        env_var: "PRNAME",
        required: false,
    },
    OptionSpec {
        name: OptionName::PrBranchName,
        flag: "prBranchName",
        env_var: "PRBRANCHNAME",
        required: false,
    },
    OptionSpec {
        name: OptionName::PrCommitMessage,
        flag: "prCommitMessage",
        env_var: "PRCOMMITMESSAGE",
        required: false,
    },
    OptionSpec {
        name: OptionName::ApiUrl,
        flag: "api-url",
        env_var: "API_URL",
        required: false,
    },
];

impl OptionName {
    pub fn spec(&self) -> &'static OptionSpec {
        &OPTION_SPECS[*self as usize]
    }

    pub fn flag(&self) -> &'static str {
        self.spec().flag
    }

    pub fn env_var(&self) -> &'static str {
        self.spec().env_var
    }

    pub fn is_required(&self) -> bool {
        self.spec().required
    }
}

/// HTTP Basic credentials used for every request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    /// Bitbucket application password
    pub password: SecretString,
}

/// Fully resolved options for a single run.
#[derive(Debug, Clone)]
pub struct Options {
    pub package: String,
    pub version: String,
    pub repo_name: String,
    pub repo_user_or_org: String,
    pub repo_branch: String,
    pub pr_name: String,
    pub pr_branch_name: String,
    pub pr_commit_message: String,
    pub credentials: Credentials,
    pub api_url: String,
    pub dry_run: bool,
}

/// Load `.env` from the working directory into the process environment.
/// Variables already set take precedence; a missing file is not an error.
pub fn load_env_file() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(DepBumpError::configuration(format!(
            "failed to load .env file: {err}"
        ))),
    }
}

/// Resolve options against the process environment.
pub fn resolve(args: &Args) -> Result<Options> {
    resolve_with(args, |name| env::var(name).ok(), Utc::now())
}

/// Resolve options against an arbitrary environment lookup. `now` seeds
/// the default branch name.
pub fn resolve_with<F>(args: &Args, lookup: F, now: DateTime<Utc>) -> Result<Options>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: OptionName, cli: &Option<String>| -> Option<String> {
        non_empty(cli.clone()).or_else(|| {
            let value = non_empty(lookup(name.env_var()));
            if value.is_some() {
                debug!("using {} from environment for --{}", name.env_var(), name.flag());
            }
            value
        })
    };

    let required = |name: OptionName, cli: &Option<String>| -> Result<String> {
        get(name, cli).ok_or_else(|| missing(name))
    };

    let package = required(OptionName::Package, &args.package)?;
    let version = required(OptionName::Version, &args.version)?;
    let repo_name = required(OptionName::RepoName, &args.repo_name)?;
    let repo_user_or_org =
        required(OptionName::RepoUserOrOrg, &args.repo_user_or_org)?;
    let repo_branch = required(OptionName::RepoBranch, &args.repo_branch)?;
    let username = required(OptionName::Username, &args.username)?;
    let password = required(OptionName::Password, &args.password)?;

    if args.validate_version {
        validate_version(&version)?;
    }

    let pr_name = get(OptionName::PrName, &args.pr_name)
        .unwrap_or_else(|| default_pr_name(&repo_name, &version));

    let pr_branch_name = get(OptionName::PrBranchName, &args.pr_branch_name)
        .unwrap_or_else(|| default_branch_name(&package, &version, now));

    let pr_commit_message =
        get(OptionName::PrCommitMessage, &args.pr_commit_message)
            .unwrap_or_else(|| pr_name.clone());

    let api_url = get(OptionName::ApiUrl, &args.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    Ok(Options {
        package,
        version,
        repo_name,
        repo_user_or_org,
        repo_branch,
        pr_name,
        pr_branch_name,
        pr_commit_message,
        credentials: Credentials {
            username,
            password: SecretString::from(password),
        },
        api_url,
        dry_run: args.dry_run,
    })
}

/// Default pull request title, also the default commit message.
pub fn default_pr_name(repo_name: &str, version: &str) -> String {
    format!("Updated {repo_name} to {version}")
}

/// Default name for the branch carrying the change. The millisecond UTC
/// timestamp keeps names unique across runs and sorts chronologically.
pub fn default_branch_name(
    package: &str,
    version: &str,
    now: DateTime<Utc>,
) -> String {
    let timestamp = now.format("%Y%m%dT%H%M%S%.3fZ");
    sanitize_ref_name(&format!(
        "{DEFAULT_BRANCH_PREFIX}-{timestamp}-upd-{package}-to-{version}"
    ))
}

/// Replace characters git refuses in ref names with `-` and drop the
/// component shapes it rejects (empty, leading `.`, trailing `.` or
/// `.lock`). Scoped package names keep their `/`.
fn sanitize_ref_name(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| match c {
            ' ' | '~' | '^' | ':' | '?' | '*' | '[' | '\\' | '@' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();

    while sanitized.contains("..") {
        sanitized = sanitized.replace("..", ".");
    }

    sanitized
        .split('/')
        .map(sanitize_ref_component)
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

fn sanitize_ref_component(component: &str) -> &str {
    let mut c = component.trim_start_matches('.');
    while c.ends_with('.') || c.ends_with(".lock") {
        c = c.trim_end_matches('.').trim_end_matches(".lock");
    }
    c
}

fn validate_version(version: &str) -> Result<()> {
    semver::VersionReq::parse(version).map_err(|e| {
        DepBumpError::configuration(format!(
            "invalid version '{version}': {e}"
        ))
    })?;
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn missing(name: OptionName) -> DepBumpError {
    DepBumpError::configuration(format!(
        "missing required option: {} (--{} or {})",
        name.flag(),
        name.flag(),
        name.env_var()
    ))
}
