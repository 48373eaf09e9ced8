//! CLI argument parsing.
use clap::Parser;

/// Makes a PR to update a package version in package.json on Bitbucket.
///
/// Every option except the flags can also be supplied through an
/// environment variable named after the option in upper case (PACKAGE,
/// VERSION, REPONAME, ...). A `.env` file in the working directory is
/// loaded first.
#[derive(Parser, Debug, Default, Clone)]
#[command(disable_version_flag = true)]
pub struct Args {
    #[arg(short = 'n', long = "package")]
    /// Name of the package to update
    pub package: Option<String>,

    #[arg(short = 'v', long = "version")]
    /// Needed version of the package
    pub version: Option<String>,

    #[arg(short = 'r', long = "repoName")]
    /// Name of bitbucket repo to update
    pub repo_name: Option<String>,

    #[arg(short = 'o', long = "repoUserOrOrg")]
    /// Owner of the repo (user or organization)
    pub repo_user_or_org: Option<String>,

    #[arg(short = 'b', long = "repoBranch")]
    /// Target branch of repo to update
    pub repo_branch: Option<String>,

    #[arg(short = 'u', long = "username")]
    /// Auth: user login
    pub username: Option<String>,

    #[arg(short = 'p', long = "password")]
    /// Auth: application password, more info here:
    /// https://bitbucket.org/account/settings/app-passwords/
    pub password: Option<String>,

    #[arg(long = "prName")]
    /// Title of the pull request. Defaults to "Updated {repoName} to {version}"
    pub pr_name: Option<String>,

    #[arg(long = "prBranchName")]
    /// Name of the branch carrying the change. Defaults to a timestamped name
    pub pr_branch_name: Option<String>,

    #[arg(long = "prCommitMessage")]
    /// Commit message. Defaults to the pull request title
    pub pr_commit_message: Option<String>,

    #[arg(long)]
    /// Base url of the Bitbucket compatible REST API
    pub api_url: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Reject versions that are not valid semver requirements
    pub validate_version: bool,

    #[arg(long, default_value_t = false)]
    /// Log the remote changes instead of making them
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    /// Enables debug logs
    pub debug: bool,
}
