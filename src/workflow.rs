//! The dependency update run: fetch, patch, branch, commit, pull request.
//!
//! Steps execute strictly in order and the first failure ends the run.
//! Nothing is rolled back: a branch or commit created before the failing
//! step stays on the remote and is reported in the logs.
use log::*;
use std::fmt;

use crate::{
    Result,
    config::Options,
    error::DepBumpError,
    forge::{
        manager::ForgeManager,
        request::{Branch, Commit, CreateBranchRequest, CreatePrRequest, PullRequest},
    },
    manifest::{self, DependencyKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Resolve,
    Fetch,
    Patch,
    CreateBranch,
    Upload,
    OpenMergeRequest,
    Done,
    Failed,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Resolve => "resolve options",
            Step::Fetch => "fetch manifest",
            Step::Patch => "patch manifest",
            Step::CreateBranch => "create branch",
            Step::Upload => "upload manifest",
            Step::OpenMergeRequest => "open pull request",
            Step::Done => "done",
            Step::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Artifacts produced by a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub kind: DependencyKind,
    pub previous_version: String,
    pub branch: Branch,
    pub commit: Commit,
    pub pull_request: PullRequest,
}

/// Tracks where a run is, so a failure can name the step and whatever
/// the completed steps left on the remote. A run starts in `Resolve`,
/// which completes once `execute` is handed resolved options.
#[derive(Debug)]
pub struct Progress {
    current: Step,
    completed: Vec<Step>,
    failed_at: Option<Step>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            current: Step::Resolve,
            completed: vec![],
            failed_at: None,
        }
    }
}

impl Progress {
    pub fn current(&self) -> Step {
        self.current
    }

    pub fn completed(&self) -> &[Step] {
        &self.completed
    }

    /// The step that was running when the run entered `Failed`.
    pub fn failed_at(&self) -> Option<Step> {
        self.failed_at
    }

    fn advance(&mut self, next: Step) {
        self.completed.push(self.current);
        self.current = next;
        if next != Step::Done {
            info!("{next}");
        }
    }

    fn fail(&mut self, options: &Options, err: &DepBumpError) {
        error!("{} failed: {}", self.current, err.kind());
        self.failed_at = Some(self.current);
        self.current = Step::Failed;

        if options.dry_run {
            return;
        }

        if self.completed.contains(&Step::CreateBranch) {
            warn!(
                "branch {} was created in {}/{} and has not been removed",
                options.pr_branch_name,
                options.repo_user_or_org,
                options.repo_name
            );
        }

        if self.completed.contains(&Step::Upload) {
            warn!(
                "commit \"{}\" was pushed to {} and has not been reverted",
                options.pr_commit_message, options.pr_branch_name
            );
        }
    }
}

/// Run every remote step for already resolved options.
pub async fn execute(options: &Options, forge: &ForgeManager) -> Result<Outcome> {
    let mut progress = Progress::default();

    let result = run_steps(options, forge, &mut progress).await;

    if let Err(err) = &result {
        progress.fail(options, err);
    }
    debug!("run ended in state: {}", progress.current());

    result
}

async fn run_steps(
    options: &Options,
    forge: &ForgeManager,
    progress: &mut Progress,
) -> Result<Outcome> {
    progress.advance(Step::Fetch);
    let manifest = forge.fetch_manifest(&options.repo_branch).await?;

    progress.advance(Step::Patch);
    let patched = manifest::patch(&manifest, &options.package, &options.version)?;
    let previous_version = match &patched.previous {
        serde_json::Value::String(v) => v.clone(),
        other => other.to_string(),
    };
    info!(
        "{}: {} {} -> {}",
        patched.kind, options.package, previous_version, options.version
    );

    progress.advance(Step::CreateBranch);
    let branch = forge
        .create_branch(CreateBranchRequest {
            branch: options.pr_branch_name.clone(),
            source_ref: options.repo_branch.clone(),
        })
        .await?;
    info!("created branch: {}", branch.name);

    progress.advance(Step::Upload);
    let commit = forge
        .upload_manifest(&branch.name, &patched.manifest, &options.pr_commit_message)
        .await?;
    info!("created commit: {}", commit.sha.as_deref().unwrap_or("unknown"));

    progress.advance(Step::OpenMergeRequest);
    let pull_request = forge
        .create_pr(CreatePrRequest {
            head_branch: branch.name.clone(),
            base_branch: options.repo_branch.clone(),
            title: options.pr_name.clone(),
        })
        .await?;
    info!("opened pull request #{}: {}", pull_request.number, pull_request.link);

    progress.advance(Step::Done);

    Ok(Outcome {
        kind: patched.kind,
        previous_version,
        branch,
        commit,
        pull_request,
    })
}
