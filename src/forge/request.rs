/// Request to read a file at a branch.
#[derive(Debug, Clone, PartialEq)]
pub struct GetFileContentRequest {
    pub branch: String,
    /// Path relative to the repository root
    pub path: String,
}

/// Request to create a branch from an existing ref.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBranchRequest {
    /// Name of the new branch
    pub branch: String,
    /// Commit hash or branch name the new branch points at
    pub source_ref: String,
}

/// A branch as reported by the forge.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub name: String,
    /// Head commit, when the forge returns it
    pub target_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileChange {
    /// Relative path to the file starting from repo root
    pub path: String,
    /// Full replacement contents of the file
    pub content: String,
}

/// Request to commit file contents onto an existing branch.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCommitRequest {
    pub target_branch: String,
    pub message: String,
    pub file_changes: Vec<FileChange>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    /// Commit hash, when the forge returns it
    pub sha: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to create a new pull request.
pub struct CreatePrRequest {
    pub head_branch: String,
    pub base_branch: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
/// Pull request information.
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub link: String,
}
