use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct BranchTarget {
    pub hash: String,
}

#[derive(Debug, Serialize)]
pub struct CreateBranch {
    pub name: String,
    pub target: BranchTarget,
}

#[derive(Debug, Deserialize)]
pub struct BitbucketBranch {
    pub name: String,
    pub target: Option<BranchTarget>,
}

#[derive(Debug, Serialize)]
pub struct BranchName {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PullRequestEndpoint {
    pub branch: BranchName,
}

#[derive(Debug, Serialize)]
pub struct CreatePullRequest {
    pub title: String,
    pub source: PullRequestEndpoint,
    pub destination: PullRequestEndpoint,
}

#[derive(Debug, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PullRequestLinks {
    pub html: Option<Link>,
}

#[derive(Debug, Deserialize)]
pub struct BitbucketPullRequest {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub links: PullRequestLinks,
}
