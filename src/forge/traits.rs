//! Traits related to remote git forges
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    forge::{
        config::RemoteConfig,
        request::{
            Branch, Commit, CreateBranchRequest, CreateCommitRequest,
            CreatePrRequest, GetFileContentRequest, PullRequest,
        },
    },
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn remote_config(&self) -> RemoteConfig;
    async fn get_file_content(&self, req: GetFileContentRequest)
    -> Result<String>;
    async fn create_branch(&self, req: CreateBranchRequest) -> Result<Branch>;
    async fn create_commit(&self, req: CreateCommitRequest) -> Result<Commit>;
    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest>;
}
