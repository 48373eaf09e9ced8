//! Manager that wraps forge implementations
use log::*;

use crate::{
    Result,
    forge::{
        config::RemoteConfig,
        request::{
            Branch, Commit, CreateBranchRequest, CreateCommitRequest,
            CreatePrRequest, FileChange, GetFileContentRequest, PullRequest,
        },
        traits::Forge,
    },
    manifest::{MANIFEST_FILE, Manifest},
};

pub struct ForgeManager {
    forge: Box<dyn Forge>,
    remote_config: RemoteConfig,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>) -> Self {
        let remote_config = forge.remote_config();
        Self {
            forge,
            remote_config,
        }
    }

    pub fn remote_config(&self) -> RemoteConfig {
        self.remote_config.clone()
    }

    /// Read and parse package.json at the tip of `branch`.
    pub async fn fetch_manifest(&self, branch: &str) -> Result<Manifest> {
        debug!(
            "fetching {MANIFEST_FILE} from {}/{} at {branch}",
            self.remote_config.owner, self.remote_config.repo
        );
        let content = self
            .forge
            .get_file_content(GetFileContentRequest {
                branch: branch.to_string(),
                path: MANIFEST_FILE.to_string(),
            })
            .await?;
        Manifest::parse(&content)
    }

    pub async fn create_branch(
        &self,
        req: CreateBranchRequest,
    ) -> Result<Branch> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create branch: req: {:#?}", req);
            return Ok(Branch {
                name: req.branch,
                target_hash: None,
            });
        }
        self.forge.create_branch(req).await
    }

    /// Commit `manifest` as package.json onto `branch`.
    pub async fn upload_manifest(
        &self,
        branch: &str,
        manifest: &Manifest,
        message: &str,
    ) -> Result<Commit> {
        let req = CreateCommitRequest {
            target_branch: branch.to_string(),
            message: message.to_string(),
            file_changes: vec![FileChange {
                path: MANIFEST_FILE.to_string(),
                content: manifest.to_pretty_string()?,
            }],
        };

        if self.remote_config.dry_run {
            warn!("dry_run: would create commit: req: {:#?}", req);
            return Ok(Commit { sha: None });
        }

        self.forge.create_commit(req).await
    }

    pub async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create PR: req: {:#?}", req);
            return Ok(PullRequest {
                number: 0,
                title: req.title,
                link: "".into(),
            });
        }

        self.forge.create_pr(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::DepBumpError, forge::traits::MockForge,
        test_helpers::create_test_remote_config,
    };
    use serde_json::json;

    fn dry_run_forge() -> MockForge {
        let mut mock_forge = MockForge::new();
        mock_forge.expect_remote_config().returning(|| RemoteConfig {
            dry_run: true,
            ..create_test_remote_config()
        });
        mock_forge
    }

    #[tokio::test]
    async fn fetch_manifest_reads_package_json_at_branch() {
        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_remote_config()
            .returning(create_test_remote_config);
        mock_forge
            .expect_get_file_content()
            .with(mockall::predicate::eq(GetFileContentRequest {
                branch: "develop".to_string(),
                path: "package.json".to_string(),
            }))
            .times(1)
            .returning(|_| Ok(r#"{"dependencies":{"react":"16.0.0"}}"#.into()));

        let manager = ForgeManager::new(Box::new(mock_forge));
        let manifest = manager.fetch_manifest("develop").await.unwrap();

        assert_eq!(
            manifest.as_value(),
            &json!({"dependencies": {"react": "16.0.0"}})
        );
    }

    #[tokio::test]
    async fn fetch_manifest_rejects_invalid_json() {
        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_remote_config()
            .returning(create_test_remote_config);
        mock_forge
            .expect_get_file_content()
            .returning(|_| Ok("<html>login</html>".into()));

        let manager = ForgeManager::new(Box::new(mock_forge));
        let err = manager.fetch_manifest("main").await.unwrap_err();

        assert!(matches!(err, DepBumpError::ManifestError(_)));
    }

    #[tokio::test]
    async fn upload_manifest_sends_pretty_package_json() {
        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_remote_config()
            .returning(create_test_remote_config);
        mock_forge
            .expect_create_commit()
            .with(mockall::predicate::eq(CreateCommitRequest {
                target_branch: "bump".into(),
                message: "Updated web to 1.3.0".into(),
                file_changes: vec![FileChange {
                    path: "package.json".into(),
                    content: "{\n  \"dependencies\": {\n    \"left-pad\": \"1.3.0\"\n  }\n}"
                        .into(),
                }],
            }))
            .times(1)
            .returning(|_| {
                Ok(Commit {
                    sha: Some("abc123".into()),
                })
            });

        let manager = ForgeManager::new(Box::new(mock_forge));
        let manifest =
            Manifest::parse(r#"{"dependencies":{"left-pad":"1.3.0"}}"#).unwrap();
        let commit = manager
            .upload_manifest("bump", &manifest, "Updated web to 1.3.0")
            .await
            .unwrap();

        assert_eq!(commit.sha.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn dry_run_prevents_create_branch() {
        let mut mock_forge = dry_run_forge();
        mock_forge.expect_create_branch().never();

        let manager = ForgeManager::new(Box::new(mock_forge));
        let branch = manager
            .create_branch(CreateBranchRequest {
                branch: "bump".into(),
                source_ref: "main".into(),
            })
            .await
            .unwrap();

        assert_eq!(branch.name, "bump");
    }

    #[tokio::test]
    async fn dry_run_prevents_upload() {
        let mut mock_forge = dry_run_forge();
        mock_forge.expect_create_commit().never();

        let manager = ForgeManager::new(Box::new(mock_forge));
        let manifest = Manifest::parse("{}").unwrap();
        let commit = manager
            .upload_manifest("bump", &manifest, "msg")
            .await
            .unwrap();

        assert!(commit.sha.is_none());
    }

    #[tokio::test]
    async fn dry_run_prevents_create_pr() {
        let mut mock_forge = dry_run_forge();
        mock_forge.expect_create_pr().never();

        let manager = ForgeManager::new(Box::new(mock_forge));
        let pr = manager
            .create_pr(CreatePrRequest {
                head_branch: "bump".into(),
                base_branch: "main".into(),
                title: "Updated web to 1.3.0".into(),
            })
            .await
            .unwrap();

        assert_eq!(pr.number, 0);
        assert_eq!(pr.title, "Updated web to 1.3.0");
    }
}
