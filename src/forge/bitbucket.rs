//! Implements the Forge trait for Bitbucket Cloud
use async_trait::async_trait;
use log::*;
use reqwest::{
    Client, RequestBuilder, Response, Url,
    header::LOCATION,
    multipart::{Form, Part},
};
use secrecy::ExposeSecret;
use serde_json::Value;

use crate::{
    Result,
    error::DepBumpError,
    forge::{
        bitbucket::types::{
            BitbucketBranch, BitbucketPullRequest, BranchName, BranchTarget,
            CreateBranch, CreatePullRequest, PullRequestEndpoint,
        },
        config::RemoteConfig,
        request::{
            Branch, Commit, CreateBranchRequest, CreateCommitRequest,
            CreatePrRequest, GetFileContentRequest, PullRequest,
        },
        traits::Forge,
    },
};

mod types;

/// Bitbucket forge implementation using reqwest with HTTP Basic
/// authentication (username + application password).
pub struct Bitbucket {
    config: RemoteConfig,
    base_url: Url,
    client: Client,
}

impl Bitbucket {
    /// Create a client scoped to the configured repository.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;

        let mut base_url = Url::parse(&config.api_url)?;
        extend_path(
            &mut base_url,
            ["repositories", config.owner.as_str(), config.repo.as_str()],
        )?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Repository url with `segments` appended, each percent-encoded.
    fn endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url> {
        let mut url = self.base_url.clone();
        extend_path(&mut url, segments)?;
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(
            &self.config.username,
            Some(self.config.password.expose_secret()),
        )
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = self.authorized(builder).build()?;
        debug!("{} {}", request.method(), request.url());
        let response = self.client.execute(request).await?;
        error_for_status(response).await
    }
}

fn extend_path<'a>(
    url: &mut Url,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    let api_url = url.to_string();
    url.path_segments_mut()
        .map_err(|_| {
            DepBumpError::configuration(format!("invalid api url: {api_url}"))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

/// Turn a non-success response into a RemoteError. Bitbucket describes
/// failures in the body, so its message is prefixed to reqwest's status
/// description.
async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let transport = match response.error_for_status_ref() {
        Err(err) => err.to_string(),
        Ok(_) => format!("unexpected HTTP status {status}"),
    };

    let body = response.text().await.unwrap_or_default();

    Err(DepBumpError::remote(remote_error_message(&body, &transport)))
}

fn remote_error_message(body: &str, transport: &str) -> String {
    let provider = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| provider_message(&v));

    match provider {
        Some(message) => format!("{message}: {transport}"),
        None => transport.to_string(),
    }
}

// {"type": "error", "error": {"message": "..."}} is the Bitbucket shape,
// the fallbacks cover proxies and compatible servers
fn provider_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .or_else(|| body.get("error").and_then(Value::as_str))
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// `Location: .../commit/<hash>` is returned for created commits.
fn commit_sha_from_location(response: &Response) -> Option<String> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl Forge for Bitbucket {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn get_file_content(
        &self,
        req: GetFileContentRequest,
    ) -> Result<String> {
        // branch names may contain '/', the other characters are escaped
        let file_url = self.endpoint(
            std::iter::once("src")
                .chain(req.branch.split('/'))
                .chain(std::iter::once(req.path.as_str())),
        )?;
        let response = self.send(self.client.get(file_url)).await?;
        let content = response.text().await?;
        Ok(content)
    }

    async fn create_branch(&self, req: CreateBranchRequest) -> Result<Branch> {
        let body = CreateBranch {
            name: req.branch,
            target: BranchTarget {
                hash: req.source_ref,
            },
        };
        let branches_url = self.endpoint(["refs", "branches"])?;
        let response =
            self.send(self.client.post(branches_url).json(&body)).await?;
        let branch: BitbucketBranch = response.json().await?;

        Ok(Branch {
            name: branch.name,
            target_hash: branch.target.map(|t| t.hash),
        })
    }

    async fn create_commit(&self, req: CreateCommitRequest) -> Result<Commit> {
        let mut form = Form::new().text("branch", req.target_branch);

        for change in req.file_changes {
            let part = Part::text(change.content).file_name(change.path.clone());
            form = form.part(change.path, part);
        }

        let form = form.text("message", req.message);

        let src_url = self.endpoint(["src"])?;
        let response =
            self.send(self.client.post(src_url).multipart(form)).await?;

        Ok(Commit {
            sha: commit_sha_from_location(&response),
        })
    }

    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest> {
        let body = CreatePullRequest {
            title: req.title,
            source: PullRequestEndpoint {
                branch: BranchName {
                    name: req.head_branch,
                },
            },
            destination: PullRequestEndpoint {
                branch: BranchName {
                    name: req.base_branch,
                },
            },
        };
        let pulls_url = self.endpoint(["pullrequests"])?;
        let response =
            self.send(self.client.post(pulls_url).json(&body)).await?;
        let pr: BitbucketPullRequest = response.json().await?;

        Ok(PullRequest {
            number: pr.id,
            title: pr.title,
            link: pr.links.html.map(|l| l.href).unwrap_or_default(),
        })
    }
}
