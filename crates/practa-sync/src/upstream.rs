// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Upstream template source.
//!
//! [`GitHubUpstream`] talks to the GitHub REST API (v3). Tests and other
//! hosts plug in through the [`UpstreamSource`] trait.

use std::time::Duration;

use async_trait::async_trait;
use practa_config::model::TemplateConfig;
use practa_core::error::PractaError;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

/// Read access to the upstream template repository.
#[async_trait]
pub trait UpstreamSource: Send + Sync {
    /// The repository's default branch.
    async fn default_branch(&self) -> Result<String, PractaError>;

    /// SHA of the latest commit on `branch`.
    async fn latest_commit(&self, branch: &str) -> Result<String, PractaError>;

    /// Contents of the template version file at `reference`, if it exists.
    async fn template_version(&self, reference: &str) -> Result<Option<String>, PractaError>;

    /// Gzipped tarball of the tree at `reference`.
    async fn download_tarball(&self, reference: &str) -> Result<Vec<u8>, PractaError>;
}

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct CommitInfo {
    sha: String,
}

/// GitHub REST client for one repository.
#[derive(Debug, Clone)]
pub struct GitHubUpstream {
    client: reqwest::Client,
    api_base_url: String,
    owner: String,
    repo: String,
    version_file: String,
}

impl GitHubUpstream {
    /// Creates a client. `token`, when given, is sent as a bearer credential.
    pub fn new(
        api_base_url: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        version_file: impl Into<String>,
        token: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, PractaError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                PractaError::Config(format!("invalid template owner token: {e}"))
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("practa/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| PractaError::Upstream {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            owner: owner.into(),
            repo: repo.into(),
            version_file: version_file.into(),
        })
    }

    pub fn from_config(config: &TemplateConfig) -> Result<Self, PractaError> {
        Self::new(
            config.api_base_url.clone(),
            config.owner.clone(),
            config.repo.clone(),
            config.version_file.clone(),
            config.owner_token.as_deref().filter(|t| !t.is_empty()),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    fn repo_url(&self, suffix: &str) -> String {
        format!(
            "{}/repos/{}/{}{suffix}",
            self.api_base_url, self.owner, self.repo
        )
    }

    async fn get(
        &self,
        url: &str,
        accept: Option<&'static str>,
    ) -> Result<reqwest::Response, PractaError> {
        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }
        debug!(url, "upstream request");
        request.send().await.map_err(|e| PractaError::Upstream {
            message: format!("request to {url} failed: {e}"),
            source: Some(Box::new(e)),
        })
    }

    async fn ensure_success(
        url: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, PractaError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        match response.text().await {
            Ok(body) => Err(PractaError::upstream(format!(
                "{url} returned {status}: {body}"
            ))),
            Err(e) => Err(PractaError::Upstream {
                message: format!("{url} returned {status}; response body unreadable: {e}"),
                source: Some(Box::new(e)),
            }),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, PractaError> {
        let response = Self::ensure_success(url, self.get(url, None).await?).await?;
        response.json().await.map_err(|e| PractaError::Upstream {
            message: format!("unexpected response from {url}: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl UpstreamSource for GitHubUpstream {
    async fn default_branch(&self) -> Result<String, PractaError> {
        let info: RepoInfo = self.get_json(&self.repo_url("")).await?;
        Ok(info.default_branch)
    }

    async fn latest_commit(&self, branch: &str) -> Result<String, PractaError> {
        let commit: CommitInfo = self
            .get_json(&self.repo_url(&format!("/commits/{branch}")))
            .await?;
        Ok(commit.sha)
    }

    async fn template_version(&self, reference: &str) -> Result<Option<String>, PractaError> {
        let url = self.repo_url(&format!(
            "/contents/{}?ref={reference}",
            self.version_file
        ));
        let response = self.get(&url, Some("application/vnd.github.raw")).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::ensure_success(&url, response).await?;
        let text = response.text().await.map_err(|e| PractaError::Upstream {
            message: format!("failed to read {url}: {e}"),
            source: Some(Box::new(e)),
        })?;
        let text = text.trim();
        Ok((!text.is_empty()).then(|| text.to_string()))
    }

    async fn download_tarball(&self, reference: &str) -> Result<Vec<u8>, PractaError> {
        let url = self.repo_url(&format!("/tarball/{reference}"));
        let response = Self::ensure_success(&url, self.get(&url, None).await?).await?;
        let bytes = response.bytes().await.map_err(|e| PractaError::Upstream {
            message: format!("failed to download {url}: {e}"),
            source: Some(Box::new(e)),
        })?;
        debug!(bytes = bytes.len(), "tarball downloaded");
        Ok(bytes.to_vec())
    }
}
