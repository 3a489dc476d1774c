use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde::Deserialize;

use super::{Hosting, RepoSummary};
use lexis::enrichment::{OwnerSnapshot, RepoSnapshot};

pub struct GitHubHosting {
  client: Octocrab,
}

#[derive(Debug, Deserialize)]
struct ReadmePayload {
  content: String,
}

#[derive(Debug, Deserialize)]
struct OwnerRef {
  login: String,
}

#[derive(Debug, Deserialize)]
struct RepoPayload {
  id: u64,
  full_name: String,
  description: Option<String>,
  language: Option<String>,
  owner: OwnerRef,
  stargazers_count: Option<u64>,
  watchers_count: Option<u64>,
  forks_count: Option<u64>,
  created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
  login: String,
  name: Option<String>,
  bio: Option<String>,
  company: Option<String>,
  location: Option<String>,
  public_repos: Option<u64>,
  followers: Option<u64>,
  following: Option<u64>,
}

impl GitHubHosting {
  /// Create a client. Anonymous access works but rate-limits hard, so a
  /// token is strongly recommended for anything beyond a smoke test.
  pub fn new(token: Option<String>) -> Result<Self> {
    let client = match token {
      Some(token) => Octocrab::builder().personal_token(token).build()?,
      None => Octocrab::builder().build()?,
    };
    Ok(Self { client })
  }

  /// Wrap an existing Octocrab instance
  pub fn from_client(client: Octocrab) -> Self {
    Self { client }
  }

  async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<Option<String>> {
    let route = format!("/repos/{owner}/{repo}/readme");
    let payload: ReadmePayload = match self.client.get(&route, None::<&()>).await {
      Ok(payload) => payload,
      Err(octocrab::Error::GitHub { source, .. }) if source.status_code.as_u16() == 404 => {
        return Ok(None);
      }
      Err(err) => return Err(err.into()),
    };

    // The contents API wraps base64 at 60 columns; strip the line breaks
    // before decoding
    let compact: String = payload.content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes =
      STANDARD.decode(compact.as_bytes()).context("README content was not valid base64")?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
  }

  async fn fetch_owner(&self, login: &str) -> Result<OwnerSnapshot> {
    let route = format!("/users/{login}");
    let payload: UserPayload = self
      .client
      .get(&route, None::<&()>)
      .await
      .with_context(|| format!("failed to fetch owner profile for {login}"))?;

    Ok(OwnerSnapshot {
      login: payload.login,
      name: payload.name,
      bio: payload.bio,
      company: payload.company,
      location: payload.location,
      public_repos: payload.public_repos,
      // The users API does not report contribution counts
      contributions: None,
      followers: payload.followers,
      following: payload.following,
    })
  }
}

#[async_trait]
impl Hosting for GitHubHosting {
  async fn list_repositories(&self, since: u64) -> Result<Vec<RepoSummary>> {
    let summaries: Vec<RepoSummary> = self
      .client
      .get("/repositories", Some(&[("since", since.to_string())]))
      .await
      .context("failed to enumerate public repositories")?;
    Ok(summaries)
  }

  async fn fetch_snapshot(&self, full_name: &str) -> Result<RepoSnapshot> {
    let (owner, repo) = full_name
      .split_once('/')
      .ok_or_else(|| anyhow!("expected owner/repo, got '{full_name}'"))?;

    let route = format!("/repos/{owner}/{repo}");
    let payload: RepoPayload = self
      .client
      .get(&route, None::<&()>)
      .await
      .with_context(|| format!("failed to fetch repository {full_name}"))?;

    let readme = self.fetch_readme(owner, repo).await?;
    let owner_snapshot = self.fetch_owner(&payload.owner.login).await?;

    Ok(RepoSnapshot {
      id: payload.id,
      full_name: payload.full_name,
      description: payload.description,
      readme,
      language: payload.language,
      owner: owner_snapshot,
      stargazers_count: payload.stargazers_count.unwrap_or(0),
      watchers_count: payload.watchers_count.unwrap_or(0),
      forks_count: payload.forks_count.unwrap_or(0),
      created_at: payload
        .created_at
        .ok_or_else(|| anyhow!("repository payload for {full_name} is missing created_at"))?,
    })
  }
}
