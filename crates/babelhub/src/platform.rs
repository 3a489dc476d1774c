use anyhow::Result;
use async_trait::async_trait;
use lexis::enrichment::RepoSnapshot;
use serde::{Deserialize, Serialize};

pub mod github;

/// Minimal entry from the platform's repository listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSummary {
  pub id: u64,
  pub full_name: String,
}

/// A code-hosting platform: enumeration plus point-in-time snapshots.
///
/// Failures here propagate to the caller untouched. Whether and how to retry
/// is the dispatcher's business, not the platform client's, and definitely
/// not the scoring core's.
#[async_trait]
pub trait Hosting: Send + Sync {
  /// Repositories with id greater than `since`, ascending by id.
  async fn list_repositories(&self, since: u64) -> Result<Vec<RepoSummary>>;

  /// Full snapshot of one repository, README decoded, owner profile resolved.
  async fn fetch_snapshot(&self, full_name: &str) -> Result<RepoSnapshot>;
}
