use anyhow::Result;
use lexis::detector::LinguaDetector;
use lexis::enrichment::enrich;

use crate::platform::github::GitHubHosting;
use crate::platform::Hosting;

/// One-shot enrichment: fetch, score, print. The record goes to stdout as
/// JSON so it can be piped straight into other tools; narration stays on
/// stderr.
pub async fn handle(repository: String, github_token: Option<String>) -> Result<()> {
  let hosting = GitHubHosting::new(github_token)?;

  foghorn::info(&format!("fetching snapshot for {repository}..."));
  let snapshot = hosting.fetch_snapshot(&repository).await?;

  foghorn::info("scoring languages...");
  let detector = LinguaDetector::new();
  let record = enrich(&detector, &snapshot);

  println!("{}", serde_json::to_string_pretty(&record)?);
  Ok(())
}
