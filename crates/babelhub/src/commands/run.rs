use anyhow::Result;
use lexis::detector::LinguaDetector;
use std::sync::Arc;

use crate::cursor::FileCursorStore;
use crate::index::elastic::{ElasticIndex, IndexConfig};
use crate::pipeline::{run_pipeline, PipelineDeps, RunOptions};
use crate::platform::github::GitHubHosting;

pub async fn handle(
  github_token: Option<String>,
  index_config: IndexConfig,
  options: RunOptions,
) -> Result<()> {
  // Loading all lingua models takes a moment; do it up front, once
  foghorn::info("warming up the language detector...");
  let detector = LinguaDetector::new();

  let deps = PipelineDeps {
    hosting: Arc::new(GitHubHosting::new(github_token)?),
    index: Arc::new(ElasticIndex::new(index_config)?),
    cursor: Arc::new(FileCursorStore::new()?),
    detector: Arc::new(detector),
  };

  let report = run_pipeline(&deps, &options).await?;

  if report.failed > 0 {
    foghorn::warn(&format!(
      "{} repositories failed and are eligible for a later retry",
      report.failed
    ));
  }
  foghorn::success(&format!(
    "indexed {} of {} enumerated repositories ({} already present)",
    report.indexed, report.enumerated, report.skipped
  ));
  Ok(())
}
