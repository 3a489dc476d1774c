use anyhow::Result;
use futures::stream::{self, StreamExt};
use lexis::detector::Detect;
use lexis::enrichment::enrich;
use std::sync::Arc;

use crate::cursor::CursorStore;
use crate::index::SearchIndex;
use crate::platform::{Hosting, RepoSummary};

/// Collaborators the pipeline runs against, all behind traits so tests can
/// swap any of them out.
#[derive(Clone)]
pub struct PipelineDeps {
  pub hosting: Arc<dyn Hosting>,
  pub index: Arc<dyn SearchIndex>,
  pub cursor: Arc<dyn CursorStore>,
  pub detector: Arc<dyn Detect>,
}

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
  /// Start after this id instead of the stored cursor.
  pub since: Option<u64>,
  /// Stop after this many enumerated repositories.
  pub limit: usize,
  /// Concurrent enrichment tasks.
  pub concurrency: usize,
}

impl Default for RunOptions {
  fn default() -> Self {
    Self { since: None, limit: 20, concurrency: 4 }
  }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
  pub enumerated: usize,
  pub indexed: usize,
  pub skipped: usize,
  pub failed: usize,
}

enum Outcome {
  Indexed,
  Skipped,
}

/// One enumeration pass: list repositories after the cursor, enrich and
/// upsert everything the index does not already hold, advance the cursor per
/// success. Per-repository failures are counted, logged, and do not stop the
/// run; only enumeration and collection setup are fatal.
pub async fn run_pipeline(deps: &PipelineDeps, options: &RunOptions) -> Result<RunReport> {
  let since = match options.since {
    Some(id) => id,
    None => deps.cursor.get()?.unwrap_or(0),
  };
  foghorn::event_info(&format!("enumerating repositories after id {since}"));

  deps.index.ensure_collection().await?;

  let mut summaries = deps.hosting.list_repositories(since).await?;
  summaries.truncate(options.limit);

  let mut report = RunReport { enumerated: summaries.len(), ..Default::default() };

  let outcomes: Vec<(String, Result<Outcome>)> = stream::iter(summaries)
    .map(|summary| {
      let deps = deps.clone();
      async move {
        let outcome = process_repository(&deps, &summary).await;
        (summary.full_name, outcome)
      }
    })
    .buffer_unordered(options.concurrency.max(1))
    .collect()
    .await;

  for (full_name, outcome) in outcomes {
    match outcome {
      Ok(Outcome::Indexed) => report.indexed += 1,
      Ok(Outcome::Skipped) => report.skipped += 1,
      Err(err) => {
        report.failed += 1;
        foghorn::event_error(&format!("{full_name}: {err:#}"));
      }
    }
  }

  foghorn::event_info(&format!(
    "run finished: {} enumerated, {} indexed, {} skipped, {} failed",
    report.enumerated, report.indexed, report.skipped, report.failed
  ));
  Ok(report)
}

async fn process_repository(deps: &PipelineDeps, summary: &RepoSummary) -> Result<Outcome> {
  if deps.index.is_indexed(summary.id).await {
    foghorn::debug(&format!("{} already indexed, skipping", summary.full_name));
    return Ok(Outcome::Skipped);
  }

  foghorn::event_info(&format!("indexing {}", summary.full_name));
  let snapshot = deps.hosting.fetch_snapshot(&summary.full_name).await?;
  let record = enrich(deps.detector.as_ref(), &snapshot);
  deps.index.upsert(record.id, &record).await?;
  deps.cursor.advance(record.id)?;

  Ok(Outcome::Indexed)
}
