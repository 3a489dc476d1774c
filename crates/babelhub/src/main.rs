use anyhow::Result;
use clap::{Parser, Subcommand};

use babelhub::commands;
use babelhub::index::elastic::IndexConfig;
use babelhub::pipeline::RunOptions;

#[derive(Parser)]
#[command(name = "babelhub")]
#[command(about = "Enriches public repositories with human-language profiles and indexes them")]
struct Cli {
  /// GitHub personal access token (or use GITHUB_TOKEN env var)
  #[arg(long, env = "GITHUB_TOKEN")]
  github_token: Option<String>,

  /// Base URL of the search index
  #[arg(long, env = "BABELHUB_INDEX_URL", default_value = "http://localhost:9200")]
  index_url: String,

  /// Collection (index) name for the enriched records
  #[arg(long, default_value = "repos")]
  collection: String,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Enumerate, enrich, and index repositories from the stored cursor
  Run {
    /// Start after this repository id instead of the stored cursor
    #[arg(long)]
    since: Option<u64>,
    /// Stop after this many repositories
    #[arg(long, default_value_t = 20)]
    limit: usize,
    /// Concurrent enrichment tasks
    #[arg(long, default_value_t = 4)]
    concurrency: usize,
  },
  /// Enrich a single repository and print the record as JSON
  Enrich {
    /// Repository in "owner/repo" format
    repository: String,
  },
  /// Show or set the resumption cursor
  Cursor {
    /// Overwrite the stored cursor with this id
    #[arg(long)]
    reset: Option<u64>,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Commands::Run { since, limit, concurrency } => {
      let index_config = IndexConfig {
        base_url: cli.index_url,
        collection: cli.collection,
        ..IndexConfig::default()
      };
      let options = RunOptions { since, limit, concurrency };
      commands::run::handle(cli.github_token, index_config, options).await
    }
    Commands::Enrich { repository } => commands::enrich::handle(repository, cli.github_token).await,
    Commands::Cursor { reset } => commands::cursor::handle(reset),
  }
}
