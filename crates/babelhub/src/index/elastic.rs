use anyhow::{Context, Result};
use async_trait::async_trait;
use lexis::enrichment::EnrichmentRecord;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::{IndexError, SearchIndex};

/// Configuration for the index client
#[derive(Debug, Clone)]
pub struct IndexConfig {
  /// Base URL of the index server (e.g. "http://localhost:9200")
  pub base_url: String,
  /// Collection (index) name holding the enriched records
  pub collection: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for IndexConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:9200".to_string(),
      collection: "repos".to_string(),
      timeout_secs: 30,
    }
  }
}

/// Elasticsearch-style HTTP document index.
pub struct ElasticIndex {
  client: Client,
  config: IndexConfig,
}

impl ElasticIndex {
  pub fn new(config: IndexConfig) -> Result<Self> {
    Url::parse(&config.base_url)
      .with_context(|| format!("invalid index base URL '{}'", config.base_url))?;

    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .context("failed to build HTTP client for the index")?;

    Ok(Self { client, config })
  }

  fn collection_url(&self) -> String {
    format!("{}/{}", self.config.base_url.trim_end_matches('/'), self.config.collection)
  }

  fn doc_url(&self, id: u64) -> String {
    format!("{}/_doc/{id}", self.collection_url())
  }
}

#[async_trait]
impl SearchIndex for ElasticIndex {
  async fn ensure_collection(&self) -> Result<()> {
    let response = self
      .client
      .put(self.collection_url())
      .send()
      .await
      .context("collection create request failed")?;

    if response.status().is_success() {
      return Ok(());
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if body.contains("resource_already_exists_exception") {
      foghorn::info(&format!("collection '{}' already exists", self.config.collection));
      return Ok(());
    }

    Err(IndexError::create_failed(&self.config.collection, format!("HTTP {status}: {body}")).into())
  }

  async fn is_indexed(&self, id: u64) -> bool {
    match self.client.head(self.doc_url(id)).send().await {
      Ok(response) => response.status().is_success(),
      Err(err) => {
        foghorn::info(&format!("lookup for document {id} failed, treating as not indexed: {err}"));
        false
      }
    }
  }

  async fn upsert(&self, id: u64, record: &EnrichmentRecord) -> Result<()> {
    let response = self
      .client
      .put(self.doc_url(id))
      .json(record)
      .send()
      .await
      .with_context(|| format!("upsert request for document {id} failed"))?;

    if response.status().is_success() {
      return Ok(());
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(
      IndexError::upsert_failed(&self.config.collection, id, format!("HTTP {status}: {body}"))
        .into(),
    )
  }
}
