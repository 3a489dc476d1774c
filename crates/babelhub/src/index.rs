use anyhow::Result;
use async_trait::async_trait;
use lexis::enrichment::EnrichmentRecord;
use thiserror::Error;

pub mod elastic;

#[derive(Error, Debug)]
pub enum IndexError {
  #[error("failed to create collection '{collection}': {message}")]
  CreateFailed { collection: String, message: String },

  #[error("failed to upsert document {id} into '{collection}': {message}")]
  UpsertFailed { collection: String, id: u64, message: String },
}

impl IndexError {
  pub fn create_failed(collection: impl Into<String>, message: impl Into<String>) -> Self {
    Self::CreateFailed { collection: collection.into(), message: message.into() }
  }

  pub fn upsert_failed(collection: impl Into<String>, id: u64, message: impl Into<String>) -> Self {
    Self::UpsertFailed { collection: collection.into(), id, message: message.into() }
  }
}

/// A searchable document store keyed by repository id.
#[async_trait]
pub trait SearchIndex: Send + Sync {
  /// Create the collection if it does not exist. Creating an existing
  /// collection is a no-op, not an error.
  async fn ensure_collection(&self) -> Result<()>;

  /// Whether a document with this id is already present. A failed lookup
  /// (missing document, transport error) means "not indexed" - the queue has
  /// at-least-once delivery, and this check is the de-duplication.
  async fn is_indexed(&self, id: u64) -> bool;

  /// Insert or overwrite the document for this id. No merge semantics.
  async fn upsert(&self, id: u64, record: &EnrichmentRecord) -> Result<()>;
}
