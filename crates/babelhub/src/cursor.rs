use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Last successfully indexed repository id.
///
/// Read once at run start, advanced once per successful upsert. Last-write
/// is not good enough here: workers finish out of id order, so the store
/// must be monotonic or a slow, low id would silently rewind resumption.
pub trait CursorStore: Send + Sync {
  fn get(&self) -> Result<Option<u64>>;

  /// Move the cursor forward to `id`. Advancing to a lower id than the
  /// stored one is a no-op. Returns the stored value after the call.
  fn advance(&self, id: u64) -> Result<u64>;
}

#[derive(Debug, Serialize, Deserialize)]
struct CursorState {
  last_repository_id: u64,
  updated_at: DateTime<Utc>,
}

/// JSON file under the platform data directory.
///
/// `BABELHUB_DATA_ROOT` overrides the location, which also keeps tests out
/// of the real data dir.
pub struct FileCursorStore {
  path: PathBuf,
  lock: Mutex<()>,
}

impl FileCursorStore {
  pub fn new() -> Result<Self> {
    let root = match std::env::var("BABELHUB_DATA_ROOT") {
      Ok(dir) => PathBuf::from(dir),
      Err(_) => dirs::data_dir().context("no platform data directory available")?.join("babelhub"),
    };
    Self::at(root.join("cursor.json"))
  }

  pub fn at(path: PathBuf) -> Result<Self> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)
        .with_context(|| format!("failed to create cursor directory {}", parent.display()))?;
    }
    Ok(Self { path, lock: Mutex::new(()) })
  }

  /// Overwrite the cursor unconditionally. Operator surface only; the
  /// pipeline goes through [`CursorStore::advance`].
  pub fn reset(&self, id: u64) -> Result<()> {
    let _guard = self.lock.lock().expect("cursor lock poisoned");
    self.write(id)
  }

  fn read(&self) -> Result<Option<u64>> {
    if !self.path.exists() {
      return Ok(None);
    }
    let raw = fs::read_to_string(&self.path)
      .with_context(|| format!("failed to read cursor file {}", self.path.display()))?;
    let state: CursorState = serde_json::from_str(&raw)
      .with_context(|| format!("cursor file {} is not valid JSON", self.path.display()))?;
    Ok(Some(state.last_repository_id))
  }

  fn write(&self, id: u64) -> Result<()> {
    let state = CursorState { last_repository_id: id, updated_at: Utc::now() };
    fs::write(&self.path, serde_json::to_string_pretty(&state)?)
      .with_context(|| format!("failed to write cursor file {}", self.path.display()))
  }
}

impl CursorStore for FileCursorStore {
  fn get(&self) -> Result<Option<u64>> {
    let _guard = self.lock.lock().expect("cursor lock poisoned");
    self.read()
  }

  fn advance(&self, id: u64) -> Result<u64> {
    let _guard = self.lock.lock().expect("cursor lock poisoned");
    match self.read()? {
      Some(current) if current >= id => Ok(current),
      _ => {
        self.write(id)?;
        Ok(id)
      }
    }
  }
}
