use anyhow::Result;

use crate::cursor::{CursorStore, FileCursorStore};

pub fn handle(reset: Option<u64>) -> Result<()> {
  let store = FileCursorStore::new()?;

  match reset {
    Some(id) => {
      store.reset(id)?;
      foghorn::success(&format!("cursor set to {id}"));
    }
    None => match store.get()? {
      Some(id) => println!("{id}"),
      None => foghorn::info("no cursor stored yet"),
    },
  }
  Ok(())
}
