use babelhub::cursor::{CursorStore, FileCursorStore};
use serial_test::serial;
use std::env;
use tempfile::TempDir;

#[test]
fn fresh_store_has_no_cursor() {
  let temp = TempDir::new().unwrap();
  let store = FileCursorStore::at(temp.path().join("cursor.json")).unwrap();

  assert_eq!(store.get().unwrap(), None);
}

#[test]
fn advance_is_monotonic_for_out_of_order_ids() {
  let temp = TempDir::new().unwrap();
  let store = FileCursorStore::at(temp.path().join("cursor.json")).unwrap();

  // Workers finishing out of numeric order must never rewind the cursor
  assert_eq!(store.advance(5).unwrap(), 5);
  assert_eq!(store.advance(3).unwrap(), 5);
  assert_eq!(store.advance(8).unwrap(), 8);

  assert_eq!(store.get().unwrap(), Some(8));
}

#[test]
fn cursor_survives_a_new_store_instance() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("cursor.json");

  {
    let store = FileCursorStore::at(path.clone()).unwrap();
    store.advance(42).unwrap();
  }

  let reopened = FileCursorStore::at(path).unwrap();
  assert_eq!(reopened.get().unwrap(), Some(42));
}

#[test]
fn reset_overwrites_even_downwards() {
  let temp = TempDir::new().unwrap();
  let store = FileCursorStore::at(temp.path().join("cursor.json")).unwrap();

  store.advance(100).unwrap();
  store.reset(2).unwrap();

  assert_eq!(store.get().unwrap(), Some(2));
}

#[test]
fn garbage_cursor_file_is_an_error_not_a_silent_restart() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("cursor.json");
  std::fs::write(&path, "not json").unwrap();

  let store = FileCursorStore::at(path).unwrap();
  assert!(store.get().is_err());
}

#[test]
#[serial]
fn data_root_env_var_relocates_the_store() {
  let temp = TempDir::new().unwrap();
  env::set_var("BABELHUB_DATA_ROOT", temp.path());

  let store = FileCursorStore::new().unwrap();
  store.advance(7).unwrap();

  assert!(temp.path().join("cursor.json").exists());
  env::remove_var("BABELHUB_DATA_ROOT");
}
