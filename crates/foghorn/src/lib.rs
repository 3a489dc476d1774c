//! Foghorn - logging for the babelhub tools
//!
//! Small, loud, and hard to miss. All output goes to stderr so that command
//! output on stdout (records, JSON dumps) stays pipeable.
//!
//! Standard levels: `info()`, `warn()`, `error()`, `debug()`, `success()`
//!
//! Timestamped variants for long-running pipeline work: `event_info()`,
//! `event_warn()`, `event_error()`

use chrono::Local;
use colored::*;

/// Write a message to stderr, one line at a time
pub fn log(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

/// Right-align the tag before coloring; padding a colored string would count
/// the ANSI escape bytes and never line up.
fn prefix_for(color: Color, tag: &str) -> String {
  let padded = format!("{tag:>5}");
  format!("{} |", padded.color(color).bold())
}

fn prefixed(color: Color, tag: &str, message: &str) {
  let prefix = prefix_for(color, tag);
  for line in message.lines() {
    log(&format!("{prefix} {line}"));
  }
}

/// General information
pub fn info(message: &str) {
  prefixed(Color::Blue, "info", message);
}

/// Something needs attention but the run continues
pub fn warn(message: &str) {
  prefixed(Color::Yellow, "warn", message);
}

/// Something went wrong
pub fn error(message: &str) {
  prefixed(Color::Red, "error", message);
}

/// Detailed diagnostic output
pub fn debug(message: &str) {
  prefixed(Color::Magenta, "debug", message);
}

/// Something completed successfully
pub fn success(message: &str) {
  prefixed(Color::Green, "done", message);
}

fn event(color: Color, tag: &str, message: &str) {
  let timestamp = Local::now().format("%H:%M:%S").to_string();
  let prefix = format!("[{}] {}", timestamp.cyan(), prefix_for(color, tag));
  for line in message.lines() {
    log(&format!("{prefix} {line}"));
  }
}

/// Timestamped info event
pub fn event_info(message: &str) {
  event(Color::Blue, "info", message);
}

/// Timestamped warning event
pub fn event_warn(message: &str) {
  event(Color::Yellow, "warn", message);
}

/// Timestamped error event
pub fn event_error(message: &str) {
  event(Color::Red, "error", message);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tags_align_to_the_same_column() {
    // With coloring disabled the prefix is the plain padded form, so the
    // alignment is visible to assert on
    colored::control::set_override(false);
    assert_eq!(prefix_for(Color::Blue, "info"), " info |");
    assert_eq!(prefix_for(Color::Red, "error"), "error |");
    assert_eq!(prefix_for(Color::Green, "done"), " done |");
    colored::control::unset_override();
  }
}
