use foghorn::*;

#[test]
fn test_basic_logging_functions() {
  // None of these should panic, whatever the terminal situation
  info("Test info message");
  warn("Test warning message");
  error("Test error message");
  debug("Test debug message");
  success("Test success message");
}

#[test]
fn test_multiline_messages() {
  let multiline = "first line\nsecond line\nthird line";
  info(multiline);
  warn(multiline);
  error(multiline);
}

#[test]
fn test_event_logging() {
  event_info("pipeline started");
  event_warn("rate limit approaching");
  event_error("upsert failed");
}

#[test]
fn test_empty_message() {
  info("");
  event_info("");
}
