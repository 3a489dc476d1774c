//! Lexis - human-language scoring core
//!
//! Turns free text (READMEs, repository descriptions, owner bios) into
//! language-distribution profiles and derives two signals from them: the
//! dominant language and an "Englishness" ratio. Everything in this crate is
//! pure and stateless; detection itself sits behind the [`detector::Detect`]
//! seam so callers and tests can swap the backend.

pub mod detector;
pub mod enrichment;
pub mod profile;
