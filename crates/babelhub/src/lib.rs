//! Babelhub - repository language-enrichment indexer
//!
//! Walks the public repository listing of a code-hosting platform, scores
//! each repository's free text (README, description, owner bio) into
//! language profiles via `lexis`, and upserts the enriched records into a
//! searchable document index. A single resumption cursor lets repeated runs
//! pick up where the last one stopped.

pub mod commands;
pub mod cursor;
pub mod index;
pub mod pipeline;
pub mod platform;
