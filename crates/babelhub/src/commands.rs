pub mod cursor;
pub mod enrich;
pub mod run;
