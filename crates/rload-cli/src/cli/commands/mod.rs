//! CLI command handlers, one per file.

mod config;
mod fetch;
mod parse;

pub use config::run_config;
pub use fetch::{run_fetch, FetchArgs};
pub use parse::run_parse;
