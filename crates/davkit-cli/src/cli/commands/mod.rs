//! CLI command handlers, one per file.

mod config;
mod locate;
mod prefs;

pub use config::run_config;
pub use locate::{run_locate, LocateArgs};
pub use prefs::run_prefs;
