//! CLI commands for update-version
//!
//! - **update**: Sync version/date constants from an upstream pikchr commit

pub mod update;

pub use update::run_update;
