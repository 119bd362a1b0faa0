//! Core engine for update-version
//!
//! - **error**: Error types with contextual help messages and exit codes
//! - **layout**: Where the upstream clone and target files live
//! - **resolver**: Commit lookup and raw metadata extraction
//! - **vcs**: Git operations abstraction (SystemGit)
//! - **version_info**: Normalization into canonical version values

pub mod error;
pub mod layout;
pub mod resolver;
pub mod vcs;
pub mod version_info;
