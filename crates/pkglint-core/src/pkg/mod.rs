//! Package-level inputs to the checker.
//!
//! Provides utilities for:
//! - Reading `package.json` with its source text
//! - Computing the set of files `npm pack` would publish

pub mod manifest;
pub mod packlist;

pub use manifest::Manifest;
pub use packlist::shipped_files;
