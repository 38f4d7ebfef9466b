//! Filesystem housekeeping for the storefront project tree.
//!
//! A hasty reorganization left the checkout with duplicated top-level
//! directories, a stray database copy, stale Python caches, and
//! re-uploaded product images under randomized suffixes. This crate
//! scans for exactly those leftovers, shows what it found, and deletes
//! them after one confirmation.

pub mod plan;

pub use plan::{CleanupPlan, CleanupReport, DUPLICATE_IMAGE_SUFFIXES};
