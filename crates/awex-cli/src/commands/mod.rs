//! CLI command implementations.

pub mod buckets;
pub mod export;
