//! Core domain logic for the ActivityWatch exporter.
//!
//! This crate contains the pure, network-free pieces of the export
//! pipeline:
//! - Document: the exported JSON structure (buckets, events, metadata)
//! - Grouping: bucket selection and the app-name grouping heuristic
//! - Window: time-window computation for event queries
//! - Summary: operator-facing statistics over fetched events

mod document;
mod grouping;
mod summary;
mod window;

pub use document::{Bucket, Event, ExportDocument, ExportInfo, TimeRange};
pub use grouping::{
    BROWSER_GROUP_KEY, DEFAULT_KEYWORDS, WINDOW_GROUP_KEY, group_by_app_heuristic, select_broad,
    select_narrow,
};
pub use summary::Summary;
pub use window::TimeWindow;
