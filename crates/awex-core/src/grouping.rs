//! Bucket selection and the app-name grouping heuristic.

use crate::document::{Bucket, Event};

/// Synthetic group for events that look like browser activity.
pub const BROWSER_GROUP_KEY: &str = "aw-watcher-browser_unknown";

/// Synthetic group for everything else.
pub const WINDOW_GROUP_KEY: &str = "aw-watcher-window_unknown";

/// Default keyword set for the broad selection policy.
pub const DEFAULT_KEYWORDS: &[&str] = &["window", "afk", "browser"];

/// Substring identifying the window-watcher bucket under the narrow policy.
const WINDOW_BUCKET_NEEDLE: &str = "aw-watcher-window";

/// Type label for the synthetic groups built by the heuristic.
const SYNTHETIC_KIND: &str = "unknown";

/// Selects every bucket id containing any of the keywords.
///
/// Matching is a case-sensitive substring test and listing order is
/// preserved.
pub fn select_broad<'a, S>(
    ids: impl IntoIterator<Item = &'a str>,
    keywords: &[S],
) -> Vec<&'a str>
where
    S: AsRef<str>,
{
    ids.into_iter()
        .filter(|id| keywords.iter().any(|keyword| id.contains(keyword.as_ref())))
        .collect()
}

/// Selects the first bucket id containing `aw-watcher-window`, if any.
pub fn select_narrow<'a>(ids: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    ids.into_iter().find(|id| id.contains(WINDOW_BUCKET_NEEDLE))
}

/// Fuses events from all selected buckets into synthetic groups keyed by
/// the app-name heuristic, discarding upstream bucket provenance. The
/// downstream consumer expects at most the two fixed group keys; group
/// order follows first appearance.
#[must_use]
pub fn group_by_app_heuristic(events: Vec<Event>) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    for event in events {
        let key = synthetic_key(&event);
        match buckets.iter_mut().find(|bucket| bucket.id == key) {
            Some(bucket) => bucket.events.push(event),
            None => {
                let mut bucket = Bucket::new(key, SYNTHETIC_KIND);
                bucket.events.push(event);
                buckets.push(bucket);
            }
        }
    }
    buckets
}

/// An event whose `app` contains "chrome" or "firefox" (case-insensitive)
/// goes to the browser group; everything else, including events with no
/// `app` field at all, goes to the window group.
fn synthetic_key(event: &Event) -> &'static str {
    let Some(app) = event.app() else {
        return WINDOW_GROUP_KEY;
    };
    let app = app.to_lowercase();
    if app.contains("chrome") || app.contains("firefox") {
        BROWSER_GROUP_KEY
    } else {
        WINDOW_GROUP_KEY
    }
}
