//! The exported JSON document: buckets, events, and export metadata.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded observation from a watcher.
///
/// The `data` payload is tracker-specific and passed through opaquely;
/// window watchers put the application name under an `app` key. Payload
/// key order is preserved across serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Upstream row id, passed through when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// When the observation started.
    pub timestamp: DateTime<Utc>,

    /// Length of the observation in seconds.
    #[serde(default)]
    pub duration: f64,

    /// Opaque tracker payload.
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl Event {
    /// Returns the application name from the payload, if any.
    #[must_use]
    pub fn app(&self) -> Option<&str> {
        self.data.get("app").and_then(serde_json::Value::as_str)
    }
}

/// A named source of events in the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Bucket key, either the true upstream id or a synthesized group.
    pub id: String,

    /// Bucket type label, e.g. `"window"` or `"unknown"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Events in upstream order.
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Bucket {
    /// Creates an empty bucket with the given id and type label.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            events: Vec::new(),
        }
    }
}

/// The queried time range, echoed into the export metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

/// Metadata describing one export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportInfo {
    /// When the document was built.
    pub export_time: DateTime<Local>,

    /// The window the events endpoint was queried with.
    pub time_range: TimeRange,

    /// Number of events across all buckets.
    pub total_events: usize,
}

/// The root output artifact, built fully in memory and written once.
///
/// Serializes to the shape the downstream consumer expects: a `buckets`
/// object keyed by bucket id plus an `export_info` object. Bucket order
/// is preserved in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(with = "bucket_map")]
    pub buckets: Vec<Bucket>,
    pub export_info: ExportInfo,
}

impl ExportDocument {
    /// Assembles the document, counting events for the metadata block.
    #[must_use]
    pub fn new(buckets: Vec<Bucket>, export_time: DateTime<Local>, time_range: TimeRange) -> Self {
        let total_events = buckets.iter().map(|bucket| bucket.events.len()).sum();
        Self {
            buckets,
            export_info: ExportInfo {
                export_time,
                time_range,
                total_events,
            },
        }
    }

    /// Iterates over all events across all buckets, in document order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.buckets.iter().flat_map(|bucket| bucket.events.iter())
    }
}

/// Serde adapter between `Vec<Bucket>` and the id-keyed JSON object.
///
/// The map key is authoritative on deserialization; the `id` field inside
/// each value is overwritten with it.
mod bucket_map {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use super::Bucket;

    pub fn serialize<S>(buckets: &[Bucket], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(buckets.len()))?;
        for bucket in buckets {
            map.serialize_entry(&bucket.id, bucket)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Bucket>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BucketMapVisitor;

        impl<'de> Visitor<'de> for BucketMapVisitor {
            type Value = Vec<Bucket>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of bucket id to bucket")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut buckets = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, mut bucket)) = access.next_entry::<String, Bucket>()? {
                    bucket.id = id;
                    buckets.push(bucket);
                }
                Ok(buckets)
            }
        }

        deserializer.deserialize_map(BucketMapVisitor)
    }
}
