//! Operator-facing statistics over fetched events.

use std::fmt;

use crate::document::Event;

/// How many application names to show before truncating the sample.
const APP_SAMPLE_LEN: usize = 5;

/// Aggregate statistics over all events of one export run.
///
/// Purely observational; the written document is not affected.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Sum of all event durations, in seconds.
    pub total_duration_secs: f64,

    /// Distinct `app` values in first-seen order. Events without an
    /// `app` field do not contribute.
    pub apps: Vec<String>,

    /// Number of events fetched.
    pub total_events: usize,
}

impl Summary {
    /// Computes the summary from a flat event sequence. The result is
    /// independent of how the events were grouped into buckets.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut total_duration_secs = 0.0;
        let mut apps: Vec<String> = Vec::new();
        let mut total_events = 0;

        for event in events {
            total_events += 1;
            total_duration_secs += event.duration;
            if let Some(app) = event.app() {
                if !apps.iter().any(|seen| seen == app) {
                    apps.push(app.to_string());
                }
            }
        }

        Self {
            total_duration_secs,
            apps,
            total_events,
        }
    }

    /// Total tracked time in hours.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.total_duration_secs / 3600.0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total tracked time: {:.2} hours", self.total_hours())?;
        writeln!(f, "Distinct applications: {}", self.apps.len())?;
        write!(f, "Total events: {}", self.total_events)?;
        if !self.apps.is_empty() {
            let sample = self
                .apps
                .iter()
                .take(APP_SAMPLE_LEN)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let more = if self.apps.len() > APP_SAMPLE_LEN {
                "..."
            } else {
                ""
            };
            write!(f, "\nApplications: {sample}{more}")?;
        }
        Ok(())
    }
}
