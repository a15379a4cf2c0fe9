//! Implementation of the `awex export` command.
//!
//! Runs the full pipeline: liveness check, bucket discovery, selection,
//! event retrieval, grouping, serialization, and a summary for the
//! operator. Every failure is terminal and nothing is retried; the
//! error bubbles up to `main` and becomes a non-zero exit.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;

use awex_client::AwClient;
use awex_core::{
    Bucket, Event, ExportDocument, Summary, TimeWindow, group_by_app_heuristic, select_broad,
    select_narrow,
};

use crate::Config;
use crate::cli::Policy;

/// Fixed output filename, shared by both policy defaults.
const OUTPUT_FILENAME: &str = "activitywatch_data.json";

/// Run the export command.
pub fn run<W: Write>(
    writer: &mut W,
    client: &AwClient,
    config: &Config,
    policy: Policy,
    output: Option<&Path>,
) -> Result<()> {
    let output = resolve_output_path(policy, output.or(config.output.as_deref()))?;
    writeln!(writer, "Output: {}", output.display())?;

    writeln!(writer, "Checking aw-server connection...")?;
    if !client.is_alive() {
        bail!(
            "aw-server is not reachable at {} - is ActivityWatch running?",
            client.base_url()
        );
    }
    writeln!(writer, "Connected to aw-server")?;

    let listing = client.buckets().context("failed to list buckets")?;
    let ids: Vec<&str> = listing.iter().map(|bucket| bucket.id.as_str()).collect();

    let now = Local::now();
    let window = match policy {
        Policy::Broad => TimeWindow::since_local_midnight(now),
        Policy::Narrow => TimeWindow::last_hours(now, config.lookback_hours),
    };
    writeln!(
        writer,
        "Time range: {} to {}",
        window.start.format("%Y-%m-%d %H:%M"),
        window.end.format("%Y-%m-%d %H:%M")
    )?;

    let buckets = match policy {
        Policy::Narrow => fetch_narrow(writer, client, &ids, &window, config.limit)?,
        Policy::Broad => fetch_broad(writer, client, &ids, &config.keywords, &window)?,
    };

    let document = ExportDocument::new(buckets, now, window.time_range());
    let summary = Summary::from_events(document.events());
    if summary.total_events == 0 {
        writeln!(writer, "Warning: no events found in the requested time range")?;
    }

    let json =
        serde_json::to_string_pretty(&document).context("failed to serialize export document")?;
    std::fs::write(&output, json)
        .with_context(|| format!("failed to write {}", output.display()))?;
    writeln!(
        writer,
        "Saved {} events to {}",
        summary.total_events,
        output.display()
    )?;

    writeln!(writer, "\n{summary}")?;
    Ok(())
}

/// Narrow policy: the first window-watcher bucket, kept under its true
/// upstream id. No matching bucket or any fetch failure aborts the run.
fn fetch_narrow<W: Write>(
    writer: &mut W,
    client: &AwClient,
    ids: &[&str],
    window: &TimeWindow,
    limit: u32,
) -> Result<Vec<Bucket>> {
    let Some(id) = select_narrow(ids.iter().copied()) else {
        bail!("no window-watcher bucket found (expected an id containing \"aw-watcher-window\")");
    };
    writeln!(writer, "Using bucket: {id}")?;

    let events = client
        .events(id, window, Some(limit))
        .with_context(|| format!("failed to fetch events from {id}"))?;
    writeln!(writer, "Fetched {} events", events.len())?;

    let mut bucket = Bucket::new(id, "window");
    bucket.events = events;
    Ok(vec![bucket])
}

/// Broad policy: every keyword-matching bucket, fused into synthetic
/// groups by the app-name heuristic. A failing bucket is skipped, not
/// fatal.
fn fetch_broad<W: Write>(
    writer: &mut W,
    client: &AwClient,
    ids: &[&str],
    keywords: &[String],
    window: &TimeWindow,
) -> Result<Vec<Bucket>> {
    let mut all_events: Vec<Event> = Vec::new();
    for id in select_broad(ids.iter().copied(), keywords) {
        writeln!(writer, "Processing bucket: {id}")?;
        match client.events(id, window, None) {
            Ok(events) => {
                writeln!(writer, "  fetched {} events", events.len())?;
                all_events.extend(events);
            }
            Err(err) => {
                tracing::warn!(bucket = id, error = %err, "skipping bucket");
                writeln!(writer, "  skipped: {err}")?;
            }
        }
    }
    Ok(group_by_app_heuristic(all_events))
}

/// Policy default: broad writes into the current directory, narrow onto
/// the user's desktop (where the downstream consumer looks for it).
fn resolve_output_path(policy: Policy, overridden: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = overridden {
        return Ok(path.to_path_buf());
    }
    match policy {
        Policy::Broad => Ok(PathBuf::from(OUTPUT_FILENAME)),
        Policy::Narrow => {
            let desktop =
                dirs::desktop_dir().context("could not determine the desktop directory")?;
            Ok(desktop.join(OUTPUT_FILENAME))
        }
    }
}
