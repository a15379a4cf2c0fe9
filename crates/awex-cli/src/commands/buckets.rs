//! Implementation of the `awex buckets` command.
//!
//! Surfaces the discovery step on its own, which helps when an export
//! selects nothing: the operator can see what the daemon actually has.

use std::io::Write;

use anyhow::{Context, Result, bail};

use awex_client::AwClient;

pub fn run<W: Write>(writer: &mut W, client: &AwClient) -> Result<()> {
    if !client.is_alive() {
        bail!(
            "aw-server is not reachable at {} - is ActivityWatch running?",
            client.base_url()
        );
    }

    let listing = client.buckets().context("failed to list buckets")?;
    if listing.is_empty() {
        writeln!(writer, "No buckets found.")?;
        return Ok(());
    }

    writeln!(writer, "Buckets:")?;
    for bucket in listing {
        let kind = bucket.kind.as_deref().unwrap_or("unknown");
        match bucket.hostname.as_deref() {
            Some(hostname) => writeln!(writer, "- {} ({kind}, {hostname})", bucket.id)?,
            None => writeln!(writer, "- {} ({kind})", bucket.id)?,
        }
    }

    Ok(())
}
