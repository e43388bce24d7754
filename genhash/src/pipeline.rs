//! Load, process, and write a safelist.

use crate::config::{Channel, Options, RunConfig};
use anyhow::{bail, Context, Result};
use safelist_hash::{
    dedup_by_key, filter_by_comment, process_safelist, strip_hash_keys, verify, BatchReport,
};
use safelist_types::{decode_safelist, encode_safelist, Entry};
use std::fs;
use std::io::{self, Read, Write};
use tracing::{info, warn};

/// What a run did, for the final log line and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub loaded: usize,
    pub filtered_out: usize,
    /// `None` when keys were stripped instead of computed.
    pub batch: Option<BatchReport>,
    pub stripped: usize,
    pub deduplicated: usize,
    pub written: usize,
}

/// Reads a JSON array of entries from any reader.
pub fn read_safelist<R: Read>(mut reader: R) -> Result<Vec<Entry>> {
    let mut bytes = Vec::with_capacity(16 * 1024);
    reader
        .read_to_end(&mut bytes)
        .context("Failed to read safelist")?;
    decode_safelist(&bytes).context("Failed to parse safelist JSON")
}

/// Reads the safelist from its source channel.
pub fn load_safelist(source: &Channel) -> Result<Vec<Entry>> {
    match source {
        Channel::File(path) => {
            info!("Loading safelist from {:?}", path);
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_safelist(file).with_context(|| format!("Error reading data from {}", path.display()))
        }
        Channel::Stdio => read_safelist(io::stdin().lock()),
    }
}

/// Writes the safelist to any writer.
pub fn write_safelist<W: Write>(mut writer: W, entries: &[Entry], pretty: bool) -> Result<()> {
    let bytes = encode_safelist(entries, pretty).context("Failed to encode safelist")?;
    writer.write_all(&bytes).context("Failed to write safelist")?;
    writer.flush().context("Failed to flush safelist")?;
    Ok(())
}

fn store_safelist(sink: &Channel, entries: &[Entry], pretty: bool) -> Result<()> {
    match sink {
        Channel::File(path) => {
            info!("Saving hashed safelist to {:?}", path);
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_safelist(io::BufWriter::new(file), entries, pretty)
                .with_context(|| format!("Error saving to file {}", path.display()))
        }
        Channel::Stdio => write_safelist(io::stdout().lock(), entries, pretty),
    }
}

/// Applies filtering, verification, hashing (or stripping) and
/// deduplication to a loaded safelist.
pub fn process(entries: &mut Vec<Entry>, options: &Options) -> Result<RunSummary> {
    let mut summary = RunSummary {
        loaded: entries.len(),
        ..RunSummary::default()
    };

    if let Some(needle) = &options.filter {
        summary.filtered_out = filter_by_comment(entries, needle);
    }

    if options.verify {
        let report = verify(entries);
        for (index, e) in &report.unverifiable {
            warn!(index, "could not verify stored hash key: {e}");
        }
        if !report.is_clean() {
            bail!(
                "{} of {} stored hash keys do not match their entries",
                report.mismatches.len(),
                report.checked
            );
        }
        info!(checked = report.checked, "stored hash keys verified");
    }

    if options.strip {
        summary.stripped = strip_hash_keys(entries);
    } else {
        summary.batch = Some(process_safelist(entries));
    }

    if options.dedup {
        summary.deduplicated = dedup_by_key(entries);
    }

    summary.written = entries.len();
    Ok(summary)
}

/// Runs the whole pipeline. Nothing is written if loading or processing fails.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let mut entries = load_safelist(&config.source)?;
    let summary = process(&mut entries, &config.options)?;
    store_safelist(&config.sink, &entries, config.options.pretty)?;
    Ok(summary)
}
