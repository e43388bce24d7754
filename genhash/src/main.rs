//! Safelist hash-key generator.
//!
//! Reads a JSON array of safelist entries, assigns an identity hash key to
//! every entry that lacks one, and writes the array back out.
//!
//! Usage:
//!   genhash safelist.json [safelist-hashed.json]
//!   cat safelist.json | genhash > safelist-hashed.json

use anyhow::Result;
use clap::{CommandFactory, Parser};
use safelist_genhash::{run, stdin_is_char_device, Args, RunConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { "debug" } else { "info" };
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = match RunConfig::resolve(&args, stdin_is_char_device()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[-] {e}");
            eprintln!("{}", Args::command().render_usage());
            std::process::exit(2);
        }
    };

    let summary = run(&config)?;
    info!(
        loaded = summary.loaded,
        filtered_out = summary.filtered_out,
        stripped = summary.stripped,
        deduplicated = summary.deduplicated,
        written = summary.written,
        "done"
    );
    Ok(())
}
