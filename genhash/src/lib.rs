//! Command-line plumbing for the safelist hasher: argument and environment
//! resolution, reading and writing safelist documents, and the end-to-end
//! pipeline the `genhash` binary runs.

mod config;
mod pipeline;

#[cfg(unix)]
pub use config::is_char_device;
pub use config::{
    default_output_path, parse_ci_flag, stdin_is_char_device, Args, Channel, ConfigError, Options,
    RunConfig,
};
pub use pipeline::{load_safelist, process, read_safelist, run, write_safelist, RunSummary};
