//! Little brother: who is visiting your website?
//!
//! Counts the client addresses of an access log and attributes them to the
//! owners listed in a network file.

pub mod access_log;
pub mod error;
pub mod ip_origin_map;
mod lines;
pub mod model;
pub mod network_table;
pub mod report;

use std::io::Write;
use std::path::Path;

pub use error::{LbError, Result};
pub use ip_origin_map::MatchMode;
pub use model::{NetworkEntry, Visit, VisitCount};
pub use report::OutputFormat;

/// Reads both inputs, attributes the visits and writes the report.
pub fn run<W: Write>(
    networks_path: &Path,
    log_path: &Path,
    mode: MatchMode,
    format: OutputFormat,
    writer: W,
) -> Result<Vec<Visit>> {
    let networks = network_table::read_networks(networks_path)?;
    let counter = access_log::read_log(log_path)?;
    let visits = ip_origin_map::attribute(&networks, &counter, mode);
    report::write_report(writer, &visits, format)?;
    Ok(visits)
}
