use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::net::Ipv4Addr;
use std::path::Path;

use regex::Regex;

use crate::error::{LbError, Result};
use crate::lines::for_each_line;
use crate::model::VisitCount;

const CLIENT_ADDRESS: &str = r"^(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})";

/// Occurrence count per client address.
///
/// Remembers the order in which addresses were first seen so that equal
/// counts always come out in the same order.
#[derive(Debug, Default)]
pub struct VisitCounter {
    slots: HashMap<Ipv4Addr, usize>,
    visits: Vec<VisitCount>,
}

impl VisitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, address: Ipv4Addr) {
        match self.slots.get(&address) {
            Some(&slot) => self.visits[slot].count += 1,
            None => {
                self.slots.insert(address, self.visits.len());
                self.visits.push(VisitCount { address, count: 1 });
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, address: Ipv4Addr) -> usize {
        self.slots
            .get(&address)
            .map_or(0, |&slot| self.visits[slot].count)
    }

    /// Number of distinct addresses.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Number of counted log lines.
    pub fn total(&self) -> usize {
        self.visits.iter().map(|v| v.count).sum()
    }

    /// All addresses, highest count first. Ties keep first-seen order.
    pub fn most_common(&self) -> Vec<VisitCount> {
        let mut visits = self.visits.clone();
        // stable sort
        visits.sort_by(|a, b| b.count.cmp(&a.count));
        visits
    }
}

#[cfg(test)]
impl FromIterator<Ipv4Addr> for VisitCounter {
    fn from_iter<I: IntoIterator<Item = Ipv4Addr>>(iter: I) -> Self {
        let mut counter = VisitCounter::new();
        for address in iter {
            counter.record(address);
        }
        counter
    }
}

/// Counts how many lines of the access log at `file_path` start with each
/// client address.
pub fn read_log(file_path: &Path) -> Result<VisitCounter> {
    let file = File::open(file_path).map_err(|source| LbError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;
    let counter = parse_log(BufReader::new(file)).map_err(|err| err.in_file(file_path))?;
    if counter.is_empty() {
        log::warn!("no client addresses found in {}", file_path.display());
    }
    log::debug!(
        "counted {} lines from {} addresses in {}",
        counter.total(),
        counter.len(),
        file_path.display()
    );
    Ok(counter)
}

pub fn parse_log<R: BufRead>(reader: R) -> Result<VisitCounter> {
    let pattern = Regex::new(CLIENT_ADDRESS)?;
    let mut counter = VisitCounter::new();

    for_each_line(reader, |number, line| {
        let Some(found) = pattern.captures(line).and_then(|c| c.get(1)) else {
            log::trace!("no client address on log line {}", number);
            return Ok(());
        };

        let address: Ipv4Addr = found.as_str().parse().map_err(|_| LbError::InvalidAddress {
            line: number,
            value: found.as_str().to_string(),
        })?;
        counter.record(address);
        Ok(())
    })?;

    Ok(counter)
}
