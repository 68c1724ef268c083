use std::net::Ipv4Addr;

use crate::access_log::VisitCounter;
use crate::model::{NetworkEntry, Visit};

/// How many networks an address is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Only the first network in list order that contains the address.
    #[default]
    First,
    /// Every network in the list that contains the address.
    All,
}

pub fn first_match(networks: &[NetworkEntry], address: Ipv4Addr) -> Option<&NetworkEntry> {
    networks.iter().find(|entry| entry.contains(address))
}

pub fn all_matches(networks: &[NetworkEntry], address: Ipv4Addr) -> impl Iterator<Item = &NetworkEntry> {
    networks.iter().filter(move |entry| entry.contains(address))
}

/// Attributes every counted address to its owner(s), busiest address first.
/// Addresses outside every listed network are left out.
pub fn attribute(networks: &[NetworkEntry], counter: &VisitCounter, mode: MatchMode) -> Vec<Visit> {
    let mut visits = Vec::new();
    let mut unmatched = 0;

    for counted in counter.most_common() {
        let before = visits.len();
        match mode {
            MatchMode::First => {
                if let Some(entry) = first_match(networks, counted.address) {
                    visits.push(Visit::new(counted, entry));
                }
            }
            MatchMode::All => {
                visits.extend(all_matches(networks, counted.address).map(|entry| Visit::new(counted, entry)));
            }
        }
        if visits.len() == before {
            unmatched += 1;
        }
    }

    log::debug!("{} of {} addresses matched no network", unmatched, counter.len());
    visits
}
