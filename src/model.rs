use std::net::Ipv4Addr;
use ip_network::Ipv4Network;
use serde::Serialize;

/// One line of the network list: a range and who owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEntry {
    pub network: Ipv4Network,
    pub description: String,
}

impl NetworkEntry {
    pub fn new(network: Ipv4Network, description: impl Into<String>) -> Self {
        NetworkEntry {
            network,
            description: description.into(),
        }
    }

    pub fn contains(&self, address: Ipv4Addr) -> bool {
        self.network.contains(address)
    }
}

/// Number of log lines seen for a single client address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitCount {
    pub address: Ipv4Addr,
    pub count: usize,
}

/// A counted address attributed to a network owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visit {
    pub count: usize,
    pub address: Ipv4Addr,
    pub network: String,
    pub description: String,
}

impl Visit {
    pub fn new(visits: VisitCount, entry: &NetworkEntry) -> Self {
        Visit {
            count: visits.count,
            address: visits.address,
            network: entry.network.to_string(),
            description: entry.description.clone(),
        }
    }
}
