use std::fs::File;
use std::io::{BufRead, BufReader};
use std::net::Ipv4Addr;
use std::path::Path;

use ip_network::Ipv4Network;
use regex::Regex;

use crate::error::{LbError, Result};
use crate::lines::for_each_line;
use crate::model::NetworkEntry;

const NETWORK_LINE: &str = r"^(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}(?:/\d{1,3})?)(?:\s+(.*))?$";

/// Reads the operator's network list from `file_path`.
///
/// Each useful line holds an IPv4 address or network, optionally followed by
/// whitespace and a free-text description. Lines that do not start with an
/// address are ignored; a line that does but cannot be parsed aborts the read.
pub fn read_networks(file_path: &Path) -> Result<Vec<NetworkEntry>> {
    let file = File::open(file_path).map_err(|source| LbError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;
    let networks = parse_networks(BufReader::new(file)).map_err(|err| err.in_file(file_path))?;
    log::debug!("loaded {} networks from {}", networks.len(), file_path.display());
    Ok(networks)
}

/// Same as [`read_networks`] for an already opened reader. File order is kept.
pub fn parse_networks<R: BufRead>(reader: R) -> Result<Vec<NetworkEntry>> {
    let pattern = Regex::new(NETWORK_LINE)?;
    let mut networks = Vec::new();

    for_each_line(reader, |number, line| {
        let Some(captures) = pattern.captures(line) else {
            log::trace!("skipping network line {}: {:?}", number, line);
            return Ok(());
        };

        let network = parse_network(&captures[1], number)?;
        let description = captures.get(2).map_or("", |m| m.as_str());
        networks.push(NetworkEntry::new(network, description));
        Ok(())
    })?;

    Ok(networks)
}

/// Parses `a.b.c.d` or `a.b.c.d/prefix`. A bare address is a /32.
fn parse_network(value: &str, line: usize) -> Result<Ipv4Network> {
    let invalid = |reason: String| LbError::InvalidNetwork {
        line,
        value: value.to_string(),
        reason,
    };

    let (address, prefix) = match value.split_once('/') {
        Some((address, prefix)) => (address, Some(prefix)),
        None => (value, None),
    };

    let address: Ipv4Addr = address
        .parse()
        .map_err(|_| invalid(format!("'{}' is not an IPv4 address", address)))?;
    let prefix: u8 = match prefix {
        Some(prefix) => prefix
            .parse()
            .map_err(|_| invalid(format!("prefix length '{}' is out of range", prefix)))?,
        None => 32,
    };

    Ipv4Network::new(address, prefix).map_err(|err| invalid(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(input: &str) -> Result<Vec<NetworkEntry>> {
        parse_networks(Cursor::new(input))
    }

    #[test]
    fn test_parse_networks_keeps_file_order() {
        let networks = parse("10.0.0.0/8 Office\n192.168.0.0/16\tHome network\n").unwrap();
        assert_eq!(networks.len(), 2);
        assert_eq!(networks[0].network.to_string(), "10.0.0.0/8");
        assert_eq!(networks[0].description, "Office");
        assert_eq!(networks[1].network.to_string(), "192.168.0.0/16");
        assert_eq!(networks[1].description, "Home network");
    }

    #[test]
    fn test_bare_address_is_single_host() {
        let networks = parse("8.8.8.8 Google DNS\n").unwrap();
        assert_eq!(networks[0].network.to_string(), "8.8.8.8/32");
        assert!(networks[0].contains("8.8.8.8".parse().unwrap()));
        assert!(!networks[0].contains("8.8.4.4".parse().unwrap()));
    }

    #[test]
    fn test_description_keeps_inner_whitespace() {
        let networks = parse("10.0.0.0/8   Big   Corp (HQ)  \r\n").unwrap();
        assert_eq!(networks[0].description, "Big   Corp (HQ)  ");
    }

    #[test]
    fn test_carriage_return_separated_list() {
        let networks = parse("10.0.0.0/8 Office\r192.168.0.0/16 Home\r").unwrap();
        assert_eq!(networks.len(), 2);
        assert_eq!(networks[0].description, "Office");
        assert_eq!(networks[1].description, "Home");
    }

    #[test]
    fn test_network_without_description() {
        let networks = parse("10.0.0.0/8\n").unwrap();
        assert_eq!(networks.len(), 1);
        assert_eq!(networks[0].description, "");
    }

    #[test]
    fn test_non_matching_lines_are_skipped() {
        let input = "# comment\n\nOffice 10.0.0.0/8\n10.0.0.0/8x junk\n 10.0.0.0/8 indented\n172.16.0.0/12 Lab\n";
        let networks = parse(input).unwrap();
        assert_eq!(networks.len(), 1);
        assert_eq!(networks[0].description, "Lab");
    }

    #[test]
    fn test_host_bits_set_is_fatal() {
        let err = parse("10.1.2.3/8 Office\n").unwrap_err();
        match err {
            LbError::InvalidNetwork { line, value, .. } => {
                assert_eq!(line, 1);
                assert_eq!(value, "10.1.2.3/8");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_octet_is_fatal() {
        let err = parse("a b\n300.0.0.0/8 Nowhere\n").unwrap_err();
        assert!(matches!(err, LbError::InvalidNetwork { line: 2, .. }));
    }

    #[test]
    fn test_prefix_out_of_range_is_fatal() {
        assert!(matches!(
            parse("10.0.0.0/33 Office\n").unwrap_err(),
            LbError::InvalidNetwork { .. }
        ));
        assert!(matches!(
            parse("10.0.0.0/300 Office\n").unwrap_err(),
            LbError::InvalidNetwork { .. }
        ));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = read_networks(Path::new("/nonexistent/networks.txt")).unwrap_err();
        assert!(matches!(err, LbError::Io { .. }));
    }
}
