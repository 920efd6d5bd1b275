use crate::{error::Error, net::Prefix};
use lazy_static::lazy_static;
use regex::Regex;
use std::net::IpAddr;
use tracing::{debug, trace};

lazy_static! {
    static ref CIDR_LEN: Regex = Regex::new(r"/\d+$").expect("prefix length pattern is valid");
}

/// One command line argument: the address as typed and the prefix it falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedInput {
    pub address: IpAddr,
    pub prefix: Prefix,
}

impl ParsedInput {
    /// True when the user gave a host address rather than the network address.
    pub fn differs(&self) -> bool {
        self.address != self.prefix.network()
    }
}

/// Parses `addr/len` or `addr/mask`, e.g. `10.0.0.5/24` or `10.0.0.5/255.255.255.0`.
pub fn parse(input: &str) -> Result<ParsedInput, Error> {
    let invalid = || Error::InvalidPrefix(input.to_owned());

    let normalized;
    let cidr = if CIDR_LEN.is_match(input) {
        input
    } else {
        normalized = normalize_mask(input).ok_or_else(invalid)?;
        normalized.as_str()
    };

    let (addr, len) = cidr.split_once('/').ok_or_else(invalid)?;
    let address: IpAddr = addr.parse().map_err(|_| invalid())?;
    let len: u8 = len.parse().map_err(|_| invalid())?;
    let prefix = Prefix::new(address, len).ok_or_else(invalid)?;

    trace!(input, %prefix, "parsed prefix");
    Ok(ParsedInput { address, prefix })
}

/// Rewrites `addr/mask` into `addr/len`.
fn normalize_mask(input: &str) -> Option<String> {
    let (addr, mask) = input.split_once('/')?;
    let mask: IpAddr = mask.parse().ok()?;
    let len = mask_len(mask);

    debug!(%mask, len, "converted mask to prefix length");
    Some(format!("{addr}/{len}"))
}

/// Number of leading one bits. Bits after the first zero are ignored, so a
/// non-contiguous mask such as `255.0.255.0` counts as `/8`.
pub fn mask_len(mask: IpAddr) -> u8 {
    let ones = match mask {
        IpAddr::V4(m) => u32::from(m).leading_ones(),
        IpAddr::V6(m) => match m.to_ipv4_mapped() {
            Some(m) => u32::from(m).leading_ones(),
            None => u128::from(m).leading_ones(),
        },
    };
    // at most 128
    ones as u8
}
