//! Textual and binary renderings of addresses.
//!
//! An IPv6 address that is an IPv4-mapped address (`::ffff:a.b.c.d`) is
//! rendered as its IPv4 projection in both modes.

use crate::config::Options;
use std::net::IpAddr;

/// Dotted-decimal for IPv4. IPv6 is written as eight 4-digit groups unless
/// `compress` is set, in which case the shortest `::` form is used.
pub fn explode(addr: IpAddr, opts: &Options) -> String {
    match addr {
        IpAddr::V4(v4) => v4.to_string(),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            None if opts.compress => v6.to_string(),
            None => v6
                .segments()
                .iter()
                .map(|seg| format!("{seg:04x}"))
                .collect::<Vec<_>>()
                .join(":"),
        },
    }
}

/// Bit string grouped per octet (`.`) for IPv4 and per 16-bit group (`:`)
/// for IPv6, with a space in front of bit `split`.
///
/// A separator that lands on the split position is written before the space.
/// `split` equal to the address width adds nothing.
pub fn bin(addr: IpAddr, split: u8) -> String {
    let (bytes, group, sep, split) = match addr {
        IpAddr::V4(v4) => (v4.octets().to_vec(), 8, '.', split),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            // the split counts from the start of the 128 bit address
            Some(v4) => (v4.octets().to_vec(), 8, '.', split.saturating_sub(96)),
            None => (v6.octets().to_vec(), 16, ':', split),
        },
    };
    let split = usize::from(split);

    let bits: String = bytes.iter().map(|b| format!("{b:08b}")).collect();

    let mut out = String::with_capacity(bits.len() + bits.len() / group + 1);
    for (i, c) in bits.chars().enumerate() {
        if i != 0 && i % group == 0 {
            out.push(sep);
        }
        if i == split {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
