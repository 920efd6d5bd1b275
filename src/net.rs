//! Prefix arithmetic shared by IPv4 and IPv6.
//!
//! The bit math is written once against [`IpInfo`] and instantiated for
//! [`V4`] (`u32`) and [`V6`] (`u128`). [`Prefix`] wraps both behind
//! [`std::net::IpAddr`] for the rest of the program.

use num::{traits::CheckedShl, BigUint, One, PrimInt, Unsigned};
use std::{
    fmt::{self, Debug, Display},
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
};

pub trait IpByteTypeHelper {
    const MAX: Self;
    const ZERO: Self;
    const ONE: Self;
    const BITS: u8;
}

impl IpByteTypeHelper for u32 {
    const MAX: u32 = u32::MAX;
    const ZERO: u32 = 0u32;
    const ONE: u32 = 1u32;
    const BITS: u8 = u32::BITS as u8;
}

impl IpByteTypeHelper for u128 {
    const MAX: u128 = u128::MAX;
    const ZERO: u128 = 0u128;
    const ONE: u128 = 1u128;
    const BITS: u8 = u128::BITS as u8;
}

pub trait IpByteType: IpByteTypeHelper + PrimInt + Unsigned + CheckedShl + Debug {}
impl<T> IpByteType for T where T: IpByteTypeHelper + PrimInt + Unsigned + CheckedShl + Debug {}

pub trait IpTrait<Bits: IpByteType> {
    fn from_proxy(bits: Bits) -> Self;
    fn bits(&self) -> Bits;
}

impl IpTrait<u32> for Ipv4Addr {
    fn from_proxy(bits: u32) -> Self {
        Ipv4Addr::from(bits)
    }

    fn bits(&self) -> u32 {
        (*self).into()
    }
}

impl IpTrait<u128> for Ipv6Addr {
    fn from_proxy(bits: u128) -> Self {
        Ipv6Addr::from(bits)
    }

    fn bits(&self) -> u128 {
        (*self).into()
    }
}

pub trait IpInfo {
    type Bits: IpByteType;
    type IpType: IpTrait<Self::Bits> + Copy + Eq + Debug + Display + Into<IpAddr>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V4 {}
impl IpInfo for V4 {
    type IpType = Ipv4Addr;
    type Bits = u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V6 {}
impl IpInfo for V6 {
    type IpType = Ipv6Addr;
    type Bits = u128;
}

/// Netmask bits for a prefix length. `cidr` must not exceed the address width.
pub fn sn_from_cidr_bits<Ip: IpInfo>(cidr: u8) -> Ip::Bits {
    // shifting by the full width is undefined, a /0 mask is simply empty
    Ip::Bits::MAX
        .checked_shl(u32::from(Ip::Bits::BITS - cidr))
        .unwrap_or(Ip::Bits::ZERO)
}

pub fn sn_from_cidr<Ip: IpInfo>(cidr: u8) -> Ip::IpType {
    Ip::IpType::from_proxy(sn_from_cidr_bits::<Ip>(cidr))
}

pub fn na_from_ip_and_cidr<Ip: IpInfo>(ip: &Ip::IpType, cidr: u8) -> Ip::IpType {
    Ip::IpType::from_proxy(ip.bits() & sn_from_cidr_bits::<Ip>(cidr))
}

pub fn bc_from_ip_and_cidr<Ip: IpInfo>(ip: &Ip::IpType, cidr: u8) -> Ip::IpType {
    Ip::IpType::from_proxy(ip.bits() | !sn_from_cidr_bits::<Ip>(cidr))
}

/// A network prefix. The stored address never has host bits set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenNet<Ip: IpInfo> {
    na: Ip::IpType,
    cidr: u8,
}

pub type NetV4 = GenNet<V4>;
pub type NetV6 = GenNet<V6>;

impl<Ip: IpInfo> GenNet<Ip> {
    /// Builds the prefix containing `ip`. Returns `None` if `cidr` is wider
    /// than the address.
    pub fn new(ip: Ip::IpType, cidr: u8) -> Option<Self> {
        if cidr > Ip::Bits::BITS {
            return None;
        }

        Some(GenNet {
            na: na_from_ip_and_cidr::<Ip>(&ip, cidr),
            cidr,
        })
    }

    pub fn network_address(&self) -> Ip::IpType {
        self.na
    }

    pub fn last_address(&self) -> Ip::IpType {
        bc_from_ip_and_cidr::<Ip>(&self.na, self.cidr)
    }

    pub fn subnetmask(&self) -> Ip::IpType {
        sn_from_cidr::<Ip>(self.cidr)
    }

    pub fn hostmask(&self) -> Ip::IpType {
        Ip::IpType::from_proxy(!sn_from_cidr_bits::<Ip>(self.cidr))
    }

    pub fn cidr(&self) -> u8 {
        self.cidr
    }

    /// Total number of addresses, network and last address included.
    pub fn num_addresses(&self) -> BigUint {
        BigUint::one() << u32::from(Ip::Bits::BITS - self.cidr)
    }

    /// Splits the prefix into `2^extra` equal parts, lowest first.
    pub fn subnets(&self, extra: u8) -> Option<GenSubnets<Ip>> {
        let cidr = self.cidr.checked_add(extra)?;
        if cidr > Ip::Bits::BITS {
            return None;
        }

        Some(GenSubnets {
            next: Some(self.na.bits()),
            end: self.last_address().bits(),
            cidr,
        })
    }
}

/// Lazy walk over the equal-sized subnets of a prefix.
#[derive(Debug, Clone)]
pub struct GenSubnets<Ip: IpInfo> {
    next: Option<Ip::Bits>,
    end: Ip::Bits,
    cidr: u8,
}

impl<Ip: IpInfo> Iterator for GenSubnets<Ip> {
    type Item = GenNet<Ip>;

    fn next(&mut self) -> Option<Self::Item> {
        let na = self.next?;
        let subnet = GenNet::<Ip> {
            na: Ip::IpType::from_proxy(na),
            cidr: self.cidr,
        };

        let bc = subnet.last_address().bits();
        self.next = if bc == self.end {
            None
        } else {
            Some(bc + Ip::Bits::ONE)
        };

        Some(subnet)
    }
}

/// A prefix of either address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    V4(NetV4),
    V6(NetV6),
}

impl Prefix {
    pub fn new(ip: IpAddr, cidr: u8) -> Option<Self> {
        match ip {
            IpAddr::V4(ip) => NetV4::new(ip, cidr).map(Prefix::V4),
            IpAddr::V6(ip) => NetV6::new(ip, cidr).map(Prefix::V6),
        }
    }

    pub fn network(&self) -> IpAddr {
        match self {
            Prefix::V4(net) => net.network_address().into(),
            Prefix::V6(net) => net.network_address().into(),
        }
    }

    pub fn last(&self) -> IpAddr {
        match self {
            Prefix::V4(net) => net.last_address().into(),
            Prefix::V6(net) => net.last_address().into(),
        }
    }

    pub fn netmask(&self) -> IpAddr {
        match self {
            Prefix::V4(net) => net.subnetmask().into(),
            Prefix::V6(net) => net.subnetmask().into(),
        }
    }

    pub fn hostmask(&self) -> IpAddr {
        match self {
            Prefix::V4(net) => net.hostmask().into(),
            Prefix::V6(net) => net.hostmask().into(),
        }
    }

    pub fn cidr(&self) -> u8 {
        match self {
            Prefix::V4(net) => net.cidr(),
            Prefix::V6(net) => net.cidr(),
        }
    }

    pub fn num_addresses(&self) -> BigUint {
        match self {
            Prefix::V4(net) => net.num_addresses(),
            Prefix::V6(net) => net.num_addresses(),
        }
    }

    /// `None` when `extra` more bits do not fit into the address.
    pub fn subnets(&self, extra: u8) -> Option<Subnets> {
        match self {
            Prefix::V4(net) => net.subnets(extra).map(Subnets::V4),
            Prefix::V6(net) => net.subnets(extra).map(Subnets::V6),
        }
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.cidr())
    }
}

#[derive(Debug, Clone)]
pub enum Subnets {
    V4(GenSubnets<V4>),
    V6(GenSubnets<V6>),
}

impl Iterator for Subnets {
    type Item = Prefix;

    fn next(&mut self) -> Option<Prefix> {
        match self {
            Subnets::V4(it) => it.next().map(Prefix::V4),
            Subnets::V6(it) => it.next().map(Prefix::V6),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn prefix(s: &str, cidr: u8) -> Prefix {
        Prefix::new(s.parse().unwrap(), cidr).unwrap()
    }

    #[test]
    fn test_sn_from_cidr_edges() {
        assert_eq!(sn_from_cidr_bits::<V4>(0), 0);
        assert_eq!(sn_from_cidr_bits::<V4>(24), 0xFFFF_FF00);
        assert_eq!(sn_from_cidr_bits::<V4>(32), u32::MAX);
        assert_eq!(sn_from_cidr_bits::<V6>(0), 0);
        assert_eq!(sn_from_cidr_bits::<V6>(64), u128::MAX << 64);
        assert_eq!(sn_from_cidr_bits::<V6>(128), u128::MAX);
    }

    #[test]
    fn test_host_bits_are_cleared() {
        let net = prefix("10.0.0.5", 24);
        assert_eq!(net.network(), "10.0.0.0".parse::<IpAddr>().unwrap());
        assert_eq!(net.last(), "10.0.0.255".parse::<IpAddr>().unwrap());

        let net = prefix("2001:db8::1234", 64);
        assert_eq!(net.network(), "2001:db8::".parse::<IpAddr>().unwrap());
        assert_eq!(
            net.last(),
            "2001:db8::ffff:ffff:ffff:ffff".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_masks() {
        let net = prefix("192.168.1.0", 20);
        assert_eq!(net.netmask(), "255.255.240.0".parse::<IpAddr>().unwrap());
        assert_eq!(net.hostmask(), "0.0.15.255".parse::<IpAddr>().unwrap());

        let net = prefix("2001:db8::", 32);
        assert_eq!(net.netmask(), "ffff:ffff::".parse::<IpAddr>().unwrap());
        assert_eq!(
            net.hostmask(),
            "::ffff:ffff:ffff:ffff:ffff:ffff".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_num_addresses() {
        assert_eq!(prefix("0.0.0.0", 0).num_addresses(), BigUint::from(1u64 << 32));
        assert_eq!(prefix("10.0.0.0", 24).num_addresses(), BigUint::from(256u32));
        assert_eq!(prefix("10.0.0.1", 32).num_addresses(), BigUint::one());
        assert_eq!(
            prefix("::", 0).num_addresses().to_string(),
            "340282366920938463463374607431768211456"
        );
        assert_eq!(prefix("::1", 128).num_addresses(), BigUint::one());
    }

    #[test]
    fn test_cidr_too_big() {
        assert!(Prefix::new("10.0.0.0".parse().unwrap(), 33).is_none());
        assert!(Prefix::new("::".parse().unwrap(), 129).is_none());
        assert!(Prefix::new("::".parse().unwrap(), 128).is_some());
    }

    #[test]
    fn test_subnets_v4() {
        let subnets: Vec<String> = prefix("192.168.0.0", 24)
            .subnets(2)
            .unwrap()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(
            subnets,
            vec![
                "192.168.0.0/26",
                "192.168.0.64/26",
                "192.168.0.128/26",
                "192.168.0.192/26"
            ]
        );
    }

    #[test]
    fn test_subnets_cover_whole_space() {
        let subnets: Vec<Prefix> = prefix("0.0.0.0", 0).subnets(1).unwrap().collect();
        assert_eq!(subnets, vec![prefix("0.0.0.0", 1), prefix("128.0.0.0", 1)]);

        let subnets: Vec<Prefix> = prefix("::", 0).subnets(1).unwrap().collect();
        assert_eq!(subnets, vec![prefix("::", 1), prefix("8000::", 1)]);
    }

    #[test]
    fn test_subnets_v6() {
        let subnets: Vec<String> = prefix("2001:db8::", 32)
            .subnets(3)
            .unwrap()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(subnets.len(), 8);
        assert_eq!(subnets[0], "2001:db8::/35");
        assert_eq!(subnets[1], "2001:db8:2000::/35");
        assert_eq!(subnets[7], "2001:db8:e000::/35");
    }

    #[test]
    fn test_subnets_out_of_bits() {
        assert!(prefix("10.0.0.0", 30).subnets(3).is_none());
        assert_eq!(prefix("10.0.0.0", 30).subnets(2).unwrap().count(), 4);
        assert!(prefix("::", 127).subnets(2).is_none());
        assert!(prefix("::", 0).subnets(u8::MAX).is_none());
    }

    #[test]
    fn test_display_compresses_ipv6() {
        assert_eq!(prefix("2001:0db8:0000::", 48).to_string(), "2001:db8::/48");
        assert_eq!(prefix("10.1.2.3", 8).to_string(), "10.0.0.0/8");
    }
}
