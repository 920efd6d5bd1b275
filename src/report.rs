use crate::{
    config::Options,
    error::Error,
    format::{bin, explode},
    net::Prefix,
    parse::{parse, ParsedInput},
};
use colored::{ColoredString, Colorize};
use std::fmt::{Display, Write};
use tracing::debug;

fn purple(s: impl Display) -> ColoredString {
    s.to_string().truecolor(0xd7, 0xaf, 0xff)
}

fn pink(s: impl Display) -> ColoredString {
    s.to_string().truecolor(0xff, 0x87, 0xd7)
}

fn yellow(s: impl Display) -> ColoredString {
    s.to_string().truecolor(0xff, 0xff, 0xaf)
}

fn green(s: impl Display) -> ColoredString {
    s.to_string().truecolor(0x87, 0xff, 0x87)
}

/// Detail blocks for every argument, in order. Nothing is returned if any
/// argument fails to parse.
pub fn details<S: AsRef<str>>(args: &[S], opts: &Options) -> Result<String, Error> {
    let mut out = String::new();

    for (idx, arg) in args.iter().enumerate() {
        let parsed = parse(arg.as_ref())?;
        if idx != 0 {
            out.push('\n');
        }
        write_details(&mut out, &parsed, opts)?;
    }

    Ok(out)
}

fn write_details(out: &mut String, parsed: &ParsedInput, opts: &Options) -> Result<(), Error> {
    let prefix = &parsed.prefix;

    writeln!(out, "> {}", purple(prefix))?;
    writeln!(out, "  Addresses: {}", pink(prefix.num_addresses()))?;
    writeln!(out, "  Netmask:   {}", yellow(explode(prefix.netmask(), opts)))?;
    writeln!(out, "  Wildcard:  {}", yellow(explode(prefix.hostmask(), opts)))?;
    writeln!(out, "  First:     {}", green(explode(prefix.network(), opts)))?;
    if parsed.differs() {
        writeln!(out, "  Input:     {}", explode(parsed.address, opts))?;
    }
    writeln!(out, "  Last:      {}", green(explode(prefix.last(), opts)))?;

    if opts.verbose {
        let split = prefix.cidr();
        writeln!(out, "  First:     {}", bin(prefix.network(), split))?;
        if parsed.differs() {
            writeln!(out, "  Input:     {}", bin(parsed.address, split))?;
        }
        writeln!(out, "  Last:      {}", bin(prefix.last(), split))?;
    }

    Ok(())
}

/// Number of extra prefix bits needed for `n` subnets. `n` must be a power of
/// two and at least 2.
pub fn split_bits(n: i64) -> Result<u8, Error> {
    if n < 2 || n & (n - 1) != 0 {
        return Err(Error::NotPowerOfTwo);
    }
    // n < 2^63
    Ok(n.trailing_zeros() as u8)
}

/// Splits `prefix` into `n` equal subnets.
pub fn subnets(prefix: &str, n: &str, opts: &Options) -> Result<String, Error> {
    let parsed = parse(prefix)?;
    let count: i64 = n.parse().map_err(|_| Error::InvalidNumber(n.to_owned()))?;
    let extra = split_bits(count)?;

    let base = parsed.prefix;
    let subnets = base.subnets(extra).ok_or_else(|| Error::TooManySubnets {
        prefix: base.to_string(),
        n: count,
    })?;
    debug!(%base, extra, "splitting prefix");

    let mut out = String::new();
    if opts.verbose {
        for (idx, subnet) in subnets.enumerate() {
            if idx != 0 {
                out.push('\n');
            }
            write_subnet(&mut out, &subnet, opts)?;
        }
    } else {
        let list = subnets
            .map(|subnet| subnet.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "> {}", purple(list))?;
    }

    Ok(out)
}

fn write_subnet(out: &mut String, prefix: &Prefix, opts: &Options) -> Result<(), Error> {
    writeln!(out, "> {}", purple(prefix))?;
    writeln!(out, "  Addresses: {}", pink(prefix.num_addresses()))?;
    writeln!(out, "  Netmask:   {}", yellow(explode(prefix.netmask(), opts)))?;
    writeln!(out, "  First:     {}", green(explode(prefix.network(), opts)))?;
    writeln!(out, "  Last:      {}", green(explode(prefix.last(), opts)))?;
    Ok(())
}
