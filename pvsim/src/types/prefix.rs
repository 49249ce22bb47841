// PvSim: Path-Vector Inter-Domain Routing Simulator written in Rust
// Copyright (C) 2023 The PvSim Authors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! This module contains the definition of IPv4 address blocks, and the containment check between
//! two of them.

use std::{
    fmt::{Debug, Display},
    net::Ipv4Addr,
    str::FromStr,
};

use ipnet::Ipv4Net;
use serde::{de::Error, Deserialize, Serialize};
use thiserror::Error;

/// Error raised when an address block cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrefixError {
    /// The string is not a valid `network/length` pair, or it has host bits set.
    #[error("Malformed address block: {0}")]
    MalformedAddressBlock(String),
}

/// IPv4 address block (network address and prefix length). Parsing is strict: an address block
/// with any host bits set (like `5.1.0.0/8`) is rejected.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Ipv4Prefix(Ipv4Net);

impl Ipv4Prefix {
    /// Create a new prefix from the network address and the prefix length.
    pub fn new(addr: Ipv4Addr, len: u8) -> Result<Self, PrefixError> {
        let net = Ipv4Net::new(addr, len)
            .map_err(|_| PrefixError::MalformedAddressBlock(format!("{addr}/{len}")))?;
        Self::try_from(net)
    }

    /// Check if `self` contains `other`, or `self` is equal to `other`.
    pub fn contains(&self, other: &Self) -> bool {
        self.0.contains(&other.0)
    }

    /// Check if `self` is fully contained in `other` (or equal to it).
    pub fn is_subnet_of(&self, other: &Self) -> bool {
        other.contains(self)
    }

    /// Prefix length of the block
    pub fn prefix_len(&self) -> u8 {
        self.0.prefix_len()
    }
}

/// Returns `true` if and only if the address block `candidate` is fully contained within
/// `container`. Both arguments are given as strings in CIDR notation.
///
/// ```
/// use pvsim::types::is_subnet_of;
/// # fn main() -> Result<(), pvsim::types::PrefixError> {
/// assert!(is_subnet_of("1.23.0.0/16", "1.0.0.0/8")?);
/// assert!(!is_subnet_of("1.0.0.0/8", "1.23.0.0/16")?);
/// assert!(is_subnet_of("1.0.0.0/8", "not a prefix").is_err());
/// # Ok(())
/// # }
/// ```
pub fn is_subnet_of(candidate: &str, container: &str) -> Result<bool, PrefixError> {
    let candidate: Ipv4Prefix = candidate.parse()?;
    let container: Ipv4Prefix = container.parse()?;
    Ok(candidate.is_subnet_of(&container))
}

impl TryFrom<Ipv4Net> for Ipv4Prefix {
    type Error = PrefixError;

    fn try_from(net: Ipv4Net) -> Result<Self, Self::Error> {
        if net.trunc() != net {
            return Err(PrefixError::MalformedAddressBlock(net.to_string()));
        }
        Ok(Self(net))
    }
}

impl From<Ipv4Prefix> for Ipv4Net {
    fn from(value: Ipv4Prefix) -> Self {
        value.0
    }
}

impl FromStr for Ipv4Prefix {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let net = Ipv4Net::from_str(s.trim())
            .map_err(|_| PrefixError::MalformedAddressBlock(s.to_string()))?;
        Self::try_from(net)
    }
}

impl Display for Ipv4Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Serialize for Ipv4Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4Prefix::from_str(&s)
            .map_err(|_| D::Error::custom(format!("Expected IP Network, found {s}")))
    }
}
