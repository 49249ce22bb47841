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

//! Module containing all type definitions

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod prefix;
pub use prefix::{is_subnet_of, Ipv4Prefix, PrefixError};

use crate::link::LinkError;

/// AS Number
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AsId(pub u32);

impl std::fmt::Display for AsId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AS{}", self.0)
    }
}

impl From<u32> for AsId {
    fn from(x: u32) -> Self {
        Self(x)
    }
}

impl From<usize> for AsId {
    fn from(x: usize) -> Self {
        Self(x as u32)
    }
}

impl From<i32> for AsId {
    fn from(x: i32) -> Self {
        Self(x as u32)
    }
}

impl<T> From<&T> for AsId
where
    T: Into<AsId> + Copy,
{
    fn from(x: &T) -> Self {
        (*x).into()
    }
}

/// AS-Path of a route. The origin of the route comes first, and every AS that propagates the
/// route appends itself.
pub type AsPath = Vec<AsId>;

/// Business relationship of a neighbor, seen from the local AS. An edge with role `Customer`
/// means that the neighbor is a customer of the local AS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The neighbor pays the local AS for transit.
    #[serde(alias = "COSTUMER", alias = "CUSTOMER", alias = "customer")]
    Customer,
    /// Settlement-free peering.
    #[serde(alias = "PEER", alias = "peer")]
    Peer,
    /// The local AS pays the neighbor for transit.
    #[serde(alias = "PROVIDER", alias = "provider")]
    Provider,
}

impl Role {
    /// Preference of a route learned from a neighbor with this role. Routes with a higher
    /// preference are selected first.
    pub fn preference(&self) -> i8 {
        match self {
            Role::Customer => -1,
            Role::Peer => 0,
            Role::Provider => 1,
        }
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.preference().cmp(&other.preference())
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Customer => f.write_str("Customer"),
            Role::Peer => f.write_str("Peer"),
            Role::Provider => f.write_str("Provider"),
        }
    }
}

/// Error when parsing a [`Role`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid role: {0}")]
pub struct InvalidRole(pub String);

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `COSTUMER` is the spelling used by the reference topologies.
        match s.to_lowercase().as_str() {
            "customer" | "costumer" => Ok(Role::Customer),
            "peer" => Ok(Role::Peer),
            "provider" => Ok(Role::Provider),
            _ => Err(InvalidRole(s.to_string())),
        }
    }
}

/// Errors raised on a single AS node.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DeviceError {
    /// The link refused to deliver a message.
    #[error("Link Error: {0}")]
    LinkError(#[from] LinkError),
    /// The AS has no edge towards the given neighbor.
    #[error("{0} has no link to {1}")]
    UnknownNeighbor(AsId, AsId),
}

/// Network Errors
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Device Error which cannot be handled
    #[error("Device Error: {0}")]
    DeviceError(#[from] DeviceError),
    /// Address block cannot be parsed
    #[error("{0}")]
    PrefixError(#[from] PrefixError),
    /// Device is not present in the topology
    #[error("AS was not found in topology: {0}")]
    DeviceNotFound(AsId),
    /// An AS with the same number already exists
    #[error("AS already exists in topology: {0}")]
    DeviceExists(AsId),
    /// Link does not exist
    #[error("Link does not exist: {0} -- {1}")]
    LinkNotFound(AsId, AsId),
    /// An AS cannot be connected to itself.
    #[error("Cannot connect {0} to itself")]
    SelfLoop(AsId),
    /// The two ASes are already connected.
    #[error("Link already exists: {0} -- {1}")]
    LinkExists(AsId, AsId),
    /// Convergence Problem
    #[error("Network cannot converge within the message limit!")]
    NoConvergence,
    /// Json error
    #[error("{0}")]
    JsonError(Box<serde_json::Error>),
}

impl From<serde_json::Error> for NetworkError {
    fn from(value: serde_json::Error) -> Self {
        Self::JsonError(Box::new(value))
    }
}

impl From<LinkError> for NetworkError {
    fn from(value: LinkError) -> Self {
        Self::DeviceError(value.into())
    }
}

impl PartialEq for NetworkError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DeviceError(l0), Self::DeviceError(r0)) => l0 == r0,
            (Self::PrefixError(l0), Self::PrefixError(r0)) => l0 == r0,
            (Self::DeviceNotFound(l0), Self::DeviceNotFound(r0)) => l0 == r0,
            (Self::DeviceExists(l0), Self::DeviceExists(r0)) => l0 == r0,
            (Self::LinkNotFound(l0, l1), Self::LinkNotFound(r0, r1)) => l0 == r0 && l1 == r1,
            (Self::SelfLoop(l0), Self::SelfLoop(r0)) => l0 == r0,
            (Self::LinkExists(l0, l1), Self::LinkExists(r0, r1)) => l0 == r0 && l1 == r1,
            (Self::JsonError(l), Self::JsonError(r)) => l.to_string() == r.to_string(),
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}
