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

//! # Commands
//!
//! Typed commands that drive the simulation, together with a parser for their textual form:
//!
//! ```text
//! AS 3:advertise all
//! AS 3:advertise self
//! AS 3:get route 5.0.0.0/8
//! AS 3:hijack 5.0.0.0/8
//! AS 3:withdrawn 33.0.0.0/8
//! AS 3:auto advertise on
//! link create 2 5 COSTUMER PROVIDER
//! link delete 2 5
//! ```

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AsId, InvalidRole, Ipv4Prefix, PrefixError, Role};

/// Command executed on a single AS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeCommand {
    /// Re-advertise every learned route to every neighbor, subject to the export policy.
    AdvertiseAll,
    /// Advertise every owned block to every neighbor.
    AdvertiseSelf,
    /// Query the route towards an address block.
    GetRoute(Ipv4Prefix),
    /// Advertise an address block that is not owned by this AS.
    Hijack(Ipv4Prefix),
    /// Withdraw an owned block, or a learned route.
    Withdraw(Ipv4Prefix),
    /// Handle the removal of the link towards the given neighbor.
    LinkDelete(AsId),
    /// Handle the creation of the link towards the given neighbor.
    LinkCreate(AsId),
    /// Re-advertise all routes after every accepted update.
    AutoAdvertiseOn,
}

/// Command applied to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Execute a command on the given AS
    Node(AsId, NodeCommand),
    /// Connect `a` and `b`. `role_a` is the role of `b` seen from `a`, and vice versa.
    LinkCreate {
        /// First AS
        a: AsId,
        /// Second AS
        b: AsId,
        /// Role of the edge installed at `a`
        role_a: Role,
        /// Role of the edge installed at `b`
        role_b: Role,
    },
    /// Disconnect `a` and `b`.
    LinkDelete(AsId, AsId),
}

/// Error when parsing a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The verb is not known.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    /// An argument is missing
    #[error("Missing argument in command: {0}")]
    MissingArgument(String),
    /// The AS number cannot be parsed
    #[error("Invalid AS number: {0}")]
    InvalidAsNumber(String),
    /// The role cannot be parsed
    #[error("{0}")]
    InvalidRole(#[from] InvalidRole),
    /// The address block cannot be parsed
    #[error("{0}")]
    PrefixError(#[from] PrefixError),
}

fn parse_asn(s: &str) -> Result<AsId, CommandError> {
    s.trim()
        .parse::<u32>()
        .map(AsId)
        .map_err(|_| CommandError::InvalidAsNumber(s.to_string()))
}

impl FromStr for NodeCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        Ok(match words.as_slice() {
            ["advertise", "all"] => NodeCommand::AdvertiseAll,
            ["advertise", "self"] => NodeCommand::AdvertiseSelf,
            ["auto", "advertise", "on"] => NodeCommand::AutoAdvertiseOn,
            ["get", "route", p] => NodeCommand::GetRoute(p.parse()?),
            ["hijack", p] => NodeCommand::Hijack(p.parse()?),
            ["withdrawn" | "withdraw", p] => NodeCommand::Withdraw(p.parse()?),
            ["link", "delete", n] => NodeCommand::LinkDelete(parse_asn(n)?),
            ["link", "create", n] => NodeCommand::LinkCreate(parse_asn(n)?),
            ["get", "route"]
            | ["hijack"]
            | ["withdrawn" | "withdraw"]
            | ["link", "delete" | "create"] => {
                return Err(CommandError::MissingArgument(s.to_string()))
            }
            _ => return Err(CommandError::UnknownCommand(s.to_string())),
        })
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((target, command)) = s.split_once(':') {
            let asn = target
                .trim()
                .strip_prefix("AS")
                .ok_or_else(|| CommandError::UnknownCommand(s.to_string()))?;
            return Ok(Command::Node(parse_asn(asn)?, command.parse()?));
        }

        let words: Vec<&str> = s.split_whitespace().collect();
        match words.as_slice() {
            ["link", "create", a, b, role_a, role_b] => Ok(Command::LinkCreate {
                a: parse_asn(a)?,
                b: parse_asn(b)?,
                role_a: role_a.parse()?,
                role_b: role_b.parse()?,
            }),
            ["link", "delete", a, b] => Ok(Command::LinkDelete(parse_asn(a)?, parse_asn(b)?)),
            ["link", "create" | "delete", ..] => Err(CommandError::MissingArgument(s.to_string())),
            _ => Err(CommandError::UnknownCommand(s.to_string())),
        }
    }
}

impl Display for NodeCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeCommand::AdvertiseAll => write!(f, "advertise all"),
            NodeCommand::AdvertiseSelf => write!(f, "advertise self"),
            NodeCommand::GetRoute(p) => write!(f, "get route {p}"),
            NodeCommand::Hijack(p) => write!(f, "hijack {p}"),
            NodeCommand::Withdraw(p) => write!(f, "withdrawn {p}"),
            NodeCommand::LinkDelete(n) => write!(f, "link delete {}", n.0),
            NodeCommand::LinkCreate(n) => write!(f, "link create {}", n.0),
            NodeCommand::AutoAdvertiseOn => write!(f, "auto advertise on"),
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Node(asn, cmd) => write!(f, "AS {}:{cmd}", asn.0),
            Command::LinkCreate {
                a,
                b,
                role_a,
                role_b,
            } => write!(f, "link create {} {} {role_a} {role_b}", a.0, b.0),
            Command::LinkDelete(a, b) => write!(f, "link delete {} {}", a.0, b.0),
        }
    }
}
