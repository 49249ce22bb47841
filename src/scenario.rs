// AsNet: Scenario runner for the PvSim inter-domain routing simulator
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

//! # Scenarios
//!
//! A scenario describes the initial topology and the commands that are applied to it. Scenarios
//! are stored as JSON:
//!
//! ```json
//! {
//!   "name": "hijack",
//!   "ases": {
//!     "1": { "ips": ["10.0.0.0/8"] },
//!     "2": { "ips": [] }
//!   },
//!   "links": [
//!     { "first": { "as_number": 1, "role": "PROVIDER" },
//!       "second": { "as_number": 2, "role": "COSTUMER" } }
//!   ],
//!   "commands": [
//!     "AS 1:auto advertise on",
//!     "AS 1:advertise self",
//!     "AS 2:get route 10.0.0.0/8"
//!   ]
//! }
//! ```
//!
//! The role of `first` is installed at `first`: it is the role of `second` as seen from `first`.

use std::{collections::BTreeMap, fs, path::Path};

use log::*;
use pvsim::{
    command::Command,
    event::{EventQueue, Observation},
    network::Network,
    types::{AsId, Ipv4Prefix, Role},
};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Address blocks owned by a single AS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsConfig {
    /// Owned address blocks
    pub ips: Vec<Ipv4Prefix>,
}

/// One endpoint of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEnd {
    /// AS number of the endpoint
    pub as_number: u32,
    /// Role of the other endpoint, as seen from this one.
    pub role: Role,
}

/// Link between two ASes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// First endpoint
    pub first: LinkEnd,
    /// Second endpoint
    pub second: LinkEnd,
}

/// Topology and command sequence of a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Name of the scenario
    pub name: String,
    /// Human readable description
    #[serde(default)]
    pub description: String,
    /// All ASes, with the blocks they own.
    pub ases: BTreeMap<u32, AsConfig>,
    /// All links, in the order in which they are installed.
    #[serde(default)]
    pub links: Vec<LinkConfig>,
    /// Commands in textual form, applied in order.
    #[serde(default)]
    pub commands: Vec<String>,
}

impl Scenario {
    /// Parse a scenario from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read a scenario from a JSON file.
    pub fn from_file(file: impl AsRef<Path>) -> Result<Self, Error> {
        let file = file.as_ref();
        debug!("Read scenario from {}", file.display());
        Self::from_json_str(&fs::read_to_string(file)?)
    }

    /// Serialize the scenario as a pretty-printed JSON string.
    pub fn to_json_str(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the scenario to a JSON file. This function will overwrite any existing file.
    pub fn write_json(&self, file: impl AsRef<Path>) -> Result<(), Error> {
        fs::write(file, self.to_json_str()?)?;
        Ok(())
    }

    /// Create the network with all ASes and links of the scenario. No message is exchanged,
    /// and none of the commands is applied.
    pub fn build_network(&self) -> Result<Network, Error> {
        let mut net = Network::default();
        for (asn, config) in self.ases.iter() {
            net.add_as(*asn, config.ips.iter().copied())?;
        }
        for link in self.links.iter() {
            net.add_link(
                AsId(link.first.as_number),
                AsId(link.second.as_number),
                link.first.role,
                link.second.role,
            )?;
        }
        info!(
            "{}: {} ASes and {} links initialized.",
            self.name,
            net.num_nodes(),
            self.links.len()
        );
        Ok(net)
    }

    /// Parse all commands of the scenario.
    pub fn parse_commands(&self) -> Result<Vec<Command>, Error> {
        self.commands
            .iter()
            .map(|c| c.parse().map_err(|e| Error::Command(c.clone(), e)))
            .collect()
    }

    /// Apply all commands of the scenario on `net`, and return everything that was observed in
    /// the process. All commands are parsed before the first one is applied.
    pub fn run_on<Q: EventQueue>(&self, net: &mut Network<Q>) -> Result<Vec<Observation>, Error> {
        for command in self.parse_commands()? {
            debug!("{}: {command}", self.name);
            net.apply(command)?;
        }
        Ok(net.take_observations())
    }

    /// Build the network and apply all commands.
    pub fn run(&self) -> Result<Vec<Observation>, Error> {
        let mut net = self.build_network()?;
        self.run_on(&mut net)
    }
}
