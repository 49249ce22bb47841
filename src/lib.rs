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

//! # AsNet: run inter-domain routing scenarios on PvSim
//!
//! This crate loads routing scenarios (a set of ASes with their address blocks, role-tagged links
//! between them, and a sequence of textual commands), runs them on a [`pvsim::network::Network`],
//! and reports what the ASes observe: the answers to route queries and the detected hijacks.
//!
//! ```
//! use asnet::{Builtin, Scenario};
//!
//! # fn main() -> Result<(), asnet::Error> {
//! let scenario: Scenario = Builtin::SubnetLookup.scenario()?;
//! let observations = scenario.run()?;
//! assert_eq!(observations[0].to_string(), "AS 3: [1, 3] 1.23.0.0/16");
//! # Ok(())
//! # }
//! ```
//!
//! ## Structure
//! - The module [`scenario`] defines the JSON format of a scenario, and the functions to build
//!   the network and to apply all commands.
//! - The module [`builtin`] contains the reference topology with six ASes, and the eight
//!   reference command sequences that exercise hijacks, withdrawals, link failures and subnet
//!   lookups.

#![deny(
    missing_docs,
    clippy::missing_docs_in_private_items,
    missing_debug_implementations,
    rust_2018_idioms
)]

pub mod builtin;
pub mod scenario;
#[cfg(test)]
mod test;

pub use builtin::Builtin;
pub use scenario::Scenario;

use pvsim::{
    command::CommandError,
    types::{NetworkError, PrefixError},
};
use thiserror::Error;

/// Error thrown while loading or running a scenario
#[derive(Debug, Error)]
pub enum Error {
    /// The network could not be built, or a command failed.
    #[error("{0}")]
    Network(#[from] NetworkError),
    /// A command of the scenario could not be parsed.
    #[error("Invalid command {0:?}: {1}")]
    Command(String, CommandError),
    /// An address block could not be parsed.
    #[error("{0}")]
    Prefix(#[from] PrefixError),
    /// The scenario file could not be read or written.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// The scenario file is not valid JSON.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
