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

#![deny(missing_docs, missing_debug_implementations)]

//! # PvSim
//!
//! This is a library for simulating inter-domain routing between autonomous systems (ASes) with
//! a path-vector protocol modeled on BGP.
//!
//! ## Main Concepts
//!
//! The [`network::Network`] is the main datastructure to operate on. It holds every
//! [`node::AsNode`], and the nodes are connected with [`link::Link`]s. Every edge of a node is
//! tagged with the business relationship ([`types::Role`]) of the neighbor: customer, peer, or
//! provider.
//!
//! Each AS only knows its own address blocks and the best path it learned for every other
//! block. Routes are advertised, selected, withdrawn and hijacked by exchanging
//! [`event::Message`]s over the links. A message sent over a link becomes an
//! [`event::Event`] on the network's [`event::EventQueue`]. After every command, the network
//! processes the queue until it is empty (i.e., until it has converged).
//!
//! Route selection prefers routes learned from providers over peers over customers, then
//! shorter paths, then the neighbor with the smaller AS number. Once a block is known, its
//! origin is pinned: advertisements with a different origin are rejected and reported as a
//! hijack ([`event::Observation::Hijack`]).
//!
//! ## Example usage
//!
//! ```
//! use pvsim::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut net = Network::default();
//!     let p: Ipv4Prefix = "5.0.0.0/8".parse()?;
//!
//!     // AS 2 is the provider of both AS 1 and AS 3.
//!     let a1 = net.add_as(1, [])?;
//!     let a2 = net.add_as(2, [])?;
//!     let a3 = net.add_as(3, [p])?;
//!     net.add_link(a1, a2, Role::Provider, Role::Customer)?;
//!     net.add_link(a3, a2, Role::Provider, Role::Customer)?;
//!
//!     for asn in net.get_ases() {
//!         net.exec(asn, NodeCommand::AutoAdvertiseOn)?;
//!     }
//!     net.exec(a3, NodeCommand::AdvertiseSelf)?;
//!     assert_eq!(net.get_route(a1, p)?, Some((p, vec![a3, a2, a1])));
//!
//!     // AS 1 tries to hijack the prefix, but AS 2 already trusts AS 3.
//!     net.exec(a1, NodeCommand::Hijack(p))?;
//!     assert_eq!(net.observations().last().unwrap().to_string(), "AS 2: 5.0.0.0/8 hijacked.");
//!
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod event;
pub mod formatter;
pub mod link;
pub mod network;
pub mod node;
pub mod prelude;
pub mod types;

#[cfg(test)]
mod test;
