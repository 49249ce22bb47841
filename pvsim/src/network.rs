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

//! # Top-level Network module
//!
//! This module holds all AS nodes, wires links between them, and handles all events exchanged
//! between them. Every command is followed by a convergence phase, in which the event queue is
//! processed until it is empty.

use crate::{
    command::{Command, NodeCommand},
    event::{BasicEventQueue, Event, EventQueue, Observation},
    link::{Edge, Link},
    node::AsNode,
    types::{AsId, AsPath, Ipv4Prefix, NetworkError, Role},
};

use log::*;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;

static DEFAULT_STOP_AFTER: usize = 1_000_000;

/// # Network struct
/// The struct manages all AS nodes, and handles all events between them.
///
/// ```rust
/// use pvsim::prelude::*;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut net = Network::default();
///     let prefix: Ipv4Prefix = "10.0.0.0/8".parse()?;
///
///     // AS 2 is the provider of AS 1.
///     let a1 = net.add_as(1, [prefix])?;
///     let a2 = net.add_as(2, [])?;
///     net.add_link(a1, a2, Role::Provider, Role::Customer)?;
///
///     net.exec(a1, NodeCommand::AdvertiseSelf)?;
///     assert_eq!(
///         net.get_route(a2, "10.1.0.0/16".parse()?)?,
///         Some((prefix, vec![a1, a2]))
///     );
///
///     Ok(())
/// }
/// ```
///
/// ## Type arguments
///
/// `Q` is the kind of [`EventQueue`] used in the network. The queue determines the order in which
/// events are processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network<Q = BasicEventQueue> {
    pub(crate) nodes: BTreeMap<AsId, AsNode>,
    pub(crate) observations: Vec<Observation>,
    pub(crate) stop_after: Option<usize>,
    pub(crate) queue: Q,
    pub(crate) verbose: bool,
}

impl Default for Network<BasicEventQueue> {
    fn default() -> Self {
        Self::new(BasicEventQueue::new())
    }
}

impl<Q> Network<Q> {
    /// Generate an empty Network
    pub fn new(queue: Q) -> Self {
        Self {
            nodes: BTreeMap::new(),
            observations: Vec::new(),
            stop_after: Some(DEFAULT_STOP_AFTER),
            queue,
            verbose: false,
        }
    }

    /// Add a new AS to the topology, originating the given address blocks.
    pub fn add_as(
        &mut self,
        asn: impl Into<AsId>,
        blocks: impl IntoIterator<Item = Ipv4Prefix>,
    ) -> Result<AsId, NetworkError> {
        let asn = asn.into();
        if self.nodes.contains_key(&asn) {
            return Err(NetworkError::DeviceExists(asn));
        }
        self.nodes.insert(asn, AsNode::new(asn, blocks));
        Ok(asn)
    }

    /// Connect two ASes with a link. `role_a` is the role of `b` seen from `a` (the role of the
    /// edge installed at `a`), and `role_b` is the role of `a` seen from `b`. This only installs
    /// the edges; no message is exchanged. Use [`Network::create_link`] to also bring both ASes
    /// up to date.
    pub fn add_link(
        &mut self,
        a: AsId,
        b: AsId,
        role_a: Role,
        role_b: Role,
    ) -> Result<(), NetworkError> {
        if a == b {
            return Err(NetworkError::SelfLoop(a));
        }
        let node_a = self.get_node(a)?;
        let node_b = self.get_node(b)?;
        // a link deleted on one side only still blocks the other side.
        if node_a.get_edge(b).is_some() || node_b.get_edge(a).is_some() {
            return Err(NetworkError::LinkExists(a, b));
        }

        debug!("Add link {a} ({role_a}) -- {b} ({role_b})");
        let link = Link::new(a, b);
        if let Some(node) = self.nodes.get_mut(&a) {
            node.add_edge(Edge::new(a, b, link, role_a));
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.add_edge(Edge::new(b, a, link, role_b));
        }
        Ok(())
    }

    /// Returns a reference to an AS node.
    pub fn get_node(&self, asn: impl Into<AsId>) -> Result<&AsNode, NetworkError> {
        let asn = asn.into();
        self.nodes.get(&asn).ok_or(NetworkError::DeviceNotFound(asn))
    }

    /// Iterate over all AS nodes, ordered by AS number.
    pub fn nodes(&self) -> impl Iterator<Item = &AsNode> {
        self.nodes.values()
    }

    /// Return the AS numbers of all nodes in the network.
    pub fn get_ases(&self) -> Vec<AsId> {
        self.nodes.keys().copied().collect()
    }

    /// Return the number of AS nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return every link in the network exactly once.
    pub fn get_links(&self) -> Vec<Link> {
        self.nodes
            .values()
            .flat_map(|n| n.edges().iter())
            .filter(|e| e.own < e.peer)
            .map(|e| e.link)
            .collect()
    }

    /// Lookup the route of `asn` towards `prefix`, without recording an observation.
    pub fn get_route(
        &self,
        asn: impl Into<AsId>,
        prefix: Ipv4Prefix,
    ) -> Result<Option<(Ipv4Prefix, AsPath)>, NetworkError> {
        Ok(self.get_node(asn)?.get_route(&prefix))
    }

    /// Configure the maximum number of events processed after a single command. If `None` is
    /// given, the network tries to converge forever.
    pub fn set_msg_limit(&mut self, stop_after: Option<usize>) {
        self.stop_after = stop_after;
    }

    /// Set the network into verbose mode (or not). In verbose mode, every processed event is
    /// printed.
    pub fn verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// All observations recorded so far (route queries and hijack detections), in order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Remove and return all recorded observations.
    pub fn take_observations(&mut self) -> Vec<Observation> {
        std::mem::take(&mut self.observations)
    }

    /// Get a reference to the queue
    pub fn queue(&self) -> &Q {
        &self.queue
    }
}

impl<Q: EventQueue> Network<Q> {
    /// Execute a command on a single AS, and simulate the network until it has converged.
    pub fn exec(
        &mut self,
        asn: impl Into<AsId>,
        command: NodeCommand,
    ) -> Result<(), NetworkError> {
        let asn = asn.into();
        let (observations, events) = self
            .nodes
            .get_mut(&asn)
            .ok_or(NetworkError::DeviceNotFound(asn))?
            .handle_command(command)?;
        self.record(observations);
        self.enqueue_events(events);
        self.simulate()
    }

    /// Apply a command to the network, and simulate the network until it has converged.
    pub fn apply(&mut self, command: Command) -> Result<(), NetworkError> {
        match command {
            Command::Node(asn, cmd) => self.exec(asn, cmd),
            Command::LinkCreate {
                a,
                b,
                role_a,
                role_b,
            } => self.create_link(a, b, role_a, role_b),
            Command::LinkDelete(a, b) => self.delete_link(a, b),
        }
    }

    /// Connect two ASes (see [`Network::add_link`]), and let both of them advertise their routes
    /// over the new link.
    pub fn create_link(
        &mut self,
        a: AsId,
        b: AsId,
        role_a: Role,
        role_b: Role,
    ) -> Result<(), NetworkError> {
        self.add_link(a, b, role_a, role_b)?;
        self.exec(a, NodeCommand::LinkCreate(b))?;
        self.exec(b, NodeCommand::LinkCreate(a))
    }

    /// Simulate a link failure between `a` and `b`. Both ASes remove their edge, drop the
    /// affected routes, and propagate the failure.
    pub fn delete_link(&mut self, a: AsId, b: AsId) -> Result<(), NetworkError> {
        let connected = self.get_node(a)?.get_edge(b).is_some()
            && self.get_node(b)?.get_edge(a).is_some();
        if !connected {
            return Err(NetworkError::LinkNotFound(a, b));
        }
        debug!("Simulate link failure: {a} -- {b}");
        self.exec(a, NodeCommand::LinkDelete(b))?;
        self.exec(b, NodeCommand::LinkDelete(a))
    }

    /// Simulate the network behavior, given the current event queue. This function will execute
    /// all events (that may trigger new events), until either the event queue is empty (i.e., the
    /// network has converged), or until the maximum allowed events have been processed (which can
    /// be set by `self.set_msg_limit`).
    pub fn simulate(&mut self) -> Result<(), NetworkError> {
        let mut remaining_iter = self.stop_after;
        while !self.queue.is_empty() {
            if let Some(rem) = remaining_iter {
                if rem == 0 {
                    debug!("Network could not converge!");
                    return Err(NetworkError::NoConvergence);
                }
                remaining_iter = Some(rem - 1);
            }
            self.simulate_step()?;
        }

        Ok(())
    }

    /// Process the next event on the queue. In comparison to [`Network::simulate`], this
    /// function will not execute any subsequent event. If this function returns `Ok(None)`,
    /// then no event was enqueued.
    pub fn simulate_step(&mut self) -> Result<Option<Event>, NetworkError> {
        let event = match self.queue.pop() {
            Some(event) => event,
            None => return Ok(None),
        };
        trace!("{event}");
        let target = event.target();
        let (observations, events) = self
            .nodes
            .get_mut(&target)
            .ok_or(NetworkError::DeviceNotFound(target))?
            .handle_event(event.clone())?;

        if self.verbose {
            println!("{event} | Triggered {} events", events.len());
        }

        self.record(observations);
        self.enqueue_events(events);
        Ok(Some(event))
    }

    fn record(&mut self, observations: Vec<Observation>) {
        for o in observations.iter() {
            if let Observation::Hijack { .. } = o {
                info!("{o}");
            }
        }
        self.observations.extend(observations);
    }

    /// Enqueue all events
    #[inline(always)]
    pub(crate) fn enqueue_events(&mut self, events: Vec<Event>) {
        events.into_iter().for_each(|e| self.queue.push(e))
    }
}

impl<Q: Serialize> Network<Q> {
    /// Export the network (nodes, tables, observations and pending events) as a JSON string.
    pub fn as_json_str(&self) -> Result<String, NetworkError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<Q: DeserializeOwned> Network<Q> {
    /// Restore a network that was exported with [`Network::as_json_str`].
    pub fn from_json_str(s: &str) -> Result<Self, NetworkError> {
        Ok(serde_json::from_str(s)?)
    }
}

impl<Q: PartialEq> PartialEq for Network<Q> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.queue == other.queue
    }
}
