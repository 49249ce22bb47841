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

//! Module defining an AS node with path-vector routing functionality.
//!
//! An [`AsNode`] only knows its own address blocks, its edges towards its neighbors, and the best
//! path it has learned for every address block. It never looks at the state of any other node.
//! Every effect on the rest of the network is expressed as an [`Event`] that was produced by one
//! of its [`Edge`]s.

use crate::{
    command::NodeCommand,
    event::{Event, EventOutcome, Message, Observation},
    formatter::fmt_path,
    link::Edge,
    types::{AsId, AsPath, DeviceError, Ipv4Prefix, Role},
};
use itertools::Itertools;
use log::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Table of all learned routes. Entries are kept in the order in which their address block was
/// first learned. Replacing the path of a known block keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable(Vec<(Ipv4Prefix, AsPath)>);

impl RouteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the path stored for exactly this block.
    pub fn get(&self, prefix: &Ipv4Prefix) -> Option<&AsPath> {
        self.0.iter().find(|(p, _)| p == prefix).map(|(_, path)| path)
    }

    /// Insert a path. If the block was already known, the old path is replaced and returned.
    pub fn insert(&mut self, prefix: Ipv4Prefix, path: AsPath) -> Option<AsPath> {
        match self.0.iter_mut().find(|(p, _)| *p == prefix) {
            Some((_, old)) => Some(std::mem::replace(old, path)),
            None => {
                self.0.push((prefix, path));
                None
            }
        }
    }

    /// Remove the path for exactly this block.
    pub fn remove(&mut self, prefix: &Ipv4Prefix) -> Option<AsPath> {
        let pos = self.0.iter().position(|(p, _)| p == prefix)?;
        Some(self.0.remove(pos).1)
    }

    /// Iterate over all entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&Ipv4Prefix, &AsPath)> {
        self.0.iter().map(|(p, path)| (p, path))
    }

    /// Return the first entry (in table order) whose block contains `prefix`. This is not a
    /// longest-prefix match: if several entries cover `prefix`, the one learned first is
    /// returned.
    pub fn covering(&self, prefix: &Ipv4Prefix) -> Option<(&Ipv4Prefix, &AsPath)> {
        self.iter().find(|(p, _)| p.contains(prefix))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Autonomous System running the path-vector protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsNode {
    /// AS number
    asn: AsId,
    /// Address blocks originated by this AS
    pub(crate) owned: Vec<Ipv4Prefix>,
    /// Edges towards all neighbors, in the order in which they were connected.
    pub(crate) edges: Vec<Edge>,
    /// Best known path for every learned address block.
    pub(crate) table: RouteTable,
    /// If set, every accepted table update is immediately re-advertised.
    pub(crate) auto_advertise: bool,
}

impl AsNode {
    pub(crate) fn new(asn: AsId, owned: impl IntoIterator<Item = Ipv4Prefix>) -> Self {
        Self {
            asn,
            owned: owned.into_iter().unique().collect(),
            edges: Vec::new(),
            table: RouteTable::new(),
            auto_advertise: false,
        }
    }

    /// Return the AS number
    pub fn asn(&self) -> AsId {
        self.asn
    }

    /// Return all address blocks originated by this AS.
    pub fn owned_blocks(&self) -> &[Ipv4Prefix] {
        &self.owned
    }

    /// Return all edges in connection order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Return the table of learned routes.
    pub fn route_table(&self) -> &RouteTable {
        &self.table
    }

    /// Returns `true` if auto-advertise is enabled.
    pub fn auto_advertise(&self) -> bool {
        self.auto_advertise
    }

    /// Get the edge towards `peer`.
    pub fn get_edge(&self, peer: AsId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.peer == peer)
    }

    /// Get the relationship of `peer` towards this AS.
    pub fn get_role(&self, peer: AsId) -> Option<Role> {
        self.get_edge(peer).map(|e| e.role)
    }

    /// Lookup the route towards `prefix`. Returns the covering table entry together with the
    /// full path (ending with this AS), or `None` if no learned block contains `prefix`.
    pub fn get_route(&self, prefix: &Ipv4Prefix) -> Option<(Ipv4Prefix, AsPath)> {
        self.table.covering(prefix).map(|(block, path)| {
            let mut path = path.clone();
            path.push(self.asn);
            (*block, path)
        })
    }

    /// Get a string representing the route table.
    pub fn fmt_route_table(&self) -> String {
        let owned = self
            .owned
            .iter()
            .map(|block| format!("{} {block}: origin\n", self.asn));
        let learned = self.table.iter().map(|(block, path)| {
            let role = path
                .last()
                .and_then(|hop| self.get_role(*hop))
                .map(|r| r.to_string())
                .unwrap_or_else(|| "?".to_string());
            format!("{} {block}: {} (via {role})\n", self.asn, fmt_path(path))
        });
        owned.chain(learned).collect()
    }

    /// Install a new edge. The caller is responsible for calling [`NodeCommand::LinkCreate`]
    /// afterwards if the neighbor should be brought up to date.
    pub(crate) fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Execute a command on this AS. This function returns all observations and all events
    /// triggered by the command.
    pub(crate) fn handle_command(
        &mut self,
        command: NodeCommand,
    ) -> Result<EventOutcome, DeviceError> {
        debug!("{}: {}", self.asn, command);
        match command {
            NodeCommand::AdvertiseAll => Ok((Vec::new(), self.advertise_all()?)),
            NodeCommand::AdvertiseSelf => Ok((Vec::new(), self.advertise_self()?)),
            NodeCommand::GetRoute(prefix) => Ok((
                vec![Observation::Route {
                    asn: self.asn,
                    query: prefix,
                    route: self.get_route(&prefix),
                }],
                Vec::new(),
            )),
            NodeCommand::Hijack(prefix) => Ok((Vec::new(), self.hijack(prefix)?)),
            NodeCommand::Withdraw(prefix) => Ok((Vec::new(), self.withdraw_prefix(prefix)?)),
            NodeCommand::LinkDelete(peer) => Ok((Vec::new(), self.link_delete(peer)?)),
            NodeCommand::LinkCreate(peer) => Ok((Vec::new(), self.link_create(peer)?)),
            NodeCommand::AutoAdvertiseOn => {
                self.auto_advertise = true;
                Ok((Vec::new(), Vec::new()))
            }
        }
    }

    /// handle an `Event`. This function returns all observations and all events triggered by this
    /// function.
    pub(crate) fn handle_event(&mut self, event: Event) -> Result<EventOutcome, DeviceError> {
        if event.target() != self.asn {
            error!("Received a message that is not targeted at this AS! Ignore the event!");
            return Ok((Vec::new(), Vec::new()));
        }
        let from = event.source();
        if self.get_edge(from).is_none() {
            match event.message().prefix() {
                Some(prefix) => warn!(
                    "{}: Received a message for {prefix} from {from}, which is not a neighbor! Ignore event!",
                    self.asn
                ),
                None => warn!(
                    "{}: Received a message from {from}, which is not a neighbor! Ignore event!",
                    self.asn
                ),
            }
            return Ok((Vec::new(), Vec::new()));
        }
        let Event::Msg(_, _, msg) = event;
        match msg {
            Message::Advertise { path, prefix } => self.receive_advertisement(path, prefix, from),
            Message::WithdrawPrefix(prefix) => Ok((Vec::new(), self.withdraw_prefix(prefix)?)),
            Message::WithdrawPath(a, b) => Ok((Vec::new(), self.withdraw_path(a, b)?)),
        }
    }

    /// Decision process for a received advertisement.
    fn receive_advertisement(
        &mut self,
        path: AsPath,
        prefix: Ipv4Prefix,
        from: AsId,
    ) -> Result<EventOutcome, DeviceError> {
        let origin = match path.first() {
            Some(origin) => *origin,
            None => {
                warn!("{}: Received an advertisement with an empty path!", self.asn);
                return Ok((Vec::new(), Vec::new()));
            }
        };

        if path.contains(&self.asn) {
            trace!("{}: Ignore advertisement for {prefix} that contains self.", self.asn);
            return Ok((Vec::new(), Vec::new()));
        }

        let accept = match self.table.get(&prefix) {
            Some(current) if current.first() != Some(&origin) => {
                let trusted = current[0];
                info!(
                    "{}: {prefix} hijacked! Trusted origin {trusted}, claimed origin {origin}",
                    self.asn
                );
                return Ok((
                    vec![Observation::Hijack {
                        asn: self.asn,
                        prefix,
                        origin: trusted,
                        claimed: origin,
                    }],
                    Vec::new(),
                ));
            }
            None => true,
            Some(current) if *current == path => false,
            Some(current) => self.prefers(&path, from, current),
        };

        if !accept {
            return Ok((Vec::new(), Vec::new()));
        }

        debug!("{}: new route for {prefix}: {}", self.asn, fmt_path(&path));
        self.table.insert(prefix, path);
        if self.auto_advertise {
            Ok((Vec::new(), self.advertise_all()?))
        } else {
            Ok((Vec::new(), Vec::new()))
        }
    }

    /// Returns `true` if the path `new`, received from `sender`, is strictly preferred over the
    /// path `current`. Routes are compared by the role of the neighbor they were learned from
    /// (higher preference first), then by path length (shorter first), and finally by the AS
    /// number of the last hop (smaller first).
    fn prefers(&self, new: &AsPath, sender: AsId, current: &AsPath) -> bool {
        let current_role = current.last().and_then(|hop| self.get_role(*hop));
        let new_role = self.get_role(sender);
        let ordering = new_role
            .cmp(&current_role)
            .then_with(|| current.len().cmp(&new.len()))
            .then_with(|| current.last().cmp(&new.last()));
        ordering == Ordering::Greater
    }

    /// Export policy. A route is never sent back to its origin. Routes learned from a customer
    /// are sent to everyone, all other routes are only sent to customers.
    fn may_export(&self, path: &AsPath, edge: &Edge) -> bool {
        if path.first() == Some(&edge.peer) {
            return false;
        }
        let learned_from = path.last().and_then(|hop| self.get_role(*hop));
        learned_from == Some(Role::Customer) || edge.role == Role::Customer
    }

    /// Send the entire table over a single edge, subject to the export policy.
    fn export_to(&self, edge: &Edge) -> Result<Vec<Event>, DeviceError> {
        let mut events = Vec::new();
        for (prefix, path) in self.table.iter() {
            if !self.may_export(path, edge) {
                continue;
            }
            let mut path = path.clone();
            path.push(self.asn);
            events.push(edge.send(Message::Advertise {
                path,
                prefix: *prefix,
            })?);
        }
        Ok(events)
    }

    /// Advertise every known route to every neighbor, subject to the export policy.
    fn advertise_all(&self) -> Result<Vec<Event>, DeviceError> {
        let mut events = Vec::new();
        for edge in self.edges.iter() {
            events.extend(self.export_to(edge)?);
        }
        Ok(events)
    }

    /// Advertise all owned blocks to every neighbor.
    fn advertise_self(&self) -> Result<Vec<Event>, DeviceError> {
        let mut events = Vec::new();
        for edge in self.edges.iter() {
            for prefix in self.owned.iter() {
                events.push(edge.send(Message::Advertise {
                    path: vec![self.asn],
                    prefix: *prefix,
                })?);
            }
        }
        Ok(events)
    }

    /// Advertise `prefix` to every neighbor as if it were owned by this AS.
    fn hijack(&self, prefix: Ipv4Prefix) -> Result<Vec<Event>, DeviceError> {
        self.flood(Message::Advertise {
            path: vec![self.asn],
            prefix,
        })
    }

    /// Send the same message to every neighbor.
    fn flood(&self, message: Message) -> Result<Vec<Event>, DeviceError> {
        self.edges
            .iter()
            .map(|edge| edge.send(message.clone()).map_err(DeviceError::from))
            .collect()
    }

    /// Remove `prefix` from the owned blocks or the route table, and tell all neighbors. Nothing
    /// happens if the prefix is unknown.
    fn withdraw_prefix(&mut self, prefix: Ipv4Prefix) -> Result<Vec<Event>, DeviceError> {
        if let Some(pos) = self.owned.iter().position(|p| *p == prefix) {
            debug!("{}: withdraw owned block {prefix}", self.asn);
            self.owned.remove(pos);
        } else if self.table.remove(&prefix).is_some() {
            debug!("{}: withdraw route for {prefix}", self.asn);
        } else {
            return Ok(Vec::new());
        }
        self.flood(Message::WithdrawPrefix(prefix))
    }

    /// Handle the loss of the adjacency `a -- b`.
    fn withdraw_path(&mut self, a: AsId, b: AsId) -> Result<Vec<Event>, DeviceError> {
        let is_self = a == self.asn;
        let mut deleted = false;

        if !is_self {
            let broken: Vec<Ipv4Prefix> = self
                .table
                .iter()
                .filter(|(_, path)| traverses(path, a, b))
                .map(|(prefix, _)| *prefix)
                .collect();
            deleted = !broken.is_empty();
            for prefix in broken {
                debug!("{}: route for {prefix} traverses {a} -- {b}", self.asn);
                self.table.remove(&prefix);
            }
        }

        let mut events = Vec::new();
        if deleted || is_self {
            events.extend(self.flood(Message::WithdrawPath(a, b))?);
        }

        if !deleted && !is_self && self.table.iter().any(|(_, path)| path.first() == Some(&b)) {
            trace!("{}: re-advertise after loss of {a} -- {b}", self.asn);
            events.extend(self.advertise_all()?);
        }

        Ok(events)
    }

    /// Remove the edge towards `peer`, drop all routes learned from it, and tell all remaining
    /// neighbors that the adjacency is gone.
    fn link_delete(&mut self, peer: AsId) -> Result<Vec<Event>, DeviceError> {
        let pos = self
            .edges
            .iter()
            .position(|e| e.peer == peer)
            .ok_or(DeviceError::UnknownNeighbor(self.asn, peer))?;
        self.edges.remove(pos);

        let stale: Vec<Ipv4Prefix> = self
            .table
            .iter()
            .filter(|(_, path)| path.last() == Some(&peer))
            .map(|(prefix, _)| *prefix)
            .collect();
        for prefix in stale {
            self.table.remove(&prefix);
        }

        self.withdraw_path(self.asn, peer)
    }

    /// Bring the neighbor `peer` up to date after its edge was installed.
    fn link_create(&mut self, peer: AsId) -> Result<Vec<Event>, DeviceError> {
        let edge = *self
            .get_edge(peer)
            .ok_or(DeviceError::UnknownNeighbor(self.asn, peer))?;
        let mut events = self.export_to(&edge)?;
        events.extend(self.advertise_self()?);
        Ok(events)
    }
}

/// Returns `true` if `b` is directly next to the first occurrence of `a` in `path`.
fn traverses(path: &[AsId], a: AsId, b: AsId) -> bool {
    match path.iter().position(|hop| *hop == a) {
        Some(i) => (i > 0 && path[i - 1] == b) || (i + 1 < path.len() && path[i + 1] == b),
        None => false,
    }
}
