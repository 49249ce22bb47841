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

//! Module for defining protocol messages and events

use serde::{Deserialize, Serialize};

mod queue;
pub use queue::{BasicEventQueue, EventQueue};

use crate::types::{AsId, AsPath, Ipv4Prefix};

/// Protocol message exchanged between two neighboring ASes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Message {
    /// Route advertisement. The path contains the origin first, and ends with the sender.
    Advertise {
        /// Propagation path so far
        path: AsPath,
        /// Advertised address block
        prefix: Ipv4Prefix,
    },
    /// The address block is no longer reachable.
    WithdrawPrefix(Ipv4Prefix),
    /// The adjacency between the two ASes is broken. Any route traversing it is invalid.
    WithdrawPath(AsId, AsId),
}

impl Message {
    /// Returns the prefix for which this message talks about.
    pub fn prefix(&self) -> Option<Ipv4Prefix> {
        match self {
            Message::Advertise { prefix, .. } | Message::WithdrawPrefix(prefix) => Some(*prefix),
            Message::WithdrawPath(_, _) => None,
        }
    }

    /// Returns true if the message is an advertisement.
    pub fn is_advertise(&self) -> bool {
        matches!(self, Message::Advertise { .. })
    }
}

/// Event to handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Message from `#1` to `#2`.
    Msg(AsId, AsId, Message),
}

impl Event {
    /// Return the AS that sent the message
    pub fn source(&self) -> AsId {
        match self {
            Event::Msg(from, _, _) => *from,
        }
    }

    /// Return the AS where the event is processed
    pub fn target(&self) -> AsId {
        match self {
            Event::Msg(_, to, _) => *to,
        }
    }

    /// Get a reference to the carried message.
    pub fn message(&self) -> &Message {
        match self {
            Event::Msg(_, _, msg) => msg,
        }
    }
}

/// Things an AS reports to the operator while handling a command or an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Observation {
    /// Result of a route query.
    Route {
        /// AS that was queried
        asn: AsId,
        /// Queried address block
        query: Ipv4Prefix,
        /// Covering table entry and the full path (ending with `asn`), or `None` if there is no
        /// route.
        route: Option<(Ipv4Prefix, AsPath)>,
    },
    /// An advertisement with a conflicting origin was rejected.
    Hijack {
        /// AS that detected the hijack
        asn: AsId,
        /// Address block that was hijacked
        prefix: Ipv4Prefix,
        /// Origin that the AS trusts
        origin: AsId,
        /// Origin claimed by the rejected advertisement
        claimed: AsId,
    },
}

/// The outcome of a handled event or command: the observations to report (0), and the set of
/// new events that must be enqueued (1).
pub(crate) type EventOutcome = (Vec<Observation>, Vec<Event>);
