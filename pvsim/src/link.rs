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

//! # Links between two ASes
//!
//! A [`Link`] stands in for the physical connectivity between two AS nodes. It is a stateless
//! relay: delivering a message produces an [`Event`] addressed to the other endpoint, which the
//! network enqueues and processes in FIFO order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    event::{Event, Message},
    types::{AsId, Role},
};

/// Error raised by a [`Link`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkError {
    /// The sender is not one of the two endpoints of the link.
    #[error("Invalid sender {sender} on link {} -- {}", .link.0, .link.1)]
    InvalidSender {
        /// AS that tried to send the message
        sender: AsId,
        /// Endpoints of the link
        link: (AsId, AsId),
    },
}

/// Bidirectional link between exactly two AS nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    a: AsId,
    b: AsId,
}

impl Link {
    /// Create a new link between `a` and `b`.
    pub fn new(a: AsId, b: AsId) -> Self {
        Self { a, b }
    }

    /// Both endpoints of the link, in the order in which they were given.
    pub fn endpoints(&self) -> (AsId, AsId) {
        (self.a, self.b)
    }

    /// Returns `true` if `asn` is one of the endpoints.
    pub fn connects(&self, asn: AsId) -> bool {
        self.a == asn || self.b == asn
    }

    /// Returns the endpoint opposite to `asn`, or `None` if `asn` is not an endpoint.
    pub fn other(&self, asn: AsId) -> Option<AsId> {
        if asn == self.a {
            Some(self.b)
        } else if asn == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// Deliver `message` from `sender` to the other endpoint of the link.
    pub fn deliver(&self, message: Message, sender: AsId) -> Result<Event, LinkError> {
        let target = self.other(sender).ok_or(LinkError::InvalidSender {
            sender,
            link: (self.a, self.b),
        })?;
        Ok(Event::Msg(sender, target, message))
    }
}

/// Directed view of a [`Link`] as seen from one of its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// AS on the other side of the link
    pub peer: AsId,
    /// AS that owns this edge
    pub own: AsId,
    /// The shared link
    pub link: Link,
    /// Relationship of `peer` towards `own`.
    pub role: Role,
}

impl Edge {
    /// Create the edge of `own` towards `peer` over `link`.
    pub fn new(own: AsId, peer: AsId, link: Link, role: Role) -> Self {
        Self {
            peer,
            own,
            link,
            role,
        }
    }

    /// Send a message to the peer.
    pub fn send(&self, message: Message) -> Result<Event, LinkError> {
        self.link.deliver(message, self.own)
    }
}
