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

//! Module containing the definitions for the event queues.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::Event;

/// Interface of an event queue.
pub trait EventQueue {
    /// Enqueue a new event.
    fn push(&mut self, event: Event);

    /// pop the next event
    fn pop(&mut self) -> Option<Event>;

    /// peek the next event
    fn peek(&self) -> Option<&Event>;

    /// Get the number of enqueued events
    fn len(&self) -> usize;

    /// Return `True` if no event is enqueued.
    fn is_empty(&self) -> bool;
}

/// Basic FIFO event queue
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicEventQueue(pub(crate) VecDeque<Event>);

impl BasicEventQueue {
    /// Create a new empty event queue
    pub fn new() -> Self {
        Self(VecDeque::new())
    }
}

impl EventQueue for BasicEventQueue {
    fn push(&mut self, event: Event) {
        self.0.push_back(event)
    }

    fn pop(&mut self) -> Option<Event> {
        self.0.pop_front()
    }

    fn peek(&self) -> Option<&Event> {
        self.0.front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
