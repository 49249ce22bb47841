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

//! Module that renders messages, events, and observations as text.

use std::fmt::Display;

use itertools::Itertools;

use crate::{
    event::{Event, Message, Observation},
    types::AsId,
};

/// Format a path as a list of AS numbers, like `[5, 2, 1, 0]`.
pub fn fmt_path(path: &[AsId]) -> String {
    format!("[{}]", path.iter().map(|a| a.0).join(", "))
}

impl Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::Advertise { path, prefix } => {
                write!(f, "Advertise {prefix} via {}", fmt_path(path))
            }
            Message::WithdrawPrefix(prefix) => write!(f, "Withdraw {prefix}"),
            Message::WithdrawPath(a, b) => write!(f, "Withdraw path {a} -- {b}"),
        }
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Msg(from, to, msg) => write!(f, "{from} => {to}: {msg}"),
        }
    }
}

/// Observations are rendered as the lines printed by the command interface:
///
/// ```text
/// AS 0: [3, 1, 0] 33.0.0.0/8
/// AS 0: None 33.0.0.0/8
/// AS 1: 5.0.0.0/8 hijacked.
/// ```
impl Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Observation::Route {
                asn,
                query,
                route: Some((_, path)),
            } => write!(f, "AS {}: {} {query}", asn.0, fmt_path(path)),
            Observation::Route {
                asn,
                query,
                route: None,
            } => write!(f, "AS {}: None {query}", asn.0),
            Observation::Hijack { asn, prefix, .. } => {
                write!(f, "AS {}: {prefix} hijacked.", asn.0)
            }
        }
    }
}
