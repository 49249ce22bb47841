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

//! # Built-in scenarios
//!
//! All built-in scenarios run on the same reference topology of six ASes:
//!
//! ```text
//!      AS0          customer of AS1
//!       |
//!      AS1          AS1, AS2 and AS3 are peers
//!     /   \
//!   AS2 - AS3
//!    | \   |
//!    |  AS4         customer of AS2 and AS3
//!    | /
//!   AS5             customer of AS2 and AS4
//! ```

use std::collections::BTreeMap;

use clap::ValueEnum;
use itertools::Itertools;
use maplit::btreemap;
use pvsim::types::{Ipv4Prefix, Role};
use serde::{Deserialize, Serialize};

use crate::{
    scenario::{AsConfig, LinkConfig, LinkEnd, Scenario},
    Error,
};

/// Reference command sequences.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, ValueEnum, Deserialize, Serialize)]
pub enum Builtin {
    /// Query a route, hijack a block with a known origin, and withdraw a block.
    HijackWithdraw,
    /// Remove the link between AS2 and AS5 and create it again.
    LinkDeleteCreate,
    /// AS2 does not advertise automatically, and re-advertises its table on demand.
    AdvertiseAll,
    /// Remove two links and observe the export policy.
    LinkDeletePolicy,
    /// Lookup a route for a subnet of a known block.
    SubnetLookup,
    /// Remove the peering between AS2 and AS3.
    LinkDeleteAgain,
    /// Hijack a block after the link to its origin was removed.
    SuccessfulHijack,
    /// AS0 advertises its block after all other ASes have converged.
    LateAdvertise,
}

impl Builtin {
    /// All built-in scenarios, in their reference order.
    pub fn all() -> &'static [Builtin] {
        Self::value_variants()
    }

    /// Name of the scenario, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::HijackWithdraw => "hijack-withdraw",
            Builtin::LinkDeleteCreate => "link-delete-create",
            Builtin::AdvertiseAll => "advertise-all",
            Builtin::LinkDeletePolicy => "link-delete-policy",
            Builtin::SubnetLookup => "subnet-lookup",
            Builtin::LinkDeleteAgain => "link-delete-again",
            Builtin::SuccessfulHijack => "successful-hijack",
            Builtin::LateAdvertise => "late-advertise",
        }
    }

    /// Short description of what the scenario exercises.
    pub fn description(&self) -> &'static str {
        match self {
            Builtin::HijackWithdraw => "hijack - get route - withdrawn ip",
            Builtin::LinkDeleteCreate => "link delete/create",
            Builtin::AdvertiseAll => "advertise all",
            Builtin::LinkDeletePolicy => "another link delete + export policy",
            Builtin::SubnetLookup => "subnet",
            Builtin::LinkDeleteAgain => "another link delete + export policy",
            Builtin::SuccessfulHijack => "successful hijack",
            Builtin::LateAdvertise => "advertise self",
        }
    }

    /// Commands of the scenario, in textual form.
    pub fn commands(&self) -> Vec<String> {
        let (auto, order, tail): (&[u32], &[u32], &[&str]) = match self {
            Builtin::HijackWithdraw => (
                &[0, 1, 2, 3, 4, 5],
                &[4, 0, 1, 2, 3, 5],
                &[
                    "AS 0:get route 33.0.0.0/8",
                    "AS 0:hijack 5.0.0.0/8",
                    "AS 3:withdrawn 33.0.0.0/8",
                    "AS 0:get route 33.0.0.0/8",
                ],
            ),
            Builtin::LinkDeleteCreate => (
                &[0, 1, 2, 3, 4, 5],
                &[4, 0, 1, 2, 3, 5],
                &[
                    "AS 0:get route 5.0.0.0/8",
                    "AS 2:get route 5.0.0.0/8",
                    "link delete 2 5",
                    "AS 0:get route 5.0.0.0/8",
                    "AS 2:get route 5.0.0.0/8",
                    "link create 2 5 COSTUMER PROVIDER",
                    "AS 0:get route 5.0.0.0/8",
                    "AS 2:get route 5.0.0.0/8",
                ],
            ),
            Builtin::AdvertiseAll => (
                &[0, 1, 3, 4, 5],
                &[4, 0, 1, 2, 3, 5],
                &[
                    "AS 0:get route 5.0.0.0/8",
                    "AS 2:get route 5.0.0.0/8",
                    "AS 2:advertise all",
                    "AS 0:get route 5.0.0.0/8",
                    "AS 2:get route 5.0.0.0/8",
                ],
            ),
            Builtin::LinkDeletePolicy => (
                &[0, 1, 2, 3, 4, 5],
                &[0, 1, 2, 3, 4, 5],
                &[
                    "AS 3:get route 1.0.0.0/8",
                    "link delete 1 3",
                    "AS 3:get route 1.0.0.0/8",
                    "AS 4:get route 1.0.0.0/8",
                    "link delete 2 4",
                    "AS 4:get route 1.0.0.0/8",
                ],
            ),
            Builtin::SubnetLookup => (
                &[0, 1, 2, 3, 4, 5],
                &[0, 1, 2, 3, 4, 5],
                &["AS 3:get route 1.23.0.0/16"],
            ),
            Builtin::LinkDeleteAgain => (
                &[0, 1, 2, 3, 4, 5],
                &[0, 1, 2, 3, 4, 5],
                &[
                    "AS 3:get route 2.0.0.0/8",
                    "link delete 2 3",
                    "AS 3:get route 2.0.0.0/8",
                ],
            ),
            Builtin::SuccessfulHijack => (
                &[0, 1, 2, 3, 4, 5],
                &[0, 1, 2, 3, 4, 5],
                &[
                    "link delete 1 3",
                    "AS 2:hijack 3.0.0.0/8",
                    "AS 1:get route 3.0.0.0/8",
                    "AS 0:get route 3.0.0.0/8",
                    "AS 4:get route 3.0.0.0/8",
                ],
            ),
            Builtin::LateAdvertise => (
                &[0, 1, 2, 3, 4, 5],
                &[1, 2, 3, 4, 5],
                &[
                    "AS 5:get route 6.0.0.0/8",
                    "AS 0:advertise self",
                    "AS 5:get route 6.0.0.0/8",
                ],
            ),
        };

        auto.iter()
            .map(|asn| format!("AS {asn}:auto advertise on"))
            .chain(order.iter().map(|asn| format!("AS {asn}:advertise self")))
            .chain(tail.iter().map(|c| c.to_string()))
            .collect_vec()
    }

    /// Build the scenario on the reference topology.
    pub fn scenario(&self) -> Result<Scenario, Error> {
        Ok(Scenario {
            name: self.name().to_string(),
            description: self.description().to_string(),
            ases: reference_ases()?,
            links: reference_links(),
            commands: self.commands(),
        })
    }
}

/// The six ASes of the reference topology with their address blocks.
pub fn reference_ases() -> Result<BTreeMap<u32, AsConfig>, Error> {
    let config = |blocks: &[&str]| -> Result<AsConfig, Error> {
        Ok(AsConfig {
            ips: blocks
                .iter()
                .map(|b| b.parse::<Ipv4Prefix>())
                .collect::<Result<Vec<_>, _>>()?,
        })
    };
    Ok(btreemap! {
        0 => config(&["6.0.0.0/8"])?,
        1 => config(&["1.0.0.0/8"])?,
        2 => config(&["2.0.0.0/8", "22.0.0.0/8", "222.0.0.0/8"])?,
        3 => config(&["3.0.0.0/8", "33.0.0.0/8"])?,
        4 => config(&["4.0.0.0/8"])?,
        5 => config(&["5.0.0.0/8"])?,
    })
}

/// The eight links of the reference topology.
pub fn reference_links() -> Vec<LinkConfig> {
    use Role::*;
    [
        (0, Provider, 1, Customer),
        (1, Peer, 2, Peer),
        (1, Peer, 3, Peer),
        (2, Peer, 3, Peer),
        (2, Customer, 4, Provider),
        (2, Customer, 5, Provider),
        (3, Customer, 4, Provider),
        (4, Customer, 5, Provider),
    ]
    .into_iter()
    .map(|(a, role_a, b, role_b)| LinkConfig {
        first: LinkEnd {
            as_number: a,
            role: role_a,
        },
        second: LinkEnd {
            as_number: b,
            role: role_b,
        },
    })
    .collect()
}
