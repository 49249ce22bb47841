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

//! Run the built-in reference scenarios

use clap::ValueEnum;
use pretty_assertions_sorted::assert_eq;
use pvsim::{event::Observation, types::AsId};
use test_log::test;

use crate::Builtin;

fn run(builtin: Builtin) -> Vec<String> {
    builtin
        .scenario()
        .unwrap()
        .run()
        .unwrap()
        .into_iter()
        .map(|o| o.to_string())
        .collect()
}

#[test]
fn names() {
    assert_eq!(Builtin::all().len(), 8);
    for builtin in Builtin::all() {
        assert_eq!(Builtin::from_str(builtin.name(), false), Ok(*builtin));
        assert_eq!(builtin.scenario().unwrap().name, builtin.name());
    }
}

#[test]
fn commands() {
    let commands = Builtin::AdvertiseAll.commands();
    assert_eq!(commands.len(), 16);
    assert!(!commands.contains(&"AS 2:auto advertise on".to_string()));
    assert_eq!(commands[5], "AS 4:advertise self");

    let commands = Builtin::LateAdvertise.commands();
    assert_eq!(commands.len(), 14);
    assert_eq!(commands[11], "AS 5:get route 6.0.0.0/8");

    for builtin in Builtin::all() {
        assert!(builtin.scenario().unwrap().parse_commands().is_ok());
    }
}

#[test]
fn hijack_withdraw() {
    assert_eq!(
        run(Builtin::HijackWithdraw),
        vec![
            "AS 0: [3, 1, 0] 33.0.0.0/8",
            "AS 1: 5.0.0.0/8 hijacked.",
            "AS 0: None 33.0.0.0/8",
        ]
    );
}

#[test]
fn link_delete_create() {
    assert_eq!(
        run(Builtin::LinkDeleteCreate),
        vec![
            "AS 0: [5, 2, 1, 0] 5.0.0.0/8",
            "AS 2: [5, 2] 5.0.0.0/8",
            "AS 0: None 5.0.0.0/8",
            "AS 2: None 5.0.0.0/8",
            // AS 2 prefers the peer route over its customer AS 5, but AS 1 still learns the
            // direct route first.
            "AS 0: [5, 2, 1, 0] 5.0.0.0/8",
            "AS 2: [5, 4, 3, 2] 5.0.0.0/8",
        ]
    );
}

#[test]
fn advertise_all() {
    // AS 2 never forwards routes on its own, so AS 0 learns the block over AS 3. AS 2 holds a
    // peer route, which it only exports to its customers.
    assert_eq!(
        run(Builtin::AdvertiseAll),
        vec![
            "AS 0: [5, 4, 3, 1, 0] 5.0.0.0/8",
            "AS 2: [5, 4, 3, 2] 5.0.0.0/8",
            "AS 0: [5, 4, 3, 1, 0] 5.0.0.0/8",
            "AS 2: [5, 4, 3, 2] 5.0.0.0/8",
        ]
    );
}

#[test]
fn link_delete_policy() {
    assert_eq!(
        run(Builtin::LinkDeletePolicy),
        vec![
            "AS 3: [1, 3] 1.0.0.0/8",
            "AS 3: None 1.0.0.0/8",
            "AS 4: [1, 2, 4] 1.0.0.0/8",
            "AS 4: None 1.0.0.0/8",
        ]
    );
}

#[test]
fn subnet_lookup() {
    assert_eq!(
        run(Builtin::SubnetLookup),
        vec!["AS 3: [1, 3] 1.23.0.0/16"]
    );
}

#[test]
fn link_delete_again() {
    assert_eq!(
        run(Builtin::LinkDeleteAgain),
        vec!["AS 3: [2, 3] 2.0.0.0/8", "AS 3: None 2.0.0.0/8"]
    );
}

#[test]
fn successful_hijack() {
    let observations = Builtin::SuccessfulHijack.scenario().unwrap().run().unwrap();
    let routes: Vec<String> = observations
        .iter()
        .filter(|o| matches!(o, Observation::Route { .. }))
        .map(|o| o.to_string())
        .collect();
    assert_eq!(
        routes,
        vec![
            "AS 1: [2, 1] 3.0.0.0/8",
            "AS 0: [2, 1, 0] 3.0.0.0/8",
            "AS 4: [3, 4] 3.0.0.0/8",
        ]
    );
    // AS 4 still knows the true origin and detects the hijack.
    assert!(observations.contains(&Observation::Hijack {
        asn: AsId(4),
        prefix: "3.0.0.0/8".parse().unwrap(),
        origin: AsId(3),
        claimed: AsId(2),
    }));
}

#[test]
fn late_advertise() {
    assert_eq!(
        run(Builtin::LateAdvertise),
        vec!["AS 5: None 6.0.0.0/8", "AS 5: [0, 1, 2, 5] 6.0.0.0/8"]
    );
}

#[test]
fn all_builtins_converge() {
    for builtin in Builtin::all() {
        let scenario = builtin.scenario().unwrap();
        let queries = scenario
            .commands
            .iter()
            .filter(|c| c.contains("get route"))
            .count();
        let observations = scenario.run().unwrap();
        let routes = observations
            .iter()
            .filter(|o| matches!(o, Observation::Route { .. }))
            .count();
        assert_eq!(routes, queries, "{}", builtin.name());
    }
}
