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

use crate::{
    command::{Command, CommandError, NodeCommand},
    types::{AsId, InvalidRole, PrefixError, Role},
};
use pretty_assertions::assert_eq;
use test_log::test;

#[test]
fn parse_node_commands() {
    let p = "5.0.0.0/8".parse().unwrap();
    assert_eq!(
        "AS 3:advertise all".parse(),
        Ok(Command::Node(AsId(3), NodeCommand::AdvertiseAll))
    );
    assert_eq!(
        "AS 3:advertise self".parse(),
        Ok(Command::Node(AsId(3), NodeCommand::AdvertiseSelf))
    );
    assert_eq!(
        "AS 0:auto advertise on".parse(),
        Ok(Command::Node(AsId(0), NodeCommand::AutoAdvertiseOn))
    );
    assert_eq!(
        "AS 3:get route 5.0.0.0/8".parse(),
        Ok(Command::Node(AsId(3), NodeCommand::GetRoute(p)))
    );
    assert_eq!(
        "AS 0:hijack 5.0.0.0/8".parse(),
        Ok(Command::Node(AsId(0), NodeCommand::Hijack(p)))
    );
    assert_eq!(
        "AS 12:withdrawn 5.0.0.0/8".parse(),
        Ok(Command::Node(AsId(12), NodeCommand::Withdraw(p)))
    );
    assert_eq!(
        "AS 12: withdraw 5.0.0.0/8".parse(),
        Ok(Command::Node(AsId(12), NodeCommand::Withdraw(p)))
    );
    assert_eq!(
        "AS 2:link delete 5".parse(),
        Ok(Command::Node(AsId(2), NodeCommand::LinkDelete(AsId(5))))
    );
}

#[test]
fn parse_link_commands() {
    assert_eq!(
        "link create 2 5 COSTUMER PROVIDER".parse(),
        Ok(Command::LinkCreate {
            a: AsId(2),
            b: AsId(5),
            role_a: Role::Customer,
            role_b: Role::Provider
        })
    );
    assert_eq!(
        "link delete 1 3".parse(),
        Ok(Command::LinkDelete(AsId(1), AsId(3)))
    );
}

#[test]
fn parse_errors() {
    assert_eq!(
        "AS 3:advertise everything".parse::<Command>(),
        Err(CommandError::UnknownCommand("advertise everything".to_string()))
    );
    assert_eq!(
        "reboot 3".parse::<Command>(),
        Err(CommandError::UnknownCommand("reboot 3".to_string()))
    );
    assert_eq!(
        "AS 3:hijack".parse::<Command>(),
        Err(CommandError::MissingArgument("hijack".to_string()))
    );
    assert_eq!(
        "link delete 3".parse::<Command>(),
        Err(CommandError::MissingArgument("link delete 3".to_string()))
    );
    assert_eq!(
        "AS x:advertise all".parse::<Command>(),
        Err(CommandError::InvalidAsNumber(" x".to_string()))
    );
    assert_eq!(
        "link create 2 5 FRIEND PROVIDER".parse::<Command>(),
        Err(CommandError::InvalidRole(InvalidRole("FRIEND".to_string())))
    );
    assert_eq!(
        "AS 3:get route 5.0.0.0".parse::<Command>(),
        Err(CommandError::PrefixError(PrefixError::MalformedAddressBlock(
            "5.0.0.0".to_string()
        )))
    );
}

#[test]
fn display_is_parsable() {
    for s in [
        "AS 0:auto advertise on",
        "AS 4:advertise self",
        "AS 2:advertise all",
        "AS 0:get route 33.0.0.0/8",
        "AS 0:hijack 5.0.0.0/8",
        "AS 3:withdrawn 33.0.0.0/8",
        "AS 1:link create 3",
        "link delete 2 5",
    ] {
        let cmd: Command = s.parse().unwrap();
        assert_eq!(cmd.to_string(), s);
    }
    assert_eq!(
        "link create 2 5 COSTUMER PROVIDER"
            .parse::<Command>()
            .unwrap()
            .to_string(),
        "link create 2 5 Customer Provider"
    );
}
