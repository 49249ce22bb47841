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

use crate::types::{is_subnet_of, Ipv4Prefix, PrefixError};
use std::net::Ipv4Addr;
use test_log::test;

#[test]
fn subnet_containment() {
    assert_eq!(is_subnet_of("1.23.0.0/16", "1.0.0.0/8"), Ok(true));
    assert_eq!(is_subnet_of("1.0.0.0/8", "1.0.0.0/8"), Ok(true));
    assert_eq!(is_subnet_of("1.0.0.0/8", "1.23.0.0/16"), Ok(false));
    assert_eq!(is_subnet_of("2.0.0.0/8", "1.0.0.0/8"), Ok(false));
    assert_eq!(is_subnet_of("200.1.2.0/24", "0.0.0.0/0"), Ok(true));
}

#[test]
fn malformed_blocks() {
    assert_eq!(
        is_subnet_of("1.0.0.0/8", "1.0.0/8"),
        Err(PrefixError::MalformedAddressBlock("1.0.0/8".to_string()))
    );
    assert!("5.0.0.0/33".parse::<Ipv4Prefix>().is_err());
    assert!("5.0.0.0".parse::<Ipv4Prefix>().is_err());
    // host bits set
    assert_eq!(
        "5.1.0.0/8".parse::<Ipv4Prefix>(),
        Err(PrefixError::MalformedAddressBlock("5.1.0.0/8".to_string()))
    );
    assert!(Ipv4Prefix::new(Ipv4Addr::new(5, 1, 0, 0), 8).is_err());
}

#[test]
fn prefix_accessors() {
    let p: Ipv4Prefix = "33.0.0.0/8".parse().unwrap();
    assert_eq!(p.prefix_len(), 8);
    assert_eq!(p.to_string(), "33.0.0.0/8");
    assert_eq!(Ipv4Prefix::new(Ipv4Addr::new(33, 0, 0, 0), 8), Ok(p));

    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, "\"33.0.0.0/8\"");
    assert!(serde_json::from_str::<Ipv4Prefix>("\"33.1.0.0/8\"").is_err());
}
