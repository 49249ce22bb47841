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

use std::path::PathBuf;

use asnet::{Builtin, Scenario};
use clap::Parser;

/// Run inter-domain routing scenarios and print what the ASes observe.
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Cli {
    /// Scenario file (JSON) to run.
    #[clap(long = "scenario", short = 's', conflicts_with = "builtin")]
    scenario: Option<PathBuf>,
    /// Built-in scenario to run. If neither a scenario file nor a built-in scenario is given,
    /// all built-in scenarios are run one after the other.
    #[clap(long = "builtin", short = 'b')]
    builtin: Option<Builtin>,
    /// Maximum number of messages processed after a single command.
    #[clap(long = "msg-limit", short = 'm')]
    msg_limit: Option<usize>,
    /// Print every processed message.
    #[clap(short, long)]
    verbose: bool,
    /// Print the route table of every AS after the scenario has finished.
    #[clap(short, long)]
    tables: bool,
    /// Write the selected built-in scenario as JSON to the given file instead of running it.
    #[clap(long = "dump", requires = "builtin")]
    dump: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_timed();

    let args = Cli::parse();

    let scenarios: Vec<Scenario> = match (&args.scenario, args.builtin) {
        (Some(file), _) => vec![Scenario::from_file(file)?],
        (None, Some(builtin)) => vec![builtin.scenario()?],
        (None, None) => Builtin::all()
            .iter()
            .map(|b| b.scenario())
            .collect::<Result<_, _>>()?,
    };

    if let (Some(file), Some(scenario)) = (args.dump.as_ref(), scenarios.first()) {
        scenario.write_json(file)?;
        return Ok(());
    }

    for (i, scenario) in scenarios.iter().enumerate() {
        if i > 0 {
            println!();
        }
        if scenario.description.is_empty() {
            println!("{}", scenario.name);
        } else {
            println!("{}: {}", scenario.name, scenario.description);
        }

        let mut net = scenario.build_network()?;
        if args.msg_limit.is_some() {
            net.set_msg_limit(args.msg_limit);
        }
        net.verbose(args.verbose);

        for command in scenario.parse_commands()? {
            if args.verbose {
                println!("> {command}");
            }
            net.apply(command)?;
            for observation in net.take_observations() {
                println!("{observation}");
            }
        }

        if args.tables {
            for node in net.nodes() {
                print!("{}", node.fmt_route_table());
            }
        }
    }

    Ok(())
}
