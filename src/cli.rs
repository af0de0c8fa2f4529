// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn view_args(cmd: Command) -> Command {
    json_args(
        cmd.arg(
            Arg::new("year")
                .long("year")
                .help("Fiscal year, e.g. 2024 (default: latest)"),
        )
        .arg(
            Arg::new("quarter")
                .long("quarter")
                .value_parser(["Q1", "Q2", "Q3", "Q4"])
                .help("Quarter label within the year"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .value_parser(["quarter", "year"])
                .default_value("quarter")
                .help("Show a single quarter or the whole year"),
        ),
    )
}

pub fn build_cli() -> Command {
    Command::new("sreview")
        .about("LGU Statement of Receipts and Expenditures viewer")
        .version(clap::crate_version!())
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .help("Path to the SRE JSON file (default: $SREVIEW_DATA or the app data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More logging (-v debug, -vv trace)"),
        )
        .subcommand(json_args(
            Command::new("years").about("List fiscal years with reported quarters"),
        ))
        .subcommand(json_args(
            Command::new("quarters")
                .about("List the quarters reported for a year")
                .arg(Arg::new("year").long("year").required(true)),
        ))
        .subcommand(view_args(
            Command::new("summary").about("Revenue, expenditure, net income and treasury balance with YoY change"),
        ))
        .subcommand(view_args(
            Command::new("income").about("Current operating income by source"),
        ))
        .subcommand(view_args(
            Command::new("expenditure").about("Current operating expenditures by sector"),
        ))
        .subcommand(
            Command::new("export")
                .about("Export normalized data")
                .subcommand_required(true)
                .subcommand(
                    Command::new("quarters")
                        .about("Write every normalized quarter")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("json")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("doctor")
                .about("Report data-quality issues in the SRE data")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize))
                        .help("Show at most this many findings"),
                ),
        )
}
