// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON lines"),
    )
}

fn period_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("period")
            .long("period")
            .value_name("PERIOD")
            .help("daily|monthly|yearly|overall|custom|quarter (default: overall)"),
    )
    .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
    .arg(Arg::new("month").long("month").value_name("YYYY-MM"))
    .arg(Arg::new("year").long("year").value_name("YYYY"))
    .arg(Arg::new("from").long("from").value_name("YYYY-MM-DD"))
    .arg(Arg::new("to").long("to").value_name("YYYY-MM-DD"))
    .arg(Arg::new("quarter").long("quarter").value_name("Q1..Q4"))
}

fn ledger_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("search").long("search").value_name("TERM"))
        .arg(
            Arg::new("flow")
                .long("flow")
                .value_name("all|in|out")
                .help("Money direction filter"),
        )
        .arg(
            Arg::new("window")
                .long("window")
                .value_name("all|daily|monthly|custom"),
        )
        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
        .arg(Arg::new("month").long("month").value_name("YYYY-MM"))
        .arg(Arg::new("from").long("from").value_name("YYYY-MM-DD"))
        .arg(Arg::new("to").long("to").value_name("YYYY-MM-DD"))
}

pub fn build_cli() -> Command {
    Command::new("campusledger")
        .about("School finance aggregation, activity ledger, and report export")
        .version(clap::crate_version!())
        .arg(
            Arg::new("snapshot")
                .long("snapshot")
                .value_name("PATH")
                .global(true)
                .help("Path to the data-store snapshot JSON"),
        )
        .subcommand(json_flags(period_args(
            Command::new("summary")
                .about("Category-level financial summary for a reporting period")
                .arg(Arg::new("batch").long("batch").value_name("ACADEMIC_YEAR"))
                .arg(
                    Arg::new("canteen")
                        .long("canteen")
                        .value_name("AMOUNT")
                        .help("Unsaved canteen income draft, overrides the summed total"),
                )
                .arg(
                    Arg::new("sponsorship")
                        .long("sponsorship")
                        .value_name("AMOUNT")
                        .help("Unsaved sponsorship income draft, overrides the summed total"),
                ),
        )))
        .subcommand(json_flags(ledger_args(
            Command::new("ledger")
                .about("Unified, filterable, paginated activity ledger")
                .arg(
                    Arg::new("page")
                        .long("page")
                        .value_name("N")
                        .value_parser(clap::value_parser!(usize))
                        .help("1-based page number"),
                ),
        )))
        .subcommand(json_flags(
            Command::new("batches").about("List academic-year batches"),
        ))
        .subcommand(
            Command::new("export")
                .about("Write tabular reports")
                .subcommand(period_args(
                    Command::new("report")
                        .about("Financial report workbook for one period")
                        .arg(Arg::new("batch").long("batch").value_name("ACADEMIC_YEAR"))
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_name("csv|json")
                                .default_value("csv"),
                        )
                        .arg(
                            Arg::new("out")
                                .long("out")
                                .value_name("PATH")
                                .required(true),
                        ),
                ))
                .subcommand(ledger_args(
                    Command::new("activity")
                        .about("Flat CSV projection of the activity ledger")
                        .arg(
                            Arg::new("out")
                                .long("out")
                                .value_name("PATH")
                                .required(true),
                        ),
                )),
        )
}
