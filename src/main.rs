// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use campusledger::{cli, commands, snapshot};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = match matches.get_one::<String>("snapshot") {
        Some(p) => PathBuf::from(p),
        None => snapshot::default_path()?,
    };
    let snap = snapshot::load(&path)?;

    match matches.subcommand() {
        Some(("summary", sub)) => commands::summary::handle(&snap, sub)?,
        Some(("ledger", sub)) => commands::ledger::handle(&snap, sub)?,
        Some(("batches", sub)) => commands::batches::handle(&snap, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&snap, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
