// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use sreview::{cli, commands, data, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_count("verbose"))?;

    let Some((name, sub)) = matches.subcommand() else {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    };

    let path = data::data_path(matches.get_one::<String>("data").map(String::as_str))?;
    let (raw, ledger) =
        data::load(&path).with_context(|| format!("Load SRE data from {}", path.display()))?;

    match name {
        "years" => commands::periods::years(&ledger, sub)?,
        "quarters" => commands::periods::quarters(&ledger, sub)?,
        "summary" => commands::reports::summary(&ledger, sub)?,
        "income" => commands::reports::income(&ledger, sub)?,
        "expenditure" => commands::reports::expenditure(&ledger, sub)?,
        "export" => commands::exporter::handle(&ledger, sub)?,
        "doctor" => commands::doctor::handle(&raw, &ledger, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
