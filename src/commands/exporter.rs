// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::view::Ledger;
use anyhow::{bail, Context, Result};

const CSV_HEADERS: [&str; 12] = [
    "period",
    "lgu_name",
    "total_local_sources",
    "total_external_sources",
    "total_current_operating_income",
    "total_social_services",
    "total_current_operating_expenditures",
    "net_operating_income_loss_from_current_operations",
    "total_non_income_receipts",
    "total_non_operating_expenditures",
    "fund_cash_balance_end",
    "fund_summary_present",
];

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("quarters", sub)) => export_quarters(ledger, sub),
        _ => bail!("Nothing to export (try `export quarters`)"),
    }
}

fn export_quarters(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "json".into());
    let out = sub.get_one::<String>("out").context("--out is required")?.trim();

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record(CSV_HEADERS)?;
            for q in ledger.quarters() {
                let inc = &q.current_operating_income;
                let exp = &q.current_operating_expenditures;
                wtr.write_record([
                    q.period.clone(),
                    q.location_info.lgu_name.clone(),
                    inc.local_sources.total_local_sources.to_string(),
                    inc.external_sources.total_external_sources.to_string(),
                    inc.total_current_operating_income.to_string(),
                    exp.social_services.total_social_services.to_string(),
                    exp.total_current_operating_expenditures.to_string(),
                    q.net_operating_income_loss_from_current_operations.to_string(),
                    q.non_income_receipts.total_non_income_receipts.to_string(),
                    q.non_operating_expenditures
                        .total_non_operating_expenditures
                        .to_string(),
                    q.fund_summary
                        .as_ref()
                        .map(|f| f.fund_cash_balance_end.to_string())
                        .unwrap_or_default(),
                    q.fund_summary.is_some().to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(ledger.quarters())?)
                .with_context(|| format!("Write {}", out))?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} quarters to {}", ledger.quarters().len(), out);
    Ok(())
}
