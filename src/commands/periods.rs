// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{format_peso, maybe_print_json, pretty_table};
use crate::view::Ledger;
use anyhow::{bail, Context, Result};

pub fn years(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data: Vec<Vec<String>> = ledger
        .available_years()
        .into_iter()
        .map(|y| {
            let n = ledger.quarters_in_year(&y).len();
            vec![y, n.to_string()]
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Year", "Quarters"], data));
    }
    Ok(())
}

pub fn quarters(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = sub
        .get_one::<String>("year")
        .context("--year is required")?
        .trim();
    let in_year = ledger.quarters_in_year(year);
    if in_year.is_empty() {
        bail!("No quarters reported for {}", year);
    }
    let data: Vec<Vec<String>> = in_year
        .iter()
        .map(|q| {
            vec![
                q.period.clone(),
                format_peso(q.current_operating_income.total_current_operating_income, 2),
                format_peso(
                    q.current_operating_expenditures
                        .total_current_operating_expenditures,
                    2,
                ),
                q.fund_summary
                    .as_ref()
                    .map(|f| format_peso(f.fund_cash_balance_end, 2))
                    .unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Period", "Income", "Expenditure", "Cash End"], data)
        );
    }
    Ok(())
}
