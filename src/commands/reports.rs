// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::summary::{expenditure_breakdown, income_breakdown, summary_cards, BreakdownItem};
use crate::utils::{fmt_pct, format_peso, format_peso_adaptive, maybe_print_json, pretty_table};
use crate::view::{Ledger, Selection, ViewMode};
use anyhow::{Context, Result};
use serde::Serialize;

/// Starts at the latest quarter and applies `--year`, `--quarter` and
/// `--mode` in that order, the same way a user would click through them.
pub fn resolve_selection<'a>(ledger: &'a Ledger, sub: &clap::ArgMatches) -> Result<Selection<'a>> {
    let mut sel = ledger
        .initial_selection()
        .context("SRE data has no quarters")?;
    if let Some(year) = sub.get_one::<String>("year") {
        sel = ledger.change_year(&sel, year.trim())?;
    }
    if let Some(q) = sub.get_one::<String>("quarter") {
        let period = format!("{}-{}", q, sel.year);
        sel = ledger
            .select_quarter(&sel, &period)
            .with_context(|| format!("{} was not reported", period))?;
    }
    if let Some(mode) = sub.get_one::<String>("mode") {
        let mode: ViewMode = mode.parse().map_err(anyhow::Error::msg)?;
        sel = sel.with_mode(mode);
    }
    Ok(sel)
}

fn heading(sel: &Selection<'_>) -> String {
    match sel.mode {
        ViewMode::Quarter => sel.quarter.period.clone(),
        ViewMode::Year => format!("FY {}", sel.year),
    }
}

#[derive(Debug, Serialize)]
struct SummaryOut<'a> {
    period: String,
    mode: ViewMode,
    lgu: &'a str,
    cards: Vec<crate::summary::SummaryCard>,
}

pub fn summary(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let sel = resolve_selection(ledger, sub)?;

    let income = ledger.displayed_income(&sel);
    let exp = ledger.displayed_expenditure(&sel);
    let fund = ledger.displayed_fund_summary(&sel);
    let baseline = ledger.comparison_baseline(&sel);
    let cards = summary_cards(&income, &exp, fund, baseline.as_ref());

    let out = SummaryOut {
        period: heading(&sel),
        mode: sel.mode,
        lgu: &sel.quarter.location_info.lgu_name,
        cards,
    };
    if maybe_print_json(json_flag, jsonl_flag, &out)? {
        return Ok(());
    }

    let rows = out
        .cards
        .iter()
        .map(|c| {
            let vs = match &c.yoy {
                Some(y) => format!(
                    "{}{} ({})",
                    if y.diff >= rust_decimal::Decimal::ZERO { "+" } else { "" },
                    fmt_pct(y.pct / rust_decimal::Decimal::ONE_HUNDRED),
                    format_peso(y.diff, 2)
                ),
                None => "-".into(),
            };
            vec![
                c.title.to_string(),
                format_peso_adaptive(c.value, 2).full_string,
                vs,
            ]
        })
        .collect();
    println!("{} {}", out.lgu, out.period);
    println!("{}", pretty_table(&["Metric", "Amount", "vs last year"], rows));
    Ok(())
}

fn breakdown_rows(items: &[BreakdownItem]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for it in items {
        rows.push(vec![it.name.clone(), format_peso(it.value, 2), fmt_pct(it.share)]);
        for d in &it.details {
            rows.push(vec![
                format!("  {}", d.name),
                format_peso(d.value, 2),
                fmt_pct(d.share),
            ]);
        }
    }
    rows
}

pub fn income(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let sel = resolve_selection(ledger, sub)?;
    let income = ledger.displayed_income(&sel);
    let items = income_breakdown(&income);
    if !maybe_print_json(json_flag, jsonl_flag, &items)? {
        let mut rows = breakdown_rows(&items);
        rows.push(vec![
            "Total".into(),
            format_peso(income.total_current_operating_income, 2),
            String::new(),
        ]);
        println!("Current operating income, {}", heading(&sel));
        println!("{}", pretty_table(&["Source", "Amount", "Share"], rows));
    }
    Ok(())
}

pub fn expenditure(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let sel = resolve_selection(ledger, sub)?;
    let exp = ledger.displayed_expenditure(&sel);
    let items = expenditure_breakdown(&exp);
    if !maybe_print_json(json_flag, jsonl_flag, &items)? {
        let mut rows = breakdown_rows(&items);
        rows.push(vec![
            "Total".into(),
            format_peso(exp.total_current_operating_expenditures, 2),
            String::new(),
        ]);
        println!("Current operating expenditures, {}", heading(&sel));
        println!("{}", pretty_table(&["Sector", "Amount", "Share"], rows));
    }
    Ok(())
}
