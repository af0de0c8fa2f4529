// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{FinancialQuarter, RawFinancialQuarter};
use crate::utils::pretty_table;
use crate::view::Ledger;
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub issue: &'static str,
    pub detail: String,
}

fn finding(issue: &'static str, detail: String) -> Finding {
    Finding { issue, detail }
}

fn check_total(
    out: &mut Vec<Finding>,
    period: &str,
    field: &str,
    stored: Decimal,
    components: Decimal,
) {
    if stored != components {
        out.push(finding(
            "total_mismatch",
            format!(
                "{} {}: stored {} vs components {}",
                period, field, stored, components
            ),
        ));
    }
}

/// Totals in the capital/loan sections are taken from the source as-is, so
/// they are only checked here.
fn passthrough_totals(q: &FinancialQuarter, out: &mut Vec<Finding>) {
    let p = q.period.as_str();

    let nir = &q.non_income_receipts;
    let cir = &nir.capital_investment_receipts;
    check_total(
        out,
        p,
        "total_capital_investment_receipts",
        cir.total_capital_investment_receipts,
        cir.proceeds_from_sale_of_assets
            + cir.proceeds_from_sale_of_debt_securities_of_other_entities
            + cir.collection_of_loans_receivables,
    );
    let rlb = &nir.receipts_from_loans_and_borrowings;
    check_total(
        out,
        p,
        "total_receipts_from_loans_and_borrowings",
        rlb.total_receipts_from_loans_and_borrowings,
        rlb.acquisition_of_loans + rlb.issuance_of_bonds,
    );
    check_total(
        out,
        p,
        "total_non_income_receipts",
        nir.total_non_income_receipts,
        cir.total_capital_investment_receipts
            + rlb.total_receipts_from_loans_and_borrowings
            + nir.other_non_income_receipts,
    );

    let noe = &q.non_operating_expenditures;
    let cie = &noe.capital_investment_expenditures;
    check_total(
        out,
        p,
        "total_capital_investment_expenditures",
        cie.total_capital_investment_expenditures,
        cie.purchase_construct_of_property_plant_and_equipment
            + cie.purchase_of_debt_securities_of_other_entities
            + cie.grant_make_loan_to_other_entities,
    );
    let dsp = &noe.debt_service_principal_cost;
    check_total(
        out,
        p,
        "total_debt_service_principal_cost",
        dsp.total_debt_service_principal_cost,
        dsp.payment_of_loan_amortization + dsp.retirement_redemption_of_bonds_debt_securities,
    );
    check_total(
        out,
        p,
        "total_non_operating_expenditures",
        noe.total_non_operating_expenditures,
        cie.total_capital_investment_expenditures
            + dsp.total_debt_service_principal_cost
            + noe.other_non_operating_expenditures,
    );
}

/// Stored grand totals that normalization replaced with recomputed values.
fn overridden_totals(raw: &RawFinancialQuarter, q: &FinancialQuarter, out: &mut Vec<Finding>) {
    let stored_income = raw
        .current_operating_income
        .as_ref()
        .and_then(|i| i.total_current_operating_income);
    if let Some(s) = stored_income {
        if s != q.current_operating_income.total_current_operating_income {
            out.push(finding(
                "income_total_recomputed",
                format!(
                    "{}: stored {} replaced by {}",
                    q.period, s, q.current_operating_income.total_current_operating_income
                ),
            ));
        }
    }
    let exp = raw.current_operating_expenditures.as_ref();
    let stored_social = exp
        .and_then(|e| e.social_services.as_ref())
        .and_then(|s| s.total_social_services);
    if let Some(s) = stored_social {
        let got = q.current_operating_expenditures.social_services.total_social_services;
        if s != got {
            out.push(finding(
                "social_total_recomputed",
                format!("{}: stored {} replaced by {}", q.period, s, got),
            ));
        }
    }
    if let Some(s) = exp.and_then(|e| e.total_current_operating_expenditures) {
        let got = q.current_operating_expenditures.total_current_operating_expenditures;
        if s != got {
            out.push(finding(
                "expenditure_total_recomputed",
                format!("{}: stored {} replaced by {}", q.period, s, got),
            ));
        }
    }
}

pub fn findings(raw: &[RawFinancialQuarter], ledger: &Ledger) -> Vec<Finding> {
    let mut out = Vec::new();

    // 1) Coverage: duplicated periods and years with missing quarters
    let (missing, dupes) = ledger.coverage_gaps();
    for p in dupes {
        out.push(finding("duplicate_period", p));
    }
    for (year, labels) in missing {
        out.push(finding("missing_quarters", format!("{} {}", year, labels.join(","))));
    }

    // 2) Recomputed vs stored totals, then pass-through totals
    for (r, q) in raw.iter().zip(ledger.quarters()) {
        overridden_totals(r, q, &mut out);
        passthrough_totals(q, &mut out);
    }
    out
}

pub fn handle(raw: &[RawFinancialQuarter], ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let limit = sub.get_one::<usize>("limit").copied();
    let all = findings(raw, ledger);
    if all.is_empty() {
        println!("✅ doctor: no issues found");
        return Ok(());
    }
    warn!(count = all.len(), "doctor found data-quality issues");
    let rows: Vec<Vec<String>> = all
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|f| vec![f.issue.to_string(), f.detail.clone()])
        .collect();
    println!("{}", pretty_table(&["Issue", "Detail"], rows));
    Ok(())
}
