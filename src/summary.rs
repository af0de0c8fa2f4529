// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{CurrentOperatingExpenditures, CurrentOperatingIncome, FundSummary};
use crate::utils::{format_label, share};
use crate::view::ComparisonBaseline;

/// Income rebuilt from its line items rather than the stored grand total.
pub fn compute_total_income(income: &CurrentOperatingIncome) -> Decimal {
    let local = &income.local_sources;
    let ext = &income.external_sources;
    [
        local.tax_revenue.real_property_tax.total,
        local.tax_revenue.tax_on_business,
        local.tax_revenue.other_taxes,
        local.non_tax_revenue.total_non_tax_revenue,
        ext.national_tax_allotment,
        ext.other_shares_from_national_tax_collection,
        ext.inter_local_transfers,
        ext.extraordinary_receipts_grants_donations_aids,
    ]
    .iter()
    .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v))
}

pub fn compute_total_expenditure(exp: &CurrentOperatingExpenditures) -> Decimal {
    exp.component_sum()
}

pub fn compute_net_income(
    income: &CurrentOperatingIncome,
    exp: &CurrentOperatingExpenditures,
) -> Decimal {
    compute_total_income(income).saturating_sub(compute_total_expenditure(exp))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YoY {
    pub diff: Decimal,
    pub pct: Decimal,
}

/// Change against last year's figure; `None` when there is no usable baseline
/// or the change does not fit in a `Decimal`.
pub fn calculate_yoy(current: Decimal, previous: Option<Decimal>) -> Option<YoY> {
    let previous = previous.filter(|p| !p.is_zero())?;
    let diff = current.checked_sub(previous)?;
    let pct = diff
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)?;
    Some(YoY { diff, pct })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: Decimal,
    pub previous: Option<Decimal>,
    pub yoy: Option<YoY>,
}

impl SummaryCard {
    fn new(title: &'static str, value: Decimal, previous: Option<Decimal>) -> Self {
        SummaryCard {
            title,
            value,
            previous,
            yoy: calculate_yoy(value, previous),
        }
    }
}

/// The four headline cards: revenue, expenditure, net operating income and
/// treasury balance.
pub fn summary_cards(
    income: &CurrentOperatingIncome,
    exp: &CurrentOperatingExpenditures,
    fund: Option<&FundSummary>,
    baseline: Option<&ComparisonBaseline>,
) -> Vec<SummaryCard> {
    let fund_balance = fund.map(|f| f.fund_cash_balance_end).unwrap_or_default();
    vec![
        SummaryCard::new(
            "Total Revenue",
            compute_total_income(income),
            baseline.map(|b| b.total_income),
        ),
        SummaryCard::new(
            "Total Expenditure",
            compute_total_expenditure(exp),
            baseline.map(|b| b.total_expenditure),
        ),
        SummaryCard::new(
            "Net Operating Income",
            compute_net_income(income, exp),
            baseline.map(|b| b.net_income),
        ),
        SummaryCard::new(
            "Treasury Balance",
            fund_balance,
            baseline.map(|b| b.fund_cash_end),
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownItem {
    pub name: String,
    pub value: Decimal,
    pub share: Decimal,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<BreakdownItem>,
}

impl BreakdownItem {
    fn leaf(name: &str, value: Decimal, of: Decimal) -> Self {
        BreakdownItem {
            name: name.to_string(),
            value,
            share: share(value, of),
            details: Vec::new(),
        }
    }
}

pub fn income_breakdown(income: &CurrentOperatingIncome) -> Vec<BreakdownItem> {
    let local = &income.local_sources;
    let ext = &income.external_sources;
    let local_total = local.total_local_sources;
    let external_total = ext.total_external_sources;
    let grand = income.total_current_operating_income;

    vec![
        BreakdownItem {
            name: "Local Sources".into(),
            value: local_total,
            share: share(local_total, grand),
            details: vec![
                BreakdownItem::leaf(
                    "Real Property Tax",
                    local.tax_revenue.real_property_tax.total,
                    local_total,
                ),
                BreakdownItem::leaf("Business Tax", local.tax_revenue.tax_on_business, local_total),
                BreakdownItem::leaf("Other Taxes", local.tax_revenue.other_taxes, local_total),
                BreakdownItem::leaf(
                    "Regulatory Fees",
                    local.non_tax_revenue.regulatory_fees,
                    local_total,
                ),
                BreakdownItem::leaf(
                    "Economic Enterprises",
                    local.non_tax_revenue.receipts_from_economic_enterprises,
                    local_total,
                ),
                BreakdownItem::leaf(
                    "Service Charges",
                    local.non_tax_revenue.service_user_charges,
                    local_total,
                ),
            ],
        },
        BreakdownItem {
            name: "External Sources".into(),
            value: external_total,
            share: share(external_total, grand),
            details: vec![
                BreakdownItem::leaf("NTA", ext.national_tax_allotment, external_total),
                BreakdownItem::leaf(
                    "Other Shares",
                    ext.other_shares_from_national_tax_collection,
                    external_total,
                ),
                BreakdownItem::leaf(
                    "Grants/Aids",
                    ext.extraordinary_receipts_grants_donations_aids,
                    external_total,
                ),
            ],
        },
    ]
}

pub fn expenditure_breakdown(exp: &CurrentOperatingExpenditures) -> Vec<BreakdownItem> {
    let social_total = exp.social_services.total_social_services;
    let grand = if exp.total_current_operating_expenditures.is_zero() {
        exp.component_sum()
    } else {
        exp.total_current_operating_expenditures
    };

    vec![
        BreakdownItem::leaf("General Public Services", exp.general_public_services, grand),
        BreakdownItem {
            name: "Social Services".into(),
            value: social_total,
            share: share(social_total, grand),
            details: exp
                .social_services
                .categories()
                .iter()
                .map(|(key, v)| BreakdownItem::leaf(&format_label(key), *v, social_total))
                .collect(),
        },
        BreakdownItem::leaf("Economic Services", exp.economic_services, grand),
        BreakdownItem::leaf("Debt Service", exp.debt_service_interest_expense, grand),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawFinancialQuarter;
    use crate::normalize::normalize_quarter;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn quarter() -> crate::models::FinancialQuarter {
        let raw: RawFinancialQuarter = serde_json::from_str(
            r#"{
            "period": "Q1-2024",
            "current_operating_income": {
                "local_sources": {
                    "tax_revenue": {
                        "real_property_tax": { "general_fund": 30, "special_education_fund": 10, "total": 40 },
                        "tax_on_business": 20,
                        "other_taxes": 5,
                        "total_tax_revenue": 65
                    },
                    "non_tax_revenue": { "regulatory_fees": 10, "service_user_charges": 5, "total_non_tax_revenue": 15 },
                    "total_local_sources": 80
                },
                "external_sources": { "national_tax_allotment": 100, "inter_local_transfers": 20, "total_external_sources": 120 }
            },
            "current_operating_expenditures": {
                "general_public_services": 50,
                "social_services": { "health_nutrition_population_control": 25, "labor_and_employment": 25 },
                "economic_services": 40,
                "debt_service_interest_expense": 10
            },
            "fund_summary": { "fund_cash_balance_end": 300 }
        }"#,
        )
        .unwrap();
        normalize_quarter(&raw)
    }

    #[test]
    fn totals_from_components() {
        let q = quarter();
        assert_eq!(compute_total_income(&q.current_operating_income), dec!(200));
        assert_eq!(compute_total_expenditure(&q.current_operating_expenditures), dec!(150));
        assert_eq!(
            compute_net_income(&q.current_operating_income, &q.current_operating_expenditures),
            dec!(50)
        );
    }

    #[test]
    fn yoy_needs_nonzero_baseline() {
        assert!(calculate_yoy(dec!(10), None).is_none());
        assert!(calculate_yoy(dec!(10), Some(Decimal::ZERO)).is_none());
        assert_eq!(
            calculate_yoy(dec!(150), Some(dec!(120))).unwrap(),
            YoY {
                diff: dec!(30),
                pct: dec!(25)
            }
        );
    }

    #[test]
    fn yoy_is_none_when_the_change_overflows() {
        assert!(calculate_yoy(Decimal::MAX, Some(dec!(0.5))).is_none());
        assert!(calculate_yoy(Decimal::MIN, Some(Decimal::MAX)).is_none());
        assert!(calculate_yoy(Decimal::MAX, Some(Decimal::MAX)).is_some());
    }

    #[test]
    fn cards_compare_against_baseline() {
        let q = quarter();
        let baseline = ComparisonBaseline {
            total_income: dec!(160),
            total_expenditure: dec!(150),
            net_income: Decimal::ZERO,
            fund_cash_end: dec!(400),
        };
        let cards = summary_cards(
            &q.current_operating_income,
            &q.current_operating_expenditures,
            q.fund_summary.as_ref(),
            Some(&baseline),
        );
        let titles: Vec<_> = cards.iter().map(|c| c.title).collect();
        assert_eq!(
            titles,
            vec!["Total Revenue", "Total Expenditure", "Net Operating Income", "Treasury Balance"]
        );
        assert_eq!(cards[0].yoy.as_ref().unwrap().pct, dec!(25));
        assert_eq!(cards[1].yoy.as_ref().unwrap().diff, Decimal::ZERO);
        assert!(cards[2].yoy.is_none());
        assert_eq!(cards[3].value, dec!(300));
        assert_eq!(cards[3].yoy.as_ref().unwrap().pct, dec!(-25));
    }

    #[test]
    fn breakdown_shares() {
        let q = quarter();
        let inc = income_breakdown(&q.current_operating_income);
        assert_eq!(inc[0].share, dec!(0.4));
        assert_eq!(inc[0].details[0].share, dec!(0.5));
        assert_eq!(inc[1].details[0].name, "NTA");

        let exp = expenditure_breakdown(&q.current_operating_expenditures);
        assert_eq!(exp[1].value, dec!(50));
        assert_eq!(exp[1].details.len(), 5);
        assert_eq!(exp[1].details[1].name, "Health Nutrition Population Control");
        assert_eq!(exp[1].details[1].share, dec!(0.5));
        assert_eq!(exp[0].share, dec!(50) / dec!(150));
    }
}
