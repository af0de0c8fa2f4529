// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns partial SRE records into fully populated quarters.
//!
//! Income and current-expenditure grand totals are recomputed from their
//! components. Totals inside `non_income_receipts` and
//! `non_operating_expenditures` are carried over from the source untouched;
//! `commands::doctor` reports where those disagree with their components.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::*;

fn or_zero(v: Option<Decimal>) -> Decimal {
    v.unwrap_or(Decimal::ZERO)
}

fn real_property_tax(raw: Option<&RawRealPropertyTax>) -> RealPropertyTax {
    let raw = raw.cloned().unwrap_or_default();
    RealPropertyTax {
        general_fund: or_zero(raw.general_fund),
        special_education_fund: or_zero(raw.special_education_fund),
        total: or_zero(raw.total),
    }
}

fn tax_revenue(raw: Option<&RawTaxRevenue>) -> TaxRevenue {
    let Some(raw) = raw else {
        return TaxRevenue::default();
    };
    TaxRevenue {
        real_property_tax: real_property_tax(raw.real_property_tax.as_ref()),
        tax_on_business: or_zero(raw.tax_on_business),
        other_taxes: or_zero(raw.other_taxes),
        total_tax_revenue: or_zero(raw.total_tax_revenue),
    }
}

fn non_tax_revenue(raw: Option<&RawNonTaxRevenue>) -> NonTaxRevenue {
    let Some(raw) = raw else {
        return NonTaxRevenue::default();
    };
    NonTaxRevenue {
        regulatory_fees: or_zero(raw.regulatory_fees),
        service_user_charges: or_zero(raw.service_user_charges),
        receipts_from_economic_enterprises: or_zero(raw.receipts_from_economic_enterprises),
        other_receipts: or_zero(raw.other_receipts),
        total_non_tax_revenue: or_zero(raw.total_non_tax_revenue),
    }
}

fn local_sources(raw: Option<&RawLocalSources>) -> LocalSources {
    let Some(raw) = raw else {
        return LocalSources::default();
    };
    LocalSources {
        tax_revenue: tax_revenue(raw.tax_revenue.as_ref()),
        non_tax_revenue: non_tax_revenue(raw.non_tax_revenue.as_ref()),
        total_local_sources: or_zero(raw.total_local_sources),
    }
}

fn external_sources(raw: Option<&RawExternalSources>) -> ExternalSources {
    let Some(raw) = raw else {
        return ExternalSources::default();
    };
    ExternalSources {
        national_tax_allotment: or_zero(raw.national_tax_allotment),
        other_shares_from_national_tax_collection: or_zero(
            raw.other_shares_from_national_tax_collection,
        ),
        inter_local_transfers: or_zero(raw.inter_local_transfers),
        extraordinary_receipts_grants_donations_aids: or_zero(
            raw.extraordinary_receipts_grants_donations_aids,
        ),
        total_external_sources: or_zero(raw.total_external_sources),
    }
}

pub fn normalize_income(raw: Option<&RawCurrentOperatingIncome>) -> CurrentOperatingIncome {
    let local = local_sources(raw.and_then(|r| r.local_sources.as_ref()));
    let external = external_sources(raw.and_then(|r| r.external_sources.as_ref()));
    let total = local.total_local_sources + external.total_external_sources;
    CurrentOperatingIncome {
        local_sources: local,
        external_sources: external,
        total_current_operating_income: total,
    }
}

fn social_services(raw: Option<&RawSocialServices>) -> SocialServices {
    let raw = raw.cloned().unwrap_or_default();
    let mut s = SocialServices {
        education_culture_sports_manpower_development: or_zero(
            raw.education_culture_sports_manpower_development,
        ),
        health_nutrition_population_control: or_zero(raw.health_nutrition_population_control),
        labor_and_employment: or_zero(raw.labor_and_employment),
        housing_and_community_development: or_zero(raw.housing_and_community_development),
        social_services_and_social_welfare: or_zero(raw.social_services_and_social_welfare),
        total_social_services: Decimal::ZERO,
    };
    s.total_social_services = s.component_sum();
    s
}

pub fn normalize_expenditures(
    raw: Option<&RawCurrentOperatingExpenditures>,
) -> CurrentOperatingExpenditures {
    let mut exp = CurrentOperatingExpenditures {
        general_public_services: or_zero(raw.and_then(|r| r.general_public_services)),
        social_services: social_services(raw.and_then(|r| r.social_services.as_ref())),
        economic_services: or_zero(raw.and_then(|r| r.economic_services)),
        debt_service_interest_expense: or_zero(raw.and_then(|r| r.debt_service_interest_expense)),
        total_current_operating_expenditures: Decimal::ZERO,
    };
    exp.total_current_operating_expenditures = exp.component_sum();
    exp
}

// Subsection totals below are pass-through.

pub fn normalize_non_income_receipts(raw: Option<&RawNonIncomeReceipts>) -> NonIncomeReceipts {
    let raw = raw.cloned().unwrap_or_default();
    let cap = raw.capital_investment_receipts.unwrap_or_default();
    let loans = raw.receipts_from_loans_and_borrowings.unwrap_or_default();
    NonIncomeReceipts {
        capital_investment_receipts: CapitalInvestmentReceipts {
            proceeds_from_sale_of_assets: or_zero(cap.proceeds_from_sale_of_assets),
            proceeds_from_sale_of_debt_securities_of_other_entities: or_zero(
                cap.proceeds_from_sale_of_debt_securities_of_other_entities,
            ),
            collection_of_loans_receivables: or_zero(cap.collection_of_loans_receivables),
            total_capital_investment_receipts: or_zero(cap.total_capital_investment_receipts),
        },
        receipts_from_loans_and_borrowings: ReceiptsFromLoansAndBorrowings {
            acquisition_of_loans: or_zero(loans.acquisition_of_loans),
            issuance_of_bonds: or_zero(loans.issuance_of_bonds),
            total_receipts_from_loans_and_borrowings: or_zero(
                loans.total_receipts_from_loans_and_borrowings,
            ),
        },
        other_non_income_receipts: or_zero(raw.other_non_income_receipts),
        total_non_income_receipts: or_zero(raw.total_non_income_receipts),
    }
}

pub fn normalize_non_operating_expenditures(
    raw: Option<&RawNonOperatingExpenditures>,
) -> NonOperatingExpenditures {
    let raw = raw.cloned().unwrap_or_default();
    let cap = raw.capital_investment_expenditures.unwrap_or_default();
    let debt = raw.debt_service_principal_cost.unwrap_or_default();
    NonOperatingExpenditures {
        capital_investment_expenditures: CapitalInvestmentExpenditures {
            purchase_construct_of_property_plant_and_equipment: or_zero(
                cap.purchase_construct_of_property_plant_and_equipment,
            ),
            purchase_of_debt_securities_of_other_entities: or_zero(
                cap.purchase_of_debt_securities_of_other_entities,
            ),
            grant_make_loan_to_other_entities: or_zero(cap.grant_make_loan_to_other_entities),
            total_capital_investment_expenditures: or_zero(
                cap.total_capital_investment_expenditures,
            ),
        },
        debt_service_principal_cost: DebtServicePrincipalCost {
            payment_of_loan_amortization: or_zero(debt.payment_of_loan_amortization),
            retirement_redemption_of_bonds_debt_securities: or_zero(
                debt.retirement_redemption_of_bonds_debt_securities,
            ),
            total_debt_service_principal_cost: or_zero(debt.total_debt_service_principal_cost),
        },
        other_non_operating_expenditures: or_zero(raw.other_non_operating_expenditures),
        total_non_operating_expenditures: or_zero(raw.total_non_operating_expenditures),
    }
}

fn fund_summary(raw: &RawFundSummary) -> FundSummary {
    FundSummary {
        fund_cash_balance_end: or_zero(raw.fund_cash_balance_end),
        net_increase_decrease_in_funds: raw.net_increase_decrease_in_funds,
        add_cash_balance_beginning: raw.add_cash_balance_beginning,
        fund_cash_available: raw.fund_cash_available,
        less_payment_of_prior_years_accounts_payable: raw
            .less_payment_of_prior_years_accounts_payable,
        continuing_appropriation: raw.continuing_appropriation,
    }
}

/// Builds a complete quarter from a raw record. Absent numeric leaves become
/// zero; `fund_summary` stays `None` when the source has none.
pub fn normalize_quarter(raw: &RawFinancialQuarter) -> FinancialQuarter {
    let income = normalize_income(raw.current_operating_income.as_ref());
    let expenditures = normalize_expenditures(raw.current_operating_expenditures.as_ref());

    if let Some(stored) = raw
        .current_operating_income
        .as_ref()
        .and_then(|i| i.total_current_operating_income)
    {
        if stored != income.total_current_operating_income {
            warn!(
                period = %raw.period,
                %stored,
                recomputed = %income.total_current_operating_income,
                "stored operating income total disagrees with its sources"
            );
        }
    }
    if let Some(stored) = raw
        .current_operating_expenditures
        .as_ref()
        .and_then(|e| e.total_current_operating_expenditures)
    {
        if stored != expenditures.total_current_operating_expenditures {
            warn!(
                period = %raw.period,
                %stored,
                recomputed = %expenditures.total_current_operating_expenditures,
                "stored operating expenditure total disagrees with its components"
            );
        }
    }

    let q = FinancialQuarter {
        period: raw.period.clone(),
        location_info: raw.location_info.clone().unwrap_or_default(),
        current_operating_income: income,
        current_operating_expenditures: expenditures,
        net_operating_income_loss_from_current_operations: or_zero(
            raw.net_operating_income_loss_from_current_operations,
        ),
        non_income_receipts: normalize_non_income_receipts(raw.non_income_receipts.as_ref()),
        non_operating_expenditures: normalize_non_operating_expenditures(
            raw.non_operating_expenditures.as_ref(),
        ),
        fund_summary: raw.fund_summary.as_ref().map(fund_summary),
    };
    debug!(period = %q.period, "normalized quarter");
    q
}

pub fn normalize_all(raw: &[RawFinancialQuarter]) -> Vec<FinancialQuarter> {
    raw.iter().map(normalize_quarter).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn raw(json: &str) -> RawFinancialQuarter {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn bare_period_yields_zeroed_quarter_without_fund_summary() {
        let r = raw(r#"{ "period": "Q1-2023" }"#);
        let q = normalize_quarter(&r);
        assert_eq!(
            q,
            FinancialQuarter {
                period: "Q1-2023".into(),
                ..FinancialQuarter::default()
            }
        );
        assert!(q.fund_summary.is_none());
    }

    #[test]
    fn empty_fund_summary_object_is_kept() {
        let q = normalize_quarter(&raw(r#"{ "period": "Q1-2023", "fund_summary": {} }"#));
        let fs = q.fund_summary.unwrap();
        assert_eq!(fs.fund_cash_balance_end, Decimal::ZERO);
        assert!(fs.fund_cash_available.is_none());
    }

    #[test]
    fn totals_are_recomputed_even_when_source_disagrees() {
        let r = raw(
            r#"{
            "period": "Q2-2023",
            "current_operating_income": {
                "local_sources": { "total_local_sources": 120 },
                "external_sources": { "total_external_sources": 30 },
                "total_current_operating_income": 999
            },
            "current_operating_expenditures": {
                "general_public_services": 10,
                "social_services": {
                    "education_culture_sports_manpower_development": 1,
                    "health_nutrition_population_control": 2,
                    "labor_and_employment": 3,
                    "housing_and_community_development": 4,
                    "social_services_and_social_welfare": 5,
                    "total_social_services": 1000
                },
                "economic_services": 20,
                "debt_service_interest_expense": 0.5,
                "total_current_operating_expenditures": 1
            }
        }"#,
        );
        let q = normalize_quarter(&r);
        let inc = &q.current_operating_income;
        assert_eq!(inc.total_current_operating_income, dec!(150));
        let exp = &q.current_operating_expenditures;
        assert_eq!(exp.social_services.total_social_services, dec!(15));
        assert_eq!(exp.total_current_operating_expenditures, dec!(45.5));
    }

    #[test]
    fn non_income_subsections_merge_and_keep_stored_totals() {
        let r = raw(
            r#"{
            "period": "Q3-2023",
            "non_income_receipts": {
                "capital_investment_receipts": {
                    "proceeds_from_sale_of_assets": 7,
                    "total_capital_investment_receipts": 99
                }
            },
            "non_operating_expenditures": {
                "debt_service_principal_cost": { "payment_of_loan_amortization": 40 },
                "total_non_operating_expenditures": 40
            }
        }"#,
        );
        let q = normalize_quarter(&r);
        let cap = &q.non_income_receipts.capital_investment_receipts;
        assert_eq!(cap.proceeds_from_sale_of_assets, dec!(7));
        assert_eq!(cap.collection_of_loans_receivables, Decimal::ZERO);
        assert_eq!(cap.total_capital_investment_receipts, dec!(99));
        assert_eq!(
            q.non_income_receipts.receipts_from_loans_and_borrowings,
            ReceiptsFromLoansAndBorrowings::default()
        );
        let debt = &q.non_operating_expenditures.debt_service_principal_cost;
        assert_eq!(debt.payment_of_loan_amortization, dec!(40));
        assert_eq!(debt.total_debt_service_principal_cost, Decimal::ZERO);
        assert_eq!(q.non_operating_expenditures.total_non_operating_expenditures, dec!(40));
    }

    #[test]
    fn net_income_passes_through_unchanged() {
        let q = normalize_quarter(&raw(
            r#"{ "period": "Q1-2024", "net_operating_income_loss_from_current_operations": -12.75 }"#,
        ));
        assert_eq!(q.net_operating_income_loss_from_current_operations, dec!(-12.75));
    }

    #[test]
    fn input_is_left_untouched() {
        let r = raw(r#"{ "period": "Q1-2024", "current_operating_income": { "total_current_operating_income": 5 } }"#);
        let before = r.clone();
        let _ = normalize_quarter(&r);
        assert_eq!(r, before);
    }
}
