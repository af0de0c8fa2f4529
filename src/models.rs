// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub lgu_name: String,
    #[serde(default)]
    pub lgu_type: String,
}

// --- Income ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealPropertyTax {
    pub general_fund: Decimal,
    pub special_education_fund: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxRevenue {
    pub real_property_tax: RealPropertyTax,
    pub tax_on_business: Decimal,
    pub other_taxes: Decimal,
    pub total_tax_revenue: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NonTaxRevenue {
    pub regulatory_fees: Decimal,
    pub service_user_charges: Decimal,
    pub receipts_from_economic_enterprises: Decimal,
    pub other_receipts: Decimal,
    pub total_non_tax_revenue: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalSources {
    pub tax_revenue: TaxRevenue,
    pub non_tax_revenue: NonTaxRevenue,
    pub total_local_sources: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalSources {
    pub national_tax_allotment: Decimal,
    pub other_shares_from_national_tax_collection: Decimal,
    pub inter_local_transfers: Decimal,
    pub extraordinary_receipts_grants_donations_aids: Decimal,
    pub total_external_sources: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentOperatingIncome {
    pub local_sources: LocalSources,
    pub external_sources: ExternalSources,
    pub total_current_operating_income: Decimal,
}

// --- Expenditures ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialServices {
    pub education_culture_sports_manpower_development: Decimal,
    pub health_nutrition_population_control: Decimal,
    pub labor_and_employment: Decimal,
    pub housing_and_community_development: Decimal,
    pub social_services_and_social_welfare: Decimal,
    pub total_social_services: Decimal,
}

impl SocialServices {
    /// The five spending categories, keyed by their JSON field name.
    pub fn categories(&self) -> [(&'static str, Decimal); 5] {
        [
            (
                "education_culture_sports_manpower_development",
                self.education_culture_sports_manpower_development,
            ),
            (
                "health_nutrition_population_control",
                self.health_nutrition_population_control,
            ),
            ("labor_and_employment", self.labor_and_employment),
            (
                "housing_and_community_development",
                self.housing_and_community_development,
            ),
            (
                "social_services_and_social_welfare",
                self.social_services_and_social_welfare,
            ),
        ]
    }

    pub fn component_sum(&self) -> Decimal {
        self.categories()
            .iter()
            .fold(Decimal::ZERO, |acc, (_, v)| acc.saturating_add(*v))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentOperatingExpenditures {
    pub general_public_services: Decimal,
    pub social_services: SocialServices,
    pub economic_services: Decimal,
    pub debt_service_interest_expense: Decimal,
    pub total_current_operating_expenditures: Decimal,
}

impl CurrentOperatingExpenditures {
    pub fn component_sum(&self) -> Decimal {
        [
            self.social_services.total_social_services,
            self.economic_services,
            self.debt_service_interest_expense,
        ]
        .iter()
        .fold(self.general_public_services, |acc, v| acc.saturating_add(*v))
    }
}

// --- Non-income receipts ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalInvestmentReceipts {
    pub proceeds_from_sale_of_assets: Decimal,
    pub proceeds_from_sale_of_debt_securities_of_other_entities: Decimal,
    pub collection_of_loans_receivables: Decimal,
    pub total_capital_investment_receipts: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptsFromLoansAndBorrowings {
    pub acquisition_of_loans: Decimal,
    pub issuance_of_bonds: Decimal,
    pub total_receipts_from_loans_and_borrowings: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NonIncomeReceipts {
    pub capital_investment_receipts: CapitalInvestmentReceipts,
    pub receipts_from_loans_and_borrowings: ReceiptsFromLoansAndBorrowings,
    pub other_non_income_receipts: Decimal,
    pub total_non_income_receipts: Decimal,
}

// --- Non-operating expenditures ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalInvestmentExpenditures {
    pub purchase_construct_of_property_plant_and_equipment: Decimal,
    pub purchase_of_debt_securities_of_other_entities: Decimal,
    pub grant_make_loan_to_other_entities: Decimal,
    pub total_capital_investment_expenditures: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtServicePrincipalCost {
    pub payment_of_loan_amortization: Decimal,
    pub retirement_redemption_of_bonds_debt_securities: Decimal,
    pub total_debt_service_principal_cost: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NonOperatingExpenditures {
    pub capital_investment_expenditures: CapitalInvestmentExpenditures,
    pub debt_service_principal_cost: DebtServicePrincipalCost,
    pub other_non_operating_expenditures: Decimal,
    pub total_non_operating_expenditures: Decimal,
}

// --- Fund summary ---

/// Cash roll-forward for the period. `fund_cash_balance_end` is a stock,
/// never summed across quarters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundSummary {
    pub fund_cash_balance_end: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_increase_decrease_in_funds: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_cash_balance_beginning: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fund_cash_available: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_payment_of_prior_years_accounts_payable: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuing_appropriation: Option<Decimal>,
}

/// One fiscal quarter of an SRE, fully populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialQuarter {
    pub period: String, // Qn-YYYY
    pub location_info: LocationInfo,
    pub current_operating_income: CurrentOperatingIncome,
    pub current_operating_expenditures: CurrentOperatingExpenditures,
    pub net_operating_income_loss_from_current_operations: Decimal,
    pub non_income_receipts: NonIncomeReceipts,
    pub non_operating_expenditures: NonOperatingExpenditures,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fund_summary: Option<FundSummary>,
}

impl FinancialQuarter {
    pub fn year(&self) -> &str {
        period_year(&self.period)
    }

    pub fn quarter_label(&self) -> &str {
        period_quarter(&self.period)
    }
}

/// `"Q3-2024"` -> `"2024"`. Empty when the period has no `-`.
pub fn period_year(period: &str) -> &str {
    period.split('-').nth(1).unwrap_or("")
}

/// `"Q3-2024"` -> `"Q3"`.
pub fn period_quarter(period: &str) -> &str {
    period.split('-').next().unwrap_or("")
}

// --- Raw (partial) shapes as found in the source JSON ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRealPropertyTax {
    pub general_fund: Option<Decimal>,
    pub special_education_fund: Option<Decimal>,
    pub total: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTaxRevenue {
    pub real_property_tax: Option<RawRealPropertyTax>,
    pub tax_on_business: Option<Decimal>,
    pub other_taxes: Option<Decimal>,
    pub total_tax_revenue: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNonTaxRevenue {
    pub regulatory_fees: Option<Decimal>,
    pub service_user_charges: Option<Decimal>,
    pub receipts_from_economic_enterprises: Option<Decimal>,
    pub other_receipts: Option<Decimal>,
    pub total_non_tax_revenue: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLocalSources {
    pub tax_revenue: Option<RawTaxRevenue>,
    pub non_tax_revenue: Option<RawNonTaxRevenue>,
    pub total_local_sources: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawExternalSources {
    pub national_tax_allotment: Option<Decimal>,
    pub other_shares_from_national_tax_collection: Option<Decimal>,
    pub inter_local_transfers: Option<Decimal>,
    pub extraordinary_receipts_grants_donations_aids: Option<Decimal>,
    pub total_external_sources: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCurrentOperatingIncome {
    pub local_sources: Option<RawLocalSources>,
    pub external_sources: Option<RawExternalSources>,
    pub total_current_operating_income: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSocialServices {
    pub education_culture_sports_manpower_development: Option<Decimal>,
    pub health_nutrition_population_control: Option<Decimal>,
    pub labor_and_employment: Option<Decimal>,
    pub housing_and_community_development: Option<Decimal>,
    pub social_services_and_social_welfare: Option<Decimal>,
    pub total_social_services: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCurrentOperatingExpenditures {
    pub general_public_services: Option<Decimal>,
    pub social_services: Option<RawSocialServices>,
    pub economic_services: Option<Decimal>,
    pub debt_service_interest_expense: Option<Decimal>,
    pub total_current_operating_expenditures: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCapitalInvestmentReceipts {
    pub proceeds_from_sale_of_assets: Option<Decimal>,
    pub proceeds_from_sale_of_debt_securities_of_other_entities: Option<Decimal>,
    pub collection_of_loans_receivables: Option<Decimal>,
    pub total_capital_investment_receipts: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReceiptsFromLoansAndBorrowings {
    pub acquisition_of_loans: Option<Decimal>,
    pub issuance_of_bonds: Option<Decimal>,
    pub total_receipts_from_loans_and_borrowings: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNonIncomeReceipts {
    pub capital_investment_receipts: Option<RawCapitalInvestmentReceipts>,
    pub receipts_from_loans_and_borrowings: Option<RawReceiptsFromLoansAndBorrowings>,
    pub other_non_income_receipts: Option<Decimal>,
    pub total_non_income_receipts: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCapitalInvestmentExpenditures {
    pub purchase_construct_of_property_plant_and_equipment: Option<Decimal>,
    pub purchase_of_debt_securities_of_other_entities: Option<Decimal>,
    pub grant_make_loan_to_other_entities: Option<Decimal>,
    pub total_capital_investment_expenditures: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDebtServicePrincipalCost {
    pub payment_of_loan_amortization: Option<Decimal>,
    pub retirement_redemption_of_bonds_debt_securities: Option<Decimal>,
    pub total_debt_service_principal_cost: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNonOperatingExpenditures {
    pub capital_investment_expenditures: Option<RawCapitalInvestmentExpenditures>,
    pub debt_service_principal_cost: Option<RawDebtServicePrincipalCost>,
    pub other_non_operating_expenditures: Option<Decimal>,
    pub total_non_operating_expenditures: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFundSummary {
    pub fund_cash_balance_end: Option<Decimal>,
    pub net_increase_decrease_in_funds: Option<Decimal>,
    pub add_cash_balance_beginning: Option<Decimal>,
    pub fund_cash_available: Option<Decimal>,
    pub less_payment_of_prior_years_accounts_payable: Option<Decimal>,
    pub continuing_appropriation: Option<Decimal>,
}

/// A quarter exactly as it appears in the SRE JSON. The published dataset
/// stores expenditures under `total_current_operating_expenditures`; a record
/// carrying both spellings fails as a duplicate field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFinancialQuarter {
    pub period: String,
    pub location_info: Option<LocationInfo>,
    pub current_operating_income: Option<RawCurrentOperatingIncome>,
    #[serde(alias = "total_current_operating_expenditures")]
    pub current_operating_expenditures: Option<RawCurrentOperatingExpenditures>,
    pub net_operating_income_loss_from_current_operations: Option<Decimal>,
    pub non_income_receipts: Option<RawNonIncomeReceipts>,
    pub non_operating_expenditures: Option<RawNonOperatingExpenditures>,
    pub fund_summary: Option<RawFundSummary>,
}
