// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::models::{CurrentOperatingExpenditures, CurrentOperatingIncome};

// Saturates instead of panicking; loaded amounts are bounded, so only
// absurdly long inputs can reach the limit.
fn add(acc: &mut Decimal, v: Decimal) {
    *acc = acc.saturating_add(v);
}

/// Sums several quarters of operating income field by field, including the
/// stored subtotals and grand total.
pub fn aggregate_income<'a, I>(data: I) -> CurrentOperatingIncome
where
    I: IntoIterator<Item = &'a CurrentOperatingIncome>,
{
    data.into_iter()
        .fold(CurrentOperatingIncome::default(), |mut acc, cur| {
            let (al, cl) = (&mut acc.local_sources, &cur.local_sources);
            add(&mut al.total_local_sources, cl.total_local_sources);

            let (at, ct) = (&mut al.tax_revenue, &cl.tax_revenue);
            add(&mut at.real_property_tax.general_fund, ct.real_property_tax.general_fund);
            add(
                &mut at.real_property_tax.special_education_fund,
                ct.real_property_tax.special_education_fund,
            );
            add(&mut at.real_property_tax.total, ct.real_property_tax.total);
            add(&mut at.tax_on_business, ct.tax_on_business);
            add(&mut at.other_taxes, ct.other_taxes);
            add(&mut at.total_tax_revenue, ct.total_tax_revenue);

            let (an, cn) = (&mut al.non_tax_revenue, &cl.non_tax_revenue);
            add(&mut an.regulatory_fees, cn.regulatory_fees);
            add(&mut an.service_user_charges, cn.service_user_charges);
            add(&mut an.receipts_from_economic_enterprises, cn.receipts_from_economic_enterprises);
            add(&mut an.other_receipts, cn.other_receipts);
            add(&mut an.total_non_tax_revenue, cn.total_non_tax_revenue);

            let (ae, ce) = (&mut acc.external_sources, &cur.external_sources);
            add(&mut ae.national_tax_allotment, ce.national_tax_allotment);
            add(
                &mut ae.other_shares_from_national_tax_collection,
                ce.other_shares_from_national_tax_collection,
            );
            add(&mut ae.inter_local_transfers, ce.inter_local_transfers);
            add(
                &mut ae.extraordinary_receipts_grants_donations_aids,
                ce.extraordinary_receipts_grants_donations_aids,
            );
            add(&mut ae.total_external_sources, ce.total_external_sources);

            add(&mut acc.total_current_operating_income, cur.total_current_operating_income);
            acc
        })
}

/// Sums expenditure components, then derives the social-services subtotal and
/// the grand total from the sums so the result is always self-consistent.
pub fn aggregate_expenditures<'a, I>(data: I) -> CurrentOperatingExpenditures
where
    I: IntoIterator<Item = &'a CurrentOperatingExpenditures>,
{
    let mut agg = data
        .into_iter()
        .fold(CurrentOperatingExpenditures::default(), |mut acc, cur| {
            add(&mut acc.general_public_services, cur.general_public_services);
            add(&mut acc.economic_services, cur.economic_services);
            add(&mut acc.debt_service_interest_expense, cur.debt_service_interest_expense);

            let (a, c) = (&mut acc.social_services, &cur.social_services);
            add(
                &mut a.education_culture_sports_manpower_development,
                c.education_culture_sports_manpower_development,
            );
            add(&mut a.health_nutrition_population_control, c.health_nutrition_population_control);
            add(&mut a.labor_and_employment, c.labor_and_employment);
            add(&mut a.housing_and_community_development, c.housing_and_community_development);
            add(&mut a.social_services_and_social_welfare, c.social_services_and_social_welfare);
            acc
        });

    agg.social_services.total_social_services = agg.social_services.component_sum();
    agg.total_current_operating_expenditures = agg.component_sum();
    agg
}
