// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sreview::{data, ComparisonBaseline, Ledger, ViewMode};

fn fixture() -> Ledger {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sre.json");
    data::load(&path).unwrap().1
}

#[test]
fn end_to_end_year_rollup_from_sparse_records() {
    let (_, ledger) = data::parse_ledger(
        r#"[
        {"period":"Q1-2023","current_operating_income":{"local_sources":{"total_local_sources":100}}},
        {"period":"Q2-2023","current_operating_income":{"local_sources":{"total_local_sources":200},"external_sources":{"total_external_sources":50}}}
    ]"#,
    )
    .unwrap();
    let sel = ledger.initial_selection().unwrap().with_mode(ViewMode::Year);
    assert_eq!(sel.year, "2023");

    let income = ledger.displayed_income(&sel);
    assert_eq!(income.total_current_operating_income, dec!(350));
    assert_eq!(income.local_sources.total_local_sources, dec!(300));
    assert_eq!(income.external_sources.total_external_sources, dec!(50));
}

#[test]
fn fixture_uses_published_expenditure_key() {
    let ledger = fixture();
    let q = ledger.find_period("Q3-2023").unwrap();
    assert_eq!(
        q.current_operating_expenditures.total_current_operating_expenditures,
        dec!(66000000)
    );
    assert_eq!(q.location_info.lgu_name, "LOS BAÑOS");
    assert_eq!(
        q.fund_summary.as_ref().unwrap().add_cash_balance_beginning,
        Some(dec!(89000000))
    );
}

#[test]
fn initial_selection_and_sticky_year_change() {
    let ledger = fixture();
    assert_eq!(ledger.available_years(), vec!["2023", "2024"]);

    let sel = ledger.initial_selection().unwrap();
    assert_eq!(sel.quarter.period, "Q3-2024");

    let back = ledger.change_year(&sel, "2023").unwrap();
    assert_eq!(back.quarter.period, "Q3-2023");

    let q1 = ledger.select_quarter(&sel, "Q1-2024").unwrap();
    let fallback = ledger.change_year(&q1, "2023").unwrap();
    assert_eq!(fallback.quarter.period, "Q3-2023");
}

#[test]
fn year_view_of_2024() {
    let ledger = fixture();
    let sel = ledger
        .initial_selection()
        .unwrap()
        .with_mode(ViewMode::Year);

    let income = ledger.displayed_income(&sel);
    assert_eq!(income.total_current_operating_income, dec!(170000000));
    assert_eq!(income.local_sources.tax_revenue.tax_on_business, dec!(7000000));

    let exp = ledger.displayed_expenditure(&sel);
    assert_eq!(exp.social_services.total_social_services, dec!(10000000));
    assert_eq!(exp.total_current_operating_expenditures, dec!(100000000));

    // Q3-2024 is listed last and carries no fund summary
    assert!(ledger.displayed_fund_summary(&sel).is_none());
}

#[test]
fn baselines_against_2023() {
    let ledger = fixture();
    let expected = ComparisonBaseline {
        total_income: dec!(84000000),
        total_expenditure: dec!(66000000),
        net_income: dec!(18000000),
        fund_cash_end: dec!(95000000),
    };

    let sel = ledger.initial_selection().unwrap();
    assert_eq!(ledger.comparison_baseline(&sel).unwrap(), expected);
    assert_eq!(
        ledger
            .comparison_baseline(&sel.clone().with_mode(ViewMode::Year))
            .unwrap(),
        expected
    );

    let q1 = ledger.select_quarter(&sel, "Q1-2024").unwrap();
    assert!(ledger.comparison_baseline(&q1).is_none());

    let old = ledger.change_year(&sel, "2023").unwrap();
    assert!(ledger.comparison_baseline(&old).is_none());
}

#[test]
fn every_normalized_quarter_is_internally_consistent() {
    let ledger = fixture();
    for q in ledger.quarters() {
        let inc = &q.current_operating_income;
        assert_eq!(
            inc.total_current_operating_income,
            inc.local_sources.total_local_sources + inc.external_sources.total_external_sources
        );
        let exp = &q.current_operating_expenditures;
        assert_eq!(
            exp.social_services.total_social_services,
            exp.social_services.component_sum()
        );
        assert_eq!(exp.total_current_operating_expenditures, exp.component_sum());
        assert!(exp.total_current_operating_expenditures >= Decimal::ZERO);
    }
}
