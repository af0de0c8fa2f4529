// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Year/quarter selection over an immutable list of quarters.
//!
//! The caller owns a [`Selection`] and hands it to the [`Ledger`] queries;
//! nothing here holds mutable state.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate_expenditures, aggregate_income};
use crate::error::{SreError, SreResult};
use crate::models::{
    period_quarter, CurrentOperatingExpenditures, CurrentOperatingIncome,
    FinancialQuarter, FundSummary,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Quarter,
    Year,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quarter" | "q" => Ok(ViewMode::Quarter),
            "year" | "y" => Ok(ViewMode::Year),
            other => Err(format!("Unknown view mode '{}' (use quarter|year)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub year: String,
    pub mode: ViewMode,
    pub quarter: &'a FinancialQuarter,
}

impl<'a> Selection<'a> {
    pub fn with_mode(self, mode: ViewMode) -> Self {
        Selection { mode, ..self }
    }
}

/// Same-period figures from one year earlier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonBaseline {
    pub total_income: Decimal,
    pub total_expenditure: Decimal,
    pub net_income: Decimal,
    pub fund_cash_end: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    quarters: Vec<FinancialQuarter>,
}

impl Ledger {
    pub fn new(quarters: Vec<FinancialQuarter>) -> Self {
        Ledger { quarters }
    }

    pub fn quarters(&self) -> &[FinancialQuarter] {
        &self.quarters
    }

    /// Distinct years, ascending. Years are compared as strings.
    pub fn available_years(&self) -> Vec<String> {
        self.quarters
            .iter()
            .map(|q| q.year().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Quarters of `year` in source order.
    pub fn quarters_in_year(&self, year: &str) -> Vec<&FinancialQuarter> {
        self.quarters.iter().filter(|q| q.year() == year).collect()
    }

    pub fn find_period(&self, period: &str) -> Option<&FinancialQuarter> {
        self.quarters.iter().find(|q| q.period == period)
    }

    /// Latest year, its last listed quarter, quarter mode. `None` for an
    /// empty ledger.
    pub fn initial_selection(&self) -> Option<Selection<'_>> {
        let year = self.available_years().pop()?;
        let quarter = self
            .quarters_in_year(&year)
            .last()
            .copied()
            .or_else(|| self.quarters.first())?;
        Some(Selection {
            year,
            mode: ViewMode::Quarter,
            quarter,
        })
    }

    /// Moves to `new_year`, keeping the quarter label (Q1..Q4) when that year
    /// has it, otherwise landing on the year's last listed quarter.
    pub fn change_year<'a>(
        &'a self,
        current: &Selection<'a>,
        new_year: &str,
    ) -> SreResult<Selection<'a>> {
        let in_year = self.quarters_in_year(new_year);
        let label = current.quarter.quarter_label();
        let quarter = in_year
            .iter()
            .find(|q| q.quarter_label() == label)
            .or_else(|| in_year.last())
            .copied()
            .ok_or_else(|| SreError::UnknownYear(new_year.to_string()))?;
        Ok(Selection {
            year: new_year.to_string(),
            mode: current.mode,
            quarter,
        })
    }

    /// Points the selection at `period`; the selected year follows it.
    pub fn select_quarter<'a>(
        &'a self,
        current: &Selection<'a>,
        period: &str,
    ) -> SreResult<Selection<'a>> {
        let quarter = self
            .find_period(period)
            .ok_or_else(|| SreError::UnknownPeriod(period.to_string()))?;
        Ok(Selection {
            year: quarter.year().to_string(),
            mode: current.mode,
            quarter,
        })
    }

    pub fn displayed_income<'a>(&'a self, sel: &Selection<'a>) -> Cow<'a, CurrentOperatingIncome> {
        match sel.mode {
            ViewMode::Quarter => Cow::Borrowed(&sel.quarter.current_operating_income),
            ViewMode::Year => Cow::Owned(aggregate_income(
                self.quarters_in_year(&sel.year)
                    .into_iter()
                    .map(|q| &q.current_operating_income),
            )),
        }
    }

    pub fn displayed_expenditure<'a>(
        &'a self,
        sel: &Selection<'a>,
    ) -> Cow<'a, CurrentOperatingExpenditures> {
        match sel.mode {
            ViewMode::Quarter => Cow::Borrowed(&sel.quarter.current_operating_expenditures),
            ViewMode::Year => Cow::Owned(aggregate_expenditures(
                self.quarters_in_year(&sel.year)
                    .into_iter()
                    .map(|q| &q.current_operating_expenditures),
            )),
        }
    }

    /// Cash balances are stocks: year mode reports the year's last listed
    /// quarter rather than a sum.
    pub fn displayed_fund_summary<'a>(&'a self, sel: &Selection<'a>) -> Option<&'a FundSummary> {
        match sel.mode {
            ViewMode::Quarter => sel.quarter.fund_summary.as_ref(),
            ViewMode::Year => self
                .quarters_in_year(&sel.year)
                .last()
                .copied()
                .and_then(|q| q.fund_summary.as_ref()),
        }
    }

    /// Figures for the same period a year before the selection. In quarter
    /// mode a missing same-label quarter yields `None`; no other quarter is
    /// substituted.
    pub fn comparison_baseline(&self, sel: &Selection<'_>) -> Option<ComparisonBaseline> {
        let prev_year = (sel.year.trim().parse::<i32>().ok()? - 1).to_string();
        let prev = self.quarters_in_year(&prev_year);
        if prev.is_empty() {
            return None;
        }

        match sel.mode {
            ViewMode::Quarter => {
                let label = period_quarter(&sel.quarter.period);
                let m = prev.into_iter().find(|q| q.quarter_label() == label)?;
                Some(ComparisonBaseline {
                    total_income: m.current_operating_income.total_current_operating_income,
                    total_expenditure: m
                        .current_operating_expenditures
                        .total_current_operating_expenditures,
                    net_income: m.net_operating_income_loss_from_current_operations,
                    fund_cash_end: fund_cash_end(m),
                })
            }
            ViewMode::Year => {
                let fund = prev.last().map(|q| fund_cash_end(q)).unwrap_or_default();
                Some(ComparisonBaseline {
                    total_income: prev
                        .iter()
                        .map(|q| q.current_operating_income.total_current_operating_income)
                        .sum(),
                    total_expenditure: prev
                        .iter()
                        .map(|q| {
                            q.current_operating_expenditures
                                .total_current_operating_expenditures
                        })
                        .sum(),
                    net_income: prev
                        .iter()
                        .map(|q| q.net_operating_income_loss_from_current_operations)
                        .sum(),
                    fund_cash_end: fund,
                })
            }
        }
    }

    /// Years that report fewer than four quarters, and periods listed more
    /// than once.
    pub fn coverage_gaps(&self) -> (Vec<(String, Vec<String>)>, Vec<String>) {
        let mut missing = Vec::new();
        for year in self.available_years() {
            let labels: BTreeSet<&str> = self
                .quarters_in_year(&year)
                .iter()
                .map(|q| q.quarter_label())
                .collect();
            let absent: Vec<String> = ["Q1", "Q2", "Q3", "Q4"]
                .iter()
                .filter(|l| !labels.contains(*l))
                .map(|l| l.to_string())
                .collect();
            if !absent.is_empty() {
                missing.push((year, absent));
            }
        }

        let mut seen = BTreeSet::new();
        let mut dupes = BTreeSet::new();
        for q in &self.quarters {
            if !seen.insert(q.period.as_str()) {
                dupes.insert(q.period.clone());
            }
        }
        (missing, dupes.into_iter().collect())
    }
}

fn fund_cash_end(q: &FinancialQuarter) -> Decimal {
    q.fund_summary
        .as_ref()
        .map(|f| f.fund_cash_balance_end)
        .unwrap_or_default()
}
