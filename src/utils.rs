// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

static WORD_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w").expect("static word pattern"));

const PESO: &str = "₱";

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: Serialize>(json_flag: bool, jsonl_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// `"tax_revenue"` -> `"Tax Revenue"`.
pub fn format_label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    WORD_START
        .replace_all(&spaced, |c: &Captures| c[0].to_uppercase())
        .into_owned()
}

/// `value / total`, or zero when there is nothing to divide by or the ratio
/// is out of range.
pub fn share(value: Decimal, total: Decimal) -> Decimal {
    if total > Decimal::ZERO {
        value.checked_div(total).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

fn group_thousands(int_part: &str) -> String {
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `₱1,500,000.00` style rendering with a fixed number of fraction digits.
pub fn format_peso(amount: Decimal, fraction_digits: u32) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", fraction_digits as usize, rounded);
    let (int_part, frac) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac {
        Some(f) => format!("{}{}{}.{}", sign, PESO, group_thousands(int_part), f),
        None => format!("{}{}{}", sign, PESO, group_thousands(int_part)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedPeso {
    pub scaled_value: Decimal,
    pub unit: &'static str,
    pub full_string: String,
    pub raw: String,
}

/// Scales amounts of a million or more to `M`/`B` units.
pub fn format_peso_adaptive(amount: Decimal, fraction_digits: u32) -> FormattedPeso {
    let billion = Decimal::from(1_000_000_000u64);
    let million = Decimal::from(1_000_000u64);
    let abs = amount.abs();
    let (scaled, unit) = if abs >= billion {
        (amount / billion, "B")
    } else if abs >= million {
        (amount / million, "M")
    } else {
        (amount, "")
    };
    let number = format_peso(scaled, fraction_digits);
    let full_string = if unit.is_empty() {
        number
    } else {
        format!("{} {}", number, unit)
    };
    FormattedPeso {
        scaled_value: scaled,
        unit,
        full_string,
        raw: format_peso(amount, 2),
    }
}

pub fn fmt_pct(ratio: Decimal) -> String {
    format!("{:.1}%", (ratio * Decimal::ONE_HUNDRED).round_dp(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(format_label("tax_revenue"), "Tax Revenue");
        assert_eq!(
            format_label("health_nutrition_population_control"),
            "Health Nutrition Population Control"
        );
    }

    #[test]
    fn share_guards_zero_total() {
        assert_eq!(share(dec!(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(share(dec!(1), dec!(4)), dec!(0.25));
        assert_eq!(share(Decimal::MAX, dec!(0.001)), Decimal::ZERO);
    }

    #[test]
    fn peso_groups_thousands() {
        assert_eq!(format_peso(dec!(1500000), 2), "₱1,500,000.00");
        assert_eq!(format_peso(dec!(999.994), 2), "₱999.99");
        assert_eq!(format_peso(dec!(-1234.5), 2), "-₱1,234.50");
        assert_eq!(format_peso(dec!(12), 0), "₱12");
    }

    #[test]
    fn adaptive_scales_to_units() {
        let m = format_peso_adaptive(dec!(1500000), 2);
        assert_eq!(m.unit, "M");
        assert_eq!(m.full_string, "₱1.50 M");
        assert_eq!(m.raw, "₱1,500,000.00");

        let b = format_peso_adaptive(dec!(-2750000000), 1);
        assert_eq!(b.full_string, "-₱2.8 B");

        let small = format_peso_adaptive(dec!(999999), 2);
        assert_eq!(small.unit, "");
        assert_eq!(small.full_string, "₱999,999.00");
    }

    #[test]
    fn pct_has_one_decimal() {
        assert_eq!(fmt_pct(dec!(0.1234)), "12.3%");
    }
}
