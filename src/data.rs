// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::error::{SreError, SreResult};
use crate::models::RawFinancialQuarter;
use crate::normalize::normalize_all;
use crate::view::Ledger;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Sreview", "sreview"));

static PERIOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Q[1-4]-\d{4}$").expect("static period pattern"));

pub const DATA_ENV: &str = "SREVIEW_DATA";

/// `--data`, then `$SREVIEW_DATA`, then `<data dir>/sre.json`.
pub fn data_path(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(p) = explicit.map(str::trim).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    if let Ok(p) = std::env::var(DATA_ENV) {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p.trim()));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().join("sre.json"))
}

/// Largest magnitude accepted for any single amount. Sums of a few
/// quarters of bounded amounts stay well inside `Decimal`'s range.
pub static MAX_AMOUNT: Lazy<Decimal> =
    Lazy::new(|| Decimal::from(1_000_000_000_000_000_000u64));

/// First amount in `raw` whose magnitude exceeds [`MAX_AMOUNT`], with its
/// dotted field path. `Decimal` serializes as a string, so amounts show up as
/// string leaves.
fn out_of_range(raw: &RawFinancialQuarter) -> SreResult<Option<(String, Decimal)>> {
    fn walk(path: &str, v: &Value, max: Decimal) -> Option<(String, Decimal)> {
        match v {
            Value::Object(map) => map.iter().find_map(|(k, child)| {
                let p = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{}.{}", path, k)
                };
                walk(&p, child, max)
            }),
            Value::String(s) => s
                .parse::<Decimal>()
                .ok()
                .filter(|d| d.abs() > max)
                .map(|d| (path.to_string(), d)),
            _ => None,
        }
    }

    let mut value = serde_json::to_value(raw)?;
    if let Value::Object(map) = &mut value {
        map.remove("period");
        map.remove("location_info");
    }
    Ok(walk("", &value, *MAX_AMOUNT))
}

/// Parses the SRE array. Each record is decoded separately so a bad quarter
/// is reported by position. Periods must look like `Q1-2023` and amounts
/// must stay within [`MAX_AMOUNT`].
pub fn parse_raw(json: &str) -> SreResult<Vec<RawFinancialQuarter>> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, v)| {
            let raw: RawFinancialQuarter =
                serde_json::from_value(v).map_err(|source| SreError::Record { index, source })?;
            if !PERIOD_RE.is_match(&raw.period) {
                return Err(SreError::InvalidPeriod {
                    index,
                    period: raw.period,
                });
            }
            if let Some((field, value)) = out_of_range(&raw)? {
                return Err(SreError::AmountOutOfRange {
                    index,
                    field,
                    value,
                    max: *MAX_AMOUNT,
                });
            }
            Ok(raw)
        })
        .collect()
}

/// Raw records plus the normalized ledger built from them. `doctor` needs
/// both.
pub fn parse_ledger(json: &str) -> SreResult<(Vec<RawFinancialQuarter>, Ledger)> {
    let raw = parse_raw(json)?;
    let ledger = Ledger::new(normalize_all(&raw));
    debug!(count = ledger.quarters().len(), "loaded SRE quarters");
    Ok((raw, ledger))
}

pub fn load(path: &Path) -> SreResult<(Vec<RawFinancialQuarter>, Ledger)> {
    debug!(path = %path.display(), "reading SRE data");
    let json = fs::read_to_string(path).map_err(|source| SreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_ledger(&json)
}
