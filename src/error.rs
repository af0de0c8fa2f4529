// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SreError {
    #[error("failed to read SRE data at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SRE data is not a JSON array of quarters: {0}")]
    Json(#[from] serde_json::Error),

    #[error("quarter #{index} is malformed: {source}")]
    Record {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("quarter #{index} has invalid period '{period}', expected Qn-YYYY")]
    InvalidPeriod { index: usize, period: String },

    #[error("quarter #{index} has {field} = {value}, outside the supported range of ±{max}")]
    AmountOutOfRange {
        index: usize,
        field: String,
        value: rust_decimal::Decimal,
        max: rust_decimal::Decimal,
    },

    #[error("no quarters reported for year {0}")]
    UnknownYear(String),

    #[error("period '{0}' not found")]
    UnknownPeriod(String),
}

pub type SreResult<T> = Result<T, SreError>;
