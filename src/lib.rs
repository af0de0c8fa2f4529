// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod data;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod summary;
pub mod utils;
pub mod view;

pub use error::{SreError, SreResult};
pub use models::{FinancialQuarter, RawFinancialQuarter};
pub use view::{ComparisonBaseline, Ledger, Selection, ViewMode};
