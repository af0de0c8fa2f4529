// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SREVIEW_LOG";

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "sreview=debug,warn",
        _ => "sreview=trace,info",
    }
}

/// `$SREVIEW_LOG` wins; otherwise `-v` flags pick the level. Logs go to
/// stderr so `--json` output stays clean.
pub fn make_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)))
}

pub fn init(verbosity: u8) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(make_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}
