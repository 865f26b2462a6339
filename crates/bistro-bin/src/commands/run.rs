// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! The `run` command: start the backend server.

use std::path::Path;

use bistro_config::load_config;

use crate::cli::RunArgs;
use crate::error::BinResult;
use crate::runtime::BackendRuntime;

/// Loads configuration and runs the backend until shutdown.
pub async fn run(config_path: &Path, args: &RunArgs) -> BinResult<()> {
    let config = load_config(config_path)?;

    BackendRuntime::new(config)
        .with_dev_mode(args.dev_mode)
        .run()
        .await
}
