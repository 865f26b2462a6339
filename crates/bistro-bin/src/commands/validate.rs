// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! The `validate` command: check configuration without starting the server.

use std::path::Path;

use bistro_config::load_config;

use crate::cli::ValidateArgs;
use crate::error::BinResult;

/// Loads and validates the configuration file.
pub fn validate(config_path: &Path, args: &ValidateArgs) -> BinResult<()> {
    let config = load_config(config_path)?;

    println!("configuration OK: {}", config_path.display());

    if args.show_config {
        // Secrets are skipped by the schema's serializer.
        match serde_yaml::to_string(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => tracing::warn!(error = %e, "failed to render configuration"),
        }
    }

    Ok(())
}
