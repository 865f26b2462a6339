// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Bistro backend entry point.

use std::process::ExitCode;

use bistro_bin::cli::{Cli, Commands};
use bistro_bin::{commands, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    logging::init_logging(cli.effective_log_level(), cli.log_format);

    let result = match cli.effective_command() {
        Commands::Run(args) => commands::run(&cli.config, &args).await,
        Commands::Validate(args) => commands::validate(&cli.config, &args),
        Commands::Version => {
            commands::version();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal error");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
