// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! The `version` command.

/// Prints version information.
pub fn version() {
    println!("bistro v{}", bistro_core::VERSION);
    println!("  bistro-api    v{}", bistro_api::VERSION);
    println!("  bistro-core   v{}", bistro_core::VERSION);
}
