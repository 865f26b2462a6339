// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Command implementations.

mod run;
mod validate;
mod version;

pub use run::run;
pub use validate::validate;
pub use version::version;
