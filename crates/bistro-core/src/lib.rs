// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! # bistro-core
//!
//! Core domain types and collaborator traits for the Bistro ordering backend.
//!
//! This crate provides the foundation shared by the API server and the CLI:
//!
//! - **Model**: persisted records (`User`, `MenuItem`, `Review`, `CartItem`,
//!   `Payment`) and the `RecordId`/`Role` value types
//! - **Store**: record-store traits the authorization layer and handlers are
//!   written against, plus the acknowledgement types the store reports back
//! - **Memory**: a thread-safe in-memory store backing tests and development
//! - **Payment**: the payment-provider seam (a single create-intent operation)
//! - **Error**: store and payment error taxonomies

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod memory;
pub mod model;
pub mod payment;
pub mod store;

pub use error::{PaymentError, StoreError, StoreResult};
pub use memory::MemoryStore;
pub use model::{CartItem, MenuItem, Payment, PaymentStatus, RecordId, Review, Role, User};
pub use payment::{PaymentIntent, PaymentProvider, TestPaymentProvider};
pub use store::{
    AdminStats, CartStore, CategoryStat, DeleteResult, InsertOutcome, MenuStore, NewCartItem,
    NewMenuItem, NewPayment, NewReview, NewUser, PaymentStore, ReviewStore, StatsStore,
    UpdateResult, UserStore,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
