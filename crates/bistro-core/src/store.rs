// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Record-store traits and acknowledgement types.
//!
//! The store is an external collaborator: the API is written against these
//! traits and receives a concrete implementation at startup. Every operation
//! is a single logical suspend point; timeouts and serialization are owned by
//! the implementation, not by callers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::model::{CartItem, MenuItem, Payment, PaymentStatus, RecordId, Review, Role, User};

// =============================================================================
// Acknowledgement types
// =============================================================================

/// Outcome of an insert keyed on a unique field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new record was created.
    Created(RecordId),
    /// A record with the same unique key already exists; nothing was written.
    AlreadyExists,
}

impl InsertOutcome {
    /// Returns the created id, if any.
    pub fn inserted_id(&self) -> Option<&RecordId> {
        match self {
            InsertOutcome::Created(id) => Some(id),
            InsertOutcome::AlreadyExists => None,
        }
    }
}

/// Result of an update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    /// Number of records matched by the filter.
    #[serde(rename = "matchedCount")]
    pub matched_count: u64,
    /// Number of records actually modified.
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
}

/// Result of a delete operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    /// Number of records removed.
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

// =============================================================================
// New-record payloads
// =============================================================================

/// Registration payload for a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address (unique key).
    pub email: String,
    /// Initial role; defaults to [`Role::Default`].
    #[serde(default)]
    pub role: Role,
}

/// Payload for a new menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMenuItem {
    /// Item name.
    pub name: String,
    /// Preparation description.
    pub recipe: String,
    /// Image URL.
    pub image: String,
    /// Menu category.
    pub category: String,
    /// Price in major currency units.
    pub price: f64,
}

/// Payload for a new review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    /// Reviewer name.
    pub name: String,
    /// Review text.
    pub details: String,
    /// Rating out of five.
    pub rating: f64,
}

/// Payload for a new cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCartItem {
    /// Owning user's email.
    pub email: String,
    /// Menu item this line refers to.
    #[serde(rename = "menuItemId")]
    pub menu_item_id: RecordId,
    /// Denormalized item name.
    pub name: String,
    /// Denormalized item image.
    pub image: String,
    /// Denormalized item price.
    pub price: f64,
}

/// Payload for a new payment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    /// Paying user's email.
    pub email: String,
    /// Total price in major currency units.
    pub price: f64,
    /// Provider transaction id.
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    /// Cart lines settled by this payment.
    #[serde(rename = "cartIds")]
    pub cart_ids: Vec<RecordId>,
    /// Menu items covered by this payment.
    #[serde(rename = "menuItemIds")]
    pub menu_item_ids: Vec<RecordId>,
    /// Settlement status.
    pub status: PaymentStatus,
}

// =============================================================================
// Aggregate results
// =============================================================================

/// Headline aggregate counters for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    /// Registered users.
    pub users: u64,
    /// Menu items on offer.
    #[serde(rename = "menuItems")]
    pub menu_items: u64,
    /// Recorded orders.
    pub orders: u64,
    /// Total revenue in major currency units.
    pub revenue: f64,
}

/// Per-category order aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    /// Menu category.
    pub category: String,
    /// Units sold in this category.
    pub quantity: u64,
    /// Revenue attributed to this category.
    pub revenue: f64,
}

// =============================================================================
// Store traits
// =============================================================================

/// Identity-record operations.
///
/// `insert` is idempotent on the unique email key: a duplicate registration
/// reports [`InsertOutcome::AlreadyExists`] instead of failing.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by the unique email key.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Lists all registered users.
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Inserts a user unless one with the same email exists.
    async fn insert(&self, user: NewUser) -> StoreResult<InsertOutcome>;

    /// Sets the role of the given record to [`Role::Admin`].
    async fn promote_to_admin(&self, id: &RecordId) -> StoreResult<UpdateResult>;

    /// Deletes a user record.
    async fn delete(&self, id: &RecordId) -> StoreResult<DeleteResult>;
}

/// Menu catalog operations.
#[async_trait]
pub trait MenuStore: Send + Sync {
    /// Lists the full menu.
    async fn list(&self) -> StoreResult<Vec<MenuItem>>;

    /// Adds a menu item.
    async fn insert(&self, item: NewMenuItem) -> StoreResult<RecordId>;

    /// Removes a menu item.
    async fn delete(&self, id: &RecordId) -> StoreResult<DeleteResult>;
}

/// Review operations.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Lists all reviews.
    async fn list(&self) -> StoreResult<Vec<Review>>;

    /// Adds a review.
    async fn insert(&self, review: NewReview) -> StoreResult<RecordId>;
}

/// Cart operations, scoped by owning email.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Lists cart lines owned by the given email.
    async fn list_by_email(&self, email: &str) -> StoreResult<Vec<CartItem>>;

    /// Adds a cart line.
    async fn insert(&self, item: NewCartItem) -> StoreResult<RecordId>;

    /// Removes a single cart line.
    async fn delete(&self, id: &RecordId) -> StoreResult<DeleteResult>;

    /// Removes a batch of cart lines (used when a payment settles them).
    async fn delete_many(&self, ids: &[RecordId]) -> StoreResult<DeleteResult>;
}

/// Payment-record operations.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Lists payments made by the given email.
    async fn list_by_email(&self, email: &str) -> StoreResult<Vec<Payment>>;

    /// Records a payment.
    async fn insert(&self, payment: NewPayment) -> StoreResult<RecordId>;
}

/// Aggregate reporting operations.
///
/// These correspond to the store's aggregation pipeline; the API treats each
/// as one opaque collaborator call.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Computes the admin dashboard counters.
    async fn admin_stats(&self) -> StoreResult<AdminStats>;

    /// Computes per-category order quantities and revenue.
    async fn order_stats(&self) -> StoreResult<Vec<CategoryStat>>;
}

// =============================================================================
// Tests
// =============================================================================
