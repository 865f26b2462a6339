// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Persisted record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// RecordId
// =============================================================================

/// Unique identifier for a stored record.
///
/// Wraps a UUID so ids stay opaque to callers; the store owns id assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generates a fresh record id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parses a record id from its string form.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Returns the id as a UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Role
// =============================================================================

/// Role stored on an identity record.
///
/// Every registered user starts as `Default`; promotion to `Admin` is the
/// only role mutation the system performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Regular customer account.
    #[default]
    Default,
    /// Administrator account.
    Admin,
}

impl Role {
    /// Returns the role name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Default => "Default",
            Role::Admin => "Admin",
        }
    }

    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" | "user" => Some(Role::Default),
            "admin" | "administrator" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Returns `true` for the administrator role.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered user (identity record).
///
/// `email` is the unique key; the store enforces uniqueness on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Record id.
    #[serde(rename = "_id")]
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Email address (unique key).
    pub email: String,
    /// Stored role.
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Returns `true` if this record carries the administrator role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

// =============================================================================
// Catalog records
// =============================================================================

/// A menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    /// Record id.
    #[serde(rename = "_id")]
    pub id: RecordId,
    /// Item name.
    pub name: String,
    /// Preparation description.
    pub recipe: String,
    /// Image URL.
    pub image: String,
    /// Menu category (salad, pizza, dessert, ...).
    pub category: String,
    /// Price in major currency units.
    pub price: f64,
}

/// A customer review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Record id.
    #[serde(rename = "_id")]
    pub id: RecordId,
    /// Reviewer name.
    pub name: String,
    /// Review text.
    pub details: String,
    /// Rating out of five.
    pub rating: f64,
}

/// A cart line, scoped to the owning user's email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Record id.
    #[serde(rename = "_id")]
    pub id: RecordId,
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

// =============================================================================
// Payments
// =============================================================================

/// Status of a recorded payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Intent created, not yet confirmed by the provider.
    Pending,
    /// Confirmed by the provider.
    Paid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

/// A recorded order payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Record id.
    #[serde(rename = "_id")]
    pub id: RecordId,
    /// Paying user's email.
    pub email: String,
    /// Total price in major currency units.
    pub price: f64,
    /// Provider transaction id.
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    /// When the payment was recorded.
    pub date: DateTime<Utc>,
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
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_roundtrip() {
        let id = RecordId::generate();
        let parsed = RecordId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);

        assert!(RecordId::parse("not-a-uuid").is_none());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("administrator"), Some(Role::Admin));
        assert_eq!(Role::parse("default"), Some(Role::Default));
        assert_eq!(Role::parse("chef"), None);
    }

    #[test]
    fn test_role_default_is_not_admin() {
        assert!(!Role::default().is_admin());
        assert!(Role::Admin.is_admin());
    }

    #[test]
    fn test_user_serde_field_names() {
        let user = User {
            id: RecordId::generate(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::Default,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("_id").is_some());
        assert_eq!(json["email"], "ada@example.com");
    }
}
