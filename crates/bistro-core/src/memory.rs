// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! In-memory record store.
//!
//! Thread-safe implementation of every store trait, backing development and
//! tests where no external database is configured. Data is lost when the
//! store is dropped.
//!
//! The email uniqueness invariant on identity records is enforced here under
//! a single write lock, which is what makes registration idempotent under
//! concurrent requests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::StoreResult;
use crate::model::{CartItem, MenuItem, Payment, RecordId, Review, Role, User};
use crate::store::{
    AdminStats, CartStore, CategoryStat, DeleteResult, InsertOutcome, MenuStore, NewCartItem,
    NewMenuItem, NewPayment, NewReview, NewUser, PaymentStore, ReviewStore, StatsStore,
    UpdateResult, UserStore,
};

// =============================================================================
// MemoryStore
// =============================================================================

/// An in-memory store implementing every collaborator trait.
///
/// Collections live behind independent `parking_lot::RwLock`s; operations
/// never hold more than one collection lock at a time.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    menu: RwLock<Vec<MenuItem>>,
    reviews: RwLock<Vec<Review>>,
    carts: RwLock<Vec<CartItem>>,
    payments: RwLock<Vec<Payment>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a user directly, bypassing the idempotence check.
    ///
    /// Test and seed helper; production writes go through [`UserStore::insert`].
    pub fn seed_user(&self, name: &str, email: &str, role: Role) -> RecordId {
        let id = RecordId::generate();
        self.users.write().push(User {
            id: id.clone(),
            name: name.to_string(),
            email: email.to_string(),
            role,
        });
        id
    }

    /// Inserts a menu item directly.
    pub fn seed_menu_item(&self, name: &str, category: &str, price: f64) -> RecordId {
        let id = RecordId::generate();
        self.menu.write().push(MenuItem {
            id: id.clone(),
            name: name.to_string(),
            recipe: String::new(),
            image: String::new(),
            category: category.to_string(),
            price,
        });
        id
    }
}

// =============================================================================
// UserStore
// =============================================================================

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.users.read().iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().clone())
    }

    async fn insert(&self, user: NewUser) -> StoreResult<InsertOutcome> {
        let mut users = self.users.write();

        // Uniqueness check and insert under one write lock.
        if users.iter().any(|u| u.email == user.email) {
            debug!(email = %user.email, "duplicate registration ignored");
            return Ok(InsertOutcome::AlreadyExists);
        }

        let id = RecordId::generate();
        users.push(User {
            id: id.clone(),
            name: user.name,
            email: user.email,
            role: user.role,
        });
        Ok(InsertOutcome::Created(id))
    }

    async fn promote_to_admin(&self, id: &RecordId) -> StoreResult<UpdateResult> {
        let mut users = self.users.write();
        match users.iter_mut().find(|u| &u.id == id) {
            Some(user) => {
                let modified = u64::from(user.role != Role::Admin);
                user.role = Role::Admin;
                Ok(UpdateResult {
                    matched_count: 1,
                    modified_count: modified,
                })
            }
            None => Ok(UpdateResult {
                matched_count: 0,
                modified_count: 0,
            }),
        }
    }

    async fn delete(&self, id: &RecordId) -> StoreResult<DeleteResult> {
        let mut users = self.users.write();
        let before = users.len();
        users.retain(|u| &u.id != id);
        Ok(DeleteResult {
            deleted_count: (before - users.len()) as u64,
        })
    }
}

// =============================================================================
// MenuStore / ReviewStore
// =============================================================================

#[async_trait]
impl MenuStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<MenuItem>> {
        Ok(self.menu.read().clone())
    }

    async fn insert(&self, item: NewMenuItem) -> StoreResult<RecordId> {
        let id = RecordId::generate();
        self.menu.write().push(MenuItem {
            id: id.clone(),
            name: item.name,
            recipe: item.recipe,
            image: item.image,
            category: item.category,
            price: item.price,
        });
        Ok(id)
    }

    async fn delete(&self, id: &RecordId) -> StoreResult<DeleteResult> {
        let mut menu = self.menu.write();
        let before = menu.len();
        menu.retain(|m| &m.id != id);
        Ok(DeleteResult {
            deleted_count: (before - menu.len()) as u64,
        })
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Review>> {
        Ok(self.reviews.read().clone())
    }

    async fn insert(&self, review: NewReview) -> StoreResult<RecordId> {
        let id = RecordId::generate();
        self.reviews.write().push(Review {
            id: id.clone(),
            name: review.name,
            details: review.details,
            rating: review.rating,
        });
        Ok(id)
    }
}

// =============================================================================
// CartStore
// =============================================================================

#[async_trait]
impl CartStore for MemoryStore {
    async fn list_by_email(&self, email: &str) -> StoreResult<Vec<CartItem>> {
        Ok(self
            .carts
            .read()
            .iter()
            .filter(|c| c.email == email)
            .cloned()
            .collect())
    }

    async fn insert(&self, item: NewCartItem) -> StoreResult<RecordId> {
        let id = RecordId::generate();
        self.carts.write().push(CartItem {
            id: id.clone(),
            email: item.email,
            menu_item_id: item.menu_item_id,
            name: item.name,
            image: item.image,
            price: item.price,
        });
        Ok(id)
    }

    async fn delete(&self, id: &RecordId) -> StoreResult<DeleteResult> {
        let mut carts = self.carts.write();
        let before = carts.len();
        carts.retain(|c| &c.id != id);
        Ok(DeleteResult {
            deleted_count: (before - carts.len()) as u64,
        })
    }

    async fn delete_many(&self, ids: &[RecordId]) -> StoreResult<DeleteResult> {
        let mut carts = self.carts.write();
        let before = carts.len();
        carts.retain(|c| !ids.contains(&c.id));
        Ok(DeleteResult {
            deleted_count: (before - carts.len()) as u64,
        })
    }
}

// =============================================================================
// PaymentStore
// =============================================================================

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn list_by_email(&self, email: &str) -> StoreResult<Vec<Payment>> {
        Ok(self
            .payments
            .read()
            .iter()
            .filter(|p| p.email == email)
            .cloned()
            .collect())
    }

    async fn insert(&self, payment: NewPayment) -> StoreResult<RecordId> {
        let id = RecordId::generate();
        self.payments.write().push(Payment {
            id: id.clone(),
            email: payment.email,
            price: payment.price,
            transaction_id: payment.transaction_id,
            date: Utc::now(),
            cart_ids: payment.cart_ids,
            menu_item_ids: payment.menu_item_ids,
            status: payment.status,
        });
        Ok(id)
    }
}

// =============================================================================
// StatsStore
// =============================================================================

#[async_trait]
impl StatsStore for MemoryStore {
    async fn admin_stats(&self) -> StoreResult<AdminStats> {
        let payments = self.payments.read();
        Ok(AdminStats {
            users: self.users.read().len() as u64,
            menu_items: self.menu.read().len() as u64,
            orders: payments.len() as u64,
            revenue: payments.iter().map(|p| p.price).sum(),
        })
    }

    async fn order_stats(&self) -> StoreResult<Vec<CategoryStat>> {
        // Join payment menu-item ids against the menu and fold by category.
        let menu_by_id: HashMap<RecordId, MenuItem> = self
            .menu
            .read()
            .iter()
            .map(|m| (m.id.clone(), m.clone()))
            .collect();

        let mut by_category: HashMap<String, CategoryStat> = HashMap::new();
        for payment in self.payments.read().iter() {
            for item_id in &payment.menu_item_ids {
                let Some(item) = menu_by_id.get(item_id) else {
                    continue;
                };
                let entry = by_category
                    .entry(item.category.clone())
                    .or_insert_with(|| CategoryStat {
                        category: item.category.clone(),
                        quantity: 0,
                        revenue: 0.0,
                    });
                entry.quantity += 1;
                entry.revenue += item.price;
            }
        }

        let mut stats: Vec<CategoryStat> = by_category.into_values().collect();
        stats.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(stats)
    }
}

// =============================================================================
// Tests
// =============================================================================
