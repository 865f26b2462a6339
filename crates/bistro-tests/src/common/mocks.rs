// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Mock implementations for testing error paths.
//!
//! Mocks wrap the in-memory store and inject failures on demand, so tests can
//! observe how the authorization layer reports collaborator faults.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use bistro_core::{
    DeleteResult, InsertOutcome, MemoryStore, NewUser, RecordId, StoreError, StoreResult,
    UpdateResult, User, UserStore,
};

// =============================================================================
// FlakyUserStore
// =============================================================================

/// A user store with configurable failure injection.
///
/// Delegates to an inner [`MemoryStore`] until told to fail; records lookup
/// counts for verification.
pub struct FlakyUserStore {
    inner: Arc<MemoryStore>,
    fail_all: AtomicBool,
    fail_next: AtomicBool,
    lookup_count: AtomicU64,
}

impl FlakyUserStore {
    /// Creates a mock over the given store.
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            fail_all: AtomicBool::new(false),
            fail_next: AtomicBool::new(false),
            lookup_count: AtomicU64::new(0),
        }
    }

    /// Makes every operation fail.
    pub fn fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Makes the next operation fail.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Returns how many email lookups were performed.
    pub fn lookup_count(&self) -> u64 {
        self.lookup_count.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> StoreResult<()> {
        if self.fail_all.load(Ordering::SeqCst) || self.fail_next.swap(false, Ordering::SeqCst) {
            Err(StoreError::unavailable("injected failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserStore for FlakyUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.lookup_count.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.inner.find_by_email(email).await
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        self.check_failure()?;
        UserStore::list(self.inner.as_ref()).await
    }

    async fn insert(&self, user: NewUser) -> StoreResult<InsertOutcome> {
        self.check_failure()?;
        UserStore::insert(self.inner.as_ref(), user).await
    }

    async fn promote_to_admin(&self, id: &RecordId) -> StoreResult<UpdateResult> {
        self.check_failure()?;
        self.inner.promote_to_admin(id).await
    }

    async fn delete(&self, id: &RecordId) -> StoreResult<DeleteResult> {
        self.check_failure()?;
        UserStore::delete(self.inner.as_ref(), id).await
    }
}
