//! Shared test utilities for repository and handler tests.
//!
//! Provides coupon factories and a `TestStateBuilder` for constructing
//! `AppState` instances backed by an in-memory or mocked store.

use std::sync::Arc;

use crate::auth::{AdminAuth, AdminCredentials};
use crate::models::coupon::{CouponDocument, NewCoupon};
use crate::repositories::CouponRepository;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::store::{CouponStore, MemoryCouponStore};

pub const TEST_ADMIN_USERNAME: &str = "admin";
pub const TEST_ADMIN_PASSWORD: &str = "s3cret";

/// Creates a create-coupon payload with placeholder text fields.
pub fn new_coupon(store_name: &str, title: &str, category: &str) -> NewCoupon {
    NewCoupon {
        store_name: store_name.to_string(),
        logo_url: None,
        title: title.to_string(),
        code: format!("{}10", store_name.to_uppercase()),
        description: format!("{title} at {store_name}"),
        category: category.to_string(),
        expiry_date: "2025-12-31".to_string(),
        featured: false,
    }
}

/// Creates a stored document with a fixed creation time.
pub fn stored_document(id: &str, category: &str) -> CouponDocument {
    CouponDocument {
        id: id.to_string(),
        store_name: "Store".to_string(),
        logo_url: None,
        title: "Deal".to_string(),
        code: "CODE".to_string(),
        description: "A deal".to_string(),
        category: category.to_string(),
        expiry_date: "next month".to_string(),
        featured: false,
        created_at: "2025-01-01T12:00:00.000000+00:00".to_string(),
    }
}

/// Builder for test `AppState`
pub struct TestStateBuilder {
    store: Arc<dyn CouponStore>,
    max_upload_bytes: usize,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryCouponStore::new()),
            max_upload_bytes: 1024 * 1024,
        }
    }

    pub fn with_store(mut self, store: impl CouponStore + 'static) -> Self {
        self.store = Arc::new(store);
        self
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    pub fn build(self) -> AppState {
        AppState {
            coupon_repository: CouponRepository::new(self.store),
            auth: AdminAuth::new(
                AdminCredentials::new(TEST_ADMIN_USERNAME, TEST_ADMIN_PASSWORD),
                SessionStore::new(),
            ),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}
