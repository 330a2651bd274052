//! In-process implementation of CouponStore.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CouponStore;
use crate::models::coupon::{CouponDocument, CouponFilter, UpdateCoupon};

/// Coupon store kept in process memory, in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryCouponStore {
    documents: Arc<RwLock<Vec<CouponDocument>>>,
}

impl MemoryCouponStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(filter: &CouponFilter, document: &CouponDocument) -> bool {
    filter
        .category
        .as_ref()
        .is_none_or(|category| &document.category == category)
        && filter
            .featured
            .is_none_or(|featured| document.featured == featured)
}

fn apply(changes: &UpdateCoupon, document: &mut CouponDocument) {
    if let Some(store_name) = &changes.store_name {
        document.store_name.clone_from(store_name);
    }
    if let Some(logo_url) = &changes.logo_url {
        document.logo_url = Some(logo_url.clone());
    }
    if let Some(title) = &changes.title {
        document.title.clone_from(title);
    }
    if let Some(code) = &changes.code {
        document.code.clone_from(code);
    }
    if let Some(description) = &changes.description {
        document.description.clone_from(description);
    }
    if let Some(category) = &changes.category {
        document.category.clone_from(category);
    }
    if let Some(expiry_date) = &changes.expiry_date {
        document.expiry_date.clone_from(expiry_date);
    }
    if let Some(featured) = changes.featured {
        document.featured = featured;
    }
}

#[async_trait]
impl CouponStore for MemoryCouponStore {
    async fn find(&self, filter: &CouponFilter, limit: usize) -> Result<Vec<CouponDocument>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|document| matches(filter, document))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_one(&self, id: &str) -> Result<Option<CouponDocument>> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|document| document.id == id).cloned())
    }

    async fn insert(&self, document: &CouponDocument) -> Result<()> {
        self.documents.write().await.push(document.clone());
        Ok(())
    }

    async fn update_fields(&self, id: &str, changes: &UpdateCoupon) -> Result<bool> {
        let mut documents = self.documents.write().await;
        match documents.iter_mut().find(|document| document.id == id) {
            Some(document) => {
                apply(changes, document);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|document| document.id != id);
        Ok(documents.len() < before)
    }

    async fn ping(&self) -> Result<bool> {
        Ok(true)
    }
}
