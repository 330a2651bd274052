//! MongoDB implementation of CouponStore.

use anyhow::Result;
use async_trait::async_trait;
use common::error::DatabaseError;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
};

use super::CouponStore;
use crate::models::coupon::{CouponDocument, CouponFilter, UpdateCoupon};

/// Collection holding one document per coupon
pub const COUPON_COLLECTION: &str = "coupons";

/// MongoDB-backed coupon store
#[derive(Clone)]
pub struct MongoCouponStore {
    database: Database,
    collection: Collection<CouponDocument>,
}

impl MongoCouponStore {
    /// Create a store over the `coupons` collection of `database`
    pub fn new(database: Database) -> Self {
        let collection = database.collection(COUPON_COLLECTION);
        Self {
            database,
            collection,
        }
    }
}

fn filter_document(filter: &CouponFilter) -> Document {
    let mut query = Document::new();
    if let Some(category) = &filter.category {
        query.insert("category", category.as_str());
    }
    if let Some(featured) = filter.featured {
        query.insert("featured", featured);
    }
    query
}

fn set_document(changes: &UpdateCoupon) -> Document {
    let mut set = Document::new();
    let text_fields = [
        ("store_name", &changes.store_name),
        ("logo_url", &changes.logo_url),
        ("title", &changes.title),
        ("code", &changes.code),
        ("description", &changes.description),
        ("category", &changes.category),
        ("expiry_date", &changes.expiry_date),
    ];
    for (key, value) in text_fields {
        if let Some(value) = value {
            set.insert(key, value.as_str());
        }
    }
    if let Some(featured) = changes.featured {
        set.insert("featured", featured);
    }
    set
}

#[async_trait]
impl CouponStore for MongoCouponStore {
    async fn find(&self, filter: &CouponFilter, limit: usize) -> Result<Vec<CouponDocument>> {
        let cursor = self
            .collection
            .find(filter_document(filter))
            .projection(doc! { "_id": 0 })
            .limit(i64::try_from(limit)?)
            .await
            .map_err(DatabaseError::Query)?;

        let documents = cursor.try_collect().await.map_err(DatabaseError::Query)?;
        Ok(documents)
    }

    async fn find_one(&self, id: &str) -> Result<Option<CouponDocument>> {
        let document = self
            .collection
            .find_one(doc! { "id": id })
            .projection(doc! { "_id": 0 })
            .await
            .map_err(DatabaseError::Query)?;
        Ok(document)
    }

    async fn insert(&self, document: &CouponDocument) -> Result<()> {
        self.collection
            .insert_one(document)
            .await
            .map_err(DatabaseError::Query)?;
        Ok(())
    }

    async fn update_fields(&self, id: &str, changes: &UpdateCoupon) -> Result<bool> {
        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$set": set_document(changes) })
            .await
            .map_err(DatabaseError::Query)?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = self
            .collection
            .delete_one(doc! { "id": id })
            .await
            .map_err(DatabaseError::Query)?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<bool> {
        Ok(common::database::health_check(&self.database).await?)
    }
}
