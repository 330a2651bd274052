//! Application state shared across handlers

use crate::{auth::AdminAuth, repositories::CouponRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub coupon_repository: CouponRepository,
    pub auth: AdminAuth,
    /// Request body cap for logo uploads
    pub max_upload_bytes: usize,
}
