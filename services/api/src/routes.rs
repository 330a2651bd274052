//! API service routes

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    middleware::admin_auth_middleware,
    models::{
        CATEGORIES, CategoriesResponse, LoginRequest, LoginResponse, MessageResponse,
        UploadResponse,
        coupon::{Coupon, CouponQuery, NewCoupon, UpdateCoupon},
    },
    state::AppState,
    upload::{data_url, image_content_type},
};

/// Multipart field carrying the uploaded logo
const LOGO_FIELD: &str = "file";

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/admin/coupons", post(create_coupon))
        .route(
            "/admin/coupons/:id",
            put(update_coupon).delete(delete_coupon),
        )
        .route(
            "/admin/upload-logo",
            post(upload_logo).layer(DefaultBodyLimit::max(state.max_upload_bytes)),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/coupons", get(list_coupons))
        .route("/coupons/:id", get(get_coupon))
        .route("/categories", get(list_categories))
        .route("/admin/login", post(login))
        .merge(admin_routes)
        .with_state(state)
}

/// Liveness message
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "CouponDeck API",
    })
}

/// Report whether the coupon store is reachable
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.coupon_repository.health_check().await {
        Ok(true) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Ok(false) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unhealthy" })),
        ),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy" })),
            )
        }
    }
}

/// List coupons with optional category, featured and search narrowing
pub async fn list_coupons(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CouponQuery>,
) -> ApiResult<Json<Vec<Coupon>>> {
    let (filter, search) = query.into_parts();
    let coupons = state
        .coupon_repository
        .list(&filter, search.as_deref())
        .await?;

    Ok(Json(coupons))
}

/// Get a coupon by ID
pub async fn get_coupon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Coupon>> {
    Ok(Json(state.coupon_repository.get(&id).await?))
}

/// Fixed category list, in display order
pub async fn list_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: &CATEGORIES,
    })
}

/// Exchange admin credentials for a bearer token
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let token = state
        .auth
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        message: "Login successful".to_string(),
    }))
}

/// Create a coupon
pub async fn create_coupon(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewCoupon>,
) -> ApiResult<Json<Coupon>> {
    Ok(Json(state.coupon_repository.create(payload).await?))
}

/// Apply a partial update to a coupon
pub async fn update_coupon(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateCoupon>,
) -> ApiResult<Json<Coupon>> {
    Ok(Json(state.coupon_repository.update(&id, &payload).await?))
}

/// Delete a coupon
pub async fn delete_coupon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.coupon_repository.delete(&id).await?;

    Ok(Json(MessageResponse {
        message: "Coupon deleted successfully",
    }))
}

/// Encode an uploaded image as a data URL
///
/// The content type is checked before the body of the field is read.
pub async fn upload_logo(mut multipart: Multipart) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(LOGO_FIELD) {
            continue;
        }

        let content_type = image_content_type(field.content_type())?.to_string();
        let bytes = field.bytes().await?;

        info!("Encoded {} byte {} logo", bytes.len(), content_type);
        return Ok(Json(UploadResponse {
            url: data_url(&content_type, &bytes),
        }));
    }

    Err(ApiError::BadRequest(format!(
        "Missing multipart field '{}'",
        LOGO_FIELD
    )))
}
