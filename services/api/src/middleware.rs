//! Admin authorization middleware and CORS setup

use anyhow::Result;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};

use crate::{error::ApiError, state::AppState};

/// Reject the request unless it carries a registered admin bearer token
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    state.auth.authorize(auth_header).await?;

    Ok(next.run(req).await)
}

/// Build the CORS layer for the configured origins
///
/// `None` allows any origin without credentials. Explicit origins mirror the
/// requested method and headers and allow credentials.
pub fn cors_layer(origins: Option<&[String]>) -> Result<CorsLayer> {
    let Some(origins) = origins else {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    };

    let origins = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_origins_must_be_valid_header_values() {
        assert!(cors_layer(Some(&["https://shop.example".to_string()])).is_ok());
        assert!(cors_layer(Some(&["bad\norigin".to_string()])).is_err());
        assert!(cors_layer(None).is_ok());
    }
}
