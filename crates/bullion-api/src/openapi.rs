//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single spec, served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Assembled OpenAPI spec for the auth surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bullion Platform — Auth API",
        version = "0.2.7",
        description = "Authentication and session lifecycle for the Bullion precious-metals investment platform: login, token validation, refresh, current user, logout, and revocation maintenance.",
        license(name = "BUSL-1.1")
    ),
    paths(
        // Auth
        crate::routes::auth::login,
        crate::routes::auth::validate,
        crate::routes::auth::refresh,
        crate::routes::auth::me,
        crate::routes::auth::logout,
        // Admin
        crate::routes::admin::prune_revocations,
    ),
    components(schemas(
        // Domain types
        bullion_core::AuthUser,
        bullion_core::Role,
        bullion_auth::Session,
        bullion_auth::LogoutReceipt,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // DTOs
        crate::routes::auth::LoginRequest,
        crate::routes::admin::PruneResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Session lifecycle — login, validate, refresh, me, logout"),
        (name = "admin", description = "Auth-core maintenance (admin scope)"),
    )
)]
pub struct ApiDoc;

/// Registers the bearer security scheme referenced by the protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_contains_all_session_paths() {
        let spec = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = spec["paths"].as_object().unwrap();
        for path in [
            "/v1/auth/login",
            "/v1/auth/validate",
            "/v1/auth/refresh",
            "/v1/auth/me",
            "/v1/auth/logout",
            "/v1/admin/revocations/prune",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let spec = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert!(spec["components"]["securitySchemes"]["bearer"].is_object());
    }
}
