// HTTP surface: axum router, request/response mapping and middleware.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod query;

use crate::core::container::AppContainer;
use crate::domain::ports::{Environment, ServerSettings};
use crate::utils::error::{AppError, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

pub use error::{ErrorEnvelope, HttpError};

pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub cors_origin: String,
    pub body_limit_bytes: usize,
    pub environment: Environment,
}

impl HttpOptions {
    pub fn from_settings(settings: &dyn ServerSettings) -> Self {
        Self {
            cors_origin: settings.cors_origin().to_string(),
            body_limit_bytes: settings.body_limit_bytes(),
            environment: settings.environment(),
        }
    }
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            cors_origin: "http://localhost:3000".to_string(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            environment: Environment::Development,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub container: Arc<AppContainer>,
    pub expose_error_details: bool,
}

impl AppState {
    pub fn reject(&self, error: AppError) -> HttpError {
        HttpError::new(error, self.expose_error_details)
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/reps", get(handlers::list_reps).post(handlers::create_rep))
        .route("/reps/:id", get(handlers::get_rep))
        .route("/zones", get(handlers::list_zones))
        .route("/zones/:id", get(handlers::get_zone))
        .method_not_allowed_fallback(handlers::route_not_found)
}

pub fn build_router(container: Arc<AppContainer>, options: &HttpOptions) -> Result<Router> {
    let origin = HeaderValue::from_str(&options.cors_origin).map_err(|e| {
        AppError::InvalidConfigValueError {
            field: "cors.origin".to_string(),
            value: options.cors_origin.clone(),
            reason: e.to_string(),
        }
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let state = AppState {
        container,
        expose_error_details: options.environment.exposes_error_details(),
    };

    let router = Router::new()
        .route("/health", get(handlers::health))
        .nest("/v1", api_routes())
        .merge(docs::routes())
        .method_not_allowed_fallback(handlers::route_not_found)
        .fallback(handlers::route_not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(options.body_limit_bytes))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}
