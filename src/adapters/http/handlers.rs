use super::error::{ErrorEnvelope, HttpError};
use super::query::RepsQueryParams;
use super::AppState;
use crate::app::dto::{CreateRepRequest, RepResponse, ZoneResponse};
use crate::domain::model::format_timestamp;
use crate::utils::error::AppError;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        OriginalUri, Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;

type HandlerResult<T> = Result<T, HttpError>;

#[utoipa::path(
    post,
    path = "/v1/reps",
    tag = "reps",
    request_body = CreateRepRequest,
    responses(
        (status = 201, description = "Rep recorded", body = RepResponse),
        (status = 400, description = "Velocity outside 0..=10 m/s or malformed body", body = ErrorEnvelope)
    )
)]
pub async fn create_rep(
    State(state): State<AppState>,
    payload: Result<Json<CreateRepRequest>, JsonRejection>,
) -> HandlerResult<(StatusCode, Json<RepResponse>)> {
    let Json(request) =
        payload.map_err(|rejection| state.reject(AppError::validation(rejection.body_text())))?;

    let created = state
        .container
        .create_rep
        .execute(request)
        .await
        .map_err(|e| state.reject(e))?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/v1/reps",
    tag = "reps",
    params(RepsQueryParams),
    responses(
        (status = 200, description = "Matching reps in store order", body = [RepResponse]),
        (status = 400, description = "Invalid query parameter", body = ErrorEnvelope),
        (status = 404, description = "Unknown zoneId", body = ErrorEnvelope)
    )
)]
pub async fn list_reps(
    State(state): State<AppState>,
    params: Result<Query<RepsQueryParams>, QueryRejection>,
) -> HandlerResult<Json<Vec<RepResponse>>> {
    let Query(params) =
        params.map_err(|rejection| state.reject(AppError::validation(rejection.body_text())))?;
    let query = params.into_query().map_err(|e| state.reject(e))?;

    let reps = state
        .container
        .get_reps
        .execute(query)
        .await
        .map_err(|e| state.reject(e))?;

    Ok(Json(reps))
}

#[utoipa::path(
    get,
    path = "/v1/reps/{id}",
    tag = "reps",
    params(("id" = String, Path, description = "Rep id")),
    responses(
        (status = 200, description = "The rep", body = RepResponse),
        (status = 404, description = "Rep not found", body = ErrorEnvelope)
    )
)]
pub async fn get_rep(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Json<RepResponse>> {
    let rep = state
        .container
        .get_rep
        .execute(&id)
        .await
        .map_err(|e| state.reject(e))?;

    Ok(Json(rep))
}

#[utoipa::path(
    get,
    path = "/v1/zones",
    tag = "zones",
    responses(
        (status = 200, description = "Velocity zones with rep counts", body = [ZoneResponse])
    )
)]
pub async fn list_zones(State(state): State<AppState>) -> HandlerResult<Json<Vec<ZoneResponse>>> {
    let zones = state
        .container
        .get_zones
        .execute()
        .await
        .map_err(|e| state.reject(e))?;

    Ok(Json(zones))
}

#[utoipa::path(
    get,
    path = "/v1/zones/{id}",
    tag = "zones",
    params(("id" = String, Path, description = "Zone id")),
    responses(
        (status = 200, description = "The zone with its rep count", body = ZoneResponse),
        (status = 404, description = "Velocity zone not found", body = ErrorEnvelope)
    )
)]
pub async fn get_zone(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Json<ZoneResponse>> {
    let zone = state
        .container
        .get_zones
        .execute_one(&id)
        .await
        .map_err(|e| state.reject(e))?;

    Ok(Json(zone))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": format_timestamp(&Utc::now()),
    }))
}

/// 未知路徑，以及已知路徑上不支援的 method
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> ErrorEnvelope {
    ErrorEnvelope::route_not_found(uri.path())
}
