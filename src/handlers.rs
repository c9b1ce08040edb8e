use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::TypedHeader;
use axum_extra::headers::Cookie;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    AppState,
    auth::verify_session,
    error::ApiError,
    models::{PaymentMethod, Registration, RegistrationDetail, RegistrationPatch},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReserveRequest {
    pub class_id: u64,
    /// Must be present and positive; validated by the booking service.
    pub payment_amount: Option<f64>,
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Debug, Deserialize)]
pub struct ActionQuery {
    pub action: Option<String>,
}

#[utoipa::path(get, path = "/", tag = "booking")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Studio Booking API",
        "endpoints": {
            "/registrations/reserve": "Place a hold on a class seat",
            "/registrations/{id}": "Read or transition a registration",
            "/classes/{id}/registrations": "Class roster (admin)"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "booking")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "booking")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    post,
    path = "/registrations/reserve",
    request_body = ReserveRequest,
    responses(
        (status = 201, description = "Hold placed", body = Registration),
        (status = 400, description = "Invalid input or class full"),
        (status = 401, description = "Invalid or missing session"),
        (status = 404, description = "Class not found")
    ),
    security(("session_cookie" = [])),
    tag = "booking"
)]
pub async fn reserve(
    State(state): State<AppState>,
    cookie: Option<TypedHeader<Cookie>>,
    Json(body): Json<ReserveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cookie = cookie.map(|TypedHeader(c)| c);
    let user = verify_session(&state.store, &state.settings.session_cookie, cookie.as_ref())?;

    let registration = state.booking.reserve(
        user.id,
        body.class_id,
        body.payment_amount,
        body.payment_method.unwrap_or(PaymentMethod::Transfer),
    )?;
    Ok((StatusCode::CREATED, Json(registration)))
}

#[utoipa::path(
    patch,
    path = "/registrations/{id}",
    params(
        ("id" = u64, Path, description = "Registration id"),
        ("action" = Option<String>, Query, description = "confirm | confirm-transfer | cancel; omit for an admin field patch")
    ),
    request_body(content = RegistrationPatch, description = "Admin patch, only when no action is given"),
    responses(
        (status = 200, description = "Updated registration", body = Registration),
        (status = 400, description = "Invalid action or transition"),
        (status = 401, description = "Invalid or missing session"),
        (status = 403, description = "Actor may not apply this transition"),
        (status = 404, description = "Registration not found")
    ),
    security(("session_cookie" = [])),
    tag = "booking"
)]
pub async fn update_registration(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<ActionQuery>,
    cookie: Option<TypedHeader<Cookie>>,
    body: Option<Json<RegistrationPatch>>,
) -> Result<Json<Registration>, ApiError> {
    let cookie = cookie.map(|TypedHeader(c)| c);
    let user = verify_session(&state.store, &state.settings.session_cookie, cookie.as_ref())?;

    let registration = match query.action.as_deref() {
        Some("confirm") => state.booking.confirm(id, &user)?,
        Some("confirm-transfer") => state.booking.confirm_transfer(id, &user)?,
        Some("cancel") => state.booking.cancel(id, &user)?,
        Some(other) => return Err(ApiError::BadRequest(format!("unknown action: {other}"))),
        None => {
            let Json(patch) =
                body.ok_or_else(|| ApiError::BadRequest("missing patch body".into()))?;
            state.booking.admin_update(id, &user, patch)?
        }
    };
    Ok(Json(registration))
}

#[utoipa::path(
    get,
    path = "/registrations/{id}",
    params(("id" = u64, Path, description = "Registration id")),
    responses(
        (status = 200, description = "Registration with class detail", body = RegistrationDetail),
        (status = 401, description = "Invalid or missing session"),
        (status = 403, description = "Not the owner, staff, or an admin"),
        (status = 404, description = "Registration not found")
    ),
    security(("session_cookie" = [])),
    tag = "booking"
)]
pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    cookie: Option<TypedHeader<Cookie>>,
) -> Result<Json<RegistrationDetail>, ApiError> {
    let cookie = cookie.map(|TypedHeader(c)| c);
    let user = verify_session(&state.store, &state.settings.session_cookie, cookie.as_ref())?;
    Ok(Json(state.booking.registration_detail(id, &user)?))
}

#[utoipa::path(
    get,
    path = "/classes/{id}/registrations",
    params(("id" = u64, Path, description = "Class id")),
    responses(
        (status = 200, description = "All registrations for the class", body = [Registration]),
        (status = 401, description = "Invalid or missing session"),
        (status = 403, description = "Admin-equivalent only"),
        (status = 404, description = "Class not found")
    ),
    security(("session_cookie" = [])),
    tag = "booking"
)]
pub async fn class_registrations(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    cookie: Option<TypedHeader<Cookie>>,
) -> Result<Json<Vec<Registration>>, ApiError> {
    let cookie = cookie.map(|TypedHeader(c)| c);
    let user = verify_session(&state.store, &state.settings.session_cookie, cookie.as_ref())?;
    Ok(Json(state.booking.class_roster(id, &user)?))
}
