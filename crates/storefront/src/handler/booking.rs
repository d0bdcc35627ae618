use crate::{
    abstract_trait::booking::service::DynBookingService,
    domain::{
        requests::booking::CreateBookingRequest,
        response::{api::ApiResponse, booking::BookingResponse},
    },
    middleware::validate::SimpleValidatedJson,
    state::AppState,
};
use axum::{
    Json, extract::Extension, http::StatusCode, response::IntoResponse, routing::post,
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Booking",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking confirmed", body = ApiResponse<BookingResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Not enough seats left"),
        (status = 503, description = "Capacity ledger timed out")
    )
)]
pub async fn create_booking(
    Extension(service): Extension<DynBookingService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.book(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub fn booking_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/bookings", post(create_booking))
        .layer(Extension(app_state.di_container.booking.clone()))
}
