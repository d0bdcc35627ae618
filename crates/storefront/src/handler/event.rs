use crate::{
    abstract_trait::event::service::{DynEventCommandService, DynEventQueryService},
    domain::{
        requests::event::CreateEventRequest,
        response::{api::ApiResponse, booking::BookingResponse, event::EventResponse},
    },
    middleware::validate::SimpleValidatedJson,
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Event",
    responses(
        (status = 200, description = "Events ordered by date", body = ApiResponse<Vec<EventResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_events(
    Extension(service): Extension<DynEventQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "Event",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = ApiResponse<EventResponse>),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    Extension(service): Extension<DynEventQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/bookings",
    tag = "Event",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Bookings for the event", body = ApiResponse<Vec<BookingResponse>>),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event_bookings(
    Extension(service): Extension<DynEventQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_bookings(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Event",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = ApiResponse<EventResponse>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_event(
    Extension(service): Extension<DynEventCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateEventRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_event(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub fn event_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/events", get(get_events))
        .route("/api/events", post(create_event))
        .route("/api/events/{id}", get(get_event))
        .route("/api/events/{id}/bookings", get(get_event_bookings))
        .layer(Extension(app_state.di_container.event_query.clone()))
        .layer(Extension(app_state.di_container.event_command.clone()))
}
