use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, CreateBooking};
use crate::services::{booking as rules, fare};
use crate::state::AppState;

// GET /api/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let bookings = {
        let db = state.db.lock().unwrap();
        queries::list_bookings(&db)?
    };

    Ok(Json(json!({
        "success": true,
        "count": bookings.len(),
        "data": bookings,
    })))
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBooking>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let valid = rules::validate(&req)?;

    let distance = state
        .distance
        .estimate(&valid.pickup_location, &valid.drop_location)
        .await
        .map_err(|e| AppError::Distance(e.to_string()))?;

    let quote = fare::quote(valid.cab_type, distance);

    let booking = {
        let db = state.db.lock().unwrap();
        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            booking_id: rules::generate_booking_id(&db)?,
            pickup_location: valid.pickup_location,
            drop_location: valid.drop_location,
            date: valid.date,
            time: valid.time,
            cab_type: valid.cab_type,
            status: BookingStatus::Pending,
            fare: quote.total,
            fare_breakdown: quote.breakdown,
            created_at: Utc::now().naive_utc(),
        };
        queries::insert_booking(&db, &booking)?;
        booking
    };

    tracing::info!(booking_id = %booking.booking_id, cab_type = booking.cab_type.as_str(), "created booking");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": booking })),
    ))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let booking = {
        let db = state.db.lock().unwrap();
        queries::get_booking(&db, &id)?
    }
    .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    Ok(Json(json!({ "success": true, "data": booking })))
}

// DELETE /api/bookings/:id
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let booking = {
        let db = state.db.lock().unwrap();

        let mut booking = queries::get_booking(&db, &id)?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        rules::ensure_transition(booking.status, BookingStatus::Cancelled).map_err(|_| {
            AppError::InvalidTransition("Cannot cancel a completed ride".to_string())
        })?;

        if booking.status != BookingStatus::Cancelled {
            queries::update_booking_status(&db, &id, BookingStatus::Cancelled)?;
            booking.status = BookingStatus::Cancelled;
        }
        booking
    };

    tracing::info!(booking_id = %booking.booking_id, "cancelled booking");

    Ok(Json(json!({ "success": true, "data": booking })))
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

// PATCH /api/bookings/:id/status
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let status = BookingStatus::parse(&req.status)
        .ok_or_else(|| AppError::Validation("Invalid status".to_string()))?;

    let booking = {
        let db = state.db.lock().unwrap();

        let mut booking = queries::get_booking(&db, &id)?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        rules::ensure_transition(booking.status, status)?;

        if booking.status != status {
            queries::update_booking_status(&db, &id, status)?;
            booking.status = status;
        }
        booking
    };

    tracing::info!(booking_id = %booking.booking_id, status = booking.status.as_str(), "updated booking status");

    Ok(Json(json!({ "success": true, "data": booking })))
}
