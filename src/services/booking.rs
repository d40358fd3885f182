use chrono::{NaiveDate, Utc};
use rand::Rng;
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{BookingStatus, CabType, CreateBooking};

/// A create request with every field checked and parsed.
#[derive(Debug)]
pub struct ValidatedBooking {
    pub pickup_location: String,
    pub drop_location: String,
    pub date: NaiveDate,
    pub time: String,
    pub cab_type: CabType,
}

pub fn validate(req: &CreateBooking) -> Result<ValidatedBooking, AppError> {
    let pickup = req.pickup_location.trim();
    if pickup.is_empty() {
        return Err(AppError::Validation("Pickup location is required".to_string()));
    }

    let drop = req.drop_location.trim();
    if drop.is_empty() {
        return Err(AppError::Validation("Drop location is required".to_string()));
    }

    let date_str = req.date.trim();
    if date_str.is_empty() {
        return Err(AppError::Validation("Date is required".to_string()));
    }
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Date must be in YYYY-MM-DD format".to_string()))?;
    if date < Utc::now().date_naive() {
        return Err(AppError::Validation("Cannot book for a past date".to_string()));
    }

    let time = req.time.trim();
    if time.is_empty() {
        return Err(AppError::Validation("Time is required".to_string()));
    }

    let cab_str = req.cab_type.trim();
    if cab_str.is_empty() {
        return Err(AppError::Validation("Cab type is required".to_string()));
    }
    let cab_type = CabType::parse(cab_str)
        .ok_or_else(|| AppError::Validation(format!("Invalid cab type: {cab_str}")))?;

    Ok(ValidatedBooking {
        pickup_location: pickup.to_string(),
        drop_location: drop.to_string(),
        date,
        time: time.to_string(),
        cab_type,
    })
}

/// One transition rule for every mutation path: a terminal ride never
/// changes status again. Re-applying the current status is a no-op, which
/// keeps cancelling an already-cancelled ride idempotent.
pub fn ensure_transition(current: BookingStatus, requested: BookingStatus) -> Result<(), AppError> {
    if current == requested {
        return Ok(());
    }
    if current.is_terminal() {
        return Err(AppError::InvalidTransition(format!(
            "Cannot change status of a {} ride",
            current.as_str()
        )));
    }
    Ok(())
}

const BOOKING_ID_ATTEMPTS: usize = 8;

/// Human-facing code like "SC48213", checked against existing rows. The
/// UNIQUE column constraint backstops the race between check and insert.
pub fn generate_booking_id(conn: &Connection) -> Result<String, AppError> {
    let mut rng = rand::thread_rng();
    for _ in 0..BOOKING_ID_ATTEMPTS {
        let code = format!("SC{}", rng.gen_range(10000..100000));
        if !queries::booking_id_exists(conn, &code)? {
            return Ok(code);
        }
    }
    Err(AppError::Internal(
        "could not allocate a unique booking id".to_string(),
    ))
}
