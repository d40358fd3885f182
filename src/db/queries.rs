use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingStatus, CabType};
use crate::services::fare::FareBreakdown;

// Fractional seconds keep list ordering stable for bookings created within
// the same second; rowid breaks exact ties.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub fn insert_booking(conn: &Connection, booking: &Booking) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, booking_id, pickup_location, drop_location, date, time, cab_type, status, fare, base_fare, distance_charge, distance, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            booking.id,
            booking.booking_id,
            booking.pickup_location,
            booking.drop_location,
            booking.date.format("%Y-%m-%d").to_string(),
            booking.time,
            booking.cab_type.as_str(),
            booking.status.as_str(),
            booking.fare,
            booking.fare_breakdown.base_fare,
            booking.fare_breakdown.distance_charge,
            booking.fare_breakdown.distance,
            booking.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn list_bookings(conn: &Connection) -> rusqlite::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, booking_id, pickup_location, drop_location, date, time, cab_type, status, fare, base_fare, distance_charge, distance, created_at
         FROM bookings ORDER BY created_at DESC, rowid DESC",
    )?;

    let rows = stmt.query_map([], parse_booking_row)?;
    rows.collect()
}

pub fn get_booking(conn: &Connection, id: &str) -> rusqlite::Result<Option<Booking>> {
    let result = conn.query_row(
        "SELECT id, booking_id, pickup_location, drop_location, date, time, cab_type, status, fare, base_fare, distance_charge, distance, created_at
         FROM bookings WHERE id = ?1",
        params![id],
        parse_booking_row,
    );

    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
) -> rusqlite::Result<bool> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

pub fn booking_id_exists(conn: &Connection, booking_id: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM bookings WHERE booking_id = ?1",
        params![booking_id],
        |row| row.get(0),
    )
}

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let date_str: String = row.get(4)?;
    let cab_type_str: String = row.get(6)?;
    let status_str: String = row.get(7)?;
    let created_at_str: String = row.get(12)?;

    Ok(Booking {
        id: row.get(0)?,
        booking_id: row.get(1)?,
        pickup_location: row.get(2)?,
        drop_location: row.get(3)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive()),
        time: row.get(5)?,
        cab_type: CabType::parse(&cab_type_str).unwrap_or(CabType::Mini),
        status: BookingStatus::parse(&status_str).unwrap_or(BookingStatus::Pending),
        fare: row.get(8)?,
        fare_breakdown: FareBreakdown {
            base_fare: row.get(9)?,
            distance_charge: row.get(10)?,
            distance: row.get(11)?,
        },
        created_at: NaiveDateTime::parse_from_str(&created_at_str, TIMESTAMP_FORMAT)
            .unwrap_or_else(|_| Utc::now().naive_utc()),
    })
}
