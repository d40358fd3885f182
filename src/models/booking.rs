use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::services::fare::FareBreakdown;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub booking_id: String,
    pub pickup_location: String,
    pub drop_location: String,
    pub date: NaiveDate,
    pub time: String,
    pub cab_type: CabType,
    pub status: BookingStatus,
    pub fare: f64,
    pub fare_breakdown: FareBreakdown,
    pub created_at: NaiveDateTime,
}

/// Create-booking payload as it travels over the wire. Fields default to
/// empty so a missing key surfaces as a validation error, not a body
/// rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBooking {
    pub pickup_location: String,
    pub drop_location: String,
    pub date: String,
    pub time: String,
    pub cab_type: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CabType {
    Mini,
    Sedan,
    Suv,
}

impl CabType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CabType::Mini => "mini",
            CabType::Sedan => "sedan",
            CabType::Suv => "suv",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mini" => Some(CabType::Mini),
            "sedan" => Some(CabType::Sedan),
            "suv" => Some(CabType::Suv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "on the way")]
    OnTheWay,
    #[serde(rename = "arrived")]
    Arrived,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::OnTheWay => "on the way",
            BookingStatus::Arrived => "arrived",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "on the way" => Some(BookingStatus::OnTheWay),
            "arrived" => Some(BookingStatus::Arrived),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// A completed or cancelled ride never changes status again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}
