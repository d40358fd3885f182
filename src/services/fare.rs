use serde::{Deserialize, Serialize};

use crate::models::CabType;

/// Itemized charges stored alongside the total so the client can show a
/// breakdown without re-running fare math.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FareBreakdown {
    pub base_fare: f64,
    pub distance_charge: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FareQuote {
    pub total: f64,
    #[serde(flatten)]
    pub breakdown: FareBreakdown,
}

fn base_fare(cab_type: CabType) -> f64 {
    match cab_type {
        CabType::Mini => 5.0,
        CabType::Sedan => 8.0,
        CabType::Suv => 12.0,
    }
}

fn rate_per_mile(cab_type: CabType) -> f64 {
    match cab_type {
        CabType::Mini => 1.5,
        CabType::Sedan => 2.0,
        CabType::Suv => 2.5,
    }
}

pub fn quote(cab_type: CabType, distance: f64) -> FareQuote {
    let base = base_fare(cab_type);
    let distance_charge = distance * rate_per_mile(cab_type);

    FareQuote {
        total: base + distance_charge,
        breakdown: FareBreakdown {
            base_fare: base,
            distance_charge,
            distance,
        },
    }
}
