use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::Error;

use super::{or_not_available, CanteenId};

/// For deserializing responses from API/canteens.
#[derive(Debug, Deserialize)]
pub struct CanteenDeserialized {
    id: CanteenId,
    name: String,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    coordinates: Option<Vec<f64>>,
}

/// For deserializing responses from API/canteens/{id}/days.
#[derive(Debug, Deserialize)]
pub struct DayDeserialized {
    date: String,
    #[serde(default)]
    closed: Option<bool>,
}

impl TryFrom<CanteenDeserialized> for super::Canteen {
    type Error = &'static str;

    fn try_from(raw: CanteenDeserialized) -> Result<Self, Self::Error> {
        let coordinates = match raw.coordinates.as_deref() {
            None | Some([]) => None,
            Some([lat, lng, ..]) => Some([*lat, *lng]),
            Some([_]) => return Err("coordinates are missing the longitude"),
        };
        Ok(Self {
            id: raw.id,
            name: raw.name,
            city: or_not_available(raw.city),
            address: or_not_available(raw.address),
            coordinates,
        })
    }
}

impl TryFrom<DayDeserialized> for super::Day {
    type Error = Error;

    fn try_from(raw: DayDeserialized) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d").map_err(Error::InvalidDate)?;
        Ok(Self {
            date,
            label: raw.date,
            closed: raw.closed.unwrap_or_default(),
        })
    }
}
