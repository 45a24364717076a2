use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

mod de;

use crate::{
    error::{Error, Result},
    report::Report,
};

pub type CanteenId = usize;

/// Placeholder for optional text the upstream service did not send.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "de::CanteenDeserialized")]
pub struct Canteen {
    id: CanteenId,
    name: String,
    city: String,
    address: String,
    /// Latitude and longitude.
    coordinates: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    date: NaiveDate,
    /// The date as sent by the upstream service.
    label: String,
    closed: bool,
}

/// Fill in an optional text field the upstream service left out.
pub fn or_not_available(field: Option<String>) -> String {
    field.unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}

impl Canteen {
    /// Map the response of `/canteens`.
    pub fn list_from_json(value: Value) -> Result<Vec<Self>> {
        serde_json::from_value(value).map_err(|why| Error::Deserializing(why, "reading canteens"))
    }

    pub fn print(&self, report: &mut Report) {
        report
            .line(format!("ID: {}", self.id))
            .line(format!("Name: {}", self.name))
            .line(format!("City: {}", self.city))
            .line(format!("Address: {}", self.address));
        if let Some([lat, lng]) = self.coordinates {
            report.line(format!("Coordinates: {:?}, {:?}", lat, lng));
        }
        report.divider();
    }

    pub fn print_all(canteens: &[Self]) -> String {
        let mut report = Report::titled("Available Canteens:");
        for canteen in canteens {
            canteen.print(&mut report);
        }
        report.render()
    }
}

impl Day {
    /// Map the response of `/canteens/{id}/days`.
    ///
    /// Fails if any of the dates is not a valid `YYYY-MM-DD` date.
    pub fn list_from_json(value: Value) -> Result<Vec<Self>> {
        let raw: Vec<de::DayDeserialized> = serde_json::from_value(value)
            .map_err(|why| Error::Deserializing(why, "reading canteen days"))?;
        raw.into_iter().map(Self::try_from).collect()
    }

    /// English name of the weekday, i.e. `Tuesday`.
    pub fn weekday(&self) -> String {
        self.date.format("%A").to_string()
    }

    pub fn print(&self, report: &mut Report) {
        let status = if self.closed { "CLOSED" } else { "OPEN" };
        report.line(format!("{} ({}): {}", self.label, self.weekday(), status));
    }

    pub fn print_all(canteen_id: CanteenId, days: &[Self]) -> String {
        let mut report = Report::titled(format!("Available days for canteen {}:", canteen_id));
        if days.is_empty() {
            report.line("No days available.");
        }
        for day in days {
            day.print(&mut report);
        }
        report.render()
    }
}
