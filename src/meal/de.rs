use serde::Deserialize;

use crate::canteen::or_not_available;

use super::Prices;

/// For deserializing responses from API/canteens/{id}/days/{date}/meals.
#[derive(Debug, Deserialize)]
pub struct MealDeserialized {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    prices: Option<Prices>,
    #[serde(default)]
    notes: Option<Vec<String>>,
}

impl From<MealDeserialized> for super::Meal {
    fn from(raw: MealDeserialized) -> Self {
        Self {
            name: or_not_available(raw.name),
            category: or_not_available(raw.category),
            prices: raw.prices.unwrap_or_default(),
            notes: raw.notes.unwrap_or_default(),
        }
    }
}
