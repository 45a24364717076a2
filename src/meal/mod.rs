use indexmap::IndexMap;
use itertools::Itertools;
use serde::Deserialize;
use serde_json::Value;

mod de;

use crate::{
    canteen::CanteenId,
    error::{Error, Result},
    report::Report,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "de::MealDeserialized")]
pub struct Meal {
    name: String,
    category: String,
    prices: Prices,
    notes: Vec<String>,
}

/// Prices by tier, e.g. `students` or `employees`, in upstream order.
///
/// A tier without an amount is kept, it is just never printed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Prices(IndexMap<String, Option<f64>>);

impl Meal {
    /// Map the response of `/canteens/{id}/days/{date}/meals`.
    pub fn list_from_json(value: Value) -> Result<Vec<Self>> {
        serde_json::from_value(value).map_err(|why| Error::Deserializing(why, "reading meals"))
    }

    pub fn print(&self, report: &mut Report) {
        report
            .line(format!("Name: {}", self.name))
            .line(format!("Category: {}", self.category));
        self.prices.print(report);
        if !self.notes.is_empty() {
            report.line(format!("Notes: {}", self.notes.iter().join(", ")));
        }
        report.divider();
    }

    /// Accepts the requested date verbatim, it is only echoed back.
    pub fn print_all(canteen_id: CanteenId, date: &str, meals: &[Self]) -> String {
        let mut report = Report::titled(format!("Meals for canteen {} on {}:", canteen_id, date));
        if meals.is_empty() {
            report.line("No meals available for this date.");
        }
        for meal in meals {
            meal.print(&mut report);
        }
        report.render()
    }
}

impl Prices {
    /// Amounts worth printing, zero counts as no amount.
    fn amounts(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().filter_map(|(tier, amount)| match amount {
            Some(amount) if *amount != 0.0 => Some((tier.as_str(), *amount)),
            _ => None,
        })
    }

    fn print(&self, report: &mut Report) {
        if self.0.is_empty() {
            return;
        }
        report.line("Prices:");
        for (tier, amount) in self.amounts() {
            report.line(format!("  {}: €{:.2}", tier, amount));
        }
    }
}
