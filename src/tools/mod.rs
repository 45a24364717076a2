//! The canteen queries offered to the tool host.
//!
//! Every query is a single fetch, map and format pipeline. Failures while
//! talking to the upstream service are rendered into the report text,
//! anything else fails the query.
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::{info, warn};


use crate::{
    canteen::{Canteen, CanteenId, Day},
    error::{Error, Result},
    meal::Meal,
    request::{Api, ApiClient},
};

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The local calendar of the machine we're running on.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Arguments of `list_canteen_days`.
#[derive(Debug, Deserialize)]
pub struct DaysParams {
    pub canteen_id: CanteenId,
}

/// Arguments of `get_meals`.
#[derive(Debug, Deserialize)]
pub struct MealsParams {
    pub canteen_id: CanteenId,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug)]
pub struct Tools<A, C = LocalClock> {
    client: ApiClient<A>,
    clock: C,
}

impl<A: Api, C: Clock> Tools<A, C> {
    pub fn new(client: ApiClient<A>, clock: C) -> Self {
        Self { client, clock }
    }

    pub async fn list_canteens(&self) -> Result<String> {
        info!("Listing canteens");
        let res = async {
            let value = self.client.fetch("/canteens").await?;
            let canteens = Canteen::list_from_json(value)?;
            Ok::<_, Error>(Canteen::print_all(&canteens))
        };
        soften(res.await)
    }

    pub async fn list_canteen_days(&self, canteen_id: CanteenId) -> Result<String> {
        check_canteen_id(canteen_id)?;
        info!("Listing days for canteen {}", canteen_id);
        let res = async {
            let path = format!("/canteens/{}/days", canteen_id);
            let value = self.client.fetch(&path).await?;
            let days = Day::list_from_json(value)?;
            Ok::<_, Error>(Day::print_all(canteen_id, &days))
        };
        soften(res.await)
    }

    /// Meals served at `date`, today if `date` is missing or empty.
    ///
    /// The date is passed on to the upstream service unchecked.
    pub async fn get_meals(&self, canteen_id: CanteenId, date: Option<&str>) -> Result<String> {
        check_canteen_id(canteen_id)?;
        let date = match date {
            Some(date) if !date.is_empty() => date.to_owned(),
            _ => format_date(self.clock.today()),
        };
        info!("Listing meals for canteen {} on {}", canteen_id, date);
        let res = async {
            let path = format!("/canteens/{}/days/{}/meals", canteen_id, date);
            let value = self.client.fetch(&path).await?;
            let meals = Meal::list_from_json(value)?;
            Ok::<_, Error>(Meal::print_all(canteen_id, &date, &meals))
        };
        soften(res.await)
    }
}

/// Format a date the way the upstream service expects it, i.e. `2026-01-13`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn check_canteen_id(canteen_id: CanteenId) -> Result<()> {
    if canteen_id == 0 {
        return Err(Error::InvalidArguments(String::from(
            "canteen_id must be a positive integer",
        )));
    }
    Ok(())
}

/// Turn upstream failures into report text.
fn soften(res: Result<String>) -> Result<String> {
    match res {
        Err(why) if why.is_http() => {
            warn!("{}", why);
            Ok(format!("HTTP Error: {}", why))
        }
        other => other,
    }
}
