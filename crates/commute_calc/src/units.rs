//! Reference constants and the alternative unit representations offered
//! for each result category.

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{CommuteError, Result};

pub const MINUTES_PER_HOUR: f64 = 60.0;
/// Average length of a bestselling audiobook, in hours.
pub const AUDIOBOOK_HOURS: f64 = 12.59;
/// Price of one cup of coffee, in USD.
pub const COFFEE_PRICE_USD: f64 = 2.60;
/// Pounds of CO2 sequestered by one planted tree.
pub const TREE_CO2_LBS: f64 = 911.0;
/// Pounds of CO2 released by burning one gallon of gasoline.
pub const CO2_LBS_PER_GALLON: f64 = 19.6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Hours,
    Minutes,
    Audiobooks,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CostUnit {
    #[default]
    Dollars,
    Coffees,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CalorieUnit {
    #[default]
    Total,
    PerHour,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Co2Unit {
    #[default]
    Pounds,
    Trees,
}

fn unknown(kind: &str, s: &str) -> CommuteError {
    CommuteError::InvalidArgument(format!("unknown {kind} unit '{s}'"))
}

impl FromStr for TimeUnit {
    type Err = CommuteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hours" | "h" => Ok(TimeUnit::Hours),
            "minutes" | "min" => Ok(TimeUnit::Minutes),
            "audiobooks" => Ok(TimeUnit::Audiobooks),
            _ => Err(unknown("time", s)),
        }
    }
}

impl FromStr for CostUnit {
    type Err = CommuteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dollars" | "usd" => Ok(CostUnit::Dollars),
            "coffees" => Ok(CostUnit::Coffees),
            _ => Err(unknown("cost", s)),
        }
    }
}

impl FromStr for CalorieUnit {
    type Err = CommuteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "total" => Ok(CalorieUnit::Total),
            "per_hour" | "/hour" | "hourly" => Ok(CalorieUnit::PerHour),
            _ => Err(unknown("calorie", s)),
        }
    }
}

impl FromStr for Co2Unit {
    type Err = CommuteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pounds" | "lbs" => Ok(Co2Unit::Pounds),
            "trees" => Ok(Co2Unit::Trees),
            _ => Err(unknown("co2", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_parse_common_spellings() {
        assert_eq!("Minutes".parse::<TimeUnit>().unwrap(), TimeUnit::Minutes);
        assert_eq!("usd".parse::<CostUnit>().unwrap(), CostUnit::Dollars);
        assert_eq!("/hour".parse::<CalorieUnit>().unwrap(), CalorieUnit::PerHour);
        assert_eq!("lbs".parse::<Co2Unit>().unwrap(), Co2Unit::Pounds);
    }

    #[test]
    fn unknown_unit_is_invalid_argument() {
        let err = "fortnights".parse::<TimeUnit>().unwrap_err();
        assert!(matches!(err, CommuteError::InvalidArgument(_)));
    }
}
