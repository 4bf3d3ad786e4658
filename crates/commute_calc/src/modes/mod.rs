//! Transport modes.
//!
//! Every mode reports an average speed and a cost per mile and owns the
//! [`PersonProfile`] used for its calorie estimate. Only [`Drive`] emits
//! CO2. Cost per mile is never cached: it is derived from the current
//! parameters on every call.

mod bike;
mod drive;
mod walk;

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use bike::Bike;
pub use drive::{CategoryCosts, Drive, DriveCategory, DriveOverrides};
pub use walk::Walk;

use crate::person::PersonProfile;
use crate::{CommuteError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Drive,
    Bike,
    Walk,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Drive, Mode::Bike, Mode::Walk];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Drive => "Drive",
            Mode::Bike => "Bike",
            Mode::Walk => "Walk",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = CommuteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drive" | "driver" => Ok(Mode::Drive),
            "bike" | "biker" => Ok(Mode::Bike),
            "walk" | "walker" => Ok(Mode::Walk),
            other => Err(CommuteError::InvalidArgument(format!(
                "unknown mode '{other}' (expected drive, bike or walk)"
            ))),
        }
    }
}

/// Capabilities shared by the three modes.
pub trait TransportMode: Send + Sync {
    fn mode(&self) -> Mode;

    /// Average speed in miles per hour.
    fn speed_mph(&self) -> f64;

    /// Total cost in USD of travelling one mile.
    fn cost_per_mile(&self) -> f64;

    /// Pounds of CO2 emitted per mile, for modes that emit any.
    fn co2_per_mile_lbs(&self) -> Option<f64> {
        None
    }

    fn person(&self) -> &PersonProfile;

    fn person_mut(&mut self) -> &mut PersonProfile;

    /// Restore the documented defaults, including a male default person.
    fn reset(&mut self);
}

/// Annual spend brackets offered for bike upkeep and walking shoes. Each
/// bracket resolves to the midpoint (or a representative value for the
/// open-ended top bracket).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpendBracket {
    UpTo25,
    From25To50,
    From50To100,
    From100To150,
    From150To200,
    Over200,
}

impl SpendBracket {
    pub const ALL: [SpendBracket; 6] = [
        SpendBracket::UpTo25,
        SpendBracket::From25To50,
        SpendBracket::From50To100,
        SpendBracket::From100To150,
        SpendBracket::From150To200,
        SpendBracket::Over200,
    ];

    pub fn amount_usd(self) -> f64 {
        match self {
            SpendBracket::UpTo25 => 12.5,
            SpendBracket::From25To50 => 37.5,
            SpendBracket::From50To100 => 75.0,
            SpendBracket::From100To150 => 125.0,
            SpendBracket::From150To200 => 175.0,
            SpendBracket::Over200 => 250.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpendBracket::UpTo25 => "$0-25",
            SpendBracket::From25To50 => "$25-50",
            SpendBracket::From50To100 => "$50-100",
            SpendBracket::From100To150 => "$100-150",
            SpendBracket::From150To200 => "$150-200",
            SpendBracket::Over200 => ">$200",
        }
    }
}

impl FromStr for SpendBracket {
    type Err = CommuteError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        SpendBracket::ALL
            .into_iter()
            .find(|b| b.label() == s)
            .ok_or_else(|| {
                CommuteError::InvalidArgument(format!("unknown spend bracket '{s}'"))
            })
    }
}
