//! Time, cost, calorie and CO2 estimates for driving, cycling and walking.
//!
//! The crate is a pure calculation engine: three [`TransportMode`]
//! implementations ([`Drive`], [`Bike`], [`Walk`]), each owning a
//! [`PersonProfile`], and a [`CalculationEngine`] that turns a distance and
//! a trip count into a [`Results`] structure. Nothing is cached; every read
//! recomputes from the current configuration.

use thiserror::Error;

pub mod config;
pub mod engine;
pub mod modes;
pub mod observability;
pub mod person;
pub mod units;

pub use config::Config;
pub use engine::{CalculationEngine, PerMode, Results};
pub use modes::{
    Bike, CategoryCosts, Drive, DriveCategory, DriveOverrides, Mode, SpendBracket, TransportMode,
    Walk,
};
pub use person::{ActivityLevel, PersonProfile, Sex};
pub use units::{CalorieUnit, Co2Unit, CostUnit, TimeUnit};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommuteError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CommuteError>;

/// Accept a finite value `>= 0`. Used for spend amounts and session inputs,
/// where zero is meaningful.
pub(crate) fn non_negative(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CommuteError::InvalidArgument(format!(
            "{field} must be a finite number >= 0, got {value}"
        )))
    }
}

/// Accept a finite value `> 0`. Used for anything that ends up in a
/// denominator and for physiological attributes.
pub(crate) fn positive(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CommuteError::InvalidArgument(format!(
            "{field} must be a finite number > 0, got {value}"
        )))
    }
}
