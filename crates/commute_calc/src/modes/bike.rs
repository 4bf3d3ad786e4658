use schemars::JsonSchema;
use serde::Serialize;

use super::{Mode, SpendBracket, TransportMode};
use crate::person::PersonProfile;
use crate::{Result, non_negative, observability, positive};

/// Average city cycling speed.
const BIKE_SPEED_MPH: f64 = 11.5;
/// Parts and maintenance, USD per year (VTPI transportation cost analysis).
const DEFAULT_ANNUAL_SPEND: f64 = 100.0;
const DEFAULT_ANNUAL_MILES: f64 = 1500.0;

#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct Bike {
    annual_spend: f64,
    annual_miles: f64,
    person: PersonProfile,
}

impl Default for Bike {
    fn default() -> Self {
        Self::new()
    }
}

impl Bike {
    pub fn new() -> Self {
        Self {
            annual_spend: DEFAULT_ANNUAL_SPEND,
            annual_miles: DEFAULT_ANNUAL_MILES,
            person: PersonProfile::new(Mode::Bike),
        }
    }

    pub fn annual_spend(&self) -> f64 {
        self.annual_spend
    }

    pub fn annual_miles(&self) -> f64 {
        self.annual_miles
    }

    /// USD spent per year on parts and maintenance.
    pub fn set_annual_spend(&mut self, usd: f64) -> Result<()> {
        self.annual_spend = non_negative("annual_spend", usd)
            .inspect_err(|e| observability::record_rejection("set_bike_annual_spend", e))?;
        tracing::debug!(annual_spend = usd, "bike spend updated");
        Ok(())
    }

    pub fn set_spend_bracket(&mut self, bracket: SpendBracket) {
        self.annual_spend = bracket.amount_usd();
        tracing::debug!(bracket = bracket.label(), "bike spend bracket selected");
    }

    pub fn set_annual_miles(&mut self, miles: f64) -> Result<()> {
        self.annual_miles = positive("annual_miles", miles)
            .inspect_err(|e| observability::record_rejection("set_bike_annual_miles", e))?;
        tracing::debug!(miles, "bike annual miles updated");
        Ok(())
    }
}

impl TransportMode for Bike {
    fn mode(&self) -> Mode {
        Mode::Bike
    }

    fn speed_mph(&self) -> f64 {
        BIKE_SPEED_MPH
    }

    fn cost_per_mile(&self) -> f64 {
        self.annual_spend / self.annual_miles
    }

    fn person(&self) -> &PersonProfile {
        &self.person
    }

    fn person_mut(&mut self) -> &mut PersonProfile {
        &mut self.person
    }

    fn reset(&mut self) {
        *self = Self::new();
        tracing::debug!("bike reset to defaults");
    }
}
