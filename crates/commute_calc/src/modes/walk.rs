use schemars::JsonSchema;
use serde::Serialize;

use super::{Mode, SpendBracket, TransportMode};
use crate::person::PersonProfile;
use crate::{Result, non_negative, observability, positive};

const WALK_SPEED_MPH: f64 = 3.25;
const DEFAULT_SHOE_COST: f64 = 37.5;
/// Miles walked before a pair of shoes is replaced.
const DEFAULT_SHOE_LIFETIME_MILES: f64 = 1000.0;

#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct Walk {
    shoe_cost: f64,
    shoe_lifetime_miles: f64,
    person: PersonProfile,
}

impl Default for Walk {
    fn default() -> Self {
        Self::new()
    }
}

impl Walk {
    pub fn new() -> Self {
        Self {
            shoe_cost: DEFAULT_SHOE_COST,
            shoe_lifetime_miles: DEFAULT_SHOE_LIFETIME_MILES,
            person: PersonProfile::new(Mode::Walk),
        }
    }

    pub fn shoe_cost(&self) -> f64 {
        self.shoe_cost
    }

    pub fn shoe_lifetime_miles(&self) -> f64 {
        self.shoe_lifetime_miles
    }

    pub fn set_shoe_cost(&mut self, usd: f64) -> Result<()> {
        self.shoe_cost = non_negative("shoe_cost", usd)
            .inspect_err(|e| observability::record_rejection("set_shoe_cost", e))?;
        tracing::debug!(shoe_cost = usd, "walk shoe cost updated");
        Ok(())
    }

    pub fn set_spend_bracket(&mut self, bracket: SpendBracket) {
        self.shoe_cost = bracket.amount_usd();
        tracing::debug!(bracket = bracket.label(), "walk spend bracket selected");
    }

    pub fn set_shoe_lifetime_miles(&mut self, miles: f64) -> Result<()> {
        self.shoe_lifetime_miles = positive("shoe_lifetime_miles", miles)
            .inspect_err(|e| observability::record_rejection("set_shoe_lifetime_miles", e))?;
        tracing::debug!(miles, "walk shoe lifetime updated");
        Ok(())
    }
}

impl TransportMode for Walk {
    fn mode(&self) -> Mode {
        Mode::Walk
    }

    fn speed_mph(&self) -> f64 {
        WALK_SPEED_MPH
    }

    fn cost_per_mile(&self) -> f64 {
        self.shoe_cost / self.shoe_lifetime_miles
    }

    fn person(&self) -> &PersonProfile {
        &self.person
    }

    fn person_mut(&mut self) -> &mut PersonProfile {
        &mut self.person
    }

    fn reset(&mut self) {
        *self = Self::new();
        tracing::debug!("walk reset to defaults");
    }
}
