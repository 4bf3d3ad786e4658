use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Mode, TransportMode};
use crate::person::PersonProfile;
use crate::units::CO2_LBS_PER_GALLON;
use crate::{CommuteError, Result, non_negative, observability, positive};

/// Average urban driving speed.
const DRIVE_SPEED_MPH: f64 = 29.4;
/// US average annual miles driven.
const DEFAULT_ANNUAL_MILES: f64 = 13476.0;

/// Vehicle classes with reference per-mile costs (AAA "Your Driving Costs",
/// 2015).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DriveCategory {
    #[default]
    Average,
    SmallSedan,
    MediumSedan,
    LargeSedan,
    SportUtility,
    Minivan,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, JsonSchema)]
pub struct CategoryCosts {
    pub gas_per_mile: f64,
    pub maintenance_per_mile: f64,
    pub tires_per_mile: f64,
    pub miles_per_gallon: f64,
}

impl DriveCategory {
    pub const ALL: [DriveCategory; 6] = [
        DriveCategory::Average,
        DriveCategory::SmallSedan,
        DriveCategory::MediumSedan,
        DriveCategory::LargeSedan,
        DriveCategory::SportUtility,
        DriveCategory::Minivan,
    ];

    pub fn costs(self) -> CategoryCosts {
        let (gas, maintenance, tires, mpg) = match self {
            DriveCategory::Average => (0.1121, 0.0511, 0.0098, 26.20),
            DriveCategory::SmallSedan => (0.0918, 0.0468, 0.0068, 35.36),
            DriveCategory::MediumSedan => (0.1087, 0.0520, 0.0111, 30.10),
            DriveCategory::LargeSedan => (0.1358, 0.0546, 0.0115, 23.72),
            DriveCategory::SportUtility => (0.1460, 0.0565, 0.0138, 21.00),
            DriveCategory::Minivan => (0.1365, 0.0519, 0.0084, 20.86),
        };
        CategoryCosts {
            gas_per_mile: gas,
            maintenance_per_mile: maintenance,
            tires_per_mile: tires,
            miles_per_gallon: mpg,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DriveCategory::Average => "Average",
            DriveCategory::SmallSedan => "Small Sedan",
            DriveCategory::MediumSedan => "Medium Sedan",
            DriveCategory::LargeSedan => "Large Sedan",
            DriveCategory::SportUtility => "4WD/Sport",
            DriveCategory::Minivan => "Minivan",
        }
    }
}

impl fmt::Display for DriveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DriveCategory {
    type Err = CommuteError;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "average" => Ok(DriveCategory::Average),
            "smallsedan" => Ok(DriveCategory::SmallSedan),
            "mediumsedan" => Ok(DriveCategory::MediumSedan),
            "largesedan" => Ok(DriveCategory::LargeSedan),
            "4wdsport" | "sportutility" | "suv" => Ok(DriveCategory::SportUtility),
            "minivan" => Ok(DriveCategory::Minivan),
            _ => Err(CommuteError::InvalidArgument(format!(
                "unknown vehicle category '{s}'"
            ))),
        }
    }
}

/// Caller-supplied values that take precedence over the category table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, JsonSchema)]
pub struct DriveOverrides {
    /// USD per gallon.
    pub gas_price: Option<f64>,
    /// Miles per gallon.
    pub miles_per_gallon: Option<f64>,
    /// USD per year.
    pub annual_gas_spend: Option<f64>,
    /// USD per year.
    pub annual_maintenance_spend: Option<f64>,
    /// USD per year.
    pub annual_tire_spend: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct Drive {
    category: DriveCategory,
    annual_miles: f64,
    overrides: DriveOverrides,
    person: PersonProfile,
}

impl Default for Drive {
    fn default() -> Self {
        Self::new()
    }
}

impl Drive {
    pub fn new() -> Self {
        Self {
            category: DriveCategory::default(),
            annual_miles: DEFAULT_ANNUAL_MILES,
            overrides: DriveOverrides::default(),
            person: PersonProfile::new(Mode::Drive),
        }
    }

    pub fn category(&self) -> DriveCategory {
        self.category
    }

    pub fn annual_miles(&self) -> f64 {
        self.annual_miles
    }

    pub fn overrides(&self) -> &DriveOverrides {
        &self.overrides
    }

    /// Select a row of the reference table. Custom overrides stay in effect
    /// on top of the new category.
    pub fn set_category(&mut self, category: DriveCategory) {
        self.category = category;
        tracing::debug!(%category, "drive category updated");
    }

    pub fn set_gas_price(&mut self, usd_per_gallon: f64) -> Result<()> {
        let v = non_negative("gas_price", usd_per_gallon)
            .inspect_err(|e| observability::record_rejection("set_gas_price", e))?;
        self.overrides.gas_price = Some(v);
        tracing::debug!(gas_price = v, "drive gas price updated");
        Ok(())
    }

    pub fn clear_gas_price(&mut self) {
        self.overrides.gas_price = None;
        tracing::debug!("drive gas price cleared");
    }

    pub fn set_miles_per_gallon(&mut self, mpg: f64) -> Result<()> {
        let v = positive("miles_per_gallon", mpg)
            .inspect_err(|e| observability::record_rejection("set_miles_per_gallon", e))?;
        self.overrides.miles_per_gallon = Some(v);
        tracing::debug!(mpg = v, "drive fuel economy updated");
        Ok(())
    }

    pub fn set_annual_miles(&mut self, miles: f64) -> Result<()> {
        self.annual_miles = positive("annual_miles", miles)
            .inspect_err(|e| observability::record_rejection("set_annual_miles", e))?;
        tracing::debug!(miles, "drive annual miles updated");
        Ok(())
    }

    /// Record yearly gas spend. A gas price set earlier keeps precedence, so
    /// call [`Drive::clear_gas_price`] for the spend to take effect.
    pub fn set_annual_gas_spend(&mut self, usd: f64) -> Result<()> {
        let v = non_negative("annual_gas_spend", usd)
            .inspect_err(|e| observability::record_rejection("set_annual_gas_spend", e))?;
        self.overrides.annual_gas_spend = Some(v);
        tracing::debug!(annual_gas_spend = v, "drive gas spend updated");
        Ok(())
    }

    pub fn set_annual_maintenance_spend(&mut self, usd: f64) -> Result<()> {
        let v = non_negative("annual_maintenance_spend", usd).inspect_err(|e| {
            observability::record_rejection("set_annual_maintenance_spend", e)
        })?;
        self.overrides.annual_maintenance_spend = Some(v);
        tracing::debug!(annual_maintenance_spend = v, "drive maintenance spend updated");
        Ok(())
    }

    pub fn set_annual_tire_spend(&mut self, usd: f64) -> Result<()> {
        let v = non_negative("annual_tire_spend", usd)
            .inspect_err(|e| observability::record_rejection("set_annual_tire_spend", e))?;
        self.overrides.annual_tire_spend = Some(v);
        tracing::debug!(annual_tire_spend = v, "drive tire spend updated");
        Ok(())
    }

    /// Drop every custom value so costs come from the category table again.
    pub fn clear_overrides(&mut self) {
        self.overrides = DriveOverrides::default();
        tracing::debug!("drive overrides cleared");
    }

    /// The override MPG if set, else the category's reference MPG.
    pub fn effective_mpg(&self) -> f64 {
        self.overrides
            .miles_per_gallon
            .unwrap_or_else(|| self.category.costs().miles_per_gallon)
    }

    /// Gas cost per mile. Resolution order: explicit gas price over
    /// effective MPG, then annual gas spend over annual miles, then the
    /// category default.
    pub fn gas_cost_per_mile(&self) -> f64 {
        if let Some(price) = self.overrides.gas_price {
            price / self.effective_mpg()
        } else if let Some(spend) = self.overrides.annual_gas_spend {
            spend / self.annual_miles
        } else {
            self.category.costs().gas_per_mile
        }
    }

    pub fn maintenance_cost_per_mile(&self) -> f64 {
        self.overrides
            .annual_maintenance_spend
            .map(|spend| spend / self.annual_miles)
            .unwrap_or_else(|| self.category.costs().maintenance_per_mile)
    }

    pub fn tire_cost_per_mile(&self) -> f64 {
        self.overrides
            .annual_tire_spend
            .map(|spend| spend / self.annual_miles)
            .unwrap_or_else(|| self.category.costs().tires_per_mile)
    }

    /// Pounds of CO2 per mile: 19.6 lbs per gallon burned over the effective
    /// fuel economy.
    pub fn co2_per_mile_pounds(&self) -> f64 {
        CO2_LBS_PER_GALLON / self.effective_mpg()
    }
}

impl TransportMode for Drive {
    fn mode(&self) -> Mode {
        Mode::Drive
    }

    fn speed_mph(&self) -> f64 {
        DRIVE_SPEED_MPH
    }

    fn cost_per_mile(&self) -> f64 {
        self.gas_cost_per_mile() + self.maintenance_cost_per_mile() + self.tire_cost_per_mile()
    }

    fn co2_per_mile_lbs(&self) -> Option<f64> {
        Some(self.co2_per_mile_pounds())
    }

    fn person(&self) -> &PersonProfile {
        &self.person
    }

    fn person_mut(&mut self) -> &mut PersonProfile {
        &mut self.person
    }

    fn reset(&mut self) {
        *self = Self::new();
        tracing::debug!("drive reset to defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn default_cost_is_sum_of_average_row() {
        let d = Drive::new();
        assert!(close(d.cost_per_mile(), 0.1121 + 0.0511 + 0.0098));
        assert!(close(d.co2_per_mile_pounds(), 19.6 / 26.20));
    }

    #[test]
    fn gas_price_uses_category_mpg_without_override() {
        let mut d = Drive::new();
        d.set_gas_price(3.0).unwrap();
        assert!(close(d.gas_cost_per_mile(), 3.0 / 26.20));
    }

    #[test]
    fn gas_price_uses_override_mpg_when_set() {
        let mut d = Drive::new();
        d.set_gas_price(3.0).unwrap();
        d.set_miles_per_gallon(40.0).unwrap();
        assert!(close(d.gas_cost_per_mile(), 3.0 / 40.0));
    }

    #[test]
    fn gas_price_wins_over_gas_spend() {
        let mut d = Drive::new();
        d.set_annual_gas_spend(1500.0).unwrap();
        d.set_gas_price(3.0).unwrap();
        assert!(close(d.gas_cost_per_mile(), 3.0 / 26.20));
        d.clear_gas_price();
        assert!(close(d.gas_cost_per_mile(), 1500.0 / 13476.0));
    }

    #[test]
    fn maintenance_and_tires_resolve_independently_of_gas() {
        let mut d = Drive::new();
        d.set_annual_maintenance_spend(1000.0).unwrap();
        d.set_annual_miles(10000.0).unwrap();
        assert!(close(d.maintenance_cost_per_mile(), 0.1));
        assert!(close(d.tire_cost_per_mile(), 0.0098));
        assert!(close(d.gas_cost_per_mile(), 0.1121));
    }

    #[test]
    fn category_change_keeps_overrides() {
        let mut d = Drive::new();
        d.set_gas_price(3.0).unwrap();
        d.set_category(DriveCategory::SmallSedan);
        assert!(close(d.gas_cost_per_mile(), 3.0 / 35.36));
        assert!(close(d.maintenance_cost_per_mile(), 0.0468));
    }

    #[test]
    fn minivan_row_has_a_real_mpg() {
        let costs = DriveCategory::Minivan.costs();
        assert!(close(costs.miles_per_gallon, 20.86));
        assert!(close(costs.tires_per_mile, 0.0084));
    }

    #[test]
    fn zero_denominators_are_rejected() {
        let mut d = Drive::new();
        assert!(d.set_miles_per_gallon(0.0).is_err());
        assert!(d.set_annual_miles(0.0).is_err());
        assert_eq!(d, Drive::new());
    }

    #[test]
    fn zero_spend_is_a_defined_zero_cost() {
        let mut d = Drive::new();
        d.set_gas_price(0.0).unwrap();
        assert_eq!(d.gas_cost_per_mile(), 0.0);
    }

    #[test]
    fn category_labels_parse() {
        assert_eq!("4WD/Sport".parse::<DriveCategory>().unwrap(), DriveCategory::SportUtility);
        assert_eq!("smallSedan".parse::<DriveCategory>().unwrap(), DriveCategory::SmallSedan);
        assert_eq!("Medium Sedan".parse::<DriveCategory>().unwrap(), DriveCategory::MediumSedan);
        assert!("truck".parse::<DriveCategory>().is_err());
    }

    #[test]
    fn reset_clears_overrides_and_person() {
        let mut d = Drive::new();
        d.set_category(DriveCategory::Minivan);
        d.set_gas_price(4.0).unwrap();
        d.person_mut().set_sex(crate::Sex::Female, true).unwrap();
        d.reset();
        assert_eq!(d, Drive::new());
    }
}
