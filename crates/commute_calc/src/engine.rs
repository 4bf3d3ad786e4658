//! The calculation engine: owns the three transport modes and derives a
//! [`Results`] structure for a distance and trip count.
//!
//! There is no memoised state. `compute` and `results` re-derive every
//! field from the current mode parameters, so a setter call is visible on
//! the very next read.

use std::ops::Index;

use schemars::JsonSchema;
use serde::Serialize;

use crate::config::Config;
use crate::modes::{Bike, Drive, Mode, TransportMode, Walk};
use crate::person::Sex;
use crate::units::{
    AUDIOBOOK_HOURS, COFFEE_PRICE_USD, CalorieUnit, Co2Unit, CostUnit, MINUTES_PER_HOUR,
    TREE_CO2_LBS, TimeUnit,
};
use crate::{Result, non_negative, observability};

const DEFAULT_DISTANCE_MILES: f64 = 1.0;
const DEFAULT_TRIP_COUNT: f64 = 1.0;

/// One value per transport mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, JsonSchema)]
pub struct PerMode<T> {
    pub drive: T,
    pub bike: T,
    pub walk: T,
}

impl<T> PerMode<T> {
    pub fn from_fn(mut f: impl FnMut(Mode) -> T) -> Self {
        Self {
            drive: f(Mode::Drive),
            bike: f(Mode::Bike),
            walk: f(Mode::Walk),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerMode<U> {
        PerMode {
            drive: f(&self.drive),
            bike: f(&self.bike),
            walk: f(&self.walk),
        }
    }

    /// Values in Drive, Bike, Walk order.
    pub fn iter(&self) -> impl Iterator<Item = (Mode, &T)> {
        [
            (Mode::Drive, &self.drive),
            (Mode::Bike, &self.bike),
            (Mode::Walk, &self.walk),
        ]
        .into_iter()
    }
}

impl<T> Index<Mode> for PerMode<T> {
    type Output = T;

    fn index(&self, mode: Mode) -> &T {
        match mode {
            Mode::Drive => &self.drive,
            Mode::Bike => &self.bike,
            Mode::Walk => &self.walk,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct Results {
    pub distance_miles: f64,
    pub trip_count: f64,
    pub time_hours: PerMode<f64>,
    pub time_minutes: PerMode<f64>,
    /// Time expressed in average-length audiobooks.
    pub time_audiobooks: PerMode<f64>,
    pub cost_usd: PerMode<f64>,
    /// Cost expressed in cups of coffee.
    pub cost_coffees: PerMode<f64>,
    pub calories_total: PerMode<f64>,
    pub calories_per_hour: PerMode<f64>,
    /// CO2 emitted by driving the full distance.
    pub co2_pounds_driving: f64,
    /// Trees that would need planting to sequester `co2_pounds_driving`.
    pub co2_trees_equivalent: f64,
}

impl Results {
    pub fn time(&self, unit: TimeUnit) -> PerMode<f64> {
        match unit {
            TimeUnit::Hours => self.time_hours,
            TimeUnit::Minutes => self.time_minutes,
            TimeUnit::Audiobooks => self.time_audiobooks,
        }
    }

    pub fn cost(&self, unit: CostUnit) -> PerMode<f64> {
        match unit {
            CostUnit::Dollars => self.cost_usd,
            CostUnit::Coffees => self.cost_coffees,
        }
    }

    pub fn calories(&self, unit: CalorieUnit) -> PerMode<f64> {
        match unit {
            CalorieUnit::Total => self.calories_total,
            CalorieUnit::PerHour => self.calories_per_hour,
        }
    }

    pub fn co2(&self, unit: Co2Unit) -> f64 {
        match unit {
            Co2Unit::Pounds => self.co2_pounds_driving,
            Co2Unit::Trees => self.co2_trees_equivalent,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct CalculationEngine {
    drive: Drive,
    bike: Bike,
    walk: Walk,
    distance_miles: f64,
    trip_count: f64,
}

impl Default for CalculationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculationEngine {
    pub fn new() -> Self {
        Self {
            drive: Drive::new(),
            bike: Bike::new(),
            walk: Walk::new(),
            distance_miles: DEFAULT_DISTANCE_MILES,
            trip_count: DEFAULT_TRIP_COUNT,
        }
    }

    /// Build an engine whose session starts from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut engine = Self::new();
        engine.set_distance_miles(config.distance_miles)?;
        engine.set_trip_count(config.trip_count)?;
        engine.set_sex_all(config.sex, true)?;
        Ok(engine)
    }

    pub fn drive(&self) -> &Drive {
        &self.drive
    }

    pub fn drive_mut(&mut self) -> &mut Drive {
        &mut self.drive
    }

    pub fn bike(&self) -> &Bike {
        &self.bike
    }

    pub fn bike_mut(&mut self) -> &mut Bike {
        &mut self.bike
    }

    pub fn walk(&self) -> &Walk {
        &self.walk
    }

    pub fn walk_mut(&mut self) -> &mut Walk {
        &mut self.walk
    }

    pub fn mode(&self, mode: Mode) -> &dyn TransportMode {
        match mode {
            Mode::Drive => &self.drive,
            Mode::Bike => &self.bike,
            Mode::Walk => &self.walk,
        }
    }

    pub fn mode_mut(&mut self, mode: Mode) -> &mut dyn TransportMode {
        match mode {
            Mode::Drive => &mut self.drive,
            Mode::Bike => &mut self.bike,
            Mode::Walk => &mut self.walk,
        }
    }

    pub fn distance_miles(&self) -> f64 {
        self.distance_miles
    }

    pub fn trip_count(&self) -> f64 {
        self.trip_count
    }

    pub fn set_distance_miles(&mut self, miles: f64) -> Result<()> {
        self.distance_miles = non_negative("distance_miles", miles)
            .inspect_err(|e| observability::record_rejection("set_distance_miles", e))?;
        tracing::debug!(miles, "session distance updated");
        Ok(())
    }

    pub fn set_trip_count(&mut self, trips: f64) -> Result<()> {
        self.trip_count = non_negative("trip_count", trips)
            .inspect_err(|e| observability::record_rejection("set_trip_count", e))?;
        tracing::debug!(trips, "session trip count updated");
        Ok(())
    }

    /// Apply one sex selection to the person of every mode. If any mode
    /// rejects it, no mode is changed.
    pub fn set_sex_all(&mut self, sex: Sex, apply_defaults: bool) -> Result<()> {
        let mut staged = Mode::ALL.map(|m| self.mode(m).person().clone());
        for person in &mut staged {
            person.set_sex(sex, apply_defaults)?;
        }
        for (mode, person) in Mode::ALL.into_iter().zip(staged) {
            *self.mode_mut(mode).person_mut() = person;
        }
        Ok(())
    }

    /// Restore every mode and the session distance and trip count.
    pub fn reset(&mut self) {
        for mode in Mode::ALL {
            self.mode_mut(mode).reset();
        }
        self.distance_miles = DEFAULT_DISTANCE_MILES;
        self.trip_count = DEFAULT_TRIP_COUNT;
        tracing::debug!("engine reset to defaults");
    }

    /// Results for the stored session distance and trip count.
    pub fn results(&self) -> Results {
        self.derive(self.distance_miles, self.trip_count)
    }

    /// Results for an explicit distance and trip count. Both must be finite
    /// and non-negative; the session state is left untouched.
    pub fn compute(&self, distance_miles: f64, trip_count: f64) -> Result<Results> {
        let distance_miles = non_negative("distance_miles", distance_miles)
            .inspect_err(|e| observability::record_rejection("compute", e))?;
        let trip_count = non_negative("trip_count", trip_count)
            .inspect_err(|e| observability::record_rejection("compute", e))?;
        Ok(self.derive(distance_miles, trip_count))
    }

    fn derive(&self, distance_miles: f64, trip_count: f64) -> Results {
        observability::record_compute(distance_miles, trip_count);
        let miles = distance_miles * trip_count;

        let time_hours = PerMode::from_fn(|m| miles / self.mode(m).speed_mph());
        let cost_usd = PerMode::from_fn(|m| self.mode(m).cost_per_mile() * miles);
        let calories_per_hour = PerMode::from_fn(|m| self.mode(m).person().calorie_burn_rate());
        let calories_total = PerMode::from_fn(|m| calories_per_hour[m] * time_hours[m]);
        let co2_pounds_driving = self.drive.co2_per_mile_pounds() * miles;

        Results {
            distance_miles,
            trip_count,
            time_hours,
            time_minutes: time_hours.map(|h| h * MINUTES_PER_HOUR),
            time_audiobooks: time_hours.map(|h| h / AUDIOBOOK_HOURS),
            cost_usd,
            cost_coffees: cost_usd.map(|c| c / COFFEE_PRICE_USD),
            calories_total,
            calories_per_hour,
            co2_pounds_driving,
            co2_trees_equivalent: co2_pounds_driving / TREE_CO2_LBS,
        }
    }
}
