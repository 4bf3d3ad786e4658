use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use commute_calc::{
    ActivityLevel, CalorieUnit, Co2Unit, CostUnit, DriveCategory, Mode, PerMode, Sex,
    SpendBracket, TimeUnit,
};

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ObjectResult {
    pub value: serde_json::Value,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct ComputeParams {
    /// One-way distance in miles (default: the session distance)
    pub distance_miles: Option<f64>,
    /// Number of trips (default: the session trip count)
    pub trip_count: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct TripParams {
    pub distance_miles: f64,
    pub trip_count: f64,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct DriveCategoryParams {
    pub category: DriveCategory,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct DriveCostsParams {
    /// Drop all existing custom values before applying the ones below
    pub clear_overrides: Option<bool>,
    /// Gas price (USD per gallon)
    pub gas_price: Option<f64>,
    /// Fuel economy (miles per gallon)
    pub miles_per_gallon: Option<f64>,
    /// Miles driven per year
    pub annual_miles: Option<f64>,
    /// Gas spend (USD per year); ignored while a gas price is set
    pub annual_gas_spend: Option<f64>,
    /// Maintenance spend (USD per year)
    pub annual_maintenance_spend: Option<f64>,
    /// Tire spend (USD per year)
    pub annual_tire_spend: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct BikeCostsParams {
    /// Parts and maintenance (USD per year)
    pub annual_spend: Option<f64>,
    /// Spend bracket; applied before `annual_spend` if both are given
    pub spend_bracket: Option<SpendBracket>,
    /// Miles biked per year
    pub annual_miles: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct WalkCostsParams {
    /// Price of one pair of shoes (USD)
    pub shoe_cost: Option<f64>,
    /// Spend bracket; applied before `shoe_cost` if both are given
    pub spend_bracket: Option<SpendBracket>,
    /// Miles walked before shoes are replaced
    pub shoe_lifetime_miles: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct PersonParams {
    /// Mode whose person to update (default: all three)
    pub mode: Option<Mode>,
    pub sex: Option<Sex>,
    /// Reset weight, height and age to the averages for `sex` (default: true)
    pub apply_defaults: Option<bool>,
    pub weight_lbs: Option<f64>,
    pub height_in: Option<f64>,
    pub age_years: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct ChartParams {
    pub distance_miles: Option<f64>,
    pub trip_count: Option<f64>,
    pub time_unit: Option<TimeUnit>,
    pub cost_unit: Option<CostUnit>,
    pub calorie_unit: Option<CalorieUnit>,
    pub co2_unit: Option<Co2Unit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ChartSeries {
    /// Y axis label
    pub label: String,
    pub values: PerMode<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Co2Panel {
    pub heading: String,
    pub value: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ChartResult {
    /// X axis tick labels, in the order of every series
    pub modes: Vec<String>,
    pub time: ChartSeries,
    pub cost: ChartSeries,
    pub calories: ChartSeries,
    pub co2: Co2Panel,
}

// === Prompt Parameters ===

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CompareCommuteParams {
    pub distance_miles: Option<f64>,
    pub trip_count: Option<f64>,
}
