use crate::{CommuteError, Sex};

/// Initial session settings. Reference tables are compiled in; only the
/// starting distance, trip count and sex come from the environment.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub distance_miles: f64,
    pub trip_count: f64,
    pub sex: Sex,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            distance_miles: 1.0,
            trip_count: 1.0,
            sex: Sex::Male,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, CommuteError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, CommuteError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let distance_miles = match get("COMMUTE_CALC_DISTANCE_MILES") {
            Some(v) => parse_non_negative("COMMUTE_CALC_DISTANCE_MILES", &v)?,
            None => defaults.distance_miles,
        };
        let trip_count = match get("COMMUTE_CALC_TRIPS") {
            Some(v) => parse_non_negative("COMMUTE_CALC_TRIPS", &v)?,
            None => defaults.trip_count,
        };
        let sex = match get("COMMUTE_CALC_SEX") {
            Some(v) => v
                .parse::<Sex>()
                .map_err(|e| CommuteError::Config(format!("COMMUTE_CALC_SEX: {e}")))?,
            None => defaults.sex,
        };
        Ok(Self {
            distance_miles,
            trip_count,
            sex,
        })
    }
}

fn parse_non_negative(key: &str, raw: &str) -> Result<f64, CommuteError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CommuteError::Config(format!("{key} is not a number: '{raw}'")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(CommuteError::Config(format!(
            "{key} must be a finite number >= 0, got {value}"
        )));
    }
    Ok(value)
}
