//! Physiological model used to estimate calorie burn.
//!
//! Each transport mode owns one [`PersonProfile`]. Calorie burn per hour is
//! the Harris-Benedict basal metabolic rate scaled by an activity
//! multiplier that depends on how strenuous the mode is.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::modes::Mode;
use crate::{CommuteError, Result, observability, positive};

/// Population averages for a US adult, used when a sex is applied with
/// defaults.
const MALE_WEIGHT_LBS: f64 = 195.5;
const MALE_HEIGHT_IN: f64 = 69.3;
const FEMALE_WEIGHT_LBS: f64 = 162.9;
const FEMALE_HEIGHT_IN: f64 = 63.8;
const DEFAULT_AGE_YEARS: f64 = 21.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub fn default_weight_lbs(self) -> f64 {
        match self {
            Sex::Male => MALE_WEIGHT_LBS,
            Sex::Female => FEMALE_WEIGHT_LBS,
        }
    }

    pub fn default_height_in(self) -> f64 {
        match self {
            Sex::Male => MALE_HEIGHT_IN,
            Sex::Female => FEMALE_HEIGHT_IN,
        }
    }

    pub fn default_age_years(self) -> f64 {
        DEFAULT_AGE_YEARS
    }
}

impl FromStr for Sex {
    type Err = CommuteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Sex::Male),
            "f" | "female" => Ok(Sex::Female),
            other => Err(CommuteError::InvalidArgument(format!(
                "unknown sex '{other}' (expected male or female)"
            ))),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sex::Male => "male",
            Sex::Female => "female",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    None,
    Light,
    Moderate,
    Heavy,
}

impl ActivityLevel {
    /// Harris-Benedict activity multiplier applied to BMR.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::None => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Heavy => 1.725,
        }
    }

    pub fn default_for(mode: Mode) -> Self {
        match mode {
            Mode::Drive => ActivityLevel::None,
            Mode::Bike => ActivityLevel::Moderate,
            Mode::Walk => ActivityLevel::Light,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = CommuteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "no" => Ok(ActivityLevel::None),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "heavy" => Ok(ActivityLevel::Heavy),
            other => Err(CommuteError::InvalidArgument(format!(
                "unknown activity level '{other}' (expected none, light, moderate or heavy)"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct PersonProfile {
    sex: Sex,
    weight_lbs: f64,
    height_in: f64,
    age_years: f64,
    activity_level: ActivityLevel,
    mode: Mode,
}

impl PersonProfile {
    /// Average adult male with the activity level implied by `mode`.
    pub fn new(mode: Mode) -> Self {
        let sex = Sex::Male;
        Self {
            sex,
            weight_lbs: sex.default_weight_lbs(),
            height_in: sex.default_height_in(),
            age_years: sex.default_age_years(),
            activity_level: ActivityLevel::default_for(mode),
            mode,
        }
    }

    /// Restore the male defaults and the mode's default activity level.
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn weight_lbs(&self) -> f64 {
        self.weight_lbs
    }

    pub fn height_in(&self) -> f64 {
        self.height_in
    }

    pub fn age_years(&self) -> f64 {
        self.age_years
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Change `sex`. With `apply_defaults`, weight, height and age are also
    /// replaced by the population averages for that sex; without it only
    /// `sex` changes, which is rejected if the kept measurements give a
    /// non-positive BMR under the new formula.
    pub fn set_sex(&mut self, sex: Sex, apply_defaults: bool) -> Result<()> {
        let mut candidate = self.clone();
        candidate.sex = sex;
        if apply_defaults {
            candidate.weight_lbs = sex.default_weight_lbs();
            candidate.height_in = sex.default_height_in();
            candidate.age_years = sex.default_age_years();
        }
        self.commit("set_sex", candidate)?;
        tracing::debug!(mode = %self.mode, %sex, apply_defaults, "person sex updated");
        Ok(())
    }

    pub fn set_weight_lbs(&mut self, weight_lbs: f64) -> Result<()> {
        let weight_lbs = positive("weight_lbs", weight_lbs)
            .inspect_err(|e| observability::record_rejection("set_weight_lbs", e))?;
        self.commit("set_weight_lbs", Self { weight_lbs, ..self.clone() })?;
        tracing::debug!(mode = %self.mode, weight_lbs, "person weight updated");
        Ok(())
    }

    pub fn set_height_in(&mut self, height_in: f64) -> Result<()> {
        let height_in = positive("height_in", height_in)
            .inspect_err(|e| observability::record_rejection("set_height_in", e))?;
        self.commit("set_height_in", Self { height_in, ..self.clone() })?;
        tracing::debug!(mode = %self.mode, height_in, "person height updated");
        Ok(())
    }

    pub fn set_age_years(&mut self, age_years: f64) -> Result<()> {
        let age_years = positive("age_years", age_years)
            .inspect_err(|e| observability::record_rejection("set_age_years", e))?;
        self.commit("set_age_years", Self { age_years, ..self.clone() })?;
        tracing::debug!(mode = %self.mode, age_years, "person age updated");
        Ok(())
    }

    /// Replace `self` with `candidate` if its BMR is positive. Calorie
    /// estimates are never negative.
    fn commit(&mut self, setter: &'static str, candidate: Self) -> Result<()> {
        let bmr = candidate.basal_metabolic_rate();
        if !(bmr.is_finite() && bmr > 0.0) {
            let err = CommuteError::InvalidArgument(format!(
                "{setter}: weight {}, height {}, age {} give a basal metabolic rate of {bmr:.1}",
                candidate.weight_lbs, candidate.height_in, candidate.age_years
            ));
            observability::record_rejection(setter, &err);
            return Err(err);
        }
        *self = candidate;
        Ok(())
    }

    pub fn set_activity_level(&mut self, level: ActivityLevel) {
        self.activity_level = level;
        tracing::debug!(mode = %self.mode, ?level, "activity level updated");
    }

    /// Parse and apply an activity level label; unknown labels are rejected
    /// and leave the profile untouched.
    pub fn set_activity_level_str(&mut self, label: &str) -> Result<()> {
        let level = label
            .parse::<ActivityLevel>()
            .inspect_err(|e| observability::record_rejection("set_activity_level", e))?;
        self.set_activity_level(level);
        Ok(())
    }

    /// Harris-Benedict basal metabolic rate in calories per day.
    pub fn basal_metabolic_rate(&self) -> f64 {
        match self.sex {
            Sex::Male => {
                66.0 + 6.23 * self.weight_lbs + 12.7 * self.height_in - 6.76 * self.age_years
            }
            Sex::Female => {
                655.1 + 4.35 * self.weight_lbs + 4.7 * self.height_in - 4.7 * self.age_years
            }
        }
    }

    /// Calories burned per hour while using the owning mode.
    pub fn calorie_burn_rate(&self) -> f64 {
        self.activity_level.multiplier() * self.basal_metabolic_rate() / 24.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn default_activity_level_follows_mode() {
        assert_eq!(PersonProfile::new(Mode::Drive).activity_level(), ActivityLevel::None);
        assert_eq!(PersonProfile::new(Mode::Bike).activity_level(), ActivityLevel::Moderate);
        assert_eq!(PersonProfile::new(Mode::Walk).activity_level(), ActivityLevel::Light);
    }

    #[test]
    fn male_bmr_matches_harris_benedict() {
        let p = PersonProfile::new(Mode::Drive);
        let expected = 66.0 + 6.23 * 195.5 + 12.7 * 69.3 - 6.76 * 21.0;
        assert!(close(p.basal_metabolic_rate(), expected));
        assert!(close(p.calorie_burn_rate(), 1.2 * expected / 24.0));
    }

    #[test]
    fn female_bmr_uses_female_formula() {
        let mut p = PersonProfile::new(Mode::Walk);
        p.set_sex(Sex::Female, true).unwrap();
        let expected = 655.1 + 4.35 * 162.9 + 4.7 * 63.8 - 4.7 * 21.0;
        assert!(close(p.basal_metabolic_rate(), expected));
        assert!(close(p.calorie_burn_rate(), 1.375 * expected / 24.0));
    }

    #[test]
    fn set_sex_without_defaults_keeps_body_measurements() {
        let mut p = PersonProfile::new(Mode::Bike);
        p.set_sex(Sex::Female, false).unwrap();
        assert_eq!(p.sex(), Sex::Female);
        assert_eq!(p.weight_lbs(), 195.5);
        assert_eq!(p.height_in(), 69.3);
    }

    #[test]
    fn activity_override_survives_until_reset() {
        let mut p = PersonProfile::new(Mode::Bike);
        p.set_activity_level(ActivityLevel::Heavy);
        assert_eq!(p.activity_level(), ActivityLevel::Heavy);
        p.reset();
        assert_eq!(p.activity_level(), ActivityLevel::Moderate);
    }

    #[test]
    fn unknown_activity_label_is_rejected_without_mutation() {
        let mut p = PersonProfile::new(Mode::Walk);
        assert!(p.set_activity_level_str("extreme").is_err());
        assert_eq!(p.activity_level(), ActivityLevel::Light);
        p.set_activity_level_str("no").expect("legacy label");
        assert_eq!(p.activity_level(), ActivityLevel::None);
    }

    #[test]
    fn invalid_measurements_are_rejected() {
        let mut p = PersonProfile::new(Mode::Drive);
        assert!(p.set_weight_lbs(0.0).is_err());
        assert!(p.set_height_in(-1.0).is_err());
        assert!(p.set_age_years(f64::NAN).is_err());
        assert_eq!(p, PersonProfile::new(Mode::Drive));
    }

    #[test]
    fn measurements_giving_negative_bmr_are_rejected() {
        let mut p = PersonProfile::new(Mode::Walk);
        assert!(p.set_age_years(400.0).is_err());
        assert_eq!(p, PersonProfile::new(Mode::Walk));

        // male formula gives 66 + 311.5 + 635 - 1014 < 0
        p.set_weight_lbs(50.0).unwrap();
        p.set_height_in(50.0).unwrap();
        assert!(p.set_age_years(150.0).is_err());
        assert_eq!(p.age_years(), 21.0);

        // female formula gives 655.1 + 217.5 + 235 - 705 > 0
        p.set_sex(Sex::Female, true).unwrap();
        p.set_weight_lbs(50.0).unwrap();
        p.set_height_in(50.0).unwrap();
        p.set_age_years(150.0).unwrap();
        let before = p.clone();
        assert!(p.set_sex(Sex::Male, false).is_err());
        assert_eq!(p, before);
        assert!(p.calorie_burn_rate() > 0.0);
    }

    #[test]
    fn sex_parses_short_and_long_labels() {
        assert_eq!("M".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("female".parse::<Sex>().unwrap(), Sex::Female);
        assert!("x".parse::<Sex>().is_err());
    }
}
