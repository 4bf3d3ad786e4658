//! Apply tool parameters to the engine.
//!
//! A tool call may carry several values. They are applied to a staged copy
//! of the engine and committed only if every setter accepts its value, so
//! a rejected call never leaves the session half-updated.

use commute_calc::{CalculationEngine, Mode};

use crate::error::{McpError, McpResult};
use crate::types::{BikeCostsParams, DriveCostsParams, PersonParams, WalkCostsParams};

pub fn stage<F>(engine: &mut CalculationEngine, apply: F) -> McpResult<()>
where
    F: FnOnce(&mut CalculationEngine) -> McpResult<()>,
{
    let mut staged = engine.clone();
    apply(&mut staged)?;
    *engine = staged;
    Ok(())
}

fn nothing_to_update(tool: &str) -> McpError {
    McpError::Validation(format!("{tool}: no fields to update"))
}

pub fn apply_drive_costs(engine: &mut CalculationEngine, p: &DriveCostsParams) -> McpResult<()> {
    let clear = p.clear_overrides.unwrap_or(false);
    if !clear
        && p.gas_price.is_none()
        && p.miles_per_gallon.is_none()
        && p.annual_miles.is_none()
        && p.annual_gas_spend.is_none()
        && p.annual_maintenance_spend.is_none()
        && p.annual_tire_spend.is_none()
    {
        return Err(nothing_to_update("set_drive_costs"));
    }
    stage(engine, |e| {
        let drive = e.drive_mut();
        if clear {
            drive.clear_overrides();
        }
        if let Some(v) = p.annual_miles {
            drive.set_annual_miles(v)?;
        }
        if let Some(v) = p.miles_per_gallon {
            drive.set_miles_per_gallon(v)?;
        }
        if let Some(v) = p.annual_gas_spend {
            drive.set_annual_gas_spend(v)?;
        }
        if let Some(v) = p.gas_price {
            drive.set_gas_price(v)?;
        }
        if let Some(v) = p.annual_maintenance_spend {
            drive.set_annual_maintenance_spend(v)?;
        }
        if let Some(v) = p.annual_tire_spend {
            drive.set_annual_tire_spend(v)?;
        }
        Ok(())
    })
}

pub fn apply_bike_costs(engine: &mut CalculationEngine, p: &BikeCostsParams) -> McpResult<()> {
    if p.annual_spend.is_none() && p.spend_bracket.is_none() && p.annual_miles.is_none() {
        return Err(nothing_to_update("set_bike_costs"));
    }
    stage(engine, |e| {
        let bike = e.bike_mut();
        if let Some(bracket) = p.spend_bracket {
            bike.set_spend_bracket(bracket);
        }
        if let Some(v) = p.annual_spend {
            bike.set_annual_spend(v)?;
        }
        if let Some(v) = p.annual_miles {
            bike.set_annual_miles(v)?;
        }
        Ok(())
    })
}

pub fn apply_walk_costs(engine: &mut CalculationEngine, p: &WalkCostsParams) -> McpResult<()> {
    if p.shoe_cost.is_none() && p.spend_bracket.is_none() && p.shoe_lifetime_miles.is_none() {
        return Err(nothing_to_update("set_walk_costs"));
    }
    stage(engine, |e| {
        let walk = e.walk_mut();
        if let Some(bracket) = p.spend_bracket {
            walk.set_spend_bracket(bracket);
        }
        if let Some(v) = p.shoe_cost {
            walk.set_shoe_cost(v)?;
        }
        if let Some(v) = p.shoe_lifetime_miles {
            walk.set_shoe_lifetime_miles(v)?;
        }
        Ok(())
    })
}

/// Sex is applied first so explicit measurements in the same call win over
/// the sex defaults.
pub fn apply_person(engine: &mut CalculationEngine, p: &PersonParams) -> McpResult<()> {
    if p.sex.is_none()
        && p.weight_lbs.is_none()
        && p.height_in.is_none()
        && p.age_years.is_none()
        && p.activity_level.is_none()
    {
        return Err(nothing_to_update("set_person"));
    }
    let modes: Vec<Mode> = match p.mode {
        Some(mode) => vec![mode],
        None => Mode::ALL.to_vec(),
    };
    stage(engine, |e| {
        for mode in modes {
            let person = e.mode_mut(mode).person_mut();
            if let Some(sex) = p.sex {
                person.set_sex(sex, p.apply_defaults.unwrap_or(true))?;
            }
            if let Some(v) = p.weight_lbs {
                person.set_weight_lbs(v)?;
            }
            if let Some(v) = p.height_in {
                person.set_height_in(v)?;
            }
            if let Some(v) = p.age_years {
                person.set_age_years(v)?;
            }
            if let Some(level) = p.activity_level {
                person.set_activity_level(level);
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use commute_calc::{ActivityLevel, Sex, SpendBracket, TransportMode};

    #[test]
    fn rejected_value_rolls_back_whole_call() {
        let mut engine = CalculationEngine::new();
        let params = DriveCostsParams {
            gas_price: Some(3.5),
            miles_per_gallon: Some(0.0),
            ..Default::default()
        };
        assert!(apply_drive_costs(&mut engine, &params).is_err());
        assert_eq!(engine, CalculationEngine::new());
    }

    #[test]
    fn drive_costs_apply_together() {
        let mut engine = CalculationEngine::new();
        let params = DriveCostsParams {
            gas_price: Some(3.5),
            miles_per_gallon: Some(35.0),
            ..Default::default()
        };
        apply_drive_costs(&mut engine, &params).unwrap();
        assert!((engine.drive().gas_cost_per_mile() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn empty_update_is_a_validation_error() {
        let mut engine = CalculationEngine::new();
        let err = apply_bike_costs(&mut engine, &BikeCostsParams::default()).unwrap_err();
        assert!(matches!(err, McpError::Validation(_)));
    }

    #[test]
    fn walk_bracket_then_explicit_cost() {
        let mut engine = CalculationEngine::new();
        let params = WalkCostsParams {
            spend_bracket: Some(SpendBracket::From100To150),
            shoe_cost: Some(90.0),
            ..Default::default()
        };
        apply_walk_costs(&mut engine, &params).unwrap();
        assert_eq!(engine.walk().shoe_cost(), 90.0);
    }

    #[test]
    fn person_update_targets_one_mode_or_all() {
        let mut engine = CalculationEngine::new();
        let one = PersonParams {
            mode: Some(Mode::Bike),
            activity_level: Some(ActivityLevel::Light),
            ..Default::default()
        };
        apply_person(&mut engine, &one).unwrap();
        assert_eq!(engine.bike().person().activity_level(), ActivityLevel::Light);
        assert_eq!(engine.walk().person().activity_level(), ActivityLevel::Light);
        assert_eq!(engine.drive().person().activity_level(), ActivityLevel::None);

        let all = PersonParams {
            sex: Some(Sex::Female),
            weight_lbs: Some(140.0),
            ..Default::default()
        };
        apply_person(&mut engine, &all).unwrap();
        for mode in Mode::ALL {
            let person = engine.mode(mode).person();
            assert_eq!(person.sex(), Sex::Female);
            assert_eq!(person.weight_lbs(), 140.0);
            assert_eq!(person.height_in(), 63.8);
        }
    }
}
