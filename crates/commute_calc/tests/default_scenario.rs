use commute_calc::{CalculationEngine, Mode, Sex, TransportMode};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn defaults_match_reference_values() {
    let engine = CalculationEngine::new();
    let r = engine.compute(1.0, 1.0).expect("compute");

    assert!(close(engine.drive().cost_per_mile(), 0.1730));
    assert!(close(r.cost_usd.drive, 0.1730));
    assert!(close(r.cost_usd.bike, 100.0 / 1500.0));
    assert!(close(r.cost_usd.walk, 37.5 / 1000.0));

    assert!(close(r.time_hours.drive, 1.0 / 29.4));
    assert!(close(r.time_hours.bike, 1.0 / 11.5));
    assert!(close(r.time_hours.walk, 1.0 / 3.25));

    let bmr_male = 66.0 + 6.23 * 195.5 + 12.7 * 69.3 - 6.76 * 21.0;
    assert!(close(r.calories_per_hour.drive, 1.2 * bmr_male / 24.0));
    assert!(close(r.calories_per_hour.bike, 1.55 * bmr_male / 24.0));
    assert!(close(r.calories_per_hour.walk, 1.375 * bmr_male / 24.0));

    assert!(close(r.co2_pounds_driving, 19.6 / 26.2));
    assert!(close(r.co2_trees_equivalent, 19.6 / 26.2 / 911.0));
}

#[test]
fn stored_session_matches_explicit_compute() {
    let mut engine = CalculationEngine::new();
    assert_eq!(engine.results(), engine.compute(1.0, 1.0).unwrap());

    engine.set_distance_miles(7.5).unwrap();
    engine.set_trip_count(10.0).unwrap();
    assert_eq!(engine.results(), engine.compute(7.5, 10.0).unwrap());
}

#[test]
fn switching_to_female_defaults_changes_every_calorie_total() {
    let mut engine = CalculationEngine::new();
    let male = engine.compute(5.0, 2.0).unwrap();

    for mode in Mode::ALL {
        engine.mode_mut(mode).person_mut().set_sex(Sex::Female, true).unwrap();
    }
    let female = engine.compute(5.0, 2.0).unwrap();

    for mode in Mode::ALL {
        assert_ne!(male.calories_total[mode], female.calories_total[mode], "{mode}");
    }
    // time and cost do not depend on the person
    assert_eq!(male.time_hours, female.time_hours);
    assert_eq!(male.cost_usd, female.cost_usd);
}

#[test]
fn set_sex_all_matches_per_mode_updates() {
    let mut a = CalculationEngine::new();
    let mut b = CalculationEngine::new();
    a.set_sex_all(Sex::Female, true).unwrap();
    for mode in Mode::ALL {
        b.mode_mut(mode).person_mut().set_sex(Sex::Female, true).unwrap();
    }
    assert_eq!(a.results(), b.results());
}

#[test]
fn results_serialize_with_per_mode_fields() {
    let r = CalculationEngine::new().results();
    let v = serde_json::to_value(&r).expect("serialize");
    assert!(v["time_hours"]["drive"].is_number());
    assert!(v["cost_coffees"]["walk"].is_number());
    assert!(v["co2_trees_equivalent"].is_number());
}
