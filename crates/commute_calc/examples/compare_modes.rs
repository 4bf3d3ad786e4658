use commute_calc::{CalculationEngine, Config, CostUnit, TimeUnit};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Session comes from COMMUTE_CALC_DISTANCE_MILES / COMMUTE_CALC_TRIPS / COMMUTE_CALC_SEX
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let engine = CalculationEngine::from_config(&cfg)?;
    let results = engine.results();

    println!(
        "{} trips of {} miles",
        results.trip_count, results.distance_miles
    );
    let minutes = results.time(TimeUnit::Minutes);
    let dollars = results.cost(CostUnit::Dollars);
    for (mode, mins) in minutes.iter() {
        println!(
            "{:<6} {:>8.1} min  ${:>7.2}  {:>7.0} cal",
            mode.label(),
            mins,
            dollars[mode],
            results.calories_total[mode]
        );
    }
    println!(
        "Not driving saves {:.1} lb CO2 ({:.3} trees)",
        results.co2_pounds_driving, results.co2_trees_equivalent
    );
    Ok(())
}
