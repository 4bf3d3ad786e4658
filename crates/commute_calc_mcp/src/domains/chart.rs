use commute_calc::{CalorieUnit, Co2Unit, CostUnit, Mode, Results, TimeUnit};

use crate::types::{ChartParams, ChartResult, ChartSeries, Co2Panel};

pub fn time_label(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Hours => "Time (Hours)",
        TimeUnit::Minutes => "Time (Minutes)",
        TimeUnit::Audiobooks => "Time (Audiobooks)",
    }
}

pub fn cost_label(unit: CostUnit) -> &'static str {
    match unit {
        CostUnit::Dollars => "Cost ($)",
        CostUnit::Coffees => "Cost (Coffees)",
    }
}

pub fn calorie_label(unit: CalorieUnit) -> &'static str {
    match unit {
        CalorieUnit::Total => "Calories (total)",
        CalorieUnit::PerHour => "Calories (/hour)",
    }
}

pub fn co2_message(unit: Co2Unit) -> &'static str {
    match unit {
        Co2Unit::Pounds => "Pounds of CO2 not emitted",
        Co2Unit::Trees => "Trees planted!",
    }
}

/// Select one series per chart from `results` according to the requested
/// units (defaults: hours, dollars, total calories, pounds).
pub fn build_chart(results: &Results, params: &ChartParams) -> ChartResult {
    let time_unit = params.time_unit.unwrap_or_default();
    let cost_unit = params.cost_unit.unwrap_or_default();
    let calorie_unit = params.calorie_unit.unwrap_or_default();
    let co2_unit = params.co2_unit.unwrap_or_default();

    ChartResult {
        modes: Mode::ALL.iter().map(|m| m.label().to_string()).collect(),
        time: ChartSeries {
            label: time_label(time_unit).to_string(),
            values: results.time(time_unit),
        },
        cost: ChartSeries {
            label: cost_label(cost_unit).to_string(),
            values: results.cost(cost_unit),
        },
        calories: ChartSeries {
            label: calorie_label(calorie_unit).to_string(),
            values: results.calories(calorie_unit),
        },
        co2: Co2Panel {
            heading: "By not driving...".to_string(),
            value: results.co2(co2_unit),
            message: co2_message(co2_unit).to_string(),
        },
    }
}
