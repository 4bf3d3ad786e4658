use rmcp::model::{GetPromptResult, PromptMessage, PromptMessageRole};

pub fn compare_commute_prompt(distance_miles: f64, trip_count: f64) -> GetPromptResult {
    GetPromptResult::new(vec![PromptMessage::new_text(
        PromptMessageRole::User,
        format!(
            "Compare driving, biking and walking for {} trips of {} miles each.\n\nInclude:\n1. Total time per mode (hours, and in audiobooks for perspective)\n2. Total cost per mode (dollars, and in coffees)\n3. Calories burned per mode\n4. CO2 avoided by not driving (pounds and trees planted)\n5. A short recommendation\n\nUse get_settings to see the current vehicle, spend and person settings, then call compute with distance_miles={} and trip_count={}. Use get_chart if alternative units are easier to read.",
            trip_count, distance_miles, distance_miles, trip_count
        ),
    )])
    .with_description(format!(
        "Compare driving, cycling and walking for {} trips of {} miles",
        trip_count, distance_miles
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_mentions_inputs() {
        let p = compare_commute_prompt(4.0, 10.0);
        assert!(p.description.unwrap_or_default().contains("10 trips of 4 miles"));
        assert_eq!(p.messages.len(), 1);
    }
}
