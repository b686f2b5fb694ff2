//! The trip plan output contract.
//!
//! The agent's final answer must be a single JSON object with exactly six
//! required keys. Conformance is enforced here by parsing, not by trusting
//! the prompt: a missing key or malformed JSON is a parse failure, never a
//! partially rendered plan.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tools::{FlightOption, HotelOption};

/// One day of the generated itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    /// Day number, starting at 1
    pub day: u32,

    /// Short title for the day
    pub title: String,

    /// Description of activities for that day
    pub description: String,
}

/// The agent's structured answer: six required sections.
///
/// `itinerary` should have one entry per requested day, but that is not
/// enforced; the model is told the day count and normally complies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    /// One paragraph about the cultural and historical importance of the city
    pub cultural_significance: String,

    /// Current weather and short forecast; either prose or the weather
    /// tool's structured snapshot
    pub weather: Value,

    /// Suggested best dates or seasons for travel
    pub best_time_to_visit: String,

    /// Example flight options
    pub flights: Vec<FlightOption>,

    /// Example hotel options
    pub hotels: Vec<HotelOption>,

    /// Day-wise itinerary
    pub itinerary: Vec<ItineraryDay>,
}

/// Parse and validate the agent's final text against [`TripPlan`].
///
/// Models wrap JSON in markdown fences often enough that a single enclosing
/// fence is stripped before parsing; anything else must be valid JSON with
/// all six keys present.
pub fn parse_trip_plan(raw: &str) -> Result<TripPlan, String> {
    let cleaned = strip_code_fence(raw.trim());
    serde_json::from_str(cleaned).map_err(|e| e.to_string())
}

/// Strip one enclosing markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the info string ("json") on the opening fence line.
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => return text,
    };

    match body.rsplit_once("```") {
        Some((inner, trailer)) if trailer.trim().is_empty() => inner.trim(),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_plan_json() -> Value {
        json!({
            "cultural_significance": "Paris has shaped European art and politics for centuries.",
            "weather": "Mild and clear, around 18°C.",
            "best_time_to_visit": "Late spring, before the summer crowds.",
            "flights": [{
                "airline": "Example Air",
                "from": "Your Home City",
                "to": "Paris",
                "stops": 0,
                "duration_hours": 7,
                "price_usd": 650,
                "notes": "Morning non-stop flight with a meal included."
            }],
            "hotels": [{
                "name": "Paris Central Comfort Hotel",
                "stars": 3,
                "price_per_night_usd": 90,
                "location": "Central area, good public transport",
                "notes": "Great value, basic but clean rooms."
            }],
            "itinerary": [
                {"day": 1, "title": "Arrival", "description": "Settle in and walk the Seine."},
                {"day": 2, "title": "Museums", "description": "Louvre in the morning, Orsay after lunch."},
                {"day": 3, "title": "Montmartre", "description": "Sacre-Coeur and the artists' square."}
            ]
        })
    }

    #[test]
    fn test_parse_valid_plan() {
        let raw = full_plan_json().to_string();
        let plan = parse_trip_plan(&raw).unwrap();

        assert_eq!(plan.flights.len(), 1);
        assert_eq!(plan.hotels[0].stars, 3);
        assert_eq!(plan.itinerary.len(), 3);
        assert_eq!(plan.itinerary[2].day, 3);
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        let mut value = full_plan_json();
        value.as_object_mut().unwrap().remove("best_time_to_visit");

        let err = parse_trip_plan(&value.to_string()).unwrap_err();
        assert!(err.contains("best_time_to_visit"));
    }

    #[test]
    fn test_parse_accepts_structured_weather() {
        let mut value = full_plan_json();
        value["weather"] = json!({
            "city": "Paris",
            "temperature_c": 18.0,
            "conditions": "clear"
        });

        let plan = parse_trip_plan(&value.to_string()).unwrap();
        assert_eq!(plan.weather["temperature_c"], 18.0);
    }

    #[test]
    fn test_parse_strips_markdown_fence() {
        let raw = format!("```json\n{}\n```", full_plan_json());
        assert!(parse_trip_plan(&raw).is_ok());

        let raw = format!("```\n{}\n```\n", full_plan_json());
        assert!(parse_trip_plan(&raw).is_ok());
    }

    #[test]
    fn test_parse_rejects_prose() {
        assert!(parse_trip_plan("Here is your trip plan! Enjoy Paris.").is_err());
        assert!(parse_trip_plan("").is_err());
    }

    #[test]
    fn test_itinerary_length_is_not_enforced() {
        let mut value = full_plan_json();
        value["itinerary"] = json!([
            {"day": 1, "title": "Only day", "description": "Short trip."}
        ]);

        let plan = parse_trip_plan(&value.to_string()).unwrap();
        assert_eq!(plan.itinerary.len(), 1);
    }
}
