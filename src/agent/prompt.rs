//! System and user prompt templates for the planning agent.

use crate::tools::ToolRegistry;

/// Build the system prompt with tool definitions and the output schema.
pub fn build_system_prompt(tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an AI Trip Planner that creates clear, friendly itineraries.

## Tools Available

{tool_descriptions}

Always use the tools to gather weather, flight, and hotel information before answering.

## Response Format

After using tools as needed, your FINAL answer must be a single valid JSON object.
Do NOT wrap it in markdown or backticks, and do NOT add any prose around it.
The JSON must have exactly these top-level keys:

1. cultural_significance (string): one paragraph about the cultural and historical importance of the city.
2. weather (string or object): concise description of the current weather and short forecast, based primarily on tool output.
3. best_time_to_visit (string): suggested best dates or seasons for travel, with a brief justification.
4. flights (array of objects): each with keys airline, from, to, stops, duration_hours, price_usd, notes. Use the flight tool's records.
5. hotels (array of objects): each with keys name, stars, price_per_night_usd, location, notes. Use the hotel tool's records.
6. itinerary (array of objects): a day-wise itinerary where each item has:
   - day (integer day number starting at 1)
   - title (short string)
   - description (1-3 sentence description of activities for that day)

## JSON Rules

- Use only double quotes (") for JSON strings.
- Do NOT include comments.
- Integer fields must be plain integers, not floats.
- Ensure the JSON is syntactically valid so it can be parsed directly."#,
        tool_descriptions = tool_descriptions
    )
}

/// Build the natural-language user request for one submission.
pub fn build_user_request(city: &str, days: u32) -> String {
    format!(
        "Plan a {days}-day trip to {city}. Use tools to get real-time weather (if available) \
         and example flight and hotel options. Then follow the Response Format specified in \
         the system message and return only the JSON object.",
        days = days,
        city = city
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_system_prompt_names_all_tools_and_keys() {
        let config = Config::new(None, "test/model".to_string());
        let prompt = build_system_prompt(&ToolRegistry::new(&config));

        for tool in ["get_current_weather", "list_flights", "list_hotels"] {
            assert!(prompt.contains(tool), "missing tool {}", tool);
        }

        for key in [
            "cultural_significance",
            "weather",
            "best_time_to_visit",
            "flights",
            "hotels",
            "itinerary",
        ] {
            assert!(prompt.contains(key), "missing schema key {}", key);
        }
    }

    #[test]
    fn test_user_request_includes_city_and_days() {
        let request = build_user_request("Paris", 3);
        assert!(request.contains("3-day trip to Paris"));
        assert!(request.contains("only the JSON object"));
    }
}
