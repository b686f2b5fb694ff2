//! Synthetic flight and hotel catalogs.
//!
//! Pure, deterministic stand-ins for real booking integrations. The tool
//! signatures and record shapes are the contract; any real integration
//! replaces the bodies while keeping both.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{city_arg, Tool};

/// A single synthetic flight option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOption {
    pub airline: String,
    #[serde(rename = "from")]
    pub origin: String,
    pub to: String,
    pub stops: u32,
    pub duration_hours: u32,
    pub price_usd: u32,
    pub notes: String,
}

/// A single synthetic hotel option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOption {
    pub name: String,
    pub stars: u32,
    pub price_per_night_usd: u32,
    pub location: String,
    pub notes: String,
}

/// Return example flight options for the given destination city.
pub fn list_flights(city: &str) -> Vec<FlightOption> {
    vec![
        FlightOption {
            airline: "Example Air".to_string(),
            origin: "Your Home City".to_string(),
            to: city.to_string(),
            stops: 0,
            duration_hours: 7,
            price_usd: 650,
            notes: "Morning non-stop flight with a meal included.".to_string(),
        },
        FlightOption {
            airline: "Sample Airlines".to_string(),
            origin: "Your Home City".to_string(),
            to: city.to_string(),
            stops: 1,
            duration_hours: 10,
            price_usd: 520,
            notes: "One layover, budget-friendly option.".to_string(),
        },
        FlightOption {
            airline: "Budget Wings".to_string(),
            origin: "Your Home City".to_string(),
            to: city.to_string(),
            stops: 2,
            duration_hours: 13,
            price_usd: 430,
            notes: "Ultra-budget with basic amenities.".to_string(),
        },
    ]
}

/// Return example hotel options for the given destination city.
pub fn list_hotels(city: &str) -> Vec<HotelOption> {
    vec![
        HotelOption {
            name: format!("{} Central Comfort Hotel", city),
            stars: 3,
            price_per_night_usd: 90,
            location: "Central area, good public transport".to_string(),
            notes: "Great value, basic but clean rooms.".to_string(),
        },
        HotelOption {
            name: format!("{} Riverside Boutique", city),
            stars: 4,
            price_per_night_usd: 150,
            location: "Scenic neighborhood near main attractions".to_string(),
            notes: "Stylish boutique hotel with breakfast included.".to_string(),
        },
        HotelOption {
            name: format!("Luxury Grand {}", city),
            stars: 5,
            price_per_night_usd: 260,
            location: "Premium district".to_string(),
            notes: "High-end amenities, spa, and concierge services.".to_string(),
        },
    ]
}

/// Flight catalog tool exposed to the agent.
pub struct FlightOptions;

#[async_trait]
impl Tool for FlightOptions {
    fn name(&self) -> &str {
        "list_flights"
    }

    fn description(&self) -> &str {
        "List example flight options to a destination city, with airline, stops, duration, and price."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "The destination city name"
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let city = city_arg(&args)?;
        Ok(serde_json::to_string_pretty(&list_flights(city))?)
    }
}

/// Hotel catalog tool exposed to the agent.
pub struct HotelOptions;

#[async_trait]
impl Tool for HotelOptions {
    fn name(&self) -> &str {
        "list_hotels"
    }

    fn description(&self) -> &str {
        "List example hotel options in a destination city, with star rating, nightly price, and location."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "The destination city name"
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let city = city_arg(&args)?;
        Ok(serde_json::to_string_pretty(&list_hotels(city))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flights_are_fixed_length_and_reference_city() {
        let flights = list_flights("Paris");
        assert_eq!(flights.len(), 3);
        assert!(flights.iter().all(|f| f.to == "Paris"));
        assert!(flights.iter().all(|f| f.price_usd > 0));
    }

    #[test]
    fn test_hotels_are_fixed_length_and_reference_city() {
        let hotels = list_hotels("Paris");
        assert_eq!(hotels.len(), 3);
        assert!(hotels.iter().all(|h| h.name.contains("Paris")));
        assert!(hotels.iter().all(|h| (1..=5).contains(&h.stars)));
    }

    #[test]
    fn test_catalogs_are_deterministic() {
        assert_eq!(list_flights("Tokyo"), list_flights("Tokyo"));
        assert_eq!(list_hotels("Tokyo"), list_hotels("Tokyo"));
    }

    #[test]
    fn test_flight_record_uses_from_key_on_the_wire() {
        let value = serde_json::to_value(&list_flights("Oslo")[0]).unwrap();
        assert_eq!(value["from"], "Your Home City");
        assert!(value.get("origin").is_none());
    }

    #[tokio::test]
    async fn test_tools_echo_city_into_output() {
        let flights = FlightOptions.execute(json!({"city": "Paris"})).await.unwrap();
        assert!(flights.contains("Paris"));

        let hotels = HotelOptions.execute(json!({"city": "Paris"})).await.unwrap();
        assert!(hotels.contains("Paris Central Comfort Hotel"));
    }

    #[tokio::test]
    async fn test_tools_reject_missing_city() {
        assert!(FlightOptions.execute(json!({})).await.is_err());
        assert!(HotelOptions.execute(json!({"city": ""})).await.is_err());
    }
}
