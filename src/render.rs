//! Response rendering: plan result to display sections, and HTML assembly.
//!
//! The mapping rule is pure and tested in isolation; the HTML functions wrap
//! it for the form UI. A failed parse never discards information: the raw
//! model text is always carried into the view.

use serde::Serialize;

use crate::agent::PlanResult;
use crate::api::types::PlanOutcome;
use crate::plan::TripPlan;

/// One labeled display section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub body: String,
}

/// Display-ready form of one planning run.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedView {
    /// Terminal state of the request
    pub outcome: PlanOutcome,

    /// The six plan sections, in fixed order; empty unless `outcome`
    /// is `rendered`
    pub sections: Vec<Section>,

    /// Failure notice shown instead of sections
    pub notice: Option<String>,

    /// Verbatim raw model output, kept for debugging on failure
    pub raw_debug: Option<String>,

    /// Formatted transcript lines for the debug panel
    pub transcript: Vec<String>,
}

/// Map a plan result to its display form.
///
/// All six sections are produced in fixed order when the plan validated;
/// otherwise a failure notice plus the verbatim raw text.
pub fn render(result: &PlanResult) -> RenderedView {
    let transcript = result
        .transcript
        .iter()
        .map(|e| format!("{} [{:?}] {}", e.timestamp, e.entry_type, e.content))
        .collect();

    match &result.parsed {
        Some(plan) => RenderedView {
            outcome: PlanOutcome::Rendered,
            sections: plan_sections(plan),
            notice: None,
            raw_debug: None,
            transcript,
        },
        None => RenderedView {
            outcome: PlanOutcome::ParseFailed,
            sections: Vec::new(),
            notice: Some(format!(
                "The AI's answer could not be parsed as a trip plan ({}). The raw output is shown below.",
                result
                    .parse_error
                    .as_deref()
                    .unwrap_or("unknown parse error")
            )),
            raw_debug: Some(result.raw_text.clone()),
            transcript,
        },
    }
}

/// The six sections, in the fixed display order.
fn plan_sections(plan: &TripPlan) -> Vec<Section> {
    vec![
        Section {
            title: "Cultural significance".to_string(),
            body: plan.cultural_significance.clone(),
        },
        Section {
            title: "Weather".to_string(),
            body: weather_body(&plan.weather),
        },
        Section {
            title: "Best time to visit".to_string(),
            body: plan.best_time_to_visit.clone(),
        },
        Section {
            title: "Flights".to_string(),
            body: plan
                .flights
                .iter()
                .map(|f| {
                    format!(
                        "{}: {} to {}, {} stop(s), {}h, ${} - {}",
                        f.airline, f.origin, f.to, f.stops, f.duration_hours, f.price_usd, f.notes
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        },
        Section {
            title: "Hotels".to_string(),
            body: plan
                .hotels
                .iter()
                .map(|h| {
                    format!(
                        "{} ({} stars): ${}/night, {} - {}",
                        h.name, h.stars, h.price_per_night_usd, h.location, h.notes
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        },
        Section {
            title: "Itinerary".to_string(),
            body: plan
                .itinerary
                .iter()
                .map(|d| format!("Day {}: {} - {}", d.day, d.title, d.description))
                .collect::<Vec<_>>()
                .join("\n"),
        },
    ]
}

/// Render the weather plan field, which may be prose or a structured snapshot.
fn weather_body(weather: &serde_json::Value) -> String {
    match weather.as_str() {
        Some(text) => text.to_string(),
        None => serde_json::to_string_pretty(weather).unwrap_or_else(|_| weather.to_string()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML assembly
// ─────────────────────────────────────────────────────────────────────────────

/// Credential state surfaced as page banners.
#[derive(Debug, Clone, Copy)]
pub struct PageContext {
    pub model_configured: bool,
    pub weather_configured: bool,
}

/// Escape text for inclusion in HTML.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// The landing page: the trip form plus any credential warnings.
pub fn index_page(ctx: PageContext) -> String {
    page(&format!("{}{}", banners(ctx), form_html("", 5)))
}

/// A full result page: form, banners, then the rendered view.
pub fn result_page(ctx: PageContext, city: &str, days: u32, view: &RenderedView) -> String {
    let mut body = String::new();
    body.push_str(&banners(ctx));
    body.push_str(&form_html(city, days));

    match view.outcome {
        PlanOutcome::Rendered => {
            body.push_str("<p class=\"ok\">Your trip plan is ready!</p>\n");
            for (i, section) in view.sections.iter().enumerate() {
                body.push_str(&format!(
                    "<section><h2>{}. {}</h2><pre>{}</pre></section>\n",
                    i + 1,
                    escape_html(&section.title),
                    escape_html(&section.body)
                ));
            }
        }
        _ => {
            if let Some(notice) = &view.notice {
                body.push_str(&format!(
                    "<p class=\"error\">{}</p>\n",
                    escape_html(notice)
                ));
            }
            if let Some(raw) = &view.raw_debug {
                body.push_str(&format!(
                    "<details><summary>Raw AI output (for debugging)</summary><pre>{}</pre></details>\n",
                    escape_html(raw)
                ));
            }
        }
    }

    if !view.transcript.is_empty() {
        body.push_str("<details><summary>Agent transcript</summary><pre>");
        for line in &view.transcript {
            body.push_str(&escape_html(line));
            body.push('\n');
        }
        body.push_str("</pre></details>\n");
    }

    page(&body)
}

/// A page showing a blocking error above the form.
pub fn error_page(ctx: PageContext, message: &str) -> String {
    page(&format!(
        "{}<p class=\"error\">{}</p>\n{}",
        banners(ctx),
        escape_html(message),
        form_html("", 5)
    ))
}

fn banners(ctx: PageContext) -> String {
    let mut out = String::new();
    if !ctx.model_configured {
        out.push_str(
            "<p class=\"error\">OPENROUTER_API_KEY is missing. Add it to your .env file and \
             restart the server; trip planning is disabled until then.</p>\n",
        );
    }
    if !ctx.weather_configured {
        out.push_str(
            "<p class=\"warn\">OPENWEATHER_API_KEY is not set. The planner still works, but \
             real-time weather falls back to a generic description.</p>\n",
        );
    }
    out
}

fn form_html(city: &str, days: u32) -> String {
    format!(
        r#"<form method="post" action="/">
  <label>Destination city
    <input type="text" name="city" value="{city}" placeholder="e.g., Paris" required>
  </label>
  <label>Number of days
    <input type="number" name="days" value="{days}" min="1" max="30" required>
  </label>
  <button type="submit">Plan my trip</button>
</form>
"#,
        city = escape_html(city),
        days = days
    )
}

fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AI Trip Planner</title>
<style>
  body {{ font-family: sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; }}
  pre {{ white-space: pre-wrap; background: #f6f6f6; padding: 0.75rem; }}
  .error {{ color: #a40000; }}
  .warn {{ color: #8a6d00; }}
  .ok {{ color: #006400; }}
  label {{ display: block; margin: 0.5rem 0; }}
</style>
</head>
<body>
<h1>AI Trip Planner</h1>
<p>Enter a city and how many days you want to stay; the planner suggests flights, hotels, and a day-by-day itinerary.</p>
{body}
</body>
</html>
"#,
        body = body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{EntryType, TranscriptEntry};
    use serde_json::json;
    use uuid::Uuid;

    fn rendered_result() -> PlanResult {
        let plan = crate::plan::parse_trip_plan(
            &json!({
                "cultural_significance": "Paris has shaped European art for centuries.",
                "weather": "Clear, 18°C, staying clear overnight.",
                "best_time_to_visit": "Late spring.",
                "flights": [{
                    "airline": "Example Air",
                    "from": "Your Home City",
                    "to": "Paris",
                    "stops": 0,
                    "duration_hours": 7,
                    "price_usd": 650,
                    "notes": "Non-stop."
                }],
                "hotels": [{
                    "name": "Paris Central Comfort Hotel",
                    "stars": 3,
                    "price_per_night_usd": 90,
                    "location": "Central area",
                    "notes": "Clean rooms."
                }],
                "itinerary": [
                    {"day": 1, "title": "Arrival", "description": "Walk the Seine."},
                    {"day": 2, "title": "Museums", "description": "Louvre day."},
                    {"day": 3, "title": "Montmartre", "description": "Sacre-Coeur."}
                ]
            })
            .to_string(),
        )
        .unwrap();

        PlanResult {
            id: Uuid::new_v4(),
            raw_text: String::new(),
            parsed: Some(plan),
            parse_error: None,
            transcript: vec![TranscriptEntry {
                timestamp: "2026-01-01T00:00:00Z".to_string(),
                entry_type: EntryType::ToolCall,
                content: "Calling tool: list_flights".to_string(),
            }],
        }
    }

    fn failed_result(raw: &str) -> PlanResult {
        PlanResult {
            id: Uuid::new_v4(),
            raw_text: raw.to_string(),
            parsed: None,
            parse_error: Some("missing field `weather`".to_string()),
            transcript: Vec::new(),
        }
    }

    #[test]
    fn test_valid_plan_renders_six_sections_in_order() {
        let view = render(&rendered_result());

        assert_eq!(view.outcome, PlanOutcome::Rendered);
        let titles: Vec<&str> = view.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Cultural significance",
                "Weather",
                "Best time to visit",
                "Flights",
                "Hotels",
                "Itinerary"
            ]
        );
        assert!(view.notice.is_none());
        assert!(view.raw_debug.is_none());
    }

    #[test]
    fn test_sections_carry_tool_data() {
        let view = render(&rendered_result());

        // Weather section reflects the live reading
        assert!(view.sections[1].body.contains("18"));
        assert!(view.sections[1].body.contains("lear"));

        // Flights and hotels reference the destination
        assert!(view.sections[3].body.contains("Paris"));
        assert!(view.sections[4].body.contains("Paris"));

        // Itinerary lists each day
        assert!(view.sections[5].body.contains("Day 3"));
    }

    #[test]
    fn test_parse_failure_preserves_raw_text_verbatim() {
        let raw = "I could not produce JSON today <sorry>";
        let view = render(&failed_result(raw));

        assert_eq!(view.outcome, PlanOutcome::ParseFailed);
        assert!(view.sections.is_empty());
        assert!(view.notice.as_ref().unwrap().contains("missing field"));
        assert_eq!(view.raw_debug.as_deref(), Some(raw));
    }

    #[test]
    fn test_structured_weather_value_renders_as_text() {
        let mut result = rendered_result();
        result.parsed.as_mut().unwrap().weather = json!({"temperature_c": 18.0, "conditions": "clear"});

        let view = render(&result);
        assert!(view.sections[1].body.contains("18"));
        assert!(view.sections[1].body.contains("clear"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"A&B"</b>"#),
            "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_result_page_puts_raw_output_in_collapsible_panel() {
        let ctx = PageContext {
            model_configured: true,
            weather_configured: true,
        };
        let view = render(&failed_result("not json <at all>"));
        let html = result_page(ctx, "Paris", 3, &view);

        assert!(html.contains("<details>"));
        assert!(html.contains("not json &lt;at all&gt;"));
    }

    #[test]
    fn test_index_page_shows_credential_banners() {
        let html = index_page(PageContext {
            model_configured: false,
            weather_configured: false,
        });

        assert!(html.contains("OPENROUTER_API_KEY is missing"));
        assert!(html.contains("OPENWEATHER_API_KEY is not set"));
    }
}
