//! Route definitions and request handlers.
//!
//! One submission is one agent run, executed synchronously within the
//! request. Request-level failures are answered in-band; they never take
//! the process down.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::agent::{Agent, PlanResult};
use crate::config::Config;
use crate::render::{self, PageContext};

use super::error::PlanError;
use super::types::{
    HealthResponse, PlanOutcome, PlanTripRequest, PlanTripResponse,
};

/// Maximum accepted trip length, matching the form widget's bounds.
const MAX_DAYS: u32 = 30;

/// Shared application state: read-only configuration plus the agent.
///
/// The agent exists only when the model credential was present at startup;
/// without it, every planning request is answered with a configuration
/// error and no outbound call is made.
pub struct AppState {
    pub config: Config,
    pub agent: Option<Agent>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let agent = config
            .api_key
            .clone()
            .map(|key| Agent::new(config.clone(), key));

        Self { config, agent }
    }

    fn page_context(&self) -> PageContext {
        PageContext {
            model_configured: self.agent.is_some(),
            weather_configured: self.config.weather_api_key.is_some(),
        }
    }
}

/// Build the application router.
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index).post(plan_form))
        .route("/api/plan", post(plan_api))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, routes(state)).await?;

    Ok(())
}

/// GET / - the trip form.
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render::index_page(state.page_context()))
}

/// POST / - form submission, answered as a full rendered page.
async fn plan_form(
    State(state): State<Arc<AppState>>,
    Form(request): Form<PlanTripRequest>,
) -> Html<String> {
    let ctx = state.page_context();
    let city = request.city.trim().to_string();

    match run_plan(&state, &request).await {
        Ok(result) => {
            let view = render::render(&result);
            Html(render::result_page(ctx, &city, request.days, &view))
        }
        Err(e) => Html(render::error_page(ctx, &e.user_message())),
    }
}

/// POST /api/plan - JSON submission.
async fn plan_api(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanTripRequest>,
) -> Result<Json<PlanTripResponse>, PlanError> {
    let result = run_plan(&state, &request).await?;

    let outcome = if result.parsed.is_some() {
        PlanOutcome::Rendered
    } else {
        PlanOutcome::ParseFailed
    };

    Ok(Json(PlanTripResponse {
        id: result.id,
        outcome,
        plan: result.parsed,
        raw_text: result.raw_text,
        parse_error: result.parse_error,
        transcript: result.transcript,
    }))
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Validate the submission and run the agent once.
async fn run_plan(state: &AppState, request: &PlanTripRequest) -> Result<PlanResult, PlanError> {
    let city = request.city.trim();
    if city.is_empty() {
        return Err(PlanError::InvalidRequest(
            "Please enter a destination city.".to_string(),
        ));
    }
    if request.days == 0 || request.days > MAX_DAYS {
        return Err(PlanError::InvalidRequest(format!(
            "Number of days must be between 1 and {}.",
            MAX_DAYS
        )));
    }

    let agent = state.agent.as_ref().ok_or(PlanError::ConfigurationMissing)?;

    info!("Planning {}-day trip to {}", request.days, city);

    agent.plan_trip(city, request.days).await.map_err(|e| {
        tracing::error!("Agent execution failed: {:#}", e);
        PlanError::Agent(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_without_credential() -> AppState {
        AppState::new(Config::new(None, "test/model".to_string()))
    }

    #[tokio::test]
    async fn test_missing_credential_blocks_before_any_call() {
        let state = state_without_credential();
        assert!(state.agent.is_none());

        let request = PlanTripRequest {
            city: "Paris".to_string(),
            days: 3,
        };

        match run_plan(&state, &request).await {
            Err(PlanError::ConfigurationMissing) => {}
            other => panic!("expected ConfigurationMissing, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_empty_city_is_rejected_first() {
        let state = state_without_credential();
        let request = PlanTripRequest {
            city: "   ".to_string(),
            days: 3,
        };

        match run_plan(&state, &request).await {
            Err(PlanError::InvalidRequest(message)) => {
                assert!(message.contains("destination city"));
            }
            other => panic!("expected InvalidRequest, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_day_bounds_are_enforced() {
        let state = state_without_credential();

        for days in [0u32, 31] {
            let request = PlanTripRequest {
                city: "Paris".to_string(),
                days,
            };
            assert!(matches!(
                run_plan(&state, &request).await,
                Err(PlanError::InvalidRequest(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_health_reports_version() {
        let Json(response) = health().await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }
}
