use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    LocationWeatherResolver, SkyReportError,
    models::{GeoLocation, WeatherReport},
    tools::{ToolCall, ToolDefinition, ToolOutput, WeatherTool, tool_definitions},
};

#[derive(Clone)]
pub struct AppState {
    resolver: LocationWeatherResolver,
    tool: WeatherTool,
}

impl AppState {
    #[must_use]
    pub fn new(resolver: LocationWeatherResolver) -> Self {
        Self {
            tool: WeatherTool::new(resolver.clone()),
            resolver,
        }
    }
}

#[derive(Deserialize)]
pub struct WeatherParams {
    pub location: String,
}

#[derive(Serialize, Deserialize)]
pub struct ApiWeather {
    pub location: GeoLocation,
    pub report: WeatherReport,
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub message: String,
}

/// Resolver failure mapped onto an HTTP status
pub struct ApiError(SkyReportError);

impl From<SkyReportError> for ApiError {
    fn from(err: SkyReportError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SkyReportError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            SkyReportError::LocationNotFound { .. } => StatusCode::NOT_FOUND,
            SkyReportError::ForecastUnavailable { .. } => StatusCode::BAD_GATEWAY,
            SkyReportError::Config { .. } | SkyReportError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ApiErrorBody {
            error: self.0.kind().to_string(),
            message: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/weather", get(get_weather))
        .route("/tools", get(list_tools))
        .route("/tools/invoke", post(invoke_tool))
        .with_state(Arc::new(state))
}

async fn health() -> &'static str {
    "ok"
}

async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<ApiWeather>, ApiError> {
    let report = state.resolver.resolve(&params.location).await?;
    Ok(Json(ApiWeather {
        location: report.location().clone(),
        report: report.weather().clone(),
        text: report.into_text(),
    }))
}

async fn list_tools() -> Json<Vec<ToolDefinition>> {
    Json(tool_definitions())
}

async fn invoke_tool(
    State(state): State<Arc<AppState>>,
    Json(call): Json<ToolCall>,
) -> Json<ToolOutput> {
    Json(state.tool.invoke(call).await)
}
