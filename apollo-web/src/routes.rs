//! API route handlers.
//!
//! Both endpoints take the same JSON body — the uploaded CSV text plus
//! the three forecast parameters — and differ only in output format:
//! `/api/forecast` answers with JSON, `/chart` with the rendered chart
//! document. Any failure maps to a single 500 with the error text.

use apollo_engine::{forecast, ForecastRequest, TimeSeries};
use apollo_viz::{render_forecast_chart, Theme};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ForecastApiRequest {
    /// Raw CSV text of the uploaded file
    pub csv: String,
    /// Number of steps to predict
    pub horizon: usize,
    /// Reservoir size for this request's model
    pub reservoir_dimensionality: usize,
    /// Regularization strength as a power of ten (−10 … −2)
    pub regularization_exponent: i32,
}

#[derive(Debug, Serialize)]
pub struct ForecastApiResponse {
    pub times: Vec<f64>,
    pub names: Vec<String>,
    /// Forecast rows, one inner vector per timestamp
    pub values: Vec<Vec<f64>>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Parse the CSV, build a fresh model, and run the forecast.
fn run_forecast(req: &ForecastApiRequest) -> anyhow::Result<(TimeSeries, TimeSeries)> {
    let series = TimeSeries::from_csv_str(&req.csv)?;
    let request = ForecastRequest {
        horizon: req.horizon,
        reservoir_dimensionality: req.reservoir_dimensionality,
        regularization_exponent: req.regularization_exponent,
    };
    let predictions = forecast(&series, &request)?;
    Ok((series, predictions))
}

fn into_api_error(err: anyhow::Error) -> ApiError {
    tracing::warn!("forecast request failed: {err:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("{err:#}"),
        }),
    )
}

/// `POST /api/forecast` — JSON forecast.
pub async fn forecast_api(
    Json(req): Json<ForecastApiRequest>,
) -> Result<Json<ForecastApiResponse>, ApiError> {
    let (_, predictions) = run_forecast(&req).map_err(into_api_error)?;

    let values = (0..predictions.len())
        .map(|i| predictions.row(i).to_vec())
        .collect();
    Ok(Json(ForecastApiResponse {
        times: predictions.times().to_vec(),
        names: predictions.names().to_vec(),
        values,
    }))
}

/// `POST /chart` — rendered chart + table document.
pub async fn forecast_chart(
    Json(req): Json<ForecastApiRequest>,
) -> Result<Html<String>, ApiError> {
    let (series, predictions) = run_forecast(&req).map_err(into_api_error)?;
    Ok(Html(render_forecast_chart(&series, &predictions, Theme::Dark)))
}
