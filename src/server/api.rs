use crate::error::AppError;
use crate::models::{Period, SectorSummary, StockResponse};
use crate::services::SharedDataStore;
use axum::{
    extract::{Path, State, Json},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use tracing::{debug, info, warn, instrument};

/// Raw query pairs, in request order
pub type QueryPairs = Vec<(String, String)>;

/// Value of the last `period` parameter; present but empty stays `Some("")`
pub fn period_param(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .rev()
        .find(|(key, _)| key == "period")
        .map(|(_, value)| value.as_str())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingTicker => (StatusCode::BAD_REQUEST, "Bad request: ticker is missing."),
            AppError::MissingPeriod => (StatusCode::BAD_REQUEST, "Bad request: period is missing."),
            AppError::InvalidPeriodFormat(_) => {
                (StatusCode::BAD_REQUEST, "Bad request: period format is incorrect.")
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };
        (status, body).into_response()
    }
}

/// Validate a stocks request: ticker first, then period presence, then format
pub fn validate_stock_query(ticker: &str, period: Option<&str>) -> Result<Period, AppError> {
    if ticker.is_empty() {
        return Err(AppError::MissingTicker);
    }
    let period = period.ok_or(AppError::MissingPeriod)?;
    period.parse()
}

/// GET /api/stocks - List the ticker/sector catalog
#[instrument(skip(data))]
pub async fn get_sectors_handler(State(data): State<SharedDataStore>) -> Json<Vec<SectorSummary>> {
    let sectors = data.list_sectors().to_vec();
    info!(count = sectors.len(), "Returning sectors");
    Json(sectors)
}

/// GET /api/stocks/{ticker}?period=7D - Spot prices for a ticker within a trailing window
///
/// Examples:
/// - /api/stocks/APPL?period=7D
/// - /api/stocks/TSLA?period=6M
/// - /api/stocks/AXA?period=2Y
#[instrument(skip(data))]
pub async fn get_stocks_handler(
    State(data): State<SharedDataStore>,
    Path(ticker): Path<String>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<Vec<StockResponse>>, AppError> {
    let raw_period = period_param(&params);
    let period = validate_stock_query(&ticker, raw_period).map_err(|e| {
        warn!(%ticker, period = ?raw_period, error = %e, "Rejected stocks request");
        e
    })?;

    let response: Vec<StockResponse> = data
        .query(&ticker, period)
        .into_iter()
        .map(|record| record.to_response())
        .collect();

    info!(%ticker, %period, records = response.len(), "Returning stock data");
    Ok(Json(response))
}

/// GET /api/stocks/ - Empty ticker segment
pub async fn missing_ticker_handler() -> AppError {
    debug!("Stocks request without ticker");
    AppError::MissingTicker
}

/// Fallback for every unrouted path
pub async fn not_found_handler(uri: Uri) -> AppError {
    debug!(%uri, "No route");
    AppError::NotFound(uri.path().to_string())
}
