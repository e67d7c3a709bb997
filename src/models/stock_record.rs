use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::STOCK_DATE_FORMAT;

/// One generated spot price for a ticker
///
/// Records are created in bulk when the store starts and never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Timestamp of the data point
    pub date: DateTime<Utc>,

    /// Spot price, 2 decimals
    pub spot: f64,

    /// Ticker symbol
    pub ticker: String,

    /// Sector the ticker belongs to
    pub sector: String,
}

impl StockRecord {
    /// Convert into the wire shape returned by `/api/stocks/{ticker}`; the day is taken in UTC
    pub fn to_response(&self) -> StockResponse {
        StockResponse {
            date: self.date.format(STOCK_DATE_FORMAT).to_string(),
            spot: self.spot,
        }
    }
}

/// Catalog entry: which sector a ticker belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorSummary {
    pub ticker: String,
    pub sector: String,
}

impl SectorSummary {
    pub fn new(ticker: impl Into<String>, sector: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            sector: sector.into(),
        }
    }
}

/// Stock price as served over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockResponse {
    /// Date in DD/MM/YYYY format
    pub date: String,
    pub spot: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_response_formats_date() {
        let record = StockRecord {
            date: Utc.with_ymd_and_hms(2024, 3, 7, 15, 30, 0).unwrap(),
            spot: 101.25,
            ticker: "APPL".to_string(),
            sector: "Technology".to_string(),
        };

        let response = record.to_response();
        assert_eq!(response.date, "07/03/2024");
        assert_eq!(response.spot, 101.25);
    }

    #[test]
    fn test_to_response_uses_utc_day() {
        let record = StockRecord {
            date: Utc.with_ymd_and_hms(2024, 12, 31, 23, 30, 0).unwrap(),
            spot: 100.0,
            ticker: "TSLA".to_string(),
            sector: "Automotive".to_string(),
        };
        assert_eq!(record.to_response().date, "31/12/2024");
    }

    #[test]
    fn test_sector_summary_json_shape() {
        let summary = SectorSummary::new("AXA", "Finance");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json, serde_json::json!({ "ticker": "AXA", "sector": "Finance" }));
    }
}
