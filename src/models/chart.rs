use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{color_for, STOCK_DATE_FORMAT};
use crate::models::{SectorSummary, StockResponse};

/// Sector with the tickers it groups, as offered by the view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorItem {
    pub label: String,
    pub tickers: Vec<String>,
}

impl SectorItem {
    /// Group a flat catalog by sector, keeping first-appearance order
    pub fn group(catalog: &[SectorSummary]) -> Vec<SectorItem> {
        let mut sectors: Vec<SectorItem> = Vec::new();
        for entry in catalog {
            match sectors.iter_mut().find(|s| s.label == entry.sector) {
                Some(sector) => sector.tickers.push(entry.ticker.clone()),
                None => sectors.push(SectorItem {
                    label: entry.sector.clone(),
                    tickers: vec![entry.ticker.clone()],
                }),
            }
        }
        sectors
    }
}

/// Selectable period with the date format used for chart labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodItem {
    /// Button label, e.g. `1W`
    pub label: String,
    /// Query value, e.g. `7D`
    pub period: String,
    /// chrono format string for x-axis labels
    pub format: String,
}

/// One line of a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Ticker name
    pub label: String,
    pub data: Vec<f64>,
    pub fill: bool,
    pub border_color: String,
}

/// Chart-ready series for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSeries {
    /// Empty series shown before the first prices arrive
    pub fn placeholder(ticker: &str, index: usize) -> Self {
        Self {
            labels: Vec::new(),
            datasets: vec![Dataset {
                label: ticker.to_string(),
                data: Vec::new(),
                fill: false,
                border_color: color_for(index).to_string(),
            }],
        }
    }

    /// Reshape a price response into a series, relabelling dates with `label_format`.
    ///
    /// A date that does not parse as DD/MM/YYYY is kept verbatim.
    pub fn from_prices(ticker: &str, index: usize, prices: &[StockResponse], label_format: &str) -> Self {
        let labels = prices
            .iter()
            .map(|stock| match NaiveDate::parse_from_str(&stock.date, STOCK_DATE_FORMAT) {
                Ok(date) => date.format(label_format).to_string(),
                Err(_) => stock.date.clone(),
            })
            .collect();

        Self {
            labels,
            datasets: vec![Dataset {
                label: ticker.to_string(),
                data: prices.iter().map(|stock| stock.spot).collect(),
                fill: false,
                border_color: color_for(index).to_string(),
            }],
        }
    }
}
