//! Mock Catalog Constants
//!
//! Static reference data shared by the mock store, the API and the view
//! controller.
//!
//! ## Catalog
//!
//! 9 tickers across 3 sectors, 3 tickers each. The catalog order is the
//! generation order of the mock dataset and the grouping order of the view.

use crate::models::PeriodItem;

/// Ticker/sector catalog as `(ticker, sector)` pairs
pub const SECTORS: &[(&str, &str)] = &[
    ("APPL", "Technology"),
    ("AMZN", "Technology"),
    ("MSFT", "Technology"),
    ("TSLA", "Automotive"),
    ("RNLT", "Automotive"),
    ("PEGT", "Automotive"),
    ("AXA", "Finance"),
    ("BARC", "Finance"),
    ("PFZ", "Finance"),
];

/// Total number of generated records (spread evenly across the catalog)
pub const DEFAULT_DATA_SIZE: usize = 2_000;

/// Lower bound of the generated spot price band
pub const SPOT_MIN: f64 = 99.5;

/// Width of the spot price band (upper bound = SPOT_MIN + SPOT_RANGE)
pub const SPOT_RANGE: f64 = 3.0;

/// Wire format of `date` in stock responses (DD/MM/YYYY)
pub const STOCK_DATE_FORMAT: &str = "%d/%m/%Y";

/// Default HTTP port for `serve`
pub const DEFAULT_PORT: u16 = 3000;

/// Default API base URL for client commands
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Period selected when the view starts
pub const DEFAULT_PERIOD: &str = "6M";

/// Line colors, assigned by ticker index within a sector
pub const COLORS: &[&str] = &["#50ba1f", "#3670c7", "#eb357b"];

/// Period choices offered by the view: (label, period, label date format)
const PERIOD_CHOICES: &[(&str, &str, &str)] = &[
    ("1W", "7D", "%d %B"),
    ("1M", "1M", "%d %B"),
    ("3M", "3M", "%d/%m/%Y"),
    ("6M", "6M", "%d/%m/%Y"),
    ("1Y", "1Y", "%d/%m/%Y"),
    ("2Y", "2Y", "%m/%Y"),
    ("5Y", "5Y", "%m/%Y"),
];

/// Build the static list of period choices
pub fn period_items() -> Vec<PeriodItem> {
    PERIOD_CHOICES
        .iter()
        .map(|(label, period, format)| PeriodItem {
            label: label.to_string(),
            period: period.to_string(),
            format: format.to_string(),
        })
        .collect()
}

/// Color for the ticker at `index`, wrapping around the palette
pub fn color_for(index: usize) -> &'static str {
    COLORS[index % COLORS.len()]
}
