mod chart;
mod period;
mod stock_record;

pub use chart::{ChartSeries, Dataset, PeriodItem, SectorItem};
pub use period::{Period, PeriodUnit};
pub use stock_record::{SectorSummary, StockRecord, StockResponse};
