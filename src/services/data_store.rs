use crate::constants::{SECTORS, SPOT_MIN, SPOT_RANGE};
use crate::models::{Period, SectorSummary, StockRecord};
use chrono::{DateTime, Days, Utc};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

// Shared data store for passing between handlers
pub type SharedDataStore = Arc<MockDataStore>;

// Upper bound on up-front allocation; generation may stop early at the calendar floor
const MAX_PREALLOCATED_RECORDS: usize = 1 << 16;

/// In-memory synthetic price history, built once at startup.
///
/// Record `i` belongs to `catalog[i % catalog.len()]` and is dated `i` days
/// before the generation instant, so records are stored newest first.
#[derive(Debug, Clone)]
pub struct MockDataStore {
    catalog: Vec<SectorSummary>,
    records: Vec<StockRecord>,
}

impl MockDataStore {
    /// Generate `data_size` records ending now, using the thread RNG
    pub fn new(data_size: usize) -> Self {
        Self::generate(default_catalog(), data_size, Utc::now(), &mut rand::thread_rng())
    }

    /// Generate records for `catalog`, walking back one day per record from `now`
    pub fn generate<R: Rng + ?Sized>(
        catalog: Vec<SectorSummary>,
        data_size: usize,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let mut records = Vec::with_capacity(data_size.min(MAX_PREALLOCATED_RECORDS));

        if !catalog.is_empty() {
            for i in 0..data_size {
                let Some(date) = now.checked_sub_days(Days::new(i as u64)) else {
                    break;
                };
                let entry = &catalog[i % catalog.len()];
                records.push(StockRecord {
                    date,
                    spot: random_spot(rng),
                    ticker: entry.ticker.clone(),
                    sector: entry.sector.clone(),
                });
            }
        }

        info!(
            records = records.len(),
            tickers = catalog.len(),
            "Generated mock stock data"
        );

        Self { catalog, records }
    }

    /// Static ticker/sector catalog
    pub fn list_sectors(&self) -> &[SectorSummary] {
        &self.catalog
    }

    /// Records for `ticker` within the trailing `period` ending now
    pub fn query(&self, ticker: &str, period: Period) -> Vec<&StockRecord> {
        self.query_at(ticker, period, Utc::now())
    }

    /// Records for `ticker` whose `date + period >= now`, newest first
    pub fn query_at(&self, ticker: &str, period: Period, now: DateTime<Utc>) -> Vec<&StockRecord> {
        let result: Vec<&StockRecord> = self
            .records
            .iter()
            .filter(|record| record.ticker == ticker && period.contains(record.date, now))
            .collect();

        debug!(ticker, %period, matched = result.len(), "Queried mock store");
        result
    }

    /// Total number of generated records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Whether `ticker` is part of the catalog
    pub fn has_ticker(&self, ticker: &str) -> bool {
        self.catalog.iter().any(|entry| entry.ticker == ticker)
    }
}

/// The built-in 9-ticker catalog
pub fn default_catalog() -> Vec<SectorSummary> {
    SECTORS
        .iter()
        .map(|(ticker, sector)| SectorSummary::new(*ticker, *sector))
        .collect()
}

/// Uniform price in `SPOT_MIN..=SPOT_MIN + SPOT_RANGE`, rounded to cents
fn random_spot<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let offset = (rng.gen::<f64>() * SPOT_RANGE * 100.0).round() / 100.0;
    ((SPOT_MIN + offset) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    fn store(data_size: usize) -> MockDataStore {
        let mut rng = StdRng::seed_from_u64(42);
        MockDataStore::generate(default_catalog(), data_size, fixed_now(), &mut rng)
    }

    #[test]
    fn test_generation_shape() {
        let store = store(2000);
        assert_eq!(store.record_count(), 2000);
        assert_eq!(store.list_sectors().len(), 9);

        // 2000 / 9 -> first 2 tickers get one extra record
        let appl = store.records.iter().filter(|r| r.ticker == "APPL").count();
        let pfz = store.records.iter().filter(|r| r.ticker == "PFZ").count();
        assert_eq!(appl, 223);
        assert_eq!(pfz, 222);
    }

    #[test]
    fn test_generation_walks_back_one_day_per_record() {
        let store = store(20);
        for (i, record) in store.records.iter().enumerate() {
            assert_eq!(record.date, fixed_now() - chrono::Duration::days(i as i64));
            assert_eq!(record.ticker, SECTORS[i % SECTORS.len()].0);
            assert_eq!(record.sector, SECTORS[i % SECTORS.len()].1);
        }
    }

    #[test]
    fn test_spot_prices_within_band_and_rounded() {
        let store = store(2000);
        for record in &store.records {
            assert!(record.spot >= 99.5 && record.spot <= 102.5, "spot {}", record.spot);
            let cents = record.spot * 100.0;
            assert!((cents - cents.round()).abs() < 1e-6, "spot {}", record.spot);
        }
    }

    #[test]
    fn test_every_record_ticker_in_catalog() {
        let store = store(500);
        assert!(store.records.iter().all(|r| store.has_ticker(&r.ticker)));
    }

    #[test]
    fn test_query_only_returns_requested_ticker() {
        let store = store(2000);
        let period: Period = "5Y".parse().unwrap();

        for (ticker, _) in SECTORS {
            let result = store.query_at(ticker, period, fixed_now());
            assert!(!result.is_empty());
            assert!(result.iter().all(|r| r.ticker == *ticker));
        }
    }

    #[test]
    fn test_query_seven_days_newest_first() {
        let store = store(2000);
        let period: Period = "7D".parse().unwrap();
        let result = store.query_at("APPL", period, fixed_now());

        // APPL records fall on days 0, 9, 18, ... so only today is inside 7D
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].date, fixed_now());

        let result = store.query_at("APPL", "1M".parse().unwrap(), fixed_now());
        assert!(result.windows(2).all(|w| w[0].date > w[1].date));
    }

    #[test]
    fn test_query_includes_record_exactly_one_period_old() {
        let store = store(100);
        // APPL records sit at days 0, 9, 18, ...
        let nine_days: Period = "9D".parse().unwrap();
        let eight_days: Period = "8D".parse().unwrap();

        assert_eq!(store.query_at("APPL", nine_days, fixed_now()).len(), 2);
        assert_eq!(store.query_at("APPL", eight_days, fixed_now()).len(), 1);
    }

    #[test]
    fn test_query_unknown_ticker_is_empty() {
        let store = store(100);
        assert!(store.query_at("NOPE", "1Y".parse().unwrap(), fixed_now()).is_empty());
    }

    #[test]
    fn test_huge_size_stops_at_oldest_date() {
        let mut rng = StdRng::seed_from_u64(3);
        let now = DateTime::<Utc>::MIN_UTC + chrono::Duration::days(4);
        let store = MockDataStore::generate(default_catalog(), usize::MAX, now, &mut rng);
        assert_eq!(store.record_count(), 5);
        assert_eq!(store.records.last().map(|r| r.date), Some(DateTime::<Utc>::MIN_UTC));
    }

    #[test]
    fn test_empty_catalog_generates_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let store = MockDataStore::generate(Vec::new(), 100, fixed_now(), &mut rng);
        assert_eq!(store.record_count(), 0);
    }
}
