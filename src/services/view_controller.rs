use crate::constants::{period_items, DEFAULT_PERIOD};
use crate::error::{AppError, Result};
use crate::models::{ChartSeries, PeriodItem, SectorItem};
use crate::services::StockApi;
use futures::future::try_join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Selection and derived chart state of the stock view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub sectors: Vec<SectorItem>,
    pub selected_sector: Option<SectorItem>,
    pub periods: Vec<PeriodItem>,
    pub selected_period: Option<PeriodItem>,
    /// One series per ticker of the selected sector
    pub series: Vec<ChartSeries>,
    /// Message of the last failed load, cleared by the next successful one
    pub last_error: Option<String>,
}

/// Owns the sector/period selection and rebuilds chart series when it changes.
///
/// Every refresh is numbered; a refresh that completes after a newer one has
/// started is dropped, so the displayed series always match the latest
/// selection.
pub struct ViewController<S> {
    service: S,
    state: RwLock<ViewState>,
    generation: AtomicU64,
}

impl<S: StockApi + Sync> ViewController<S> {
    /// Create the controller with the static period list already selected
    pub fn new(service: S) -> Self {
        let periods = period_items();
        let selected_period = periods
            .iter()
            .find(|p| p.period == DEFAULT_PERIOD)
            .or_else(|| periods.first())
            .cloned();

        Self {
            service,
            state: RwLock::new(ViewState {
                periods,
                selected_period,
                ..ViewState::default()
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Load the sector catalog, select the first sector and fetch its series
    pub async fn init_sectors(&self) -> Result<()> {
        let catalog = match self.service.get_sectors().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "Failed to load sectors");
                self.state.write().await.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        let sectors = SectorItem::group(&catalog);
        info!(sectors = sectors.len(), tickers = catalog.len(), "Loaded sectors");

        let selected_sector = sectors.first().cloned();
        let placeholders: Vec<ChartSeries> = selected_sector
            .iter()
            .flat_map(|sector| sector.tickers.iter().enumerate())
            .map(|(i, ticker)| ChartSeries::placeholder(ticker, i))
            .collect();

        {
            let mut state = self.state.write().await;
            state.sectors = sectors;
            state.selected_sector = selected_sector;
            state.series = placeholders;
        }

        self.update_data().await
    }

    /// Select `sector` and refresh the series
    pub async fn change_sector(&self, sector: SectorItem) -> Result<()> {
        debug!(sector = %sector.label, "Sector changed");
        self.state.write().await.selected_sector = Some(sector);
        self.update_data().await
    }

    /// Select `period` and refresh the series
    pub async fn change_period(&self, period: PeriodItem) -> Result<()> {
        debug!(period = %period.label, "Period changed");
        self.state.write().await.selected_period = Some(period);
        self.update_data().await
    }

    /// Select the sector named `label`
    pub async fn change_sector_by_label(&self, label: &str) -> Result<()> {
        let sector = self
            .state
            .read()
            .await
            .sectors
            .iter()
            .find(|s| s.label.eq_ignore_ascii_case(label))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("sector '{}'", label)))?;
        self.change_sector(sector).await
    }

    /// Select the period whose label (1W, 6M, ...) is `label`
    pub async fn change_period_by_label(&self, label: &str) -> Result<()> {
        let period = self
            .state
            .read()
            .await
            .periods
            .iter()
            .find(|p| p.label.eq_ignore_ascii_case(label))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("period '{}'", label)))?;
        self.change_period(period).await
    }

    /// Fetch every ticker of the selected sector concurrently and replace the
    /// series in one step once all of them succeeded.
    ///
    /// On failure the previous series stay in place and `last_error` is set.
    pub async fn update_data(&self) -> Result<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (sector, period) = {
            let state = self.state.read().await;
            (state.selected_sector.clone(), state.selected_period.clone())
        };
        let (Some(sector), Some(period)) = (sector, period) else {
            debug!("Nothing selected, skipping update");
            return Ok(());
        };

        let fetches = sector.tickers.iter().enumerate().map(|(i, ticker)| {
            let period = &period;
            async move {
                let prices = self.service.get_stocks(ticker, &period.period).await?;
                Ok::<_, AppError>(ChartSeries::from_prices(ticker, i, &prices, &period.format))
            }
        });
        let result = try_join_all(fetches).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, sector = %sector.label, period = %period.label, "Discarding stale update");
            return Ok(());
        }

        match result {
            Ok(series) => {
                info!(
                    sector = %sector.label,
                    period = %period.label,
                    tickers = series.len(),
                    "Updated chart series"
                );
                state.series = series;
                state.last_error = None;
                Ok(())
            }
            Err(e) => {
                warn!(sector = %sector.label, period = %period.label, error = %e, "Failed to update chart series");
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    /// Currently displayed series
    pub async fn series(&self) -> Vec<ChartSeries> {
        self.state.read().await.series.clone()
    }
}
