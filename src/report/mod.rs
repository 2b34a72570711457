//! Report module
//!
//! Monthly sales statistics, the price histogram for the bar chart, the
//! category counts for the pie chart, and all three combined.

mod bar_chart;
mod combined;
mod pie_chart;
mod statistics;

use std::{
    ops::Range,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::extract::FromRef;
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{AppState, Error, month::SaleMonth};

pub use bar_chart::{PRICE_BUCKETS, PriceBucket, PriceRangeCount, get_bar_chart_endpoint};
pub use combined::{CombinedReport, get_combined_endpoint};
pub use pie_chart::{CategoryCount, get_pie_chart_endpoint};
pub use statistics::{Statistics, get_statistics_endpoint};

/// The state needed for the monthly reports.
#[derive(Debug, Clone)]
pub struct ReportState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The year that the requested month belongs to.
    pub sale_year: i32,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            sale_year: state.config.sale_year,
        }
    }
}

impl ReportState {
    /// The date range of `month` in the configured year.
    fn date_range(&self, month: SaleMonth) -> Result<Range<OffsetDateTime>, Error> {
        month.date_range(self.sale_year)
    }

    fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}
