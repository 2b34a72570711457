//! Counts of a month's transactions in fixed price ranges.

use std::ops::Range;

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, named_params};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    month::{MonthQuery, SaleMonth},
};

use super::ReportState;

/// A price range in the bar chart.
///
/// A price is in the bucket if `min <= price < max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBucket {
    /// The label shown for the bucket.
    pub label: &'static str,
    /// The inclusive lower bound.
    pub min: f64,
    /// The exclusive upper bound.
    pub max: f64,
}

impl PriceBucket {
    const fn new(label: &'static str, min: f64, max: f64) -> Self {
        Self { label, min, max }
    }

    /// Whether `price` falls in this bucket.
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price < self.max
    }
}

/// The buckets of the bar chart in display order.
///
/// The labels read as inclusive ranges but the upper bounds are exclusive, so
/// prices in `[100, 101)`, `[200, 201)` and so on are not counted in any bucket.
pub const PRICE_BUCKETS: [PriceBucket; 10] = [
    PriceBucket::new("0-100", 0.0, 100.0),
    PriceBucket::new("101-200", 101.0, 200.0),
    PriceBucket::new("201-300", 201.0, 300.0),
    PriceBucket::new("301-400", 301.0, 400.0),
    PriceBucket::new("401-500", 401.0, 500.0),
    PriceBucket::new("501-600", 501.0, 600.0),
    PriceBucket::new("601-700", 601.0, 700.0),
    PriceBucket::new("701-800", 701.0, 800.0),
    PriceBucket::new("801-900", 801.0, 900.0),
    PriceBucket::new("901-above", 901.0, f64::INFINITY),
];

/// The number of transactions in one price range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    /// The label of the price range, e.g. "101-200".
    pub range: String,
    /// The number of transactions priced within the range.
    pub count: u64,
}

/// Route handler for the price histogram of a month.
pub async fn get_bar_chart_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let result = SaleMonth::try_from(&query).and_then(|month| {
        let date_range = state.date_range(month)?;
        let connection = state.lock_connection()?;
        get_bar_chart(date_range, &connection)
    });

    match result {
        Ok(bar_chart) => Json(bar_chart).into_response(),
        Err(error) => error.into_plain_text_response("Error fetching bar chart data"),
    }
}

/// Count the transactions sold within `date_range` in each of [PRICE_BUCKETS].
///
/// Always returns one entry per bucket, in bucket order.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub(super) fn get_bar_chart(
    date_range: Range<OffsetDateTime>,
    connection: &Connection,
) -> Result<Vec<PriceRangeCount>, Error> {
    let prices = connection
        .prepare(
            "SELECT price FROM \"transaction\"
            WHERE date_of_sale >= :start AND date_of_sale < :end",
        )?
        .query_map(
            named_params! {
                ":start": date_range.start.unix_timestamp(),
                ":end": date_range.end.unix_timestamp(),
            },
            |row| row.get(0),
        )?
        .collect::<Result<Vec<f64>, rusqlite::Error>>()?;

    Ok(count_by_bucket(&prices))
}

/// Count how many of `prices` fall in each of [PRICE_BUCKETS].
fn count_by_bucket(prices: &[f64]) -> Vec<PriceRangeCount> {
    PRICE_BUCKETS
        .iter()
        .map(|bucket| PriceRangeCount {
            range: bucket.label.to_owned(),
            count: prices.iter().filter(|&&price| bucket.contains(price)).count() as u64,
        })
        .collect()
}
