//! Total sale amount and sold/not sold counts for a month.

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

/// Summary statistics for the transactions of a month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the price of every transaction in the month, sold or not.
    pub total_sale_amount: f64,
    /// The number of transactions that were sold.
    pub total_sold_items: u64,
    /// The number of transactions that were not sold.
    pub total_not_sold_items: u64,
}

/// Route handler for the statistics of a month.
pub async fn get_statistics_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let result = SaleMonth::try_from(&query).and_then(|month| {
        let date_range = state.date_range(month)?;
        let connection = state.lock_connection()?;
        get_statistics(date_range, &connection)
    });

    match result {
        Ok(statistics) => Json(statistics).into_response(),
        Err(error) => error.into_plain_text_response("Error fetching statistics"),
    }
}

/// Calculate the [Statistics] for transactions sold within `date_range`.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub(super) fn get_statistics(
    date_range: Range<OffsetDateTime>,
    connection: &Connection,
) -> Result<Statistics, Error> {
    connection
        .query_row(
            "SELECT
                COALESCE(SUM(price), 0.0),
                COALESCE(SUM(CASE WHEN sold THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN sold THEN 0 ELSE 1 END), 0)
            FROM \"transaction\"
            WHERE date_of_sale >= :start AND date_of_sale < :end",
            named_params! {
                ":start": date_range.start.unix_timestamp(),
                ":end": date_range.end.unix_timestamp(),
            },
            |row| {
                Ok(Statistics {
                    total_sale_amount: row.get(0)?,
                    total_sold_items: row.get(1)?,
                    total_not_sold_items: row.get(2)?,
                })
            },
        )
        .map_err(|error| error.into())
}
