//! Counts of a month's transactions per category.

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

/// The number of transactions in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category label.
    pub category: String,
    /// The number of transactions in the category.
    pub count: u64,
}

/// Route handler for the category breakdown of a month.
pub async fn get_pie_chart_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let result = SaleMonth::try_from(&query).and_then(|month| {
        let date_range = state.date_range(month)?;
        let connection = state.lock_connection()?;
        get_pie_chart(date_range, &connection)
    });

    match result {
        Ok(pie_chart) => Json(pie_chart).into_response(),
        Err(error) => error.into_plain_text_response("Error fetching pie chart data"),
    }
}

/// Count the transactions sold within `date_range` for each category, sorted
/// by category.
///
/// Categories without any transactions in the range are not included.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub(super) fn get_pie_chart(
    date_range: Range<OffsetDateTime>,
    connection: &Connection,
) -> Result<Vec<CategoryCount>, Error> {
    connection
        .prepare(
            "SELECT category, COUNT(id) FROM \"transaction\"
            WHERE date_of_sale >= :start AND date_of_sale < :end
            GROUP BY category
            ORDER BY category ASC",
        )?
        .query_map(
            named_params! {
                ":start": date_range.start.unix_timestamp(),
                ":end": date_range.end.unix_timestamp(),
            },
            |row| {
                Ok(CategoryCount {
                    category: row.get(0)?,
                    count: row.get(1)?,
                })
            },
        )?
        .map(|result| result.map_err(Error::from))
        .collect()
}
