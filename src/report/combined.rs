//! The statistics, bar chart and pie chart of a month in a single response.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    month::{MonthQuery, SaleMonth},
};

use super::{
    ReportState,
    bar_chart::{PriceRangeCount, get_bar_chart},
    pie_chart::{CategoryCount, get_pie_chart},
    statistics::{Statistics, get_statistics},
};

/// Every report for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    /// See [crate::report::get_statistics_endpoint].
    pub statistics: Statistics,
    /// See [crate::report::get_bar_chart_endpoint].
    pub bar_chart: Vec<PriceRangeCount>,
    /// See [crate::report::get_pie_chart_endpoint].
    pub pie_chart: Vec<CategoryCount>,
}

/// Route handler for all reports of a month.
///
/// The reports are read while holding the database lock once, so they all see
/// the same data.
pub async fn get_combined_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let result = SaleMonth::try_from(&query).and_then(|month| {
        let date_range = state.date_range(month)?;
        let connection = state.lock_connection()?;

        Ok::<_, Error>(CombinedReport {
            statistics: get_statistics(date_range.clone(), &connection)?,
            bar_chart: get_bar_chart(date_range.clone(), &connection)?,
            pie_chart: get_pie_chart(date_range, &connection)?,
        })
    });

    match result {
        Ok(report) => Json(report).into_response(),
        Err(error) => error.into_plain_text_response("Error fetching combined data"),
    }
}
