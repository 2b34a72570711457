//! The endpoint for listing the transactions of a month with search and pagination.

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    month::SaleMonth,
    pagination::{PageWindow, PaginationConfig},
    report::ReportState,
};

use super::{
    core::Transaction,
    query::{TransactionFilter, count_matching_transactions, get_transaction_page},
};

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct TransactionListState {
    /// The database connection and the year of sale.
    pub report: ReportState,
    /// The default page and page size.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            report: ReportState::from_ref(state),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    /// The 1-based page number.
    pub page: Option<u64>,
    /// The number of transactions per page.
    pub per_page: Option<u64>,
    /// Text to look for in the title, description or price.
    pub search: Option<String>,
    /// The month of sale, 1 to 12.
    pub month: Option<String>,
}

/// One page of transactions and the number of transactions across all pages.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TransactionList {
    /// The transactions on the requested page.
    pub transactions: Vec<Transaction>,
    /// The number of transactions matching the filters.
    pub total: u64,
}

/// Route handler for listing transactions sold in a month.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionListState>,
    Query(query): Query<TransactionListQuery>,
) -> Response {
    match list_transactions(&state, &query) {
        Ok(list) => Json(list).into_response(),
        Err(error) => error.into_plain_text_response("Error fetching transactions"),
    }
}

fn list_transactions(
    state: &TransactionListState,
    query: &TransactionListQuery,
) -> Result<TransactionList, Error> {
    let month = SaleMonth::parse(query.month.as_deref())?;
    let filter = TransactionFilter {
        date_range: month.date_range(state.report.sale_year)?,
        search: query.search.as_deref().unwrap_or_default(),
    };
    let window = PageWindow::new(
        query.page.unwrap_or(state.pagination_config.default_page),
        query
            .per_page
            .unwrap_or(state.pagination_config.default_page_size),
    );

    let connection = state
        .report
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_transaction_page(&filter, window, &connection)?;
    let total = count_matching_transactions(&filter, &connection)?;

    Ok(TransactionList {
        transactions,
        total,
    })
}
