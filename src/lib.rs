//! Sales report is a REST API over a month-by-month record of product sales.
//!
//! The database is seeded from a remote JSON feed, and then the API serves a
//! searchable list of a month's transactions, summary statistics, a price
//! histogram and a category breakdown.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod config;
mod database_id;
mod db;
mod endpoints;
mod error;
mod logging;
mod month;
mod not_found;
mod pagination;
mod report;
mod routing;
mod seed;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use config::{DEFAULT_SALE_YEAR, DEFAULT_SEED_URL, ReportConfig};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::SaleMonth;
pub use report::{
    CategoryCount, CombinedReport, PRICE_BUCKETS, PriceBucket, PriceRangeCount, Statistics,
};
pub use routing::{build_router, build_router_with_frontend};
pub use seed::fetch_seed_transactions;
pub use transaction::{
    NewTransaction, Transaction, TransactionList, count_transactions, create_transaction,
    replace_all_transactions,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
