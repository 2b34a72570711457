//! Seeds the database with transactions fetched from a remote JSON feed.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{NewTransaction, replace_all_transactions},
};

/// The state needed for seeding the database.
#[derive(Debug, Clone)]
pub struct SeedState {
    /// The database connection for storing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The client used to download the seed data.
    pub http_client: reqwest::Client,
    /// Where to download the seed data from.
    pub seed_url: String,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            http_client: state.http_client.clone(),
            seed_url: state.config.seed_url.clone(),
        }
    }
}

/// Route handler that replaces every transaction with the seed data.
pub async fn init_database_endpoint(State(state): State<SeedState>) -> Response {
    match seed_database(&state).await {
        Ok(count) => {
            tracing::info!("Replaced all transactions with {count} seed transactions");
            (StatusCode::OK, "Database initialized with seed data").into_response()
        }
        Err(error) => error.into_plain_text_response("Error initializing database"),
    }
}

async fn seed_database(state: &SeedState) -> Result<usize, Error> {
    // Download first so that the database lock is not held across the request.
    let transactions = fetch_seed_transactions(&state.http_client, &state.seed_url).await?;

    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    replace_all_transactions(&transactions, &mut connection)
}

/// Download the seed transactions from `url`.
///
/// # Errors
/// Returns:
/// - [Error::SeedFetch] if the request fails or the response status is not a success,
/// - [Error::InvalidSeedData] if the body is not a JSON array of transactions.
pub async fn fetch_seed_transactions(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<NewTransaction>, Error> {
    tracing::debug!("Fetching seed data from {url}");

    let transactions = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<NewTransaction>>()
        .await?;

    Ok(transactions)
}
