#![allow(missing_docs)]

use rusqlite::Connection;
use time::macros::datetime;

use crate::{
    AppState, ReportConfig,
    transaction::{NewTransaction, create_transaction},
};

pub(crate) fn get_test_state() -> AppState {
    get_test_state_with_config(ReportConfig::default())
}

pub(crate) fn get_test_state_with_config(config: ReportConfig) -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection, config).expect("Could not create app state")
}

#[track_caller]
pub(crate) fn insert_transactions(state: &AppState, transactions: &[NewTransaction]) {
    let connection = state
        .db_connection
        .lock()
        .expect("Could not acquire database connection");

    for transaction in transactions {
        create_transaction(transaction, &connection).expect("Could not create transaction");
    }
}

/// Three transactions in March 2021 priced 50, 150 and 999, where the first
/// and last were sold.
pub(crate) fn sample_march_transactions() -> Vec<NewTransaction> {
    vec![
        NewTransaction::build("USB Cable", 50.0, "electronics", true, datetime!(2021-03-02 8:15 UTC)),
        NewTransaction::build("Silver Ring", 150.0, "jewelery", false, datetime!(2021-03-14 12:00 UTC)),
        NewTransaction::build("4K Monitor", 999.0, "electronics", true, datetime!(2021-03-31 23:59 UTC)),
    ]
}
