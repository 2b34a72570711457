//! Defines the app level error type and its conversion to plain-text HTTP responses.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request for the seed data failed, or the remote host answered with
    /// a non-success status code.
    #[error("could not fetch seed data: {0}")]
    SeedFetch(String),

    /// The seed data could not be parsed as a JSON array of transactions.
    #[error("invalid seed data: {0}")]
    InvalidSeedData(String),

    /// The `month` query parameter was missing or did not name a month of the year.
    ///
    /// This is the only error caused by the client, so it is also the only
    /// error whose message is shown to the client.
    #[error("invalid month {0:?}, expected a number from 1 to 12")]
    InvalidMonth(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Error::InvalidSeedData(value.to_string())
        } else {
            Error::SeedFetch(value.to_string())
        }
    }
}

impl Error {
    /// Convert the error into a plain-text HTTP response.
    ///
    /// [Error::InvalidMonth] is answered with a 400 and the error text. Every
    /// other error is logged and answered with a 500 and the fixed `message`,
    /// the cause is not intended to be shown to the client.
    pub fn into_plain_text_response(self, message: &'static str) -> Response {
        match self {
            Error::InvalidMonth(_) => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            error => {
                tracing::error!("{message}: {error}");
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}
