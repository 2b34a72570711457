//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// A product sale, i.e. an item that was listed on a given date and either
/// sold or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The name of the product.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The listed price of the product.
    pub price: f64,
    /// The category label of the product, e.g. "electronics".
    pub category: String,
    /// A URL to an image of the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Whether the product was sold.
    pub sold: bool,
    /// When the product was sold (or listed, if it was not sold).
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

/// A transaction that has not been stored yet, e.g. a record from the seed feed.
///
/// Fields in the feed that are not listed here, such as the feed's own `id`,
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// The name of the product.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The listed price of the product.
    pub price: f64,
    /// The category label of the product.
    pub category: String,
    /// A URL to an image of the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Whether the product was sold.
    pub sold: bool,
    /// When the product was sold.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

impl NewTransaction {
    /// Create a new transaction with an empty description and no image.
    ///
    /// Mostly useful for tests and sample data.
    pub fn build(
        title: &str,
        price: f64,
        category: &str,
        sold: bool,
        date_of_sale: OffsetDateTime,
    ) -> Self {
        Self {
            title: title.to_owned(),
            description: String::new(),
            price,
            category: category.to_owned(),
            image: None,
            sold,
            date_of_sale,
        }
    }

    /// Set the description of the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn create_transaction(
    transaction: &NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (title, description, price, category, image, sold, date_of_sale)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, title, description, price, category, image, sold, date_of_sale",
        )?
        .query_row(
            params![
                transaction.title,
                transaction.description,
                transaction.price,
                transaction.category,
                transaction.image,
                transaction.sold,
                transaction.date_of_sale.unix_timestamp(),
            ],
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Replace every transaction in the database with `transactions`.
///
/// The delete and the inserts happen in a single SQL transaction, so if any
/// insert fails the previous contents are kept.
///
/// Returns the number of transactions inserted.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn replace_all_transactions(
    transactions: &[NewTransaction],
    connection: &mut Connection,
) -> Result<usize, Error> {
    let sql_transaction = connection.transaction()?;

    sql_transaction.execute("DELETE FROM \"transaction\"", ())?;

    {
        let mut statement = sql_transaction.prepare(
            "INSERT INTO \"transaction\" (title, description, price, category, image, sold, date_of_sale)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;

        for transaction in transactions {
            statement.execute(params![
                transaction.title,
                transaction.description,
                transaction.price,
                transaction.category,
                transaction.image,
                transaction.sold,
                transaction.date_of_sale.unix_timestamp(),
            ])?;
        }
    }

    sql_transaction.commit()?;

    Ok(transactions.len())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                category TEXT NOT NULL,
                image TEXT,
                sold INTEGER NOT NULL,
                date_of_sale INTEGER NOT NULL
                )",
        (),
    )?;

    // Every report filters on the month of sale.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date_of_sale ON \"transaction\"(date_of_sale);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns `id, title, description, price, category, image, sold, date_of_sale`.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let timestamp: i64 = row.get(7)?;
    let date_of_sale = OffsetDateTime::from_unix_timestamp(timestamp).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Integer, error.into())
    })?;

    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        image: row.get(5)?,
        sold: row.get(6)?,
        date_of_sale,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        db::initialize,
        transaction::{NewTransaction, count_transactions, create_transaction},
    };

    use super::replace_all_transactions;

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let new_transaction = NewTransaction::build(
            "Mens Casual Shirt",
            22.3,
            "men's clothing",
            true,
            datetime!(2021-03-05 10:30 UTC),
        )
        .description("Slim-fitting style");

        let transaction = create_transaction(&new_transaction, &conn).unwrap();

        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.title, new_transaction.title);
        assert_eq!(transaction.description, new_transaction.description);
        assert_eq!(transaction.price, new_transaction.price);
        assert_eq!(transaction.category, new_transaction.category);
        assert_eq!(transaction.sold, new_transaction.sold);
        assert_eq!(transaction.date_of_sale, new_transaction.date_of_sale);
    }

    #[test]
    fn replace_all_removes_previous_transactions() {
        let mut conn = get_test_connection();
        let date = datetime!(2021-03-05 10:30 UTC);
        for i in 0..5 {
            create_transaction(
                &NewTransaction::build(&format!("old #{i}"), 10.0, "old", false, date),
                &conn,
            )
            .unwrap();
        }

        let new_transactions = vec![
            NewTransaction::build("new #1", 20.0, "new", true, date),
            NewTransaction::build("new #2", 30.0, "new", false, date),
        ];

        let inserted = replace_all_transactions(&new_transactions, &mut conn).unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(count_transactions(&conn).unwrap(), 2);
        let titles: Vec<String> = conn
            .prepare("SELECT title FROM \"transaction\" ORDER BY id")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(titles, vec!["new #1", "new #2"]);
    }

    #[test]
    fn replace_all_with_empty_slice_clears_table() {
        let mut conn = get_test_connection();
        create_transaction(
            &NewTransaction::build("old", 10.0, "old", false, datetime!(2021-03-05 10:30 UTC)),
            &conn,
        )
        .unwrap();

        replace_all_transactions(&[], &mut conn).unwrap();

        assert_eq!(count_transactions(&conn).unwrap(), 0);
    }

    #[test]
    fn replace_all_keeps_previous_transactions_when_insert_fails() {
        let mut conn = get_test_connection();
        let date = datetime!(2021-03-05 10:30 UTC);
        for i in 0..3 {
            create_transaction(
                &NewTransaction::build(&format!("old #{i}"), 10.0, "old", false, date),
                &conn,
            )
            .unwrap();
        }
        conn.execute(
            "CREATE TRIGGER reject_bad_title BEFORE INSERT ON \"transaction\"
            WHEN NEW.title = 'bad' BEGIN SELECT RAISE(ABORT, 'rejected'); END",
            (),
        )
        .unwrap();

        let new_transactions = vec![
            NewTransaction::build("good", 20.0, "new", true, date),
            NewTransaction::build("bad", 30.0, "new", false, date),
        ];

        let result = replace_all_transactions(&new_transactions, &mut conn);

        assert!(result.is_err(), "want error, got {result:?}");
        assert_eq!(count_transactions(&conn).unwrap(), 3);
        let good_count: u64 = conn
            .query_row(
                "SELECT COUNT(id) FROM \"transaction\" WHERE title = 'good'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(good_count, 0);
    }

    #[test]
    fn seed_record_ignores_unknown_fields() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven  - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 329.85,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "sold": false,
            "dateOfSale": "2021-11-27T20:29:54+05:30"
        }"#;

        let transaction: NewTransaction = serde_json::from_str(json).unwrap();

        assert_eq!(transaction.price, 329.85);
        assert!(!transaction.sold);
        assert_eq!(
            transaction.date_of_sale,
            datetime!(2021-11-27 14:59:54 UTC)
        );
        assert_eq!(
            transaction.image.as_deref(),
            Some("https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg")
        );
    }

    #[test]
    fn stored_dates_are_returned_in_utc() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            &NewTransaction::build(
                "Backpack",
                10.0,
                "bags",
                true,
                datetime!(2021-11-27 20:29:54 +05:30),
            ),
            &conn,
        )
        .unwrap();

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(json["dateOfSale"], "2021-11-27T14:59:54Z");
    }
}
