//! Database query helpers for the transaction list.

use std::ops::Range;

use rusqlite::{Connection, named_params};
use time::OffsetDateTime;

use crate::{Error, pagination::PageWindow};

use super::core::{Transaction, map_transaction_row};

/// The price formatted the way it would be printed as a JSON number, i.e.
/// without a trailing ".0" for whole numbers.
const PRICE_AS_TEXT: &str = "CASE WHEN price = CAST(price AS INTEGER) \
    THEN CAST(CAST(price AS INTEGER) AS TEXT) \
    ELSE CAST(price AS TEXT) END";

/// Filters for listing transactions.
#[derive(Debug, Clone)]
pub(crate) struct TransactionFilter<'a> {
    /// Only include transactions sold within this range.
    pub date_range: Range<OffsetDateTime>,
    /// Only include transactions where the title, description or price contain
    /// this text, ignoring ASCII case. An empty string matches everything.
    pub search: &'a str,
}

impl TransactionFilter<'_> {
    fn where_clause() -> String {
        format!(
            "date_of_sale >= :start AND date_of_sale < :end \
            AND (title LIKE :pattern ESCAPE '\\' \
                OR description LIKE :pattern ESCAPE '\\' \
                OR {PRICE_AS_TEXT} LIKE :pattern ESCAPE '\\')"
        )
    }

    fn like_pattern(&self) -> String {
        format!("%{}%", escape_like(self.search))
    }
}

/// Escape the wildcard characters of a SQL `LIKE` pattern so that `text` is
/// matched literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

/// Get one page of the transactions matching `filter`, ordered by date of sale.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub(crate) fn get_transaction_page(
    filter: &TransactionFilter,
    window: PageWindow,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    // Sort by date, and then ID to keep the page contents stable
    let query = format!(
        "SELECT id, title, description, price, category, image, sold, date_of_sale \
        FROM \"transaction\" \
        WHERE {} \
        ORDER BY date_of_sale ASC, id ASC \
        LIMIT :limit OFFSET :offset",
        TransactionFilter::where_clause()
    );

    connection
        .prepare(&query)?
        .query_map(
            named_params! {
                ":start": filter.date_range.start.unix_timestamp(),
                ":end": filter.date_range.end.unix_timestamp(),
                ":pattern": filter.like_pattern(),
                ":limit": window.limit,
                ":offset": window.offset,
            },
            map_transaction_row,
        )?
        .map(|transaction_result| transaction_result.map_err(Error::from))
        .collect()
}

/// Count every transaction matching `filter`, ignoring pagination.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub(crate) fn count_matching_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<u64, Error> {
    let query = format!(
        "SELECT COUNT(id) FROM \"transaction\" WHERE {}",
        TransactionFilter::where_clause()
    );

    connection
        .query_row(
            &query,
            named_params! {
                ":start": filter.date_range.start.unix_timestamp(),
                ":end": filter.date_range.end.unix_timestamp(),
                ":pattern": filter.like_pattern(),
            },
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        db::initialize,
        pagination::PageWindow,
        transaction::{NewTransaction, create_transaction},
    };

    use super::{TransactionFilter, count_matching_transactions, escape_like, get_transaction_page};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn march_filter(search: &str) -> TransactionFilter<'_> {
        TransactionFilter {
            date_range: datetime!(2021-03-01 0:00 UTC)..datetime!(2021-04-01 0:00 UTC),
            search,
        }
    }

    fn all() -> PageWindow {
        PageWindow {
            limit: -1,
            offset: 0,
        }
    }

    #[test]
    fn only_returns_transactions_in_date_range() {
        let conn = get_test_connection();
        for date in [
            datetime!(2021-02-28 23:59:59 UTC),
            datetime!(2021-03-01 0:00 UTC),
            datetime!(2021-03-31 23:59:59 UTC),
            datetime!(2021-04-01 0:00 UTC),
        ] {
            create_transaction(&NewTransaction::build("item", 10.0, "misc", true, date), &conn)
                .unwrap();
        }

        let got = get_transaction_page(&march_filter(""), all(), &conn).unwrap();

        assert_eq!(got.len(), 2, "got {got:#?}");
        assert_eq!(got[0].date_of_sale, datetime!(2021-03-01 0:00 UTC));
        assert_eq!(got[1].date_of_sale, datetime!(2021-03-31 23:59:59 UTC));
    }

    #[test]
    fn search_matches_title_description_or_price_ignoring_case() {
        let conn = get_test_connection();
        let date = datetime!(2021-03-10 12:00 UTC);
        create_transaction(
            &NewTransaction::build("Solid Gold Ring", 168.0, "jewelery", true, date),
            &conn,
        )
        .unwrap();
        create_transaction(
            &NewTransaction::build("Backpack", 109.95, "bags", false, date)
                .description("Fits 15 inch laptops, GOLDEN zipper"),
            &conn,
        )
        .unwrap();
        create_transaction(
            &NewTransaction::build("Hard Drive", 64.0, "electronics", false, date),
            &conn,
        )
        .unwrap();

        let gold = get_transaction_page(&march_filter("gold"), all(), &conn).unwrap();
        assert_eq!(gold.len(), 2, "got {gold:#?}");

        let by_price = get_transaction_page(&march_filter("109.9"), all(), &conn).unwrap();
        assert_eq!(by_price.len(), 1);
        assert_eq!(by_price[0].title, "Backpack");

        let whole_price = get_transaction_page(&march_filter("168"), all(), &conn).unwrap();
        assert_eq!(whole_price.len(), 1);
        assert_eq!(whole_price[0].title, "Solid Gold Ring");

        let no_match = get_transaction_page(&march_filter("168.0"), all(), &conn).unwrap();
        assert!(no_match.is_empty(), "got {no_match:#?}");
    }

    #[test]
    fn search_treats_wildcards_literally() {
        let conn = get_test_connection();
        let date = datetime!(2021-03-10 12:00 UTC);
        create_transaction(&NewTransaction::build("100% cotton", 10.0, "c", true, date), &conn)
            .unwrap();
        create_transaction(&NewTransaction::build("cotton", 10.0, "c", true, date), &conn)
            .unwrap();

        let got = get_transaction_page(&march_filter("%"), all(), &conn).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].title, "100% cotton");
    }

    #[test]
    fn count_ignores_page_window() {
        let conn = get_test_connection();
        let date = datetime!(2021-03-10 12:00 UTC);
        for i in 0..25 {
            create_transaction(
                &NewTransaction::build(&format!("item #{i}"), i as f64, "misc", true, date),
                &conn,
            )
            .unwrap();
        }

        let page = get_transaction_page(
            &march_filter(""),
            PageWindow {
                limit: 10,
                offset: 20,
            },
            &conn,
        )
        .unwrap();
        let total = count_matching_transactions(&march_filter(""), &conn).unwrap();

        assert_eq!(page.len(), 5);
        assert_eq!(total, 25);
    }

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
