//! The month of sale used to filter every report.

use std::ops::Range;

use serde::Deserialize;
use time::{Date, Month, OffsetDateTime, Time};

use crate::Error;

/// Query parameters for endpoints that only take a month.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The month of the year, 1 to 12.
    pub month: Option<String>,
}

/// A month of the year that transactions are filtered by.
///
/// The year is not part of the request, it comes from
/// [crate::ReportConfig::sale_year].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleMonth(Month);

impl SaleMonth {
    /// Parse a month number such as `"3"` or `"03"`.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `month` is missing, is not a number, or
    /// is outside 1 to 12.
    pub fn parse(month: Option<&str>) -> Result<Self, Error> {
        let raw = month.unwrap_or_default();

        raw.trim()
            .parse::<u8>()
            .ok()
            .and_then(|number| Month::try_from(number).ok())
            .map(SaleMonth)
            .ok_or_else(|| Error::InvalidMonth(raw.to_owned()))
    }

    /// The half-open range from midnight UTC on the first of the month in `year`
    /// to midnight UTC on the first of the following month.
    ///
    /// December rolls over to January of the next year.
    pub fn date_range(self, year: i32) -> Result<Range<OffsetDateTime>, Error> {
        let start = first_of_month(year, self.0)?;
        let end = match self.0 {
            Month::December => first_of_month(year + 1, Month::January)?,
            month => first_of_month(year, month.next())?,
        };

        Ok(start..end)
    }
}

impl TryFrom<&MonthQuery> for SaleMonth {
    type Error = Error;

    fn try_from(query: &MonthQuery) -> Result<Self, Self::Error> {
        SaleMonth::parse(query.month.as_deref())
    }
}

fn first_of_month(year: i32, month: Month) -> Result<OffsetDateTime, Error> {
    Date::from_calendar_date(year, month, 1)
        .map(|date| date.with_time(Time::MIDNIGHT).assume_utc())
        .map_err(|error| Error::InvalidMonth(format!("{year}-{month}: {error}")))
}
