//! The API endpoints URIs.

/// The route that replaces all transactions with the seed data.
pub const INIT: &str = "/api/init";
/// The route for listing the transactions of a month.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for the sale statistics of a month.
pub const STATISTICS: &str = "/api/statistics";
/// The route for the price histogram of a month.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The route for the category breakdown of a month.
pub const PIE_CHART: &str = "/api/pie-chart";
/// The route for the statistics, bar chart and pie chart together.
pub const COMBINED: &str = "/api/combined";
