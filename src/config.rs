//! Settings that change how reports are built.

/// Where the seed data is downloaded from when not otherwise configured.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// The year that months are looked up in when not otherwise configured.
pub const DEFAULT_SALE_YEAR: i32 = 2021;

/// The settings for seeding and querying transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// The URL of the JSON array of transactions used by the init endpoint.
    pub seed_url: String,
    /// The year that the `month` query parameter refers to.
    pub sale_year: i32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.to_owned(),
            sale_year: DEFAULT_SALE_YEAR,
        }
    }
}
