pub mod coerce;
pub mod model;

pub use model::{CardVariant, ReportingFeed, Severity, StatusCard, TransparencyUpdate};

/// Default location of the feed, relative to the site checkout.
pub const DEFAULT_FEED_PATH: &str = "src/content/public-reporting.json";

/// Environment variable overriding [`DEFAULT_FEED_PATH`] for the tools.
pub const FEED_PATH_ENV: &str = "OPTFI_REPORTING_FEED";
