mod comparison;
mod config;
mod params;
mod refs;

pub use self::comparison::{
    ComparisonResult, Delta, FormattedComparisonResult, FormattedGroup, FormattedRow,
    MetricCategory, MetricSamples, Trend,
};
pub use self::config::{DEFAULT_API_URL, DEFAULT_PAGE_URL, DashboardConfig};
pub use self::params::{ComparisonKind, ComparisonParameters, FetchKey};
pub use self::refs::{RefCatalog, RefEntry, RefGroup};
