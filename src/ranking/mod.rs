pub mod featured;

pub use featured::{rank, FeaturedMetric, MetricParseError, DEFAULT_FEATURED_LIMIT};
