mod rate_bucket;

pub use rate_bucket::{RateBucketReport, RateBucketTotals, GST_RATE_TIERS};
