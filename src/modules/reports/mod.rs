// Reports module

pub mod models;
pub mod services;

pub use models::{RateBucketReport, RateBucketTotals};
pub use services::{ReportBucketizer, ReportService};
