pub mod bucketizer;
pub mod report_service;

pub use bucketizer::ReportBucketizer;
pub use report_service::ReportService;
