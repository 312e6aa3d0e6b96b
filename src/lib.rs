//! GST Line-Item Computation Engine
//!
//! This library provides the shared money-computation core for the garage
//! management system: normalizing raw backend line-item records, computing
//! per-line GST splits (CGST/SGST/IGST), aggregating lines into invoice
//! totals, and bucketing aggregated lines by GST rate for reports.

pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::invoices;
pub use modules::lineitems;
pub use modules::reports;
