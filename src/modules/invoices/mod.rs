// Invoices module

pub mod models;
pub mod services;

pub use models::InvoiceTotals;
pub use services::InvoiceAggregator;
