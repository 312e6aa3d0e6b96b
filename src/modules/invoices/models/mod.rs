mod invoice_totals;

pub use invoice_totals::InvoiceTotals;
