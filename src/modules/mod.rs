pub mod invoices;
pub mod lineitems;
pub mod reports;
