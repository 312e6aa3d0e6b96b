// Line items module

pub mod models;
pub mod services;

pub use models::{ComputeMode, ComputedLine, LineItem};
pub use services::{Normalizer, TaxCalculator};
