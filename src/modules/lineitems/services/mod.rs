pub mod normalizer;
pub mod tax_calculator;

pub use normalizer::Normalizer;
pub use tax_calculator::TaxCalculator;
