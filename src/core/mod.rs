pub mod cache;
pub mod diagnostics;
pub mod error;
pub mod money;

pub use cache::TtlCache;
pub use diagnostics::{DataWarning, Diagnostics};
pub use error::{AppError, Result};
