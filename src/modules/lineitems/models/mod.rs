mod computed_line;
mod line_item;

pub use computed_line::{ComputeMode, ComputedLine};
pub use line_item::LineItem;
