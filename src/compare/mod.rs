pub use comparator::{compare, score, Scores};
pub use report::{Comparison, Family, Polarity, Report, Series, Signal};

pub mod binning;
pub mod metrics;

mod comparator;
mod report;
