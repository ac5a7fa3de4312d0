pub use sieve::{Sieve, Verdict};
pub use thresholds::Thresholds;
pub use vote::vote;

mod sieve;
mod thresholds;
mod vote;
