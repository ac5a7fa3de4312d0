pub use features::{Features, kbit};
pub use hosts::Hosts;
pub use stall::{Player, State, StallReport, simulate};
pub use summary::{Arrival, Stats, Summary};

mod features;
mod hosts;
mod stall;
mod summary;

#[cfg(test)]
mod test;
