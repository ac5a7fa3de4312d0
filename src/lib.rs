pub mod args;
pub mod capture;
pub mod command;
pub mod compare;
pub mod features;
pub mod pool;
pub mod sieve;

pub use error::{Error, Result};

mod error;
