use std::fmt;
use crate::compare::{Family, Signal};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, PartialEq)]
pub enum Error {
    InsufficientData { required: usize, actual: usize },
    ZeroDuration,
    InsufficientSample { signal: Signal, size: usize },
    Configuration(String),
    Decode(String),
    Parameter(String),
}

impl Error {
    pub fn missing(family: Family) -> Self {
        Error::Configuration(format!("missing threshold for {}", family))
    }
}

impl From<pcap::Error> for Error {
    fn from(err: pcap::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Configuration(err.to_string())
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Error::InsufficientData { required, actual } => {
                write!(f, "capture has {} packets, need at least {}", actual, required)
            },
            Error::ZeroDuration => {
                write!(f, "capture spans zero seconds")
            },
            Error::InsufficientSample { signal, size } => {
                write!(f, "{} sample of size {} is too small to compare", signal, size)
            },
            Error::Configuration(msg) => write!(f, "configuration error: {}", msg),
            Error::Decode(msg)        => write!(f, "decode error: {}", msg),
            Error::Parameter(msg)     => write!(f, "invalid parameter: {}", msg),
        }
    }
}
