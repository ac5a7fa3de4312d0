use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use log::debug;
use serde::{Serialize, Deserialize};
use crate::compare::{Family, Polarity};
use crate::{Error, Result};

static DEFAULT: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/resources/thresholds.json"));

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Thresholds {
    limits: BTreeMap<Family, f64>,
}

impl Thresholds {
    pub fn builtin() -> Result<Self> {
        DEFAULT.parse()
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("loading thresholds from {}", path.display());
        let text = fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("{}: {}", path.display(), e))
        })?;
        text.parse()
    }

    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None       => Self::builtin(),
        }
    }

    pub fn get(&self, family: Family) -> Option<f64> {
        self.limits.get(&family).copied()
    }

    pub fn require(&self, family: Family) -> Result<f64> {
        self.get(family).ok_or_else(|| Error::missing(family))
    }

    pub fn remove(&mut self, family: Family) -> Option<f64> {
        self.limits.remove(&family)
    }

    // Whether a score lies on the accepting side of the limit. A NaN
    // score never passes.
    pub fn passes(family: Family, score: f64, limit: f64) -> bool {
        match family.polarity() {
            Polarity::PValue   => score >= limit,
            Polarity::Distance => score <= limit,
        }
    }
}

impl FromStr for Thresholds {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
