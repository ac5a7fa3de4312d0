use serde::Serialize;
use crate::compare::{self, Comparison};
use crate::features::Features;
use crate::Result;
use super::{Thresholds, vote};

pub struct Sieve {
    original:   Features,
    thresholds: Thresholds,
}

#[derive(Debug, Serialize)]
pub struct Verdict {
    pub similar:    bool,
    pub comparison: Comparison,
}

impl Sieve {
    pub fn new(original: Features, thresholds: Thresholds) -> Self {
        Self { original, thresholds }
    }

    pub fn judge(&self, candidate: &Features) -> Result<Verdict> {
        let comparison = compare::compare(&self.original, candidate)?;
        let similar    = vote(&comparison.report, &self.thresholds)?;
        Ok(Verdict { similar, comparison })
    }

    pub fn sieve(&self, candidate: &Features) -> Result<bool> {
        Ok(self.judge(candidate)?.similar)
    }
}
