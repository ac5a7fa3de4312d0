use std::collections::BTreeMap;
use log::debug;
use crate::compare::{Family, Report};
use crate::Result;
use super::Thresholds;

// Unanimous vote over every (family, signal) score. Every family in the
// report must have a limit before any score is judged, so a missing limit
// is reported no matter where the first failing score sits.
pub fn vote(report: &Report, thresholds: &Thresholds) -> Result<bool> {
    let limits = report.families().map(|family| {
        Ok((family, thresholds.require(family)?))
    }).collect::<Result<BTreeMap<Family, f64>>>()?;

    let failed = report.iter().find(|&(family, _, score)| {
        match limits.get(&family) {
            Some(&limit) => !Thresholds::passes(family, score, limit),
            None         => true,
        }
    });

    match failed {
        Some((family, signal, score)) => {
            debug!("{} {} failed with {}", family, signal, score);
            Ok(false)
        },
        None => Ok(true),
    }
}
