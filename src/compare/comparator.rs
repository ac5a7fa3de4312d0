use std::collections::BTreeMap;
use log::debug;
use crate::features::Features;
use crate::{Error, Result};
use super::{Comparison, Family, Series, Signal};
use super::binning::{self, Bins};
use super::metrics;

pub struct Scores {
    pub chi_squared: f64,
    pub ks:          f64,
    pub emd:         f64,
    pub dtw:         f64,
}

pub fn compare(original: &Features, candidate: &Features) -> Result<Comparison> {
    let mut scores = Vec::with_capacity(Family::ALL.len() * Signal::ALL.len());
    let mut series = BTreeMap::new();

    for &signal in Signal::ALL.iter() {
        let a = sample(signal, original.signal(signal)?)?;
        let b = sample(signal, candidate.signal(signal)?)?;

        let bins = binning::equalize(a, b);
        let s    = score(a, b, &bins)?;

        debug!("{}: {} -> {}: chi {:.4} ks {:.4} emd {:.4} dtw {:.4}",
               signal,
               original.file().display(),
               candidate.file().display(),
               s.chi_squared, s.ks, s.emd, s.dtw,
        );

        scores.push((Family::ChiSquared,         signal, s.chi_squared));
        scores.push((Family::KolmogorovSmirnov,  signal, s.ks));
        scores.push((Family::EarthMover,         signal, s.emd));
        scores.push((Family::DynamicTimeWarping, signal, s.dtw));

        series.insert(signal, Series::from(bins));
    }

    Ok(Comparison {
        report: scores.into_iter().collect(),
        series: series,
    })
}

pub fn score(a: &[f64], b: &[f64], bins: &Bins) -> Result<Scores> {
    let (x, y) = bins.normalized();
    Ok(Scores {
        chi_squared: metrics::chi_squared(&bins.original, &bins.candidate)?,
        ks:          metrics::kolmogorov_smirnov(a, b),
        emd:         metrics::earth_mover(&metrics::normalize(a), &metrics::normalize(b)),
        dtw:         metrics::dynamic_time_warping(&x, &y),
    })
}

fn sample(signal: Signal, values: &[f64]) -> Result<&[f64]> {
    match values.len() {
        n if n < 2 => Err(Error::InsufficientSample { signal, size: n }),
        _          => Ok(values),
    }
}

impl From<Bins> for Series {
    fn from(bins: Bins) -> Self {
        Self {
            original_cdf:  binning::cumulative(&bins.original),
            candidate_cdf: binning::cumulative(&bins.candidate),
            edges:         bins.edges,
            original:      bins.original,
            candidate:     bins.candidate,
        }
    }
}
