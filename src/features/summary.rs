use std::cmp::Ordering;
use serde::Serialize;
use statrs::statistics::{Data, Distribution, Max, Min, OrderStatistics};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stats {
    pub deltas:  Summary,
    pub lengths: Summary,
    pub arrival: Arrival,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub count:                usize,
    pub mean:                 f64,
    pub std:                  f64,
    pub min:                  f64,
    pub max:                  f64,
    pub variance:             f64,
    pub variance_coefficient: Option<f64>,
    pub mode:                 f64,
    pub kurtosis:             f64,
    pub skewness:             f64,
    pub median:               f64,
    pub autocorrelation:      Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Arrival {
    pub min:    f64,
    pub max:    f64,
    pub median: f64,
}

impl Summary {
    // Moments are the biased (population) estimators, std is the sample
    // estimator. The sample must not be empty.
    pub fn new(sample: &[f64]) -> Self {
        let mut data = Data::new(sample.to_vec());

        let count = sample.len();
        let mean  = data.mean().unwrap_or(0.0);
        let std   = match count {
            n if n > 1 => data.std_dev().unwrap_or(0.0),
            _          => 0.0,
        };

        let moment = |k: i32| {
            sample.iter().map(|x| (x - mean).powi(k)).sum::<f64>() / count as f64
        };

        let m2 = moment(2);
        let (skewness, kurtosis) = match m2 {
            m2 if m2 > 0.0 => (moment(3) / m2.powf(1.5), moment(4) / (m2 * m2) - 3.0),
            _              => (0.0, 0.0),
        };

        let variance_coefficient = match mean {
            mean if mean != 0.0 => Some(m2.sqrt() / mean),
            _                   => None,
        };

        Self {
            count:                count,
            mean:                 mean,
            std:                  std,
            min:                  data.min(),
            max:                  data.max(),
            variance:             m2,
            variance_coefficient: variance_coefficient,
            mode:                 mode(sample),
            kurtosis:             kurtosis,
            skewness:             skewness,
            median:               data.median(),
            autocorrelation:      autocorrelation(sample),
        }
    }
}

impl Arrival {
    pub fn new(times: &[f64]) -> Self {
        let mut data = Data::new(times.to_vec());
        Self {
            min:    data.min(),
            max:    data.max(),
            median: data.median(),
        }
    }
}

// Lag-1 Pearson correlation of the sample with itself shifted by one.
// Undefined when fewer than two pairs exist or either side is constant.
fn autocorrelation(sample: &[f64]) -> Option<f64> {
    if sample.len() < 3 {
        return None;
    }

    let head = &sample[..sample.len() - 1];
    let tail = &sample[1..];
    let n    = head.len() as f64;

    let mx = head.iter().sum::<f64>() / n;
    let my = tail.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in head.iter().zip(tail) {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx) * (x - mx);
        syy += (y - my) * (y - my);
    }

    match sxx * syy {
        d if d > 0.0 => Some((sxy / d.sqrt()).max(-1.0).min(1.0)),
        _            => None,
    }
}

// Most frequent value, smallest one on ties.
fn mode(sample: &[f64]) -> f64 {
    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut best = (0.0, 0usize);
    let mut iter = sorted.iter().peekable();

    while let Some(&value) = iter.next() {
        let mut n = 1;
        while iter.peek().map(|&&v| v.total_cmp(&value)) == Some(Ordering::Equal) {
            iter.next();
            n += 1;
        }
        if n > best.1 {
            best = (value, n);
        }
    }

    best.0
}
