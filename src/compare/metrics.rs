use statrs::distribution::{ChiSquared, ContinuousCDF};
use crate::{Error, Result};

// Goodness-of-fit p-value of observed against expected counts. Bins with
// no expected mass are left out; observed mass in such a bin makes the
// statistic infinite.
pub fn chi_squared(expected: &[f64], observed: &[f64]) -> Result<f64> {
    let mut stat = 0.0;
    let mut bins = 0usize;

    for (&e, &o) in expected.iter().zip(observed) {
        if e > 0.0 {
            stat += (o - e).powi(2) / e;
            bins += 1;
        } else if o > 0.0 {
            return Ok(0.0);
        }
    }

    let dof = match bins.saturating_sub(1) {
        0 => return Ok(1.0),
        n => n as f64,
    };

    let dist = ChiSquared::new(dof).map_err(|e| Error::Parameter(e.to_string()))?;

    Ok(dist.sf(stat).max(0.0).min(1.0))
}

pub fn ks_statistic(a: &[f64], b: &[f64]) -> f64 {
    let a = sorted(a);
    let b = sorted(b);

    let (n, m) = (a.len() as f64, b.len() as f64);
    let (mut i, mut j) = (0, 0);
    let mut d = 0.0f64;

    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x { i += 1; }
        while j < b.len() && b[j] <= x { j += 1; }
        d = d.max((i as f64 / n - j as f64 / m).abs());
    }

    d
}

// Two-sample Kolmogorov-Smirnov p-value using the asymptotic
// distribution with Stephens' small-sample correction.
pub fn kolmogorov_smirnov(a: &[f64], b: &[f64]) -> f64 {
    let d  = ks_statistic(a, b);
    let n  = a.len() as f64;
    let m  = b.len() as f64;
    let en = (n * m / (n + m)).sqrt();
    kolmogorov((en + 0.12 + 0.11 / en) * d)
}

// Survival function of the Kolmogorov distribution. Below z = 0.05 the
// series underflows and the survival is 1 to double precision.
pub fn kolmogorov(z: f64) -> f64 {
    if !(z >= 0.05) {
        return 1.0;
    }

    let cdf = if z < 1.18 {
        let y = (-1.233_700_550_136_169_8 / (z * z)).exp();
        2.256_758_334_191_025 * (-y.ln()).sqrt() * (y + y.powi(9) + y.powi(25) + y.powi(49))
    } else {
        let x = (-2.0 * z * z).exp();
        1.0 - 2.0 * (x - x.powi(4) + x.powi(9))
    };

    match 1.0 - cdf {
        p if p.is_nan() => 1.0,
        p               => p.max(0.0).min(1.0),
    }
}

// Scales a sample to [0, 1]. A constant sample collapses to 1/len.
pub fn normalize(sample: &[f64]) -> Vec<f64> {
    let min = sample.iter().copied().fold(f64::INFINITY, f64::min);
    let max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max > min {
        sample.iter().map(|x| (x - min) / (max - min)).collect()
    } else {
        vec![1.0 / sample.len() as f64; sample.len()]
    }
}

// First Wasserstein distance between the empirical distributions.
pub fn earth_mover(u: &[f64], v: &[f64]) -> f64 {
    let u = sorted(u);
    let v = sorted(v);

    let mut all = u.iter().chain(v.iter()).copied().collect::<Vec<_>>();
    all.sort_by(f64::total_cmp);

    let cdf = |s: &[f64], x: f64| s.partition_point(|&y| y <= x) as f64 / s.len() as f64;

    all.windows(2).map(|w| {
        (cdf(&u, w[0]) - cdf(&v, w[0])).abs() * (w[1] - w[0])
    }).sum()
}

pub fn dynamic_time_warping(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut prev = vec![f64::INFINITY; b.len() + 1];
    let mut curr = vec![f64::INFINITY; b.len() + 1];
    prev[0] = 0.0;

    for x in a {
        curr[0] = f64::INFINITY;
        for (j, y) in b.iter().enumerate() {
            let best = prev[j].min(prev[j + 1]).min(curr[j]);
            curr[j + 1] = (x - y).abs() + best;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn sorted(sample: &[f64]) -> Vec<f64> {
    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}
