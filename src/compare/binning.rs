use log::trace;
use statrs::statistics::{Data, Max, Min, OrderStatistics};

#[derive(Clone, Debug, PartialEq)]
pub struct Bins {
    pub edges:     Vec<f64>,
    pub original:  Vec<f64>,
    pub candidate: Vec<f64>,
}

struct Histogram {
    counts: Vec<f64>,
    under:  f64,
    over:   f64,
}

pub fn count(n: usize) -> usize {
    let bins = match n {
        n if n < 35 => n,
        n           => (1.88 * (n as f64).powf(0.4)).floor() as usize,
    };
    bins.max(1)
}

// Equal-frequency bin edges over the sample. Duplicate edges are dropped,
// leaving fewer and wider bins. A constant sample gets a single bin.
pub fn edges(sample: &[f64], bins: usize) -> Vec<f64> {
    let mut data = Data::new(sample.to_vec());

    let mut edges: Vec<f64> = Vec::with_capacity(bins + 1);
    for k in 0..=bins {
        let q = data.quantile(k as f64 / bins as f64);
        match edges.last() {
            Some(&last) if !(q > last) => (),
            _                          => edges.push(q),
        }
    }

    if edges.len() < 2 {
        let min = data.min();
        let max = data.max();
        trace!("degenerate quantiles, single bin [{}, {}]", min, max);
        return vec![min, max];
    }

    edges
}

// Histograms both samples over the original's edges and rescales the
// candidate to the original's total mass. Candidate values outside the
// original range are counted in the outermost bins. Only a zero-width
// original range gets extra outer bins for them, since nothing can be
// clamped into it.
pub fn equalize(original: &[f64], candidate: &[f64]) -> Bins {
    let mut edges = edges(original, count(original.len()));

    let orig = histogram(original, &edges);
    let cand = histogram(candidate, &edges);

    let mut expected = orig.counts;
    let mut observed = cand.counts;

    let first = edges[0];
    let last  = edges[edges.len() - 1];

    if last > first {
        let end = observed.len() - 1;
        observed[0]   += cand.under;
        observed[end] += cand.over;
    } else {
        if cand.under > 0.0 {
            let min = candidate.iter().copied().fold(f64::INFINITY, f64::min);
            edges.insert(0, min);
            expected.insert(0, orig.under);
            observed.insert(0, cand.under);
        }

        if cand.over > 0.0 {
            let max = candidate.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            edges.push(max);
            expected.push(orig.over);
            observed.push(cand.over);
        }
    }

    let total = expected.iter().sum::<f64>();
    let mass  = observed.iter().sum::<f64>();

    if mass > 0.0 {
        let scale = total / mass;
        observed.iter_mut().for_each(|c| *c *= scale);
    }

    Bins {
        edges:     edges,
        original:  expected,
        candidate: observed,
    }
}

impl Bins {
    pub fn mass(&self) -> f64 {
        self.original.iter().sum()
    }

    pub fn normalized(&self) -> (Vec<f64>, Vec<f64>) {
        let mass  = self.mass();
        let scale = |v: &[f64]| v.iter().map(|x| x / mass).collect::<Vec<_>>();
        (scale(&self.original), scale(&self.candidate))
    }
}

pub fn cumulative(counts: &[f64]) -> Vec<f64> {
    counts.iter().scan(0.0, |sum, &c| {
        *sum += c;
        Some(*sum)
    }).collect()
}

fn histogram(sample: &[f64], edges: &[f64]) -> Histogram {
    let bins  = edges.len() - 1;
    let first = edges[0];
    let last  = edges[bins];

    let mut hist = Histogram {
        counts: vec![0.0; bins],
        under:  0.0,
        over:   0.0,
    };

    for &v in sample {
        if v < first {
            hist.under += 1.0;
        } else if v > last {
            hist.over += 1.0;
        } else {
            let index = edges.partition_point(|&e| e <= v) - 1;
            hist.counts[index.min(bins - 1)] += 1.0;
        }
    }

    hist
}
