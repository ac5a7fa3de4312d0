use std::collections::BTreeMap;
use std::fmt;
use std::iter::FromIterator;
use serde::{Serialize, Deserialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Family {
    #[serde(rename = "Chi_squared_test")]
    ChiSquared,
    #[serde(rename = "Kolmogorov_smirnov_test")]
    KolmogorovSmirnov,
    #[serde(rename = "Earth_mover_distance")]
    EarthMover,
    #[serde(rename = "Dynamic_time_warping")]
    DynamicTimeWarping,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Polarity {
    PValue,
    Distance,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Signal {
    Delta,
    Length,
    PacketsPerSecond,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    scores: BTreeMap<Family, BTreeMap<Signal, f64>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub edges:         Vec<f64>,
    pub original:      Vec<f64>,
    pub candidate:     Vec<f64>,
    pub original_cdf:  Vec<f64>,
    pub candidate_cdf: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison {
    pub report: Report,
    pub series: BTreeMap<Signal, Series>,
}

impl Family {
    pub const ALL: [Family; 4] = [
        Family::ChiSquared,
        Family::KolmogorovSmirnov,
        Family::EarthMover,
        Family::DynamicTimeWarping,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Family::ChiSquared         => "Chi_squared_test",
            Family::KolmogorovSmirnov  => "Kolmogorov_smirnov_test",
            Family::EarthMover         => "Earth_mover_distance",
            Family::DynamicTimeWarping => "Dynamic_time_warping",
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self {
            Family::ChiSquared | Family::KolmogorovSmirnov => Polarity::PValue,
            Family::EarthMover | Family::DynamicTimeWarping => Polarity::Distance,
        }
    }
}

impl Signal {
    pub const ALL: [Signal; 3] = [
        Signal::Delta,
        Signal::Length,
        Signal::PacketsPerSecond,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Signal::Delta            => "Delta",
            Signal::Length           => "Length",
            Signal::PacketsPerSecond => "PacketsPerSecond",
        }
    }
}

impl Report {
    pub fn get(&self, family: Family, signal: Signal) -> Option<f64> {
        self.scores.get(&family)?.get(&signal).copied()
    }

    pub fn families(&self) -> impl Iterator<Item = Family> + '_ {
        self.scores.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Family, Signal, f64)> + '_ {
        self.scores.iter().flat_map(|(&family, signals)| {
            signals.iter().map(move |(&signal, &score)| (family, signal, score))
        })
    }

    pub fn len(&self) -> usize {
        self.scores.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(Family, Signal, f64)> for Report {
    fn from_iter<I: IntoIterator<Item = (Family, Signal, f64)>>(iter: I) -> Self {
        let mut scores = BTreeMap::new();
        for (family, signal, score) in iter {
            scores.entry(family).or_insert_with(BTreeMap::new).insert(signal, score);
        }
        Self { scores }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
