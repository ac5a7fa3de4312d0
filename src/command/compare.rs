use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Result;
use clap::{ArgMatches, value_t};
use log::{info, warn};
use serde::Serialize;
use crate::args::{exclude, file, paths};
use crate::compare::{self, Comparison};
use super::{load, name, pool, write};

#[derive(Debug, Serialize)]
pub struct Comparisons {
    pub original:    String,
    pub comparisons: BTreeMap<String, Comparison>,
}

pub fn compare(args: &ArgMatches) -> Result<()> {
    let output   = value_t!(args, "output", PathBuf)?;
    let original = file(args.value_of("original"))?;
    let exclude  = exclude(args)?;
    let targets  = paths(args, "targets", &exclude);
    let pool     = pool(args)?;

    info!("comparing {} candidates against {}", targets.len(), original.display());

    let reference = Arc::new(load(&original)?);

    let done = pool.map(targets, move |path| {
        let candidate = load(path)?;
        Ok(compare::compare(&reference, &candidate)?)
    });

    let mut comparisons = BTreeMap::new();
    for (path, result) in done {
        match result {
            Ok(c)  => { comparisons.insert(name(&path), c); },
            Err(_) => warn!("skipping {}", path.display()),
        }
    }

    if comparisons.is_empty() {
        warn!("no results generated");
        return Ok(());
    }

    write(&output, &Comparisons {
        original:    name(&original),
        comparisons: comparisons,
    })
}
