use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Result;
use clap::{ArgMatches, value_t};
use log::{info, warn};
use serde::Serialize;
use crate::args::{exclude, file, paths};
use crate::sieve::{Sieve, Thresholds};
use super::{load, name, pool, write};

#[derive(Debug, Default, Serialize)]
pub struct Filtered {
    pub original:   String,
    pub similar:    Vec<String>,
    pub dissimilar: Vec<String>,
}

pub fn filter(args: &ArgMatches) -> Result<()> {
    let output   = value_t!(args, "output", PathBuf)?;
    let original = file(args.value_of("original"))?;
    let json     = args.value_of("json").map(PathBuf::from);
    let exclude  = exclude(args)?;
    let targets  = paths(args, "targets", &exclude);
    let pool     = pool(args)?;

    let thresholds = Thresholds::load_or_builtin(json.as_deref())?;

    info!("filtering {} candidates against {}", targets.len(), original.display());

    let sieve = Arc::new(Sieve::new(load(&original)?, thresholds));

    let done = pool.map(targets, move |path| {
        Ok(sieve.sieve(&load(path)?)?)
    });

    let mut filtered = Filtered {
        original: name(&original),
        ..Default::default()
    };

    for (path, result) in done {
        match result {
            Ok(true)  => filtered.similar.push(name(&path)),
            Ok(false) => filtered.dissimilar.push(name(&path)),
            Err(_)    => warn!("skipping {}", path.display()),
        }
    }

    info!("{} similar, {} dissimilar", filtered.similar.len(), filtered.dissimilar.len());

    write(&output, &filtered)
}
