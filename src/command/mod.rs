use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{debug, info};
use serde::Serialize;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag::register;
use crate::args::opt;
use crate::capture;
use crate::features::Features;
use crate::pool::Pool;

pub use compare::compare;
pub use filter::filter;
pub use stats::stats;

mod compare;
mod filter;
mod stats;

pub fn load(path: &Path) -> Result<Features> {
    let capture = capture::read(path).with_context(|| {
        format!("reading {}", path.display())
    })?;
    debug!("{}: {} packets", path.display(), capture.len());
    Ok(Features::new(capture))
}

pub fn pool(args: &ArgMatches) -> Result<Pool> {
    let workers  = opt(args.value_of("processes"))?;
    let shutdown = Arc::new(AtomicBool::new(false));
    register(SIGTERM, shutdown.clone())?;
    register(SIGINT,  shutdown.clone())?;
    Ok(Pool::new(workers, shutdown))
}

pub fn write<T: Serialize>(output: &Path, value: &T) -> Result<()> {
    let file = File::create(output).with_context(|| {
        format!("creating {}", output.display())
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    info!("results written to {}", output.display());
    Ok(())
}

fn name(path: &Path) -> String {
    path.display().to_string()
}
