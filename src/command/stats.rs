use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::PathBuf;
use anyhow::Result;
use clap::{ArgMatches, value_t};
use log::{info, warn};
use serde::Serialize;
use crate::args::{exclude, paths};
use crate::features::{Features, StallReport, Stats};
use super::{load, name, pool, write};

#[derive(Debug, Serialize)]
pub struct FileStats {
    pub packets:             usize,
    pub duration:            Option<f64>,
    pub hosts:               Vec<IpAddr>,
    pub partners:            Vec<IpAddr>,
    pub partner_weights:     BTreeMap<IpAddr, f64>,
    pub host_communications: usize,
    pub downloaded_kbit:     f64,
    pub uploaded_kbit:       f64,
    pub download_rate:       Option<f64>,
    pub upload_rate:         Option<f64>,
    pub page_load:           Option<PageLoad>,
    pub stall:               Option<StallReport>,
    pub stats:               Stats,
}

#[derive(Debug, Serialize)]
pub struct PageLoad {
    pub quarter:        f64,
    pub half:           f64,
    pub three_quarters: f64,
    pub total:          f64,
}

pub fn stats(args: &ArgMatches) -> Result<()> {
    let output  = value_t!(args, "output",  PathBuf)?;
    let alpha   = value_t!(args, "alpha",   f64)?;
    let bitrate = value_t!(args, "bitrate", f64)?;
    let exclude = exclude(args)?;
    let files   = paths(args, "files", &exclude);
    let pool    = pool(args)?;

    info!("analysing {} captures", files.len());

    let done = pool.map(files, move |path| {
        summarize(&load(path)?, alpha, bitrate)
    });

    let mut results = BTreeMap::new();
    for (path, result) in done {
        match result {
            Ok(stats) => { results.insert(name(&path), stats); },
            Err(_)    => warn!("skipping {}", path.display()),
        }
    }

    if results.is_empty() {
        warn!("no results generated");
        return Ok(());
    }

    write(&output, &results)
}

pub fn summarize(features: &Features, alpha: f64, bitrate: f64) -> Result<FileStats> {
    let capture = features.capture();

    Ok(FileStats {
        packets:             capture.len(),
        duration:            capture.duration().ok(),
        hosts:               features.hosts()?.hosts().to_vec(),
        partners:            features.partners()?.to_vec(),
        partner_weights:     features.partner_weights()?,
        host_communications: features.host_communications()?,
        downloaded_kbit:     features.total_downloaded_kbit()?,
        uploaded_kbit:       features.total_uploaded_kbit()?,
        download_rate:       features.download_rate_kbit_per_sec().ok(),
        upload_rate:         features.upload_rate_kbit_per_sec().ok(),
        page_load:           page_load(features),
        stall:               features.stall_report(alpha, bitrate).ok(),
        stats:               features.stats()?,
    })
}

fn page_load(features: &Features) -> Option<PageLoad> {
    Some(PageLoad {
        quarter:        features.page_load_time_quarter().ok()?,
        half:           features.page_load_time_half().ok()?,
        three_quarters: features.page_load_time_three_quarters().ok()?,
        total:          features.page_load_time_total().ok()?,
    })
}
