use std::collections::BTreeMap;
use std::iter;
use std::net::IpAddr;
use std::path::Path;
use once_cell::sync::OnceCell;
use crate::capture::{Capture, Packet};
use crate::compare::Signal;
use crate::{Error, Result};
use super::{Arrival, Hosts, StallReport, Stats, Summary, stall};

// One year of per-second buckets.
const MAX_SPAN: f64 = 365.0 * 24.0 * 3600.0;

#[derive(Debug)]
pub struct Features {
    capture:  Capture,
    deltas:   OnceCell<Vec<f64>>,
    lengths:  OnceCell<Vec<f64>>,
    counts:   OnceCell<Vec<f64>>,
    hosts:    OnceCell<Hosts>,
    download: OnceCell<Vec<f64>>,
}

impl Features {
    pub fn new(capture: Capture) -> Self {
        Self {
            capture:  capture,
            deltas:   OnceCell::new(),
            lengths:  OnceCell::new(),
            counts:   OnceCell::new(),
            hosts:    OnceCell::new(),
            download: OnceCell::new(),
        }
    }

    pub fn capture(&self) -> &Capture {
        &self.capture
    }

    pub fn file(&self) -> &Path {
        self.capture.file()
    }

    pub fn signal(&self, signal: Signal) -> Result<&[f64]> {
        match signal {
            Signal::Delta            => self.deltas(),
            Signal::Length           => self.lengths(),
            Signal::PacketsPerSecond => self.packets_per_second(),
        }
    }

    pub fn deltas(&self) -> Result<&[f64]> {
        self.deltas.get_or_try_init(|| {
            self.capture.require(1)?;
            let times = self.capture.times();
            let diffs = times.windows(2).map(|w| w[1] - w[0]);
            Ok(iter::once(0.0).chain(diffs).collect())
        }).map(Vec::as_slice)
    }

    pub fn lengths(&self) -> Result<&[f64]> {
        self.lengths.get_or_try_init(|| {
            self.capture.require(1)?;
            Ok(self.packets().iter().map(|p| p.length as f64).collect())
        }).map(Vec::as_slice)
    }

    // Dense packet count per second, index is the second since t0.
    pub fn packets_per_second(&self) -> Result<&[f64]> {
        self.counts.get_or_try_init(|| {
            self.capture.require(1)?;
            let times = self.capture.times().iter();
            Ok(per_second(times.map(|&t| (t, 1.0)), self.span()?))
        }).map(Vec::as_slice)
    }

    pub fn hosts(&self) -> Result<&Hosts> {
        self.hosts.get_or_try_init(|| {
            self.capture.require(1)?;
            Ok(Hosts::classify(self.packets()))
        })
    }

    pub fn partners(&self) -> Result<&[IpAddr]> {
        Ok(self.hosts()?.partners())
    }

    pub fn partner_count(&self) -> Result<usize> {
        Ok(self.partners()?.len())
    }

    // Packets involving each host, summed over the host pool.
    pub fn host_communications(&self) -> Result<usize> {
        let hosts = self.hosts()?;
        Ok(hosts.hosts().iter().map(|host| {
            self.packets().iter().filter(|p| p.src.addr == *host || p.dst.addr == *host).count()
        }).sum())
    }

    pub fn communication_weight(&self, partner: &IpAddr, percentage: bool) -> Result<f64> {
        let hosts = self.hosts()?;
        let count = self.packets().iter().filter(|p| {
            let involved = p.src.addr == *partner || p.dst.addr == *partner;
            involved && (hosts.is_host(&p.src.addr) || hosts.is_host(&p.dst.addr))
        }).count() as f64;

        if !percentage {
            return Ok(count);
        }

        match self.host_communications()? {
            0 => Ok(0.0),
            n => Ok(count / n as f64),
        }
    }

    pub fn partner_weights(&self) -> Result<BTreeMap<IpAddr, f64>> {
        self.partners()?.iter().map(|partner| {
            Ok((*partner, self.communication_weight(partner, false)?))
        }).collect()
    }

    pub fn conversations(&self) -> Result<BTreeMap<(IpAddr, IpAddr), usize>> {
        self.capture.require(1)?;
        let mut map = BTreeMap::new();
        for p in self.packets() {
            *map.entry(p.pair()).or_insert(0) += 1;
        }
        Ok(map)
    }

    pub fn total_downloaded_kbit(&self) -> Result<f64> {
        let hosts = self.hosts()?;
        Ok(kbit(self.bytes(|p| hosts.downloads(p))))
    }

    pub fn total_uploaded_kbit(&self) -> Result<f64> {
        let hosts = self.hosts()?;
        Ok(kbit(self.bytes(|p| hosts.uploads(p))))
    }

    pub fn download_rate_kbit_per_sec(&self) -> Result<f64> {
        let total = self.total_downloaded_kbit()?;
        Ok(total / self.capture.duration()?)
    }

    pub fn upload_rate_kbit_per_sec(&self) -> Result<f64> {
        let total = self.total_uploaded_kbit()?;
        Ok(total / self.capture.duration()?)
    }

    // Normalized time of the download packet that pushes the received
    // volume past fraction of the total, or of the last download packet
    // when the volume never exceeds it.
    pub fn page_load_time(&self, fraction: f64) -> Result<f64> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(Error::Parameter(format!("page fraction {} outside (0, 1]", fraction)));
        }

        let hosts  = self.hosts()?;
        let target = fraction * self.total_downloaded_kbit()?;

        let mut bytes = 0;
        let mut last  = None;

        for (p, &t) in self.packets().iter().zip(self.capture.times()) {
            if !hosts.downloads(p) {
                continue;
            }
            bytes += p.length;
            last   = Some(t);
            if kbit(bytes) > target {
                break;
            }
        }

        last.ok_or(Error::InsufficientData { required: 1, actual: 0 })
    }

    pub fn page_load_time_total(&self) -> Result<f64> {
        self.page_load_time(1.0)
    }

    pub fn page_load_time_half(&self) -> Result<f64> {
        self.page_load_time(0.5)
    }

    pub fn page_load_time_quarter(&self) -> Result<f64> {
        self.page_load_time(0.25)
    }

    pub fn page_load_time_three_quarters(&self) -> Result<f64> {
        self.page_load_time(0.75)
    }

    // Dense kbit received by the host pool per second since t0.
    pub fn download_per_second(&self) -> Result<&[f64]> {
        self.download.get_or_try_init(|| {
            let hosts = self.hosts()?;
            let rx = self.packets().iter().zip(self.capture.times()).filter(|(p, _)| {
                hosts.downloads(p)
            });
            Ok(per_second(rx.map(|(p, &t)| (t, kbit(p.length))), self.span()?))
        }).map(Vec::as_slice)
    }

    pub fn stall_report(&self, alpha: f64, bitrate: f64) -> Result<StallReport> {
        if !(alpha > 0.0) || !(bitrate > 0.0) {
            let msg = format!("buffer threshold {} and bitrate {} must be positive", alpha, bitrate);
            return Err(Error::Parameter(msg));
        }

        self.capture.duration()?;

        Ok(stall::simulate(self.download_per_second()?, alpha, bitrate))
    }

    pub fn total_stall_time(&self, alpha: f64, bitrate: f64) -> Result<f64> {
        Ok(self.stall_report(alpha, bitrate)?.stall_time)
    }

    pub fn total_stall_count(&self, alpha: f64, bitrate: f64) -> Result<usize> {
        Ok(self.stall_report(alpha, bitrate)?.stall_count)
    }

    pub fn initial_delay(&self, alpha: f64, bitrate: f64) -> Result<f64> {
        Ok(self.stall_report(alpha, bitrate)?.initial_delay)
    }

    pub fn stats(&self) -> Result<Stats> {
        Ok(Stats {
            deltas:  Summary::new(self.deltas()?),
            lengths: Summary::new(self.lengths()?),
            arrival: Arrival::new(self.capture.times()),
        })
    }

    fn packets(&self) -> &[Packet] {
        self.capture.packets()
    }

    fn span(&self) -> Result<f64> {
        let span = self.capture.times().iter().copied().fold(0.0, f64::max);
        if span > MAX_SPAN {
            let msg = format!("{} spans {:.0}s, timestamps out of range", self.file().display(), span);
            return Err(Error::Decode(msg));
        }
        Ok(span)
    }

    fn bytes<F: Fn(&Packet) -> bool>(&self, filter: F) -> usize {
        self.packets().iter().filter(|p| filter(p)).map(|p| p.length).sum()
    }
}

pub fn kbit(bytes: usize) -> f64 {
    bytes as f64 * 8.0 / 1000.0
}

fn per_second<I: Iterator<Item = (f64, f64)>>(values: I, last: f64) -> Vec<f64> {
    let mut buckets = vec![0.0; last.floor() as usize + 1];
    for (t, v) in values {
        if let Some(bucket) = buckets.get_mut(t.max(0.0).floor() as usize) {
            *bucket += v;
        }
    }
    buckets
}
