use std::path::{Path, PathBuf};
use once_cell::sync::OnceCell;
use crate::{Error, Result};
use super::Packet;

#[derive(Debug)]
pub struct Capture {
    file:    PathBuf,
    packets: Vec<Packet>,
    times:   OnceCell<Vec<f64>>,
}

impl Capture {
    pub fn new<P: Into<PathBuf>>(file: P, packets: Vec<Packet>) -> Self {
        Self {
            file:    file.into(),
            packets: packets,
            times:   OnceCell::new(),
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn start(&self) -> Option<f64> {
        self.packets.first().map(|p| p.time)
    }

    // Timestamps relative to the first packet. Packets keep their
    // absolute time so normalizing can never be applied twice.
    pub fn times(&self) -> &[f64] {
        self.times.get_or_init(|| {
            let t0 = self.start().unwrap_or(0.0);
            self.packets.iter().map(|p| p.time - t0).collect()
        })
    }

    pub fn require(&self, required: usize) -> Result<()> {
        match self.len() {
            n if n < required => Err(Error::InsufficientData { required, actual: n }),
            _                 => Ok(()),
        }
    }

    pub fn duration(&self) -> Result<f64> {
        self.require(1)?;
        match self.times().last() {
            Some(&t) if t > 0.0 => Ok(t),
            _                   => Err(Error::ZeroDuration),
        }
    }
}
