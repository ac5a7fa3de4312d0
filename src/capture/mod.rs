use std::path::Path;
use crate::Result;

pub mod decode;
pub mod minlog;

pub use capture::Capture;
pub use decode::{decode, frame};
pub use packet::{Addr, Packet, Protocol};

mod capture;
mod packet;

pub fn read(path: &Path) -> Result<Capture> {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("log") | Some("csv") | Some("txt") => minlog::read(path),
        _                                       => decode::read(path),
    }
}

#[cfg(test)]
pub(crate) mod fixture;
