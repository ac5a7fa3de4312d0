use std::collections::HashMap;
use std::fs;
use std::net::IpAddr;
use std::path::Path;
use std::str::FromStr;
use log::debug;
use crate::{Error, Result};
use super::{Addr, Capture, Packet, Protocol};

pub fn read(path: &Path) -> Result<Capture> {
    let text    = fs::read_to_string(path)?;
    let packets = parse(&text)?;
    debug!("{}: {} log entries", path.display(), packets.len());
    Ok(Capture::new(path, packets))
}

pub fn parse(text: &str) -> Result<Vec<Packet>> {
    let mut lines = text.lines().map(str::trim_end).filter(|l| !l.is_empty());

    let header = match lines.next() {
        Some(line) => line.split(';').collect::<Vec<_>>(),
        None       => return Ok(Vec::new()),
    };

    lines.enumerate().map(|(index, line)| {
        let row = header.iter().copied().zip(line.split(';')).collect::<HashMap<_, _>>();
        entry(&row).map_err(|e| {
            Error::Decode(format!("line {}: {}", index + 2, e))
        })
    }).collect()
}

fn entry(row: &HashMap<&str, &str>) -> Result<Packet, String> {
    let get  = |key: &str| row.get(key).copied().unwrap_or("");
    let int  = |key: &str, default: u64| match row.get(key) {
        Some(v) => u64::from_str(v.trim()).unwrap_or(0),
        None    => default,
    };

    let addr = |key: &str| {
        let value = get(key).trim();
        IpAddr::from_str(value).map_err(|_| format!("invalid {} '{}'", key, value))
    };

    let time = match f64::from_str(get("Time").trim()) {
        Ok(t) if t.is_finite() && t >= 0.0 => t,
        _ => return Err(format!("invalid Time '{}'", get("Time").trim())),
    };
    let src  = Addr::new(addr("SrcIP")?, int("SrcPort", 0) as u16);
    let dst  = Addr::new(addr("DstIP")?, int("DstPort", 0) as u16);

    let mut packet = Packet::new(time, src, dst, Protocol::from(get("Type").trim()), int("Size", 0) as usize);
    packet.version = int("IPv", 4) as u8;

    Ok(packet)
}
