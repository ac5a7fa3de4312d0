use std::net::IpAddr;
use serde::{Serialize, Deserialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Packet {
    pub time:     f64,
    pub src:      Addr,
    pub dst:      Addr,
    pub version:  u8,
    pub protocol: Protocol,
    pub length:   usize,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Addr {
    pub addr: IpAddr,
    pub port: u16,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub enum Protocol {
    TCP,
    UDP,
    Other,
}

impl Packet {
    pub fn new(time: f64, src: Addr, dst: Addr, protocol: Protocol, length: usize) -> Self {
        let version = match src.addr {
            IpAddr::V4(_) => 4,
            IpAddr::V6(_) => 6,
        };

        Self { time, src, dst, version, protocol, length }
    }

    pub fn pair(&self) -> (IpAddr, IpAddr) {
        (self.src.addr, self.dst.addr)
    }
}

impl Addr {
    pub fn new(addr: IpAddr, port: u16) -> Self {
        Self { addr, port }
    }
}

impl From<&str> for Protocol {
    fn from(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "TCP" => Protocol::TCP,
            "UDP" => Protocol::UDP,
            _     => Protocol::Other,
        }
    }
}
