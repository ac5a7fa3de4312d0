use std::net::IpAddr;
use super::{Addr, Capture, Packet, Protocol};

pub const HOST:   &str = "10.0.0.1";
pub const SERVER: &str = "10.0.0.2";

pub fn ip(s: &str) -> IpAddr {
    s.parse().expect("valid address")
}

pub fn packet(time: f64, src: &str, dst: &str, length: usize) -> Packet {
    let src = Addr::new(ip(src), 443);
    let dst = Addr::new(ip(dst), 50000);
    Packet::new(time, src, dst, Protocol::TCP, length)
}

pub fn capture(packets: Vec<Packet>) -> Capture {
    Capture::new("fixture.pcap", packets)
}

// One download packet per second from SERVER to HOST.
pub fn steady(count: usize, length: usize) -> Capture {
    capture((0..count).map(|i| {
        packet(1_600_000_000.0 + i as f64, SERVER, HOST, length)
    }).collect())
}
