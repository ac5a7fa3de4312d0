use std::net::IpAddr;
use std::path::Path;
use log::{debug, trace};
use pnet::packet::Packet as PacketExt;
use pnet::packet::ethernet::{EthernetPacket, EtherType, EtherTypes};
use pnet::packet::ip::{IpNextHeaderProtocol, IpNextHeaderProtocols};
use pnet::packet::ipv4::Ipv4Packet;
use pnet::packet::ipv6::Ipv6Packet;
use pnet::packet::tcp::TcpPacket;
use pnet::packet::udp::UdpPacket;
use pnet::packet::vlan::VlanPacket;
use crate::Result;
use super::{Addr, Capture, Packet, Protocol};
use pcap::Error::*;

const ETHERNET:  i32 = 1;
const LINUX_SLL: i32 = 113;
const RAW:       [i32; 3] = [12, 14, 101];

enum Ip<'a> {
    V4(Ipv4Packet<'a>),
    V6(Ipv6Packet<'a>),
}

pub fn read(path: &Path) -> Result<Capture> {
    let mut cap = pcap::Capture::from_file(path)?;
    let link    = cap.get_datalink();

    let mut packets = Vec::new();
    let mut skipped = 0usize;

    loop {
        match cap.next() {
            Ok(pkt) => match decode(link.0, pkt) {
                Some(packet) => packets.push(packet),
                None         => skipped += 1,
            },
            Err(NoMorePackets) => break,
            Err(e)             => return Err(e.into()),
        }
    }

    debug!("{}: {} packets, {} skipped", path.display(), packets.len(), skipped);

    Ok(Capture::new(path, packets))
}

pub fn decode(link: i32, pkt: pcap::Packet<'_>) -> Option<Packet> {
    let ts   = &pkt.header.ts;
    let time = ts.tv_sec as f64 + ts.tv_usec as f64 / 1_000_000.0;
    frame(link, time, pkt.header.len as usize, pkt.data)
}

pub fn frame(link: i32, time: f64, length: usize, data: &[u8]) -> Option<Packet> {
    let ip = match link {
        ETHERNET              => ethernet(data),
        LINUX_SLL             => cooked(data),
        n if RAW.contains(&n) => raw(data),
        n                     => {
            trace!("unsupported link type {}", n);
            None
        }
    }?;

    let (src, dst, next, payload) = match &ip {
        Ip::V4(p) => (IpAddr::V4(p.get_source()), IpAddr::V4(p.get_destination()), p.get_next_level_protocol(), p.payload()),
        Ip::V6(p) => (IpAddr::V6(p.get_source()), IpAddr::V6(p.get_destination()), p.get_next_header(), p.payload()),
    };

    let (protocol, sport, dport) = transport(next, payload);

    Some(Packet::new(time, Addr::new(src, sport), Addr::new(dst, dport), protocol, length))
}

fn ethernet(data: &[u8]) -> Option<Ip> {
    let eth = EthernetPacket::new(data)?;

    let mut ethertype = eth.get_ethertype();
    let mut offset    = EthernetPacket::minimum_packet_size();

    while ethertype == EtherTypes::Vlan {
        let vlan  = VlanPacket::new(data.get(offset..)?)?;
        ethertype = vlan.get_ethertype();
        offset   += VlanPacket::minimum_packet_size();
    }

    network(ethertype, &data[offset..])
}

fn cooked(data: &[u8]) -> Option<Ip> {
    let header = data.get(..16)?;
    let ethertype = EtherType(u16::from_be_bytes([header[14], header[15]]));
    network(ethertype, &data[16..])
}

fn raw(data: &[u8]) -> Option<Ip> {
    match data.first()? >> 4 {
        4 => network(EtherTypes::Ipv4, data),
        6 => network(EtherTypes::Ipv6, data),
        _ => None,
    }
}

fn network(ethertype: EtherType, payload: &[u8]) -> Option<Ip> {
    match ethertype {
        EtherTypes::Ipv4 => ipv4(payload).map(Ip::V4),
        EtherTypes::Ipv6 => Ipv6Packet::new(payload).map(Ip::V6),
        other            => {
            trace!("skipping ethertype {:#06x}", other.0);
            None
        }
    }
}

fn ipv4(payload: &[u8]) -> Option<Ipv4Packet> {
    let mut pkt = Ipv4Packet::new(payload)?;
    if pkt.get_next_level_protocol() == IpNextHeaderProtocols::Ipv4 {
        let n = pkt.get_header_length() as usize * 4;
        pkt = Ipv4Packet::new(payload.get(n..)?)?;
    }
    Some(pkt)
}

fn transport(next: IpNextHeaderProtocol, payload: &[u8]) -> (Protocol, u16, u16) {
    match next {
        IpNextHeaderProtocols::Tcp => match TcpPacket::new(payload) {
            Some(tcp) => (Protocol::TCP, tcp.get_source(), tcp.get_destination()),
            None      => (Protocol::TCP, 0, 0),
        },
        IpNextHeaderProtocols::Udp => match UdpPacket::new(payload) {
            Some(udp) => (Protocol::UDP, udp.get_source(), udp.get_destination()),
            None      => (Protocol::UDP, 0, 0),
        },
        _ => (Protocol::Other, 0, 0),
    }
}
