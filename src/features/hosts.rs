use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;
use log::{debug, warn};
use crate::capture::Packet;

#[derive(Clone, Debug, PartialEq)]
pub struct Hosts {
    hosts:    Vec<IpAddr>,
    partners: Vec<IpAddr>,
}

impl Hosts {
    pub fn classify(packets: &[Packet]) -> Self {
        let addrs = packets.iter().flat_map(|p| {
            let (src, dst) = p.pair();
            vec![src, dst]
        }).collect::<BTreeSet<_>>();

        let hosts = match addrs.len() {
            0     => BTreeSet::new(),
            1 | 2 => receiver(&addrs, packets).into_iter().collect(),
            _     => pool(&addrs, packets),
        };

        if hosts.is_empty() && !addrs.is_empty() {
            warn!("no address takes part in every packet, host pool is empty");
        }

        let partners = addrs.difference(&hosts).copied().collect();
        let hosts    = hosts.into_iter().collect();

        debug!("hosts {:?}, partners {:?}", hosts, partners);

        Self { hosts, partners }
    }

    pub fn hosts(&self) -> &[IpAddr] {
        &self.hosts
    }

    pub fn partners(&self) -> &[IpAddr] {
        &self.partners
    }

    pub fn is_host(&self, addr: &IpAddr) -> bool {
        self.hosts.binary_search(addr).is_ok()
    }

    pub fn downloads(&self, p: &Packet) -> bool {
        self.is_host(&p.dst.addr)
    }

    pub fn uploads(&self, p: &Packet) -> bool {
        self.is_host(&p.src.addr)
    }
}

// Two-pass filter: first find every address missing from at least one
// packet, then keep the remainder as the host pool.
fn pool(addrs: &BTreeSet<IpAddr>, packets: &[Packet]) -> BTreeSet<IpAddr> {
    let drop = addrs.iter().filter(|&&addr| {
        packets.iter().any(|p| p.src.addr != addr && p.dst.addr != addr)
    }).copied().collect::<BTreeSet<_>>();

    addrs.difference(&drop).copied().collect()
}

// With at most two addresses the host is the one receiving most packets.
// Ties go to the higher address.
fn receiver(addrs: &BTreeSet<IpAddr>, packets: &[Packet]) -> Option<IpAddr> {
    let mut received = addrs.iter().map(|&addr| (addr, 0usize)).collect::<BTreeMap<_, _>>();

    for p in packets {
        if let Some(n) = received.get_mut(&p.dst.addr) {
            *n += 1;
        }
    }

    received.into_iter().fold(None, |best, (addr, n)| match best {
        Some((_, m)) if m > n => best,
        _                     => Some((addr, n)),
    }).map(|(addr, _)| addr)
}
