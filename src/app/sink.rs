//! 被动接收端：只计数，不回包。

use serde::Serialize;

use crate::net::{NodeId, Packet};
use crate::sim::SimTime;

#[derive(Debug, Clone, Serialize)]
pub struct PacketSink {
    pub node: NodeId,
    pub port: u16,
    pub rx_packets: u64,
    pub rx_bytes: u64,
    pub last_rx: Option<SimTime>,
}

impl PacketSink {
    pub fn new(node: NodeId, port: u16) -> Self {
        Self {
            node,
            port,
            rx_packets: 0,
            rx_bytes: 0,
            last_rx: None,
        }
    }

    pub fn accepts(&self, pkt: &Packet) -> bool {
        self.node == pkt.key.dst && self.port == pkt.key.port
    }

    pub fn on_receive(&mut self, pkt: &Packet, at: SimTime) {
        self.rx_packets += 1;
        self.rx_bytes += u64::from(pkt.size_bytes);
        self.last_rx = Some(at);
    }
}
