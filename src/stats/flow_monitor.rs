//! 流监视器
//!
//! 订阅信道通知并累加逐流计数器。记录在第一次见到某个流时惰性创建，
//! 按创建顺序保存，运行期间只增不减。

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{trace, warn};

use crate::net::{ChannelNotification, ChannelObserver, FlowKey};
use crate::sim::SimTime;

/// 流标识符，从 1 开始按首次出现顺序分配
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FlowId(pub u32);

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 单个流的累计计数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowRecord {
    pub flow_id: FlowId,
    pub key: FlowKey,
    pub tx_packets: u64,
    pub rx_packets: u64,
    pub lost_packets: u64,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
    pub delay_sum: SimTime,
    pub first_tx: Option<SimTime>,
    pub last_rx: Option<SimTime>,
}

impl FlowRecord {
    fn new(flow_id: FlowId, key: FlowKey) -> Self {
        Self {
            flow_id,
            key,
            tx_packets: 0,
            rx_packets: 0,
            lost_packets: 0,
            tx_bytes: 0,
            rx_bytes: 0,
            delay_sum: SimTime::ZERO,
            first_tx: None,
            last_rx: None,
        }
    }

    /// 已发送但既未送达也未丢弃的包数
    pub fn in_flight(&self) -> u64 {
        self.tx_packets
            .saturating_sub(self.rx_packets)
            .saturating_sub(self.lost_packets)
    }
}

#[derive(Debug, Default)]
pub struct FlowMonitor {
    records: Vec<FlowRecord>,
    index: HashMap<FlowKey, usize>,
    finished: bool,
}

impl FlowMonitor {
    /// 为流元组分配（或查找）流标识符
    pub fn classify(&mut self, key: FlowKey) -> FlowId {
        if let Some(&i) = self.index.get(&key) {
            return self.records[i].flow_id;
        }
        let id = FlowId(self.records.len() as u32 + 1);
        self.index.insert(key, self.records.len());
        self.records.push(FlowRecord::new(id, key));
        trace!(flow_id = %id, ?key, "新建流记录");
        id
    }

    fn record_mut(&mut self, id: FlowId) -> Option<&mut FlowRecord> {
        if self.finished {
            warn!(flow_id = %id, "仿真已结束，忽略统计更新");
            return None;
        }
        let rec = (id.0 as usize)
            .checked_sub(1)
            .and_then(|i| self.records.get_mut(i));
        if rec.is_none() {
            warn!(flow_id = %id, "未知流");
        }
        rec
    }

    pub fn on_sent(&mut self, id: FlowId, bytes: u32, at: SimTime) {
        if let Some(r) = self.record_mut(id) {
            r.tx_packets += 1;
            r.tx_bytes += u64::from(bytes);
            r.first_tx.get_or_insert(at);
        }
    }

    pub fn on_delivered(&mut self, id: FlowId, delay: SimTime, bytes: u32, at: SimTime) {
        if let Some(r) = self.record_mut(id) {
            r.rx_packets += 1;
            r.rx_bytes += u64::from(bytes);
            r.delay_sum = r.delay_sum.saturating_add(delay);
            r.last_rx = Some(at);
        }
    }

    pub fn on_dropped(&mut self, id: FlowId) {
        if let Some(r) = self.record_mut(id) {
            r.lost_packets += 1;
        }
    }

    /// 按创建顺序返回全部记录
    pub fn records(&self) -> &[FlowRecord] {
        &self.records
    }

    pub fn record(&self, key: &FlowKey) -> Option<&FlowRecord> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl ChannelObserver for FlowMonitor {
    fn on_notification(&mut self, n: &ChannelNotification) {
        let pkt = n.packet();
        let id = self.classify(pkt.key);
        match n {
            ChannelNotification::Sent { at, .. } => self.on_sent(id, pkt.size_bytes, *at),
            ChannelNotification::Delivered { at, delay, .. } => {
                self.on_delivered(id, *delay, pkt.size_bytes, *at)
            }
            ChannelNotification::Dropped { .. } => self.on_dropped(id),
        }
    }

    /// 结束后只读
    fn finish(&mut self) {
        self.finished = true;
    }
}
