//! 信道通知流
//!
//! 发送/送达/丢弃三类通知。流统计只是订阅者之一，
//! 其它监听者（例如 JSON 轨迹记录）可以任意注册。

use serde::Serialize;

use super::packet::Packet;
use crate::sim::SimTime;
use crate::stats::FlowMonitor;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelNotification {
    /// 数据包交给信道（先于接收判定）
    Sent { at: SimTime, pkt: Packet },
    /// 数据包在接收端到达
    Delivered {
        at: SimTime,
        pkt: Packet,
        delay: SimTime,
        rx_power_dbm: f64,
    },
    /// 接收功率低于灵敏度，立即丢弃
    Dropped {
        at: SimTime,
        pkt: Packet,
        distance_m: f64,
        rx_power_dbm: f64,
    },
}

impl ChannelNotification {
    pub fn at(&self) -> SimTime {
        match self {
            ChannelNotification::Sent { at, .. }
            | ChannelNotification::Delivered { at, .. }
            | ChannelNotification::Dropped { at, .. } => *at,
        }
    }

    pub fn packet(&self) -> &Packet {
        match self {
            ChannelNotification::Sent { pkt, .. }
            | ChannelNotification::Delivered { pkt, .. }
            | ChannelNotification::Dropped { pkt, .. } => pkt,
        }
    }
}

/// 通知订阅者
pub trait ChannelObserver {
    fn on_notification(&mut self, n: &ChannelNotification);

    /// 运行结束时调用一次
    fn finish(&mut self) {}
}

/// 通知总线：先更新流统计，再按注册顺序分发给其它监听者。
#[derive(Default)]
pub struct NotificationBus {
    pub flows: FlowMonitor,
    listeners: Vec<Box<dyn ChannelObserver>>,
}

impl NotificationBus {
    pub fn subscribe(&mut self, listener: Box<dyn ChannelObserver>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl ChannelObserver for NotificationBus {
    fn on_notification(&mut self, n: &ChannelNotification) {
        self.flows.on_notification(n);
        for l in &mut self.listeners {
            l.on_notification(n);
        }
    }

    fn finish(&mut self) {
        self.flows.finish();
        for l in &mut self.listeners {
            l.finish();
        }
    }
}
