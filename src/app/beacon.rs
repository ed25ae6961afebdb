//! 周期信标应用
//!
//! 在 `[start, stop)` 内每隔 `interval` 发送一个固定大小的数据包。
//! 恰好落在 `start` 的发送会执行，恰好落在 `stop` 或之后的发送不会被调度。

use tracing::{debug, info};

use super::AppId;
use crate::error::Result;
use crate::net::{DsrcAction, FlowKey, NodeId, Packet};
use crate::sim::{EventHandle, SimTime, Simulator};

/// 信标应用配置
#[derive(Debug, Clone)]
pub struct BeaconOpts {
    pub node: NodeId,
    pub peer: NodeId,
    pub port: u16,
    pub size_bytes: u32,
    pub interval: SimTime,
    pub start: SimTime,
    pub stop: SimTime,
    /// 发送数量上限；None 表示只受 stop 限制
    pub max_packets: Option<u64>,
}

#[derive(Debug)]
pub struct BeaconApp {
    id: AppId,
    opts: BeaconOpts,
    sent: u64,
    /// 已调度但尚未执行的下一次发送
    pending: Option<EventHandle>,
    stopped: bool,
}

impl BeaconApp {
    pub fn new(id: AppId, opts: BeaconOpts) -> Self {
        Self {
            id,
            opts,
            sent: 0,
            pending: None,
            stopped: false,
        }
    }

    pub fn id(&self) -> AppId {
        self.id
    }

    pub fn opts(&self) -> &BeaconOpts {
        &self.opts
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn flow_key(&self) -> FlowKey {
        FlowKey {
            src: self.opts.node,
            dst: self.opts.peer,
            port: self.opts.port,
        }
    }

    fn quota_left(&self) -> bool {
        self.opts.max_packets.is_none_or(|max| self.sent < max)
    }

    /// 调度第一次发送与停止事件
    pub fn start(&mut self, sim: &mut Simulator<DsrcAction>) -> Result<()> {
        if self.opts.start >= self.opts.stop || !self.quota_left() {
            info!(app = ?self.id, "信标窗口为空，不调度发送");
            return Ok(());
        }
        let first = sim.schedule(self.opts.start, DsrcAction::SendBeacon { app: self.id })?;
        self.pending = Some(first);
        sim.schedule(self.opts.stop, DsrcAction::StopBeacon { app: self.id })?;
        info!(
            app = ?self.id,
            start = ?self.opts.start,
            stop = ?self.opts.stop,
            interval = ?self.opts.interval,
            "📡 信标应用已启动"
        );
        Ok(())
    }

    /// 发送触发：生成数据包并在窗口内重新调度下一次发送
    pub fn on_send(&mut self, pkt_id: u64, sim: &mut Simulator<DsrcAction>) -> Result<Packet> {
        let now = sim.now();
        self.pending = None;
        self.sent += 1;

        let pkt = Packet {
            id: pkt_id,
            key: self.flow_key(),
            size_bytes: self.opts.size_bytes,
            tx_time: now,
        };

        let next = now.saturating_add(self.opts.interval);
        let in_window = self.opts.interval > SimTime::ZERO && next < self.opts.stop;
        if in_window && self.quota_left() {
            self.pending = Some(sim.schedule(next, DsrcAction::SendBeacon { app: self.id })?);
        } else {
            debug!(app = ?self.id, sent = self.sent, "不再重新调度");
        }
        Ok(pkt)
    }

    /// 停止：取消尚未执行的发送。
    ///
    /// 按计划在 `stop` 触发时不会有待发送的事件；提前停止时会取消下一次发送。
    pub fn on_stop(&mut self, sim: &mut Simulator<DsrcAction>) -> Result<()> {
        self.stopped = true;
        if let Some(handle) = self.pending.take() {
            sim.cancel(handle)?;
        }
        info!(app = ?self.id, sent = self.sent, "信标应用已停止");
        Ok(())
    }
}
