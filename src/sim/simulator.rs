//! 仿真器
//!
//! 定义事件驱动仿真器，维护当前时间与事件队列。

use super::event::EventHandle;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use super::world::World;
use crate::error::{Result, SimError};
use std::collections::{BinaryHeap, HashSet};
use std::fmt::Debug;
use tracing::{debug, info, trace};

/// 事件驱动仿真器：维护当前时间与事件队列。
///
/// 事件按 `(at, seq)` 全序出队，`seq` 在入队时单调递增，
/// 因此同一时刻的事件按调度顺序 FIFO 执行。
pub struct Simulator<A> {
    now: SimTime,
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent<A>>,
    /// 仍在队列中且未被取消的事件序列号
    live: HashSet<u64>,
    executed: u64,
}

impl<A> Default for Simulator<A> {
    fn default() -> Self {
        Self {
            now: SimTime::ZERO,
            next_seq: 0,
            q: BinaryHeap::new(),
            live: HashSet::new(),
            executed: 0,
        }
    }
}

impl<A: Debug> Simulator<A> {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 尚未执行且未取消的事件数
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    /// 已执行的事件总数
    pub fn events_executed(&self) -> u64 {
        self.executed
    }

    /// 调度事件在指定时间执行
    #[tracing::instrument(level = "trace", skip(self), fields(schedule_at = ?at))]
    pub fn schedule(&mut self, at: SimTime, action: A) -> Result<EventHandle> {
        if at < self.now {
            return Err(SimError::InvalidSchedule { at, now: self.now });
        }
        let seq = self.next_seq;
        trace!(now = ?self.now, seq, "调度事件");

        self.next_seq += 1;
        self.q.push(ScheduledEvent { at, seq, action });
        self.live.insert(seq);

        debug!(queue_size = self.q.len(), "事件已加入队列");
        Ok(EventHandle(seq))
    }

    /// 在当前时间之后 `delay` 调度事件
    pub fn schedule_in(&mut self, delay: SimTime, action: A) -> Result<EventHandle> {
        let at = self.now.saturating_add(delay);
        self.schedule(at, action)
    }

    /// 取消一个尚未执行的事件。
    ///
    /// 已执行或已取消的事件返回 `Ok(false)`；从未由本仿真器发出的句柄返回错误。
    pub fn cancel(&mut self, handle: EventHandle) -> Result<bool> {
        if handle.0 >= self.next_seq {
            return Err(SimError::UnknownHandle(handle));
        }
        let removed = self.live.remove(&handle.0);
        debug!(%handle, removed, "取消事件");
        Ok(removed)
    }

    /// 弹出下一个未取消的事件（不超过 `until`）。
    fn pop_due(&mut self, until: SimTime) -> Option<ScheduledEvent<A>> {
        while let Some(top) = self.q.peek() {
            if top.at > until {
                return None;
            }
            let item = self.q.pop()?;
            if self.live.remove(&item.seq) {
                return Some(item);
            }
            trace!(seq = item.seq, "跳过已取消事件");
        }
        None
    }

    fn execute<W>(&mut self, item: ScheduledEvent<A>, world: &mut W) -> Result<()>
    where
        W: World<Action = A> + ?Sized,
    {
        self.now = item.at;
        self.executed += 1;
        trace!(now = ?self.now, seq = item.seq, action = ?item.action, "执行事件");
        world.dispatch(item.action, self)?;
        world.on_tick(self);
        Ok(())
    }

    /// 运行直到事件队列为空或到达 `until`。
    ///
    /// 恰好在 `until` 的事件会执行；任何分派错误都会立即中止并向上传播。
    #[tracing::instrument(skip(self, world))]
    pub fn run_until<W>(&mut self, until: SimTime, world: &mut W) -> Result<()>
    where
        W: World<Action = A> + ?Sized,
    {
        debug!(now = ?self.now, queue_size = self.q.len(), "开始运行");
        while let Some(item) = self.pop_due(until) {
            self.execute(item, world)?;
        }
        self.now = self.now.max(until);
        info!(
            total_events = self.executed,
            final_time = ?self.now,
            "⏹️  到达停止时间"
        );
        Ok(())
    }

    /// 运行所有事件直到队列为空。
    #[tracing::instrument(skip(self, world))]
    pub fn run<W>(&mut self, world: &mut W) -> Result<()>
    where
        W: World<Action = A> + ?Sized,
    {
        info!("▶️  开始运行仿真");
        while let Some(item) = self.pop_due(SimTime::MAX) {
            self.execute(item, world)?;
        }
        info!(
            total_events = self.executed,
            final_time = ?self.now,
            "✅ 仿真完成"
        );
        Ok(())
    }
}
