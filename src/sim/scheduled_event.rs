//! 调度事件
//!
//! 定义调度事件结构及其优先级比较。

use super::time::SimTime;
use std::cmp::Ordering;

/// 调度事件，包含执行时间、序列号和事件动作。
#[derive(Debug)]
pub struct ScheduledEvent<A> {
    pub(crate) at: SimTime,
    pub(crate) seq: u64,
    pub(crate) action: A,
}

// BinaryHeap 是 max-heap；我们需要最小时间优先，因此反向比较。
impl<A> Ord for ScheduledEvent<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.at.cmp(&other.at) {
            Ordering::Equal => self.seq.cmp(&other.seq),
            ord => ord,
        }
        .reverse()
    }
}

impl<A> PartialOrd for ScheduledEvent<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> PartialEq for ScheduledEvent<A> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<A> Eq for ScheduledEvent<A> {}
