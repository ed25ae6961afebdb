//! 事件句柄
//!
//! 调度时返回的句柄，用于之后取消尚未执行的事件。

use std::fmt;

/// 事件句柄：包装调度序列号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventHandle(pub(crate) u64);

impl EventHandle {
    /// 事件的调度序列号
    pub fn seq(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event#{}", self.0)
    }
}
