//! 数据包类型

use serde::Serialize;

use super::id::FlowKey;
use crate::sim::SimTime;

/// 网络数据包；创建后不可变，随事件按值移动。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Packet {
    pub id: u64,
    pub key: FlowKey,
    pub size_bytes: u32,
    /// 发送时刻
    pub tx_time: SimTime,
}
