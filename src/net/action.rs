//! 仿真事件动作
//!
//! 所有事件都是这个带标签的枚举，由 `DsrcWorld` 分派。

use super::packet::Packet;
use crate::app::AppId;

#[derive(Debug, Clone, PartialEq)]
pub enum DsrcAction {
    /// 信标应用发送一个数据包并按周期重新调度自身
    SendBeacon { app: AppId },
    /// 信标应用停止
    StopBeacon { app: AppId },
    /// 数据包到达目的节点
    Deliver { pkt: Packet, rx_power_dbm: f64 },
}
