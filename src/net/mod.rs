//! 网络模拟模块
//!
//! 数据包、无线信道、通知流以及把它们连在一起的仿真世界。

// 子模块声明
mod action;
mod channel;
mod id;
mod observer;
mod packet;
mod world;

// 重新导出公共接口
pub use action::DsrcAction;
pub use channel::{Channel, PhyConfig, TxOutcome};
pub use id::{FlowKey, NodeId};
pub use observer::{ChannelNotification, ChannelObserver, NotificationBus};
pub use packet::Packet;
pub use world::DsrcWorld;
