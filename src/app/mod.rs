//! 应用层
//!
//! 周期信标发送端（BSM）与被动接收端。

mod beacon;
mod sink;

use serde::{Deserialize, Serialize};

pub use beacon::{BeaconApp, BeaconOpts};
pub use sink::PacketSink;

/// 应用标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppId(pub usize);
