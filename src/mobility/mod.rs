//! 移动模型
//!
//! 车辆节点的运动学状态，信道层在发送时刻按需查询位置。

mod constant_velocity;
mod vector;

pub use constant_velocity::MobilityModel;
pub use vector::Vector3;
