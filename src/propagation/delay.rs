//! 恒速传播时延

use crate::mobility::Vector3;
use crate::sim::SimTime;

/// 真空光速（米/秒）
pub const SPEED_OF_LIGHT_MPS: f64 = 299_792_458.0;

/// 恒速传播时延模型：`delay = distance / speed`，四舍五入到纳秒。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSpeedDelay {
    pub speed_mps: f64,
}

impl Default for ConstantSpeedDelay {
    fn default() -> Self {
        Self {
            speed_mps: SPEED_OF_LIGHT_MPS,
        }
    }
}

impl ConstantSpeedDelay {
    pub fn delay_for_distance(&self, distance_m: f64) -> SimTime {
        if !(self.speed_mps > 0.0) {
            return SimTime::ZERO;
        }
        SimTime::from_secs_f64(distance_m / self.speed_mps)
    }

    pub fn delay(&self, tx: Vector3, rx: Vector3) -> SimTime {
        self.delay_for_distance(tx.distance(rx))
    }
}
