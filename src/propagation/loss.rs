//! 路径损耗模型
//!
//! - 自由空间（Friis）：`PL(d) = 20·log10(4π·d/λ) + 10·log10(L)`
//! - 双径地面反射：`PL(d) = 40·log10(d) − 20·log10(h_t·h_r) + 10·log10(L)`
//!
//! 双径模型在交叉距离 `d_c = 4π·h_t·h_r/λ` 以内退化为自由空间，
//! 两段在 `d_c` 处连续。所有函数对任意有限输入都返回有定义的值，
//! 损耗下限为 0 dB。

use std::f64::consts::PI;

use super::delay::SPEED_OF_LIGHT_MPS;
use crate::mobility::Vector3;

/// 路径损耗抽象：给定收发两端位置，返回损耗（dB，非负）。
pub trait PropagationLoss {
    fn path_loss_db(&self, tx: Vector3, rx: Vector3) -> f64;
}

/// 载波波长（米）
pub fn wavelength_m(frequency_hz: f64) -> f64 {
    SPEED_OF_LIGHT_MPS / frequency_hz
}

fn clamp_loss(db: f64) -> f64 {
    // NaN 和负损耗都归为 0 dB
    db.max(0.0)
}

/// 自由空间损耗
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeSpaceLoss {
    pub frequency_hz: f64,
    /// 系统损耗（线性，1 表示无损耗）
    pub system_loss: f64,
    /// 小于等于该距离时损耗视为 0
    pub min_distance_m: f64,
}

impl FreeSpaceLoss {
    pub fn loss_at(&self, distance_m: f64) -> f64 {
        if distance_m <= self.min_distance_m {
            return 0.0;
        }
        let lambda = wavelength_m(self.frequency_hz);
        clamp_loss(
            20.0 * (4.0 * PI * distance_m / lambda).log10() + 10.0 * self.system_loss.log10(),
        )
    }
}

impl PropagationLoss for FreeSpaceLoss {
    fn path_loss_db(&self, tx: Vector3, rx: Vector3) -> f64 {
        self.loss_at(tx.distance(rx))
    }
}

/// 双径地面反射损耗
///
/// 天线有效高度为节点 z 坐标加上 `height_above_z_m`。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoRayGroundLoss {
    pub frequency_hz: f64,
    pub height_above_z_m: f64,
    pub system_loss: f64,
    pub min_distance_m: f64,
}

impl TwoRayGroundLoss {
    /// 交叉距离 `d_c = 4π·h_t·h_r/λ`
    pub fn crossover_distance_m(&self, tx_height_m: f64, rx_height_m: f64) -> f64 {
        4.0 * PI * tx_height_m * rx_height_m / wavelength_m(self.frequency_hz)
    }

    /// 给定距离与两端天线高度计算损耗
    pub fn loss_with_heights(&self, distance_m: f64, tx_height_m: f64, rx_height_m: f64) -> f64 {
        if distance_m <= self.min_distance_m {
            return 0.0;
        }
        let ht = tx_height_m.max(0.0);
        let hr = rx_height_m.max(0.0);
        let crossover = self.crossover_distance_m(ht, hr);
        if distance_m <= crossover {
            let friis = FreeSpaceLoss {
                frequency_hz: self.frequency_hz,
                system_loss: self.system_loss,
                min_distance_m: self.min_distance_m,
            };
            return friis.loss_at(distance_m);
        }
        clamp_loss(
            40.0 * distance_m.log10() - 20.0 * (ht * hr).log10()
                + 10.0 * self.system_loss.log10(),
        )
    }
}

impl PropagationLoss for TwoRayGroundLoss {
    fn path_loss_db(&self, tx: Vector3, rx: Vector3) -> f64 {
        self.loss_with_heights(
            tx.distance(rx),
            tx.z + self.height_above_z_m,
            rx.z + self.height_above_z_m,
        )
    }
}
