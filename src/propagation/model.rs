//! 组合传播模型
//!
//! 把恒速时延与双径地面损耗组合成一次链路评估，并按接收灵敏度判定可否接收。
//! 模型无内部状态：相同输入总是得到逐位相同的输出，可在多线程间共享。

use serde::{Deserialize, Serialize};

use super::delay::{ConstantSpeedDelay, SPEED_OF_LIGHT_MPS};
use super::loss::{PropagationLoss, TwoRayGroundLoss};
use crate::mobility::Vector3;
use crate::sim::SimTime;

/// 传播/接收机参数。
///
/// 默认值对应 802.11p（10 MHz 信道）6 Mb/s 的最低接收灵敏度 −82 dBm，
/// 接收增益 10 dB、噪声系数 2 dB。这些都是可调的默认值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationParams {
    pub speed_mps: f64,
    pub tx_gain_db: f64,
    pub rx_gain_db: f64,
    pub noise_figure_db: f64,
    pub rx_sensitivity_dbm: f64,
    /// 系统损耗（线性）
    pub system_loss: f64,
    pub min_distance_m: f64,
}

impl Default for PropagationParams {
    fn default() -> Self {
        Self {
            speed_mps: SPEED_OF_LIGHT_MPS,
            tx_gain_db: 0.0,
            rx_gain_db: 10.0,
            noise_figure_db: 2.0,
            rx_sensitivity_dbm: -82.0,
            system_loss: 1.0,
            min_distance_m: 0.5,
        }
    }
}

/// 一次链路评估的结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkEvaluation {
    pub distance_m: f64,
    pub delay: SimTime,
    pub path_loss_db: f64,
    pub rx_power_dbm: f64,
    pub receivable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PropagationModel {
    params: PropagationParams,
}

impl PropagationModel {
    pub fn new(params: PropagationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PropagationParams {
        &self.params
    }

    /// 评估一次发送：时延、路径损耗、接收功率与可接收性。
    pub fn evaluate(
        &self,
        tx_pos: Vector3,
        rx_pos: Vector3,
        tx_power_dbm: f64,
        frequency_hz: f64,
        height_m: f64,
    ) -> LinkEvaluation {
        let p = &self.params;
        let distance_m = tx_pos.distance(rx_pos);
        let delay = ConstantSpeedDelay {
            speed_mps: p.speed_mps,
        }
        .delay_for_distance(distance_m);
        let gains = p.tx_gain_db + p.rx_gain_db;

        // 共址：不做任何除法，强制可接收
        if distance_m == 0.0 {
            return LinkEvaluation {
                distance_m,
                delay: SimTime::ZERO,
                path_loss_db: 0.0,
                rx_power_dbm: tx_power_dbm + gains,
                receivable: true,
            };
        }

        let loss = TwoRayGroundLoss {
            frequency_hz,
            height_above_z_m: height_m,
            system_loss: p.system_loss,
            min_distance_m: p.min_distance_m,
        };
        let path_loss_db = loss.path_loss_db(tx_pos, rx_pos);
        let rx_power_dbm = tx_power_dbm + gains - path_loss_db;
        let receivable = rx_power_dbm - p.noise_figure_db >= p.rx_sensitivity_dbm;

        LinkEvaluation {
            distance_m,
            delay,
            path_loss_db,
            rx_power_dbm,
            receivable,
        }
    }
}
