//! 场景配置
//!
//! 默认值即两车对向行驶的 DSRC 场景：相距 50 m、±20 m/s、
//! 23 dBm、5.9 GHz、天线高 1.5 m、500 B 信标每 0.1 s、1 s 到 10 s。

use std::fs;
use std::net::Ipv4Addr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::mobility::Vector3;
use crate::net::PhyConfig;
use crate::propagation::PropagationParams;
use crate::sim::SimTime;

/// 单个车辆的初始运动学状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub position: Vector3,
    pub velocity: Vector3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// 恰好两个节点：0 号发送，1 号接收
    pub nodes: Vec<NodeSpec>,
    pub phy: PhyConfig,
    pub propagation: PropagationParams,
    pub pkt_bytes: u32,
    pub interval_s: f64,
    pub app_start_s: f64,
    pub app_stop_s: f64,
    /// 仿真停止时间
    pub stop_s: f64,
    pub port: u16,
    pub max_packets: Option<u64>,
    /// 吞吐量的观测窗口；缺省为 `app_stop_s - app_start_s`
    pub observation_window_s: Option<f64>,
    /// 地址标签的 /24 网段，节点 i 得到 `base + i + 1`
    pub address_base: Ipv4Addr,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            nodes: vec![
                NodeSpec {
                    position: Vector3::new(0.0, 0.0, 1.5),
                    velocity: Vector3::new(20.0, 0.0, 0.0),
                },
                NodeSpec {
                    position: Vector3::new(50.0, 0.0, 1.5),
                    velocity: Vector3::new(-20.0, 0.0, 0.0),
                },
            ],
            phy: PhyConfig::default(),
            propagation: PropagationParams::default(),
            pkt_bytes: 500,
            interval_s: 0.1,
            app_start_s: 1.0,
            app_stop_s: 10.0,
            stop_s: 10.0,
            port: 5000,
            max_packets: None,
            observation_window_s: None,
            address_base: Ipv4Addr::new(10, 1, 1, 0),
        }
    }
}

fn invalid(msg: impl Into<String>) -> SimError {
    SimError::InvalidConfig(msg.into())
}

fn non_negative(name: &str, v: f64) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite and non-negative, got {v}")))
    }
}

impl ScenarioConfig {
    /// 从 JSON 文件加载（缺失字段取默认值）
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let cfg: ScenarioConfig = serde_json::from_str(&raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.nodes.len() != 2 {
            return Err(invalid(format!(
                "scenario needs exactly 2 nodes, got {}",
                self.nodes.len()
            )));
        }
        for (i, n) in self.nodes.iter().enumerate() {
            if !n.position.is_finite() || !n.velocity.is_finite() {
                return Err(invalid(format!("node {i} has a non-finite position or velocity")));
            }
        }
        if self.pkt_bytes == 0 {
            return Err(invalid("pkt_bytes must be positive"));
        }
        if !(self.interval_s.is_finite() && self.interval_s > 0.0) {
            return Err(invalid(format!("interval_s must be positive, got {}", self.interval_s)));
        }
        if SimTime::from_secs_f64(self.interval_s) == SimTime::ZERO {
            return Err(invalid("interval_s is below the 1 ns clock resolution"));
        }
        non_negative("app_start_s", self.app_start_s)?;
        non_negative("app_stop_s", self.app_stop_s)?;
        non_negative("stop_s", self.stop_s)?;
        if !(self.phy.frequency_hz.is_finite() && self.phy.frequency_hz > 0.0) {
            return Err(invalid("phy.frequency_hz must be positive"));
        }
        if !self.phy.tx_power_dbm.is_finite() || !self.phy.antenna_height_m.is_finite() {
            return Err(invalid("phy parameters must be finite"));
        }
        self.validate_propagation()?;
        if let Some(w) = self.observation_window_s {
            if !(w.is_finite() && w > 0.0) {
                return Err(invalid(format!("observation_window_s must be positive, got {w}")));
            }
        }
        Ok(())
    }

    fn validate_propagation(&self) -> Result<()> {
        let p = &self.propagation;
        for (name, v) in [("speed_mps", p.speed_mps), ("system_loss", p.system_loss)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(invalid(format!("propagation.{name} must be positive, got {v}")));
            }
        }
        non_negative("propagation.min_distance_m", p.min_distance_m)?;
        for (name, v) in [
            ("tx_gain_db", p.tx_gain_db),
            ("rx_gain_db", p.rx_gain_db),
            ("noise_figure_db", p.noise_figure_db),
            ("rx_sensitivity_dbm", p.rx_sensitivity_dbm),
        ] {
            if !v.is_finite() {
                return Err(invalid(format!("propagation.{name} must be finite, got {v}")));
            }
        }
        Ok(())
    }

    /// 吞吐量计算使用的观测窗口（秒）
    pub fn window_s(&self) -> f64 {
        self.observation_window_s
            .unwrap_or(self.app_stop_s - self.app_start_s)
    }

    /// 节点的地址标签
    pub fn node_address(&self, index: usize) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.address_base).wrapping_add(index as u32 + 1))
    }
}
