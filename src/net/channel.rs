//! 无线信道层
//!
//! 在发送时刻查询两端位置，交给传播模型评估，
//! 可接收则调度到达事件，否则立即上报丢弃。

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::action::DsrcAction;
use super::observer::{ChannelNotification, ChannelObserver};
use super::packet::Packet;
use crate::error::Result;
use crate::mobility::MobilityModel;
use crate::propagation::{LinkEvaluation, PropagationModel};
use crate::sim::{EventHandle, SimTime, Simulator};

/// 发射端物理层配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhyConfig {
    pub tx_power_dbm: f64,
    pub frequency_hz: f64,
    /// 天线离节点 z 坐标的高度
    pub antenna_height_m: f64,
}

impl Default for PhyConfig {
    fn default() -> Self {
        Self {
            tx_power_dbm: 23.0,
            frequency_hz: 5.9e9,
            antenna_height_m: 1.5,
        }
    }
}

/// 一次发送的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TxOutcome {
    Scheduled {
        handle: EventHandle,
        arrive_at: SimTime,
        eval: LinkEvaluation,
    },
    Dropped { eval: LinkEvaluation },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Channel {
    propagation: PropagationModel,
    phy: PhyConfig,
}

impl Channel {
    pub fn new(propagation: PropagationModel, phy: PhyConfig) -> Self {
        Self { propagation, phy }
    }

    pub fn phy(&self) -> &PhyConfig {
        &self.phy
    }

    pub fn propagation(&self) -> &PropagationModel {
        &self.propagation
    }

    /// 评估 `tx_time` 时刻两个节点之间的链路
    pub fn evaluate_link(&self, pkt: &Packet, mobility: &MobilityModel) -> Result<LinkEvaluation> {
        let tx_pos = mobility.position_at(pkt.key.src, pkt.tx_time)?;
        let rx_pos = mobility.position_at(pkt.key.dst, pkt.tx_time)?;
        trace!(%tx_pos, %rx_pos, "查询收发位置");
        Ok(self.propagation.evaluate(
            tx_pos,
            rx_pos,
            self.phy.tx_power_dbm,
            self.phy.frequency_hz,
            self.phy.antenna_height_m,
        ))
    }

    /// 发送一个数据包。
    ///
    /// 无论结果如何先上报 `Sent`，再决定调度到达还是丢弃。
    #[tracing::instrument(skip_all, fields(pkt_id = pkt.id, src = %pkt.key.src, dst = %pkt.key.dst))]
    pub fn transmit(
        &self,
        pkt: Packet,
        mobility: &MobilityModel,
        sim: &mut Simulator<DsrcAction>,
        observer: &mut dyn ChannelObserver,
    ) -> Result<TxOutcome> {
        observer.on_notification(&ChannelNotification::Sent {
            at: pkt.tx_time,
            pkt: pkt.clone(),
        });

        let eval = self.evaluate_link(&pkt, mobility)?;
        debug!(
            distance_m = eval.distance_m,
            path_loss_db = eval.path_loss_db,
            rx_power_dbm = eval.rx_power_dbm,
            receivable = eval.receivable,
            "链路评估"
        );

        if !eval.receivable {
            debug!("📉 接收功率低于灵敏度，丢弃");
            observer.on_notification(&ChannelNotification::Dropped {
                at: pkt.tx_time,
                pkt,
                distance_m: eval.distance_m,
                rx_power_dbm: eval.rx_power_dbm,
            });
            return Ok(TxOutcome::Dropped { eval });
        }

        let arrive_at = pkt.tx_time.saturating_add(eval.delay);
        let handle = sim.schedule(
            arrive_at,
            DsrcAction::Deliver {
                pkt,
                rx_power_dbm: eval.rx_power_dbm,
            },
        )?;
        trace!(arrive = ?arrive_at, "调度数据包到达事件");
        Ok(TxOutcome::Scheduled {
            handle,
            arrive_at,
            eval,
        })
    }
}
