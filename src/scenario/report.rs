//! 运行结果报告

use serde::Serialize;

use super::config::ScenarioConfig;
use crate::app::PacketSink;
use crate::net::{DsrcAction, DsrcWorld};
use crate::sim::{SimTime, Simulator};
use crate::stats::FlowSummary;

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub end_time: SimTime,
    pub events_executed: u64,
    pub window_s: f64,
    /// 按流创建顺序排列
    pub flows: Vec<FlowSummary>,
    pub sinks: Vec<PacketSink>,
}

impl SimulationReport {
    pub(crate) fn build(config: &ScenarioConfig, sim: &Simulator<DsrcAction>, world: &DsrcWorld) -> Self {
        let window_s = config.window_s();
        let flows = world
            .bus
            .flows
            .records()
            .iter()
            .map(|r| {
                FlowSummary::from_record(
                    r,
                    window_s,
                    config.node_address(r.key.src.0),
                    config.node_address(r.key.dst.0),
                )
            })
            .collect();
        Self {
            end_time: sim.now(),
            events_executed: sim.events_executed(),
            window_s,
            flows,
            sinks: world.sinks().to_vec(),
        }
    }
}
