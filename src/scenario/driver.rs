//! 仿真驱动器
//!
//! 按配置显式装配移动模型、信道、应用与统计，运行到停止时间后产出报告。

use tracing::info;

use super::config::ScenarioConfig;
use super::report::SimulationReport;
use crate::app::{AppId, BeaconOpts};
use crate::error::Result;
use crate::mobility::MobilityModel;
use crate::net::{Channel, ChannelObserver, DsrcAction, DsrcWorld, NodeId};
use crate::propagation::PropagationModel;
use crate::sim::{SimTime, Simulator};

pub struct SimulationDriver {
    config: ScenarioConfig,
    sim: Simulator<DsrcAction>,
    world: DsrcWorld,
    sender: NodeId,
    receiver: NodeId,
    app: AppId,
}

impl SimulationDriver {
    #[tracing::instrument(skip_all)]
    pub fn new(config: ScenarioConfig) -> Result<Self> {
        config.validate()?;

        let mut mobility = MobilityModel::default();
        let ids: Vec<NodeId> = config
            .nodes
            .iter()
            .map(|n| mobility.add_node(n.position, n.velocity))
            .collect();
        let (sender, receiver) = (ids[0], ids[1]);

        let channel = Channel::new(PropagationModel::new(config.propagation), config.phy);
        let mut world = DsrcWorld::new(mobility, channel);

        world.add_sink(receiver, config.port)?;
        let app = world.add_beacon_app(BeaconOpts {
            node: sender,
            peer: receiver,
            port: config.port,
            size_bytes: config.pkt_bytes,
            interval: SimTime::from_secs_f64(config.interval_s),
            start: SimTime::from_secs_f64(config.app_start_s),
            stop: SimTime::from_secs_f64(config.app_stop_s),
            max_packets: config.max_packets,
        })?;

        info!(
            tx_power_dbm = config.phy.tx_power_dbm,
            frequency_hz = config.phy.frequency_hz,
            antenna_height_m = config.phy.antenna_height_m,
            pkt_bytes = config.pkt_bytes,
            interval_s = config.interval_s,
            port = config.port,
            "🚗 场景装配完成"
        );
        for (i, id) in ids.iter().enumerate() {
            info!(node = %id, addr = %config.node_address(i), "节点地址");
        }

        Ok(Self {
            config,
            sim: Simulator::default(),
            world,
            sender,
            receiver,
            app,
        })
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn sender(&self) -> NodeId {
        self.sender
    }

    pub fn receiver(&self) -> NodeId {
        self.receiver
    }

    pub fn app(&self) -> AppId {
        self.app
    }

    pub fn world(&self) -> &DsrcWorld {
        &self.world
    }

    /// 运行前可直接调整世界（例如修改速度）
    pub fn world_mut(&mut self) -> &mut DsrcWorld {
        &mut self.world
    }

    /// 注册额外的通知监听者
    pub fn subscribe(&mut self, listener: Box<dyn ChannelObserver>) {
        self.world.bus.subscribe(listener);
    }

    /// 运行到停止时间并生成报告
    #[tracing::instrument(skip_all)]
    pub fn run(mut self) -> Result<SimulationReport> {
        let stop = SimTime::from_secs_f64(self.config.stop_s);
        info!(stop = ?stop, "▶️  开始运行仿真");

        self.world.mobility.freeze();
        self.world.start_apps(&mut self.sim)?;
        self.sim.run_until(stop, &mut self.world)?;
        self.world.bus.finish();

        let report = SimulationReport::build(&self.config, &self.sim, &self.world);
        info!(
            end_time = ?report.end_time,
            events = report.events_executed,
            flows = report.flows.len(),
            "✅ 仿真完成"
        );
        Ok(report)
    }
}
