//! DSRC 仿真世界
//!
//! 持有移动模型、信道、应用、接收端和通知总线，并分派 `DsrcAction`。
//! 这是运行期唯一的可变上下文；仿真时钟由 `Simulator` 持有。

use tracing::{debug, info, warn};

use super::action::DsrcAction;
use super::channel::{Channel, TxOutcome};
use super::id::NodeId;
use super::observer::{ChannelNotification, ChannelObserver, NotificationBus};
use super::packet::Packet;
use crate::app::{AppId, BeaconApp, BeaconOpts, PacketSink};
use crate::error::{Result, SimError};
use crate::mobility::MobilityModel;
use crate::sim::{Simulator, World};

#[derive(Default)]
pub struct DsrcWorld {
    pub mobility: MobilityModel,
    pub channel: Channel,
    pub bus: NotificationBus,
    apps: Vec<BeaconApp>,
    sinks: Vec<PacketSink>,
    next_pkt_id: u64,
}

impl DsrcWorld {
    pub fn new(mobility: MobilityModel, channel: Channel) -> Self {
        Self {
            mobility,
            channel,
            ..Default::default()
        }
    }

    /// 安装信标应用
    pub fn add_beacon_app(&mut self, opts: BeaconOpts) -> Result<AppId> {
        for node in [opts.node, opts.peer] {
            if node.0 >= self.mobility.node_count() {
                return Err(SimError::UnknownNode(node));
            }
        }
        let id = AppId(self.apps.len());
        self.apps.push(BeaconApp::new(id, opts));
        Ok(id)
    }

    /// 在节点的端口上安装接收端
    pub fn add_sink(&mut self, node: NodeId, port: u16) -> Result<usize> {
        if node.0 >= self.mobility.node_count() {
            return Err(SimError::UnknownNode(node));
        }
        self.sinks.push(PacketSink::new(node, port));
        Ok(self.sinks.len() - 1)
    }

    pub fn apps(&self) -> &[BeaconApp] {
        &self.apps
    }

    pub fn sinks(&self) -> &[PacketSink] {
        &self.sinks
    }

    /// 启动全部应用
    pub fn start_apps(&mut self, sim: &mut Simulator<DsrcAction>) -> Result<()> {
        for app in &mut self.apps {
            app.start(sim)?;
        }
        Ok(())
    }

    fn app_mut(&mut self, id: AppId) -> Result<&mut BeaconApp> {
        self.apps.get_mut(id.0).ok_or(SimError::UnknownApp(id))
    }

    fn on_send_beacon(&mut self, id: AppId, sim: &mut Simulator<DsrcAction>) -> Result<()> {
        let pkt_id = self.next_pkt_id;
        self.next_pkt_id += 1;
        let pkt = self.app_mut(id)?.on_send(pkt_id, sim)?;
        match self.channel.transmit(pkt, &self.mobility, sim, &mut self.bus)? {
            TxOutcome::Scheduled { arrive_at, .. } => debug!(pkt_id, arrive = ?arrive_at, "📤 信标已发出"),
            TxOutcome::Dropped { eval } => debug!(pkt_id, rx_power_dbm = eval.rx_power_dbm, "信标无法接收"),
        }
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(pkt_id = pkt.id, flow = ?pkt.key))]
    fn on_deliver(&mut self, pkt: Packet, rx_power_dbm: f64, sim: &mut Simulator<DsrcAction>) {
        let now = sim.now();
        let delay = now.saturating_sub(pkt.tx_time);

        match self.sinks.iter_mut().find(|s| s.accepts(&pkt)) {
            Some(sink) => sink.on_receive(&pkt, now),
            None => warn!("目的节点没有绑定该端口的接收端"),
        }

        info!(delay = ?delay, rx_power_dbm, "📨 数据包送达");
        self.bus.on_notification(&ChannelNotification::Delivered {
            at: now,
            pkt,
            delay,
            rx_power_dbm,
        });
    }
}

impl World for DsrcWorld {
    type Action = DsrcAction;

    fn dispatch(&mut self, action: DsrcAction, sim: &mut Simulator<DsrcAction>) -> Result<()> {
        match action {
            DsrcAction::SendBeacon { app } => self.on_send_beacon(app, sim),
            DsrcAction::StopBeacon { app } => self.app_mut(app)?.on_stop(sim),
            DsrcAction::Deliver { pkt, rx_power_dbm } => {
                self.on_deliver(pkt, rx_power_dbm, sim);
                Ok(())
            }
        }
    }
}
