use super::Capture;
use crate::mobility::{MobilityModel, Vector3};
use crate::net::{Channel, ChannelNotification, DsrcAction, FlowKey, NodeId, Packet, PhyConfig, TxOutcome};
use crate::propagation::PropagationModel;
use crate::sim::{SimTime, Simulator};

fn setup() -> (MobilityModel, NodeId, NodeId) {
    let mut m = MobilityModel::default();
    let a = m.add_node(Vector3::new(0.0, 0.0, 1.5), Vector3::new(20.0, 0.0, 0.0));
    let b = m.add_node(Vector3::new(50.0, 0.0, 1.5), Vector3::new(-20.0, 0.0, 0.0));
    (m, a, b)
}

fn pkt(src: NodeId, dst: NodeId, tx_time: SimTime) -> Packet {
    Packet {
        id: 1,
        key: FlowKey { src, dst, port: 5000 },
        size_bytes: 500,
        tx_time,
    }
}

#[test]
fn receivable_transmission_schedules_delivery_after_propagation_delay() {
    let (m, a, b) = setup();
    let channel = Channel::default();
    let mut sim = Simulator::default();
    let mut cap = Capture::default();

    let out = channel.transmit(pkt(a, b, SimTime::ZERO), &m, &mut sim, &mut cap).unwrap();

    let TxOutcome::Scheduled { arrive_at, eval, .. } = out else {
        panic!("expected delivery, got {out:?}");
    };
    assert_eq!(eval.distance_m, 50.0);
    assert_eq!(arrive_at, SimTime(167));
    assert_eq!(sim.pending(), 1);

    let seen = cap.take();
    assert_eq!(seen.len(), 1);
    assert!(matches!(seen[0], ChannelNotification::Sent { at: SimTime::ZERO, .. }));
}

#[test]
fn unreceivable_transmission_is_dropped_immediately() {
    let (m, a, b) = setup();
    let phy = PhyConfig {
        tx_power_dbm: -50.0,
        ..PhyConfig::default()
    };
    let channel = Channel::new(PropagationModel::default(), phy);
    let mut sim = Simulator::default();
    let mut cap = Capture::default();

    let out = channel.transmit(pkt(a, b, SimTime::ZERO), &m, &mut sim, &mut cap).unwrap();

    assert!(matches!(out, TxOutcome::Dropped { eval } if !eval.receivable));
    assert_eq!(sim.pending(), 0);
    let seen = cap.take();
    assert_eq!(seen.len(), 2);
    assert!(matches!(seen[0], ChannelNotification::Sent { .. }));
    assert!(matches!(seen[1], ChannelNotification::Dropped { distance_m, .. } if distance_m == 50.0));
}

#[test]
fn positions_are_read_at_tx_time() {
    let (m, a, b) = setup();
    let channel = Channel::default();
    let tx_time = SimTime::from_secs(1);
    let eval = channel.evaluate_link(&pkt(a, b, tx_time), &m).unwrap();
    // 1 s 后两车相距 10 m
    assert_eq!(eval.distance_m, 10.0);
}

#[test]
fn delivery_action_carries_packet_and_power() {
    let (m, a, b) = setup();
    let channel = Channel::default();
    let mut sim: Simulator<DsrcAction> = Simulator::default();
    let mut cap = Capture::default();
    channel.transmit(pkt(a, b, SimTime::ZERO), &m, &mut sim, &mut cap).unwrap();

    struct Grab(Vec<DsrcAction>);
    impl crate::sim::World for Grab {
        type Action = DsrcAction;
        fn dispatch(&mut self, action: DsrcAction, _sim: &mut Simulator<DsrcAction>) -> crate::Result<()> {
            self.0.push(action);
            Ok(())
        }
    }
    let mut grab = Grab(Vec::new());
    sim.run(&mut grab).unwrap();

    assert_eq!(grab.0.len(), 1);
    match &grab.0[0] {
        DsrcAction::Deliver { pkt, rx_power_dbm } => {
            assert_eq!(pkt.key.dst, b);
            assert!(*rx_power_dbm < 0.0);
        }
        other => panic!("unexpected action {other:?}"),
    }
}
