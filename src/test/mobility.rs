use crate::error::SimError;
use crate::mobility::{MobilityModel, Vector3};
use crate::net::NodeId;
use crate::sim::SimTime;

fn two_cars() -> (MobilityModel, NodeId, NodeId) {
    let mut m = MobilityModel::default();
    let a = m.add_node(Vector3::new(0.0, 0.0, 1.5), Vector3::new(20.0, 0.0, 0.0));
    let b = m.add_node(Vector3::new(50.0, 0.0, 1.5), Vector3::new(-20.0, 0.0, 0.0));
    (m, a, b)
}

#[test]
fn position_is_linear_in_time() {
    let (m, a, b) = two_cars();
    assert_eq!(m.position_at(a, SimTime::ZERO).unwrap(), Vector3::new(0.0, 0.0, 1.5));
    assert_eq!(m.position_at(a, SimTime::from_secs(2)).unwrap(), Vector3::new(40.0, 0.0, 1.5));
    assert_eq!(m.position_at(b, SimTime::from_secs(2)).unwrap(), Vector3::new(10.0, 0.0, 1.5));
}

#[test]
fn queries_have_no_consumption_semantics() {
    let (m, a, b) = two_cars();
    let late = m.distance_at(a, b, SimTime::from_secs(5)).unwrap();
    let early = m.distance_at(a, b, SimTime::from_millis(500)).unwrap();
    let late_again = m.distance_at(a, b, SimTime::from_secs(5)).unwrap();

    assert_eq!(early, 30.0);
    assert_eq!(late, 150.0);
    assert_eq!(late.to_bits(), late_again.to_bits());
}

#[test]
fn cars_pass_each_other_at_one_and_a_quarter_seconds() {
    let (m, a, b) = two_cars();
    assert_eq!(m.distance_at(a, b, SimTime::from_millis(1250)).unwrap(), 0.0);
}

#[test]
fn setup_mutators_work_before_freeze() {
    let (mut m, a, _) = two_cars();
    m.set_velocity(a, Vector3::new(1.0, 2.0, 0.0)).unwrap();
    m.set_initial_position(a, Vector3::new(10.0, 0.0, 0.0)).unwrap();
    assert_eq!(m.velocity(a).unwrap(), Vector3::new(1.0, 2.0, 0.0));
    assert_eq!(m.position_at(a, SimTime::from_secs(1)).unwrap(), Vector3::new(11.0, 2.0, 0.0));
}

#[test]
fn mutation_after_freeze_is_rejected() {
    let (mut m, a, _) = two_cars();
    m.freeze();
    assert!(matches!(
        m.set_velocity(a, Vector3::ZERO),
        Err(SimError::MutationAfterStart(id)) if id == a
    ));
    assert!(matches!(
        m.set_initial_position(a, Vector3::ZERO),
        Err(SimError::MutationAfterStart(_))
    ));
    // 查询不受影响
    assert!(m.position_at(a, SimTime::from_secs(1)).is_ok());
}

#[test]
fn unknown_node_is_an_error() {
    let (m, _, _) = two_cars();
    assert!(matches!(
        m.position_at(NodeId(7), SimTime::ZERO),
        Err(SimError::UnknownNode(NodeId(7)))
    ));
}
