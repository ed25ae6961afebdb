//! 匀速移动模型
//!
//! 每个节点的位置是时间的纯函数：`p(t) = p0 + v * t`。
//! 查询没有消费语义，可以在任意时间点（包括已经过去的时间）反复调用。

use super::vector::Vector3;
use crate::error::{Result, SimError};
use crate::net::NodeId;
use crate::sim::SimTime;
use tracing::debug;

/// 单个节点的运动学状态
#[derive(Debug, Clone, Copy, PartialEq)]
struct Kinematics {
    initial: Vector3,
    velocity: Vector3,
}

/// 匀速移动模型：持有全部节点的运动学状态。
#[derive(Debug, Default, Clone)]
pub struct MobilityModel {
    nodes: Vec<Kinematics>,
    frozen: bool,
}

impl MobilityModel {
    /// 添加节点，返回其标识符
    pub fn add_node(&mut self, position: Vector3, velocity: Vector3) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Kinematics {
            initial: position,
            velocity,
        });
        debug!(node = ?id, %position, %velocity, "添加移动节点");
        id
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 锁定参数；仿真开始时由驱动器调用。
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn node(&self, id: NodeId) -> Result<&Kinematics> {
        self.nodes.get(id.0).ok_or(SimError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Kinematics> {
        if self.frozen {
            return Err(SimError::MutationAfterStart(id));
        }
        self.nodes.get_mut(id.0).ok_or(SimError::UnknownNode(id))
    }

    pub fn set_velocity(&mut self, id: NodeId, velocity: Vector3) -> Result<()> {
        self.node_mut(id)?.velocity = velocity;
        Ok(())
    }

    pub fn set_initial_position(&mut self, id: NodeId, position: Vector3) -> Result<()> {
        self.node_mut(id)?.initial = position;
        Ok(())
    }

    pub fn velocity(&self, id: NodeId) -> Result<Vector3> {
        Ok(self.node(id)?.velocity)
    }

    /// 节点在时间 `t` 的位置
    pub fn position_at(&self, id: NodeId, t: SimTime) -> Result<Vector3> {
        let k = self.node(id)?;
        Ok(k.initial + k.velocity * t.as_secs_f64())
    }

    /// 两个节点在时间 `t` 的距离（米）
    pub fn distance_at(&self, a: NodeId, b: NodeId, t: SimTime) -> Result<f64> {
        Ok(self.position_at(a, t)?.distance(self.position_at(b, t)?))
    }
}
