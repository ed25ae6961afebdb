//! 世界 trait
//!
//! 定义仿真世界接口。

use super::simulator::Simulator;
use crate::error::Result;

/// 仿真世界：由业务层实现，负责把出队的动作分派给具体组件。
pub trait World {
    /// 事件动作（带标签的枚举）
    type Action;

    /// 执行一个已到期的动作。返回错误会中止当前运行。
    fn dispatch(&mut self, action: Self::Action, sim: &mut Simulator<Self::Action>) -> Result<()>;

    fn on_tick(&mut self, _sim: &mut Simulator<Self::Action>) {}
}
