//! 错误类型
//!
//! 调度器与仿真搭建阶段的错误。信道/传播计算不会返回错误，
//! 统计量未定义时以 `None` 表示而不是报错。

use thiserror::Error;

use crate::app::AppId;
use crate::net::NodeId;
use crate::sim::{EventHandle, SimTime};

#[derive(Debug, Error)]
pub enum SimError {
    /// 试图在过去的时间点调度事件
    #[error("cannot schedule event at {at:?}: clock is already at {now:?}")]
    InvalidSchedule { at: SimTime, now: SimTime },

    /// 取消了一个从未发出过的事件句柄
    #[error("unknown event handle {0}")]
    UnknownHandle(EventHandle),

    /// 仿真开始后修改移动模型参数
    #[error("mobility of node {0:?} cannot change after the run has started")]
    MutationAfterStart(NodeId),

    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("unknown application {0:?}")]
    UnknownApp(AppId),

    /// 场景配置不合法
    #[error("invalid scenario config: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
