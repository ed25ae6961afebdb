//! 流统计
//!
//! 按 (源, 目的, 端口) 分类的逐流计数器，以及在报告时才计算的派生指标。

mod flow_monitor;
mod summary;

pub use flow_monitor::{FlowId, FlowMonitor, FlowRecord};
pub use summary::FlowSummary;
