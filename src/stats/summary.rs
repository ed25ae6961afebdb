//! 报告期派生指标
//!
//! 分母为零时返回 `None`，不做除零。

use std::net::Ipv4Addr;

use serde::Serialize;

use super::flow_monitor::FlowRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowSummary {
    #[serde(flatten)]
    pub record: FlowRecord,
    pub src_addr: Ipv4Addr,
    pub dst_addr: Ipv4Addr,
    /// rx * 100 / tx
    pub delivery_ratio_pct: Option<f64>,
    /// delay_sum / rx（秒）
    pub avg_delay_s: Option<f64>,
    /// rx_bytes * 8 / window / 1000
    pub throughput_kbps: Option<f64>,
}

impl FlowSummary {
    /// `window_s` 是配置的观测窗口，而不是墙钟时间
    pub fn from_record(
        record: &FlowRecord,
        window_s: f64,
        src_addr: Ipv4Addr,
        dst_addr: Ipv4Addr,
    ) -> Self {
        let delivery_ratio_pct = (record.tx_packets > 0)
            .then(|| record.rx_packets as f64 * 100.0 / record.tx_packets as f64);
        let avg_delay_s = (record.rx_packets > 0)
            .then(|| record.delay_sum.as_secs_f64() / record.rx_packets as f64);
        let throughput_kbps = (window_s > 0.0 && window_s.is_finite())
            .then(|| record.rx_bytes as f64 * 8.0 / window_s / 1000.0);
        Self {
            record: record.clone(),
            src_addr,
            dst_addr,
            delivery_ratio_pct,
            avg_delay_s,
            throughput_kbps,
        }
    }
}
