//! 结构化轨迹输出
//!
//! 每条信道通知写成一行 JSON，便于离线分析。

mod json_lines;

pub use json_lines::JsonLinesTrace;
