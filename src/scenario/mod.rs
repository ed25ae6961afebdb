//! 两车 DSRC 场景
//!
//! 配置、装配与运行。

mod config;
mod driver;
mod report;

pub use config::{NodeSpec, ScenarioConfig};
pub use driver::SimulationDriver;
pub use report::SimulationReport;
