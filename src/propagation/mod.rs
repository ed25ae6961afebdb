//! 无线传播模型
//!
//! 根据收发两端的位置计算传播时延、路径损耗和可接收性。

mod delay;
mod loss;
mod model;

pub use delay::{ConstantSpeedDelay, SPEED_OF_LIGHT_MPS};
pub use loss::{wavelength_m, FreeSpaceLoss, PropagationLoss, TwoRayGroundLoss};
pub use model::{LinkEvaluation, PropagationModel, PropagationParams};
