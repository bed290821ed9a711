//! # 池化
//!
//! 按“参数 → 输入检查 → 结果分配 → 池化核计算”的流程组织：
//! - [`PoolingParameter`]：被池化的维度及每个维度的（核大小, 填充, 步长）
//! - [`compute_value_dimension`]/[`compute_value_dimensions`]：输出尺寸计算
//! - [`ForwardInput`]/[`ForwardResult`]、[`BackwardInput`]/[`BackwardResult`]：前向/反向的输入与结果
//! - [`PoolingMethod`]：最大池化、平均池化

mod backward;
mod forward;
mod kernel;
mod parameter;
mod shape;

pub use backward::{BackwardInput, BackwardResult};
pub use forward::{ForwardInput, ForwardResult};
pub use kernel::{AveragePooling, MaxPooling, PoolingKernel, PoolingMethod};
pub use parameter::PoolingParameter;
pub use shape::{compute_value_dimension, compute_value_dimensions};

#[cfg(test)]
mod tests;
