/*
 * @Description  : 池化核：最大池化、平均池化
 *
 * 用带标签的枚举（enum_dispatch）在少量池化种类间分派，
 * 各种类只需实现`PoolingKernel`，参数校验与结果分配由`forward`/`backward`模块统一负责。
 */

mod average;
mod max;
mod window;

pub use average::AveragePooling;
pub use max::MaxPooling;

use enum_dispatch::enum_dispatch;

use super::{BackwardInput, BackwardResult, ForwardInput, ForwardResult, PoolingParameter};
use crate::errors::PoolingError;

#[enum_dispatch]
pub trait PoolingKernel {
    /// 种类名称，用于日志
    fn name(&self) -> &'static str;

    /// 前向结果中是否需要记录被选中元素的位置（`aux_selected_indices`）
    fn records_selected_indices(&self) -> bool;

    /// 根据输入计算前向结果。`result`须已按`ForwardResult::allocate`分配好
    fn forward(
        &self,
        input: &ForwardInput<'_>,
        parameter: &PoolingParameter,
        result: &mut ForwardResult,
    ) -> Result<(), PoolingError>;

    /// 根据上游梯度计算对前向输入的梯度。`result`须已按`BackwardResult::allocate`分配好（全零）
    fn backward(
        &self,
        input: &BackwardInput<'_>,
        parameter: &PoolingParameter,
        result: &mut BackwardResult,
    ) -> Result<(), PoolingError>;
}

/// 池化种类
#[enum_dispatch(PoolingKernel)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolingMethod {
    Maximum(MaxPooling),
    Average(AveragePooling),
}

impl PoolingMethod {
    pub const fn maximum() -> Self {
        Self::Maximum(MaxPooling)
    }

    pub const fn average() -> Self {
        Self::Average(AveragePooling)
    }
}
