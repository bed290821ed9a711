/*
 * @Description  : 反向池化的输入/结果
 *
 * 反向计算依赖前向结果中的辅助数据（训练模式下才会保留），
 * 输出的梯度形状即前向输入的形状（取自`aux_input_dimensions`）。
 */

use super::forward::{ForwardResult, missing_aux};
use super::kernel::{PoolingKernel, PoolingMethod};
use super::{PoolingParameter, compute_value_dimensions};
use crate::errors::PoolingError;
use crate::tensor::Tensor;

/// 反向池化的输入：上游梯度 + 对应的前向结果
#[derive(Debug, Clone, Copy)]
pub struct BackwardInput<'a> {
    input_gradient: &'a Tensor,
    forward: &'a ForwardResult,
}

impl<'a> BackwardInput<'a> {
    pub const fn new(input_gradient: &'a Tensor, forward: &'a ForwardResult) -> Self {
        Self {
            input_gradient,
            forward,
        }
    }

    pub const fn input_gradient(&self) -> &'a Tensor {
        self.input_gradient
    }

    pub const fn forward(&self) -> &'a ForwardResult {
        self.forward
    }

    /// 检查：
    /// 1. 前向结果须带有反向所需的辅助数据（否则`InvalidArgument`）；
    /// 2. 上游梯度的形状须与前向输出一致（否则`ShapeMismatch`）；
    /// 3. 由记录的输入形状重新推算的输出形状须与前向输出一致（否则`ShapeMismatch`）。
    pub fn check(
        &self,
        parameter: &PoolingParameter,
        method: &PoolingMethod,
    ) -> Result<Vec<usize>, PoolingError> {
        let input_dims = self
            .forward
            .input_dimensions()
            .ok_or_else(|| missing_aux("aux_input_dimensions"))?;
        if method.records_selected_indices() && self.forward.aux_selected_indices().is_none() {
            return Err(missing_aux("aux_selected_indices"));
        }

        let value_shape = self.forward.value().shape();
        if self.input_gradient.shape() != value_shape {
            return Err(PoolingError::shape_mismatch(
                value_shape,
                self.input_gradient.shape(),
                "上游梯度的形状须与前向输出一致",
            ));
        }

        let expected = compute_value_dimensions(&input_dims, parameter)?;
        if expected.as_slice() != value_shape {
            return Err(PoolingError::shape_mismatch(
                &expected,
                value_shape,
                "前向输出的形状与当前池化参数不符",
            ));
        }
        Ok(input_dims)
    }
}

/// 反向池化的结果：对前向输入的梯度
#[derive(Debug, Clone, PartialEq)]
pub struct BackwardResult {
    gradient: Tensor,
}

impl BackwardResult {
    /// 分配一个形状与前向输入相同的全零梯度
    pub fn allocate(input: &BackwardInput<'_>) -> Result<Self, PoolingError> {
        let input_dims = input
            .forward()
            .input_dimensions()
            .ok_or_else(|| missing_aux("aux_input_dimensions"))?;
        Ok(Self {
            gradient: Tensor::zeros(&input_dims),
        })
    }

    pub const fn gradient(&self) -> &Tensor {
        &self.gradient
    }

    pub fn into_gradient(self) -> Tensor {
        self.gradient
    }

    pub(crate) fn gradient_mut(&mut self) -> &mut Tensor {
        &mut self.gradient
    }
}
