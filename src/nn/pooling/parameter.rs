/*
 * @Description  : 池化参数：被池化的维度（indices）以及每个维度上的（核大小, 填充, 步长）三元组
 *
 * 默认值沿用 1D/2D/3D 池化层的惯例：
 * - 1D: indices=[2]，      kernel=[2]，      stride=[2]，      padding=[0]
 * - 2D: indices=[2, 3]，   kernel=[2, 2]，   stride=[2, 2]，   padding=[0, 0]
 * - 3D: indices=[2, 3, 4]，kernel=[2, 2, 2]，stride=[2, 2, 2]，padding=[0, 0, 0]
 */

use serde::{Deserialize, Serialize};

use crate::errors::{ComparisonOperator, PoolingError};

/// 池化参数
///
/// `indices[i]`所指的输入维度使用`kernel_sizes[i]`、`paddings[i]`、`strides[i]`，
/// 其余维度原样保留。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolingParameter {
    /// 被池化的维度下标（互不相同，且须小于输入张量的阶数）
    pub indices: Vec<usize>,
    pub kernel_sizes: Vec<usize>,
    pub paddings: Vec<usize>,
    pub strides: Vec<usize>,
    /// 为`true`时只做推理：前向结果中不保留反向传播所需的辅助数据
    #[serde(default)]
    pub prediction_stage: bool,
}

impl PoolingParameter {
    /// 以相同的核大小、步长、填充作用于`indices`所指的每个维度
    pub fn new(indices: &[usize], kernel_size: usize, stride: usize, padding: usize) -> Self {
        let n = indices.len();
        Self {
            indices: indices.to_vec(),
            kernel_sizes: vec![kernel_size; n],
            paddings: vec![padding; n],
            strides: vec![stride; n],
            prediction_stage: false,
        }
    }

    /// 1D 池化的默认参数，输入形如`[batch, C, W]`
    pub fn pooling1d() -> Self {
        Self::new(&[2], 2, 2, 0)
    }

    /// 2D 池化的默认参数，输入形如`[batch, C, H, W]`
    pub fn pooling2d() -> Self {
        Self::new(&[2, 3], 2, 2, 0)
    }

    /// 3D 池化的默认参数，输入形如`[batch, C, D, H, W]`
    pub fn pooling3d() -> Self {
        Self::new(&[2, 3, 4], 2, 2, 0)
    }

    pub fn with_indices(mut self, indices: &[usize]) -> Self {
        self.indices = indices.to_vec();
        self
    }

    pub fn with_kernel_sizes(mut self, kernel_sizes: &[usize]) -> Self {
        self.kernel_sizes = kernel_sizes.to_vec();
        self
    }

    pub fn with_paddings(mut self, paddings: &[usize]) -> Self {
        self.paddings = paddings.to_vec();
        self
    }

    pub fn with_strides(mut self, strides: &[usize]) -> Self {
        self.strides = strides.to_vec();
        self
    }

    pub const fn with_prediction_stage(mut self, prediction_stage: bool) -> Self {
        self.prediction_stage = prediction_stage;
        self
    }

    /// 从json字符串读取参数
    pub fn from_json(json: &str) -> Result<Self, PoolingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// 被池化的维度个数
    pub fn num_pooled_dims(&self) -> usize {
        self.indices.len()
    }

    /// 是否需要为反向传播保留辅助数据
    pub const fn is_training(&self) -> bool {
        !self.prediction_stage
    }

    /// 逐个被池化维度返回（输入维度下标, 核大小, 填充, 步长）
    pub fn windows(&self) -> impl Iterator<Item = (usize, usize, usize, usize)> + '_ {
        self.indices
            .iter()
            .zip(&self.kernel_sizes)
            .zip(&self.paddings)
            .zip(&self.strides)
            .map(|(((&axis, &kernel), &padding), &stride)| (axis, kernel, padding, stride))
    }

    /// 只检查参数本身（不涉及输入张量）：
    /// 1. 三元组的个数须与`indices`个数一致，否则`ShapeMismatch`；
    /// 2. 核大小、步长须≥1，否则`InvalidArgument`。
    pub fn validate(&self) -> Result<(), PoolingError> {
        let n = self.num_pooled_dims();
        if n == 0 {
            return Err(PoolingError::must_satisfy(
                "indices.len()",
                ComparisonOperator::GreaterOrEqual,
                1,
                0,
            ));
        }
        for (name, values) in [
            ("kernel_sizes", &self.kernel_sizes),
            ("paddings", &self.paddings),
            ("strides", &self.strides),
        ] {
            if values.len() != n {
                return Err(PoolingError::shape_mismatch(
                    &[n],
                    &[values.len()],
                    format!("`{name}`的个数须与被池化的维度个数一致"),
                ));
            }
        }
        for (_, kernel, _, stride) in self.windows() {
            if kernel < 1 {
                return Err(PoolingError::must_satisfy(
                    "kernel_size",
                    ComparisonOperator::GreaterOrEqual,
                    1,
                    kernel,
                ));
            }
            if stride < 1 {
                return Err(PoolingError::must_satisfy(
                    "stride",
                    ComparisonOperator::GreaterOrEqual,
                    1,
                    stride,
                ));
            }
        }
        Ok(())
    }

    /// 检查参数能否作用于形状为`input_shape`的输入：
    /// 除`validate`外，`indices`须互不相同且小于输入的阶数（否则`ShapeMismatch`），
    /// 输入的每个维度须为正（否则`InvalidArgument`）。
    pub fn check_against(&self, input_shape: &[usize]) -> Result<(), PoolingError> {
        self.validate()?;

        let rank = input_shape.len();
        if rank < self.num_pooled_dims() {
            return Err(PoolingError::shape_mismatch(
                &[self.num_pooled_dims()],
                &[rank],
                "输入张量的阶数小于被池化的维度个数",
            ));
        }
        for (i, &axis) in self.indices.iter().enumerate() {
            if axis >= rank {
                return Err(PoolingError::shape_mismatch(
                    &self.indices,
                    input_shape,
                    format!("被池化的维度下标{axis}超出输入张量的阶数{rank}"),
                ));
            }
            if self.indices[..i].contains(&axis) {
                return Err(PoolingError::shape_mismatch(
                    &self.indices,
                    input_shape,
                    format!("被池化的维度下标{axis}重复"),
                ));
            }
        }
        if let Some(axis) = input_shape.iter().position(|&d| d == 0) {
            return Err(PoolingError::must_satisfy(
                format!("input_shape[{axis}]"),
                ComparisonOperator::GreaterOrEqual,
                1,
                0,
            ));
        }
        Ok(())
    }
}

impl Default for PoolingParameter {
    fn default() -> Self {
        Self::pooling2d()
    }
}
