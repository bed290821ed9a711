/*
 * @Description  : 池化层（最大/平均，1D/2D/3D）
 *
 * 设计决策：
 * - 输入默认是 Batch-First 格式：[batch, C, W] / [batch, C, H, W] / [batch, C, D, H, W]
 * - 输出格式：被池化的维度按输出尺寸公式替换，其余维度不变
 * - 步长缺省时等于核大小（同 PyTorch 的 nn.MaxPool2d / nn.AvgPool2d）
 * - 每次调用独立：先检查，再分配结果，最后交给池化核计算
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::PoolingError;
use crate::nn::pooling::{
    AveragePooling, BackwardInput, BackwardResult, ForwardInput, ForwardResult, MaxPooling,
    PoolingKernel, PoolingMethod, PoolingParameter, compute_value_dimensions,
};
use crate::tensor::Tensor;

/// 池化层
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolingLayer {
    parameter: PoolingParameter,
    method: PoolingMethod,
}

impl PoolingLayer {
    /// 创建池化层；参数本身无效时（个数不一致、核大小或步长为0）返回错误
    pub fn new(parameter: PoolingParameter, method: PoolingMethod) -> Result<Self, PoolingError> {
        parameter.validate()?;
        Ok(Self { parameter, method })
    }

    pub const fn parameter(&self) -> &PoolingParameter {
        &self.parameter
    }

    pub const fn method(&self) -> &PoolingMethod {
        &self.method
    }

    /// 切换训练/推理：推理（`prediction_stage = true`）时前向结果不保留辅助数据，也就不能再做反向
    pub fn with_prediction_stage(mut self, prediction_stage: bool) -> Self {
        self.parameter.prediction_stage = prediction_stage;
        self
    }

    /// 对形状为`input_shape`的输入，本层的输出形状
    pub fn value_size(&self, input_shape: &[usize]) -> Result<Vec<usize>, PoolingError> {
        compute_value_dimensions(input_shape, &self.parameter)
    }

    /// 前向池化
    pub fn forward(&self, data: &Tensor) -> Result<ForwardResult, PoolingError> {
        let input = ForwardInput::new(data);
        input.check(&self.parameter)?;

        let mut result = ForwardResult::allocate(&input, &self.parameter, &self.method)?;
        self.method.forward(&input, &self.parameter, &mut result)?;

        debug!(
            "{}池化前向：{:?} => {:?}",
            self.method.name(),
            data.shape(),
            result.value().shape()
        );
        Ok(result)
    }

    /// 反向池化：根据前向结果与上游梯度，计算对前向输入的梯度
    pub fn backward(
        &self,
        forward: &ForwardResult,
        input_gradient: &Tensor,
    ) -> Result<BackwardResult, PoolingError> {
        let input = BackwardInput::new(input_gradient, forward);
        input.check(&self.parameter, &self.method)?;

        let mut result = BackwardResult::allocate(&input)?;
        self.method.backward(&input, &self.parameter, &mut result)?;

        debug!(
            "{}池化反向：{:?} => {:?}",
            self.method.name(),
            input_gradient.shape(),
            result.gradient().shape()
        );
        Ok(result)
    }

    /// 导出为可序列化的配置
    pub fn config(&self) -> PoolingLayerConfig {
        PoolingLayerConfig {
            method: PoolingKind::from(&self.method),
            parameter: self.parameter.clone(),
        }
    }
}

/// 池化种类（用于配置文件）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolingKind {
    Maximum,
    Average,
}

impl From<PoolingKind> for PoolingMethod {
    fn from(kind: PoolingKind) -> Self {
        match kind {
            PoolingKind::Maximum => MaxPooling.into(),
            PoolingKind::Average => AveragePooling.into(),
        }
    }
}

impl From<&PoolingMethod> for PoolingKind {
    fn from(method: &PoolingMethod) -> Self {
        match method {
            PoolingMethod::Maximum(_) => Self::Maximum,
            PoolingMethod::Average(_) => Self::Average,
        }
    }
}

/// 池化层的配置，json形如：
/// ```json
/// {
///     "method": "maximum",
///     "parameter": {
///         "indices": [2, 3],
///         "kernel_sizes": [3, 3],
///         "paddings": [1, 1],
///         "strides": [2, 2],
///         "prediction_stage": false
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolingLayerConfig {
    pub method: PoolingKind,
    pub parameter: PoolingParameter,
}

impl PoolingLayerConfig {
    pub fn from_json(json: &str) -> Result<Self, PoolingError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PoolingError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn build(self) -> Result<PoolingLayer, PoolingError> {
        PoolingLayer::new(self.parameter, self.method.into())
    }
}

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓便捷构造函数↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
fn build_layer(
    indices: &[usize],
    kernel_sizes: &[usize],
    strides: Option<&[usize]>,
    paddings: &[usize],
    method: PoolingMethod,
) -> Result<PoolingLayer, PoolingError> {
    let parameter = PoolingParameter::new(indices, 1, 1, 0)
        .with_kernel_sizes(kernel_sizes)
        .with_strides(strides.unwrap_or(kernel_sizes)) // 默认 stride = kernel_size
        .with_paddings(paddings);
    PoolingLayer::new(parameter, method)
}

/// 1D 最大池化，输入`[batch, C, W]`
pub fn max_pool1d(
    kernel_size: usize,
    stride: Option<usize>,
    padding: usize,
) -> Result<PoolingLayer, PoolingError> {
    build_layer(
        &[2],
        &[kernel_size],
        stride.as_ref().map(std::slice::from_ref),
        &[padding],
        PoolingMethod::maximum(),
    )
}

/// 2D 最大池化，输入`[batch, C, H, W]`
///
/// # 输出尺寸计算
/// ```text
/// H' = (H + 2 * padding_h - kernel_h) / stride_h + 1
/// W' = (W + 2 * padding_w - kernel_w) / stride_w + 1
/// ```
///
/// # 示例
/// ```
/// use tensor_pooling::nn::max_pool2d;
/// use tensor_pooling::tensor::Tensor;
///
/// let pool = max_pool2d((2, 2), None, (0, 0)).unwrap();
/// let input = Tensor::new_random(-1.0, 1.0, &[4, 16, 28, 28]);
/// let output = pool.forward(&input).unwrap();
/// assert_eq!(output.value().shape(), &[4, 16, 14, 14]);
/// ```
pub fn max_pool2d(
    kernel_size: (usize, usize),
    stride: Option<(usize, usize)>,
    padding: (usize, usize),
) -> Result<PoolingLayer, PoolingError> {
    let stride = stride.map(|(s_h, s_w)| [s_h, s_w]);
    build_layer(
        &[2, 3],
        &[kernel_size.0, kernel_size.1],
        stride.as_ref().map(|s| s.as_slice()),
        &[padding.0, padding.1],
        PoolingMethod::maximum(),
    )
}

/// 3D 最大池化，输入`[batch, C, D, H, W]`
pub fn max_pool3d(
    kernel_size: (usize, usize, usize),
    stride: Option<(usize, usize, usize)>,
    padding: (usize, usize, usize),
) -> Result<PoolingLayer, PoolingError> {
    let stride = stride.map(|(s_d, s_h, s_w)| [s_d, s_h, s_w]);
    build_layer(
        &[2, 3, 4],
        &[kernel_size.0, kernel_size.1, kernel_size.2],
        stride.as_ref().map(|s| s.as_slice()),
        &[padding.0, padding.1, padding.2],
        PoolingMethod::maximum(),
    )
}

/// 1D 平均池化，输入`[batch, C, W]`
pub fn avg_pool1d(
    kernel_size: usize,
    stride: Option<usize>,
    padding: usize,
) -> Result<PoolingLayer, PoolingError> {
    build_layer(
        &[2],
        &[kernel_size],
        stride.as_ref().map(std::slice::from_ref),
        &[padding],
        PoolingMethod::average(),
    )
}

/// 2D 平均池化，输入`[batch, C, H, W]`
///
/// 典型用法：全局平均池化
/// ```ignore
/// let gap = avg_pool2d((7, 7), None, (0, 0))?;
/// ```
pub fn avg_pool2d(
    kernel_size: (usize, usize),
    stride: Option<(usize, usize)>,
    padding: (usize, usize),
) -> Result<PoolingLayer, PoolingError> {
    let stride = stride.map(|(s_h, s_w)| [s_h, s_w]);
    build_layer(
        &[2, 3],
        &[kernel_size.0, kernel_size.1],
        stride.as_ref().map(|s| s.as_slice()),
        &[padding.0, padding.1],
        PoolingMethod::average(),
    )
}

/// 3D 平均池化，输入`[batch, C, D, H, W]`
pub fn avg_pool3d(
    kernel_size: (usize, usize, usize),
    stride: Option<(usize, usize, usize)>,
    padding: (usize, usize, usize),
) -> Result<PoolingLayer, PoolingError> {
    let stride = stride.map(|(s_d, s_h, s_w)| [s_d, s_h, s_w]);
    build_layer(
        &[2, 3, 4],
        &[kernel_size.0, kernel_size.1, kernel_size.2],
        stride.as_ref().map(|s| s.as_slice()),
        &[padding.0, padding.1, padding.2],
        PoolingMethod::average(),
    )
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑便捷构造函数↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
