/*
 * @Description  : 池化输出尺寸计算
 *
 * 单个维度：out = floor((data_dim + 2 * padding - kernel_size) / stride) + 1
 * 整个形状：对每个被池化的维度单独套用上式，其余维度原样、按原顺序保留
 */

use log::trace;

use super::PoolingParameter;
use crate::errors::{ComparisonOperator, PoolingError};

/// 计算单个被池化维度的输出尺寸
///
/// # 参数
/// - `data_dim`: 输入在该维度上的尺寸（≥1）
/// - `kernel_size`: 核大小（≥1）
/// - `padding`: 两侧各填充的元素个数（≥0）
/// - `stride`: 步长（≥1）
///
/// # 错误
/// 任一参数不满足上述约束，或核大小超过填充后的输入尺寸（即结果非正）时，返回`InvalidArgument`
///
/// # 示例
/// ```
/// use tensor_pooling::nn::pooling::compute_value_dimension;
///
/// assert_eq!(compute_value_dimension(7, 3, 0, 2).unwrap(), 3);
/// assert_eq!(compute_value_dimension(5, 5, 0, 1).unwrap(), 1);
/// assert!(compute_value_dimension(4, 5, 0, 1).is_err());
/// ```
pub fn compute_value_dimension(
    data_dim: usize,
    kernel_size: usize,
    padding: usize,
    stride: usize,
) -> Result<usize, PoolingError> {
    if data_dim < 1 {
        return Err(PoolingError::must_satisfy(
            "data_dim",
            ComparisonOperator::GreaterOrEqual,
            1,
            data_dim,
        ));
    }
    if kernel_size < 1 {
        return Err(PoolingError::must_satisfy(
            "kernel_size",
            ComparisonOperator::GreaterOrEqual,
            1,
            kernel_size,
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

    let padded_dim = padding
        .checked_mul(2)
        .and_then(|both_sides| both_sides.checked_add(data_dim))
        .ok_or_else(|| PoolingError::InvalidArgument {
            argument: "padding".to_string(),
            message: format!("data_dim + 2 * padding 溢出（data_dim={data_dim}，padding={padding}）"),
        })?;

    if kernel_size > padded_dim {
        return Err(PoolingError::must_satisfy(
            "kernel_size",
            ComparisonOperator::LessOrEqual,
            padded_dim,
            kernel_size,
        ));
    }

    let value_dim = (padded_dim - kernel_size) / stride + 1;
    trace!(
        "池化输出尺寸：data_dim={data_dim}，kernel={kernel_size}，padding={padding}，stride={stride} => {value_dim}"
    );
    Ok(value_dim)
}

/// 计算整个输出形状：被池化的维度按`compute_value_dimension`替换，其余维度不变
///
/// # 错误
/// - 参数与输入不匹配（个数、下标）时返回`ShapeMismatch`
/// - 某个维度的参数无效时返回`InvalidArgument`
pub fn compute_value_dimensions(
    input_shape: &[usize],
    parameter: &PoolingParameter,
) -> Result<Vec<usize>, PoolingError> {
    parameter.check_against(input_shape)?;

    let mut value_shape = input_shape.to_vec();
    for (axis, kernel, padding, stride) in parameter.windows() {
        value_shape[axis] = compute_value_dimension(input_shape[axis], kernel, padding, stride)?;
    }
    Ok(value_shape)
}
