/*
 * @Description  : 池化核心（参数、尺寸计算、前向/反向）的单元测试
 *
 * 测试策略：
 * 1. 参数及尺寸计算（含随机生成的合法/非法参数）
 * 2. 结果分配与检查（训练/推理模式）
 * 3. 最大/平均池化的前向数值（含填充、非默认维度）
 * 4. 反向梯度的分配
 */

mod shape;

use crate::errors::PoolingError;
use crate::nn::pooling::{
    BackwardInput, BackwardResult, ForwardInput, ForwardResult, PoolingKernel, PoolingMethod,
    PoolingParameter,
};
use crate::tensor::Tensor;

/// 不经过层，直接按“检查 → 分配 → 池化核”跑一次前向
fn run_forward(
    method: PoolingMethod,
    parameter: &PoolingParameter,
    data: &Tensor,
) -> Result<ForwardResult, PoolingError> {
    let input = ForwardInput::new(data);
    input.check(parameter)?;
    let mut result = ForwardResult::allocate(&input, parameter, &method)?;
    method.forward(&input, parameter, &mut result)?;
    Ok(result)
}

/// 同上，反向
fn run_backward(
    method: PoolingMethod,
    parameter: &PoolingParameter,
    forward: &ForwardResult,
    input_gradient: &Tensor,
) -> Result<BackwardResult, PoolingError> {
    let input = BackwardInput::new(input_gradient, forward);
    input.check(parameter, &method)?;
    let mut result = BackwardResult::allocate(&input)?;
    method.backward(&input, parameter, &mut result)?;
    Ok(result)
}

/// 形状为[1, 1, 4, 4]、元素为1..=16的输入
fn input_4x4() -> Tensor {
    let data = (1..=16).map(|x| x as f32).collect::<Vec<_>>();
    Tensor::new(&data, &[1, 1, 4, 4])
}
