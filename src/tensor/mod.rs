/*
 * @Description  : 张量：池化层输入、输出及梯度的统一载体（基于 ndarray 的动态维度数组）
 */

use ndarray::{Array, ArrayD, IxDyn};
use rand::distributions::{Distribution, Uniform};

use crate::errors::TensorError;

mod index;
mod property;


/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：池化层通常处理的是形如`[batch, C, W]`、`[batch, C, H, W]`或`[batch, C, D, H, W]`的张量。
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
}

impl Tensor {
    /// 创建一个张量。
    /// 注：`data`的长度必须和`shape`中所有元素的乘积相等（形状为`[]`的标量需要1个元素），否则会panic；
    /// 若需要以`Result`形式得到错误，请使用`try_new`。
    pub fn new(data: &[f32], shape: &[usize]) -> Tensor {
        match Self::try_new(data, shape) {
            Ok(tensor) => tensor,
            Err(e) => panic!("{}", e),
        }
    }

    /// 同`new`，但在`data`长度与`shape`不符时返回错误而非panic
    pub fn try_new(data: &[f32], shape: &[usize]) -> Result<Tensor, TensorError> {
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec()).map_err(|_| {
            TensorError::DataLenMismatch {
                data_len: data.len(),
                shape: shape.to_vec(),
            }
        })?;
        Ok(Tensor { data })
    }

    /// 创建一个所有元素均为0的张量
    pub fn zeros(shape: &[usize]) -> Tensor {
        Tensor {
            data: ArrayD::zeros(IxDyn(shape)),
        }
    }

    /// 创建一个随机张量，其值在[min, max]的闭区间
    pub fn new_random(min: f32, max: f32, shape: &[usize]) -> Tensor {
        let mut rng = rand::thread_rng();
        let uniform = Uniform::from(min..=max);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| uniform.sample(&mut rng))
            .collect::<Vec<_>>();
        Tensor::new(&data, shape)
    }
}

// crate内部使用：池化核直接操作底层数组
impl Tensor {
    pub(crate) fn data(&self) -> &ArrayD<f32> {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut ArrayD<f32> {
        &mut self.data
    }
}
