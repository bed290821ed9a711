/*
 * @Description  : 前向池化的输入/结果
 *
 * - `ForwardInput`只借用输入张量，不持有数据，生命周期限于一次调用；
 * - `ForwardResult`持有输出张量（value），训练模式下还持有反向传播所需的辅助数据：
 *   - `aux_input_dimensions`：形状为`[rank]`的整数数组，其元素即输入张量的各维尺寸（按原值保存，不经f32）；
 *   - `aux_selected_indices`：仅最大池化，记录每个输出元素所选中的输入元素的（行优先）展平下标；
 *     若窗口完全落在填充区域内，则为`None`。
 */

use ndarray::{Array1, ArrayD, IxDyn};

use super::kernel::{PoolingKernel, PoolingMethod};
use super::{PoolingParameter, compute_value_dimensions};
use crate::errors::PoolingError;
use crate::tensor::Tensor;

/// 前向池化的输入
#[derive(Debug, Clone, Copy)]
pub struct ForwardInput<'a> {
    data: &'a Tensor,
}

impl<'a> ForwardInput<'a> {
    pub const fn new(data: &'a Tensor) -> Self {
        Self { data }
    }

    pub const fn data(&self) -> &'a Tensor {
        self.data
    }

    /// 检查输入能否按`parameter`做池化
    pub fn check(&self, parameter: &PoolingParameter) -> Result<(), PoolingError> {
        compute_value_dimensions(self.data.shape(), parameter).map(|_| ())
    }
}

/// 前向池化的结果
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardResult {
    value: Tensor,
    aux_input_dimensions: Option<Array1<usize>>,
    aux_selected_indices: Option<ArrayD<Option<usize>>>,
}

impl ForwardResult {
    /// 输出张量的形状
    pub fn value_size(
        input_shape: &[usize],
        parameter: &PoolingParameter,
    ) -> Result<Vec<usize>, PoolingError> {
        compute_value_dimensions(input_shape, parameter)
    }

    /// 按输入形状与参数分配（全零的）结果；不修改输入
    pub fn allocate(
        input: &ForwardInput<'_>,
        parameter: &PoolingParameter,
        method: &PoolingMethod,
    ) -> Result<Self, PoolingError> {
        let input_shape = input.data().shape();
        let value_shape = Self::value_size(input_shape, parameter)?;

        let (aux_input_dimensions, aux_selected_indices) = if parameter.is_training() {
            let selected = method
                .records_selected_indices()
                .then(|| ArrayD::from_elem(IxDyn(&value_shape), None));
            (Some(Self::create_aux_input_dimensions(input_shape)), selected)
        } else {
            (None, None)
        };

        Ok(Self {
            value: Tensor::zeros(&value_shape),
            aux_input_dimensions,
            aux_selected_indices,
        })
    }

    /// 检查已有结果与输入、参数是否吻合
    pub fn check(
        &self,
        input: &ForwardInput<'_>,
        parameter: &PoolingParameter,
        method: &PoolingMethod,
    ) -> Result<(), PoolingError> {
        let input_shape = input.data().shape();
        let value_shape = Self::value_size(input_shape, parameter)?;
        if self.value.shape() != value_shape.as_slice() {
            return Err(PoolingError::shape_mismatch(
                &value_shape,
                self.value.shape(),
                "前向结果value的形状与计算所得不一致",
            ));
        }
        if !parameter.is_training() {
            return Ok(());
        }

        let recorded = self
            .input_dimensions()
            .ok_or_else(|| missing_aux("aux_input_dimensions"))?;
        if recorded != input_shape {
            return Err(PoolingError::shape_mismatch(
                input_shape,
                &recorded,
                "aux_input_dimensions与输入张量的形状不一致",
            ));
        }
        if method.records_selected_indices() {
            let selected = self
                .aux_selected_indices
                .as_ref()
                .ok_or_else(|| missing_aux("aux_selected_indices"))?;
            if selected.shape() != value_shape.as_slice() {
                return Err(PoolingError::shape_mismatch(
                    &value_shape,
                    selected.shape(),
                    "aux_selected_indices的形状须与value一致",
                ));
            }
        }
        Ok(())
    }

    pub const fn value(&self) -> &Tensor {
        &self.value
    }

    pub fn into_value(self) -> Tensor {
        self.value
    }

    pub const fn aux_input_dimensions(&self) -> Option<&Array1<usize>> {
        self.aux_input_dimensions.as_ref()
    }

    /// 以`Vec<usize>`形式返回`aux_input_dimensions`中记录的输入形状
    pub fn input_dimensions(&self) -> Option<Vec<usize>> {
        self.aux_input_dimensions
            .as_ref()
            .map(|dims| dims.to_vec())
    }

    pub const fn aux_selected_indices(&self) -> Option<&ArrayD<Option<usize>>> {
        self.aux_selected_indices.as_ref()
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Tensor, Option<&mut ArrayD<Option<usize>>>) {
        (&mut self.value, self.aux_selected_indices.as_mut())
    }

    fn create_aux_input_dimensions(input_shape: &[usize]) -> Array1<usize> {
        Array1::from(input_shape.to_vec())
    }
}

pub(super) fn missing_aux(name: &str) -> PoolingError {
    PoolingError::InvalidArgument {
        argument: name.to_string(),
        message: "前向结果中缺少反向传播所需的辅助数据（是否以prediction_stage=true做了前向计算？）"
            .to_string(),
    }
}
