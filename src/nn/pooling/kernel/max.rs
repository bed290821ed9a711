/*
 * @Description  : 最大池化
 *
 * - 前向：取窗口内（不含填充区）的最大值，并记录其在输入中的展平下标用于反向传播（稀疏梯度）；
 *   相同最大值取遍历顺序中的第一个；窗口完全落在填充区时输出0且不记录下标
 * - 反向：上游梯度只累加到被选中的输入位置，其余位置梯度为0
 */

use ndarray::Dimension;

use super::PoolingKernel;
use super::window::{PoolingWindow, flat_offset, unravel_offset};
use crate::errors::PoolingError;
use crate::nn::pooling::forward::missing_aux;
use crate::nn::pooling::{
    BackwardInput, BackwardResult, ForwardInput, ForwardResult, PoolingParameter,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxPooling;

impl PoolingKernel for MaxPooling {
    fn name(&self) -> &'static str {
        "maximum"
    }

    fn records_selected_indices(&self) -> bool {
        true
    }

    fn forward(
        &self,
        input: &ForwardInput<'_>,
        parameter: &PoolingParameter,
        result: &mut ForwardResult,
    ) -> Result<(), PoolingError> {
        let window = PoolingWindow::new(parameter);
        let input_data = input.data().data();
        let input_shape = input_data.shape();

        let (value, mut selected) = result.parts_mut();
        for (out_index, out) in value.data_mut().indexed_iter_mut() {
            let out_index = out_index.slice();

            let mut best: Option<(f32, usize)> = None;
            window.for_each_input(out_index, input_shape, |in_index| {
                let candidate = input_data[in_index];
                if best.is_none_or(|(max_val, _)| candidate > max_val) {
                    best = Some((candidate, flat_offset(in_index, input_shape)));
                }
            });

            *out = best.map_or(0.0, |(max_val, _)| max_val);
            if let Some(selected) = selected.as_deref_mut() {
                selected[out_index] = best.map(|(_, offset)| offset);
            }
        }
        Ok(())
    }

    fn backward(
        &self,
        input: &BackwardInput<'_>,
        _parameter: &PoolingParameter,
        result: &mut BackwardResult,
    ) -> Result<(), PoolingError> {
        let selected = input
            .forward()
            .aux_selected_indices()
            .ok_or_else(|| missing_aux("aux_selected_indices"))?;

        let gradient = result.gradient_mut().data_mut();
        let grad_shape = gradient.shape().to_vec();
        for (out_index, &upstream) in input.input_gradient().data().indexed_iter() {
            if let Some(offset) = selected[out_index.slice()] {
                let in_index = unravel_offset(offset, &grad_shape);
                gradient[in_index.as_slice()] += upstream;
            }
        }
        Ok(())
    }
}
