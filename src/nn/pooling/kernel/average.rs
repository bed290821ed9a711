/*
 * @Description  : 平均池化
 *
 * 除数固定为整个窗口的元素个数（填充区按0计入），与窗口是否跨越边界无关
 */

use ndarray::Dimension;

use super::PoolingKernel;
use super::window::PoolingWindow;
use crate::errors::PoolingError;
use crate::nn::pooling::{
    BackwardInput, BackwardResult, ForwardInput, ForwardResult, PoolingParameter,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AveragePooling;

impl PoolingKernel for AveragePooling {
    fn name(&self) -> &'static str {
        "average"
    }

    fn records_selected_indices(&self) -> bool {
        false
    }

    fn forward(
        &self,
        input: &ForwardInput<'_>,
        parameter: &PoolingParameter,
        result: &mut ForwardResult,
    ) -> Result<(), PoolingError> {
        let window = PoolingWindow::new(parameter);
        let volume = window.volume() as f32;
        let input_data = input.data().data();
        let input_shape = input_data.shape();

        let (value, _) = result.parts_mut();
        for (out_index, out) in value.data_mut().indexed_iter_mut() {
            let mut sum = 0.0;
            window.for_each_input(out_index.slice(), input_shape, |in_index| {
                sum += input_data[in_index];
            });
            *out = sum / volume;
        }
        Ok(())
    }

    fn backward(
        &self,
        input: &BackwardInput<'_>,
        parameter: &PoolingParameter,
        result: &mut BackwardResult,
    ) -> Result<(), PoolingError> {
        let window = PoolingWindow::new(parameter);
        let volume = window.volume() as f32;

        let gradient = result.gradient_mut().data_mut();
        let grad_shape = gradient.shape().to_vec();
        for (out_index, &upstream) in input.input_gradient().data().indexed_iter() {
            let share = upstream / volume;
            window.for_each_input(out_index.slice(), &grad_shape, |in_index| {
                gradient[in_index] += share;
            });
        }
        Ok(())
    }
}
