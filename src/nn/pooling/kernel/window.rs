use crate::nn::pooling::PoolingParameter;

/// 池化窗口：描述某个输出位置在输入中覆盖的范围
///
/// 对被池化的维度`axis`，输出下标`o`的窗口覆盖输入下标`o * stride - padding + k`（`k`∈[0, kernel)），
/// 落在`[0, data_dim)`之外的部分即填充区。遍历按维度下标升序、行优先（最后一维变化最快）进行。
#[derive(Debug, Clone)]
pub(crate) struct PoolingWindow {
    // (axis, kernel_size, padding, stride)，按axis升序
    axes: Vec<(usize, usize, usize, usize)>,
}

impl PoolingWindow {
    pub(crate) fn new(parameter: &PoolingParameter) -> Self {
        let mut axes = parameter.windows().collect::<Vec<_>>();
        axes.sort_unstable_by_key(|&(axis, ..)| axis);
        Self { axes }
    }

    /// 窗口的总元素个数（含填充区）
    pub(crate) fn volume(&self) -> usize {
        self.axes.iter().map(|&(_, kernel, ..)| kernel).product()
    }

    /// 对输出位置`out_index`所对应窗口中每个未落在填充区的输入位置调用`f`
    pub(crate) fn for_each_input(
        &self,
        out_index: &[usize],
        input_shape: &[usize],
        mut f: impl FnMut(&[usize]),
    ) {
        let mut in_index = out_index.to_vec();
        let mut offsets = vec![0usize; self.axes.len()];

        'window: loop {
            let inside = self.axes.iter().zip(&offsets).all(|(&(axis, _, padding, stride), &k)| {
                let padded_pos = out_index[axis] * stride + k;
                if padded_pos < padding || padded_pos - padding >= input_shape[axis] {
                    return false;
                }
                in_index[axis] = padded_pos - padding;
                true
            });
            if inside {
                f(&in_index);
            }

            // 里程表式进位
            let mut i = self.axes.len();
            while i > 0 {
                i -= 1;
                offsets[i] += 1;
                if offsets[i] < self.axes[i].1 {
                    continue 'window;
                }
                offsets[i] = 0;
            }
            return;
        }
    }
}

/// 行优先的展平下标
pub(crate) fn flat_offset(index: &[usize], shape: &[usize]) -> usize {
    index
        .iter()
        .zip(shape)
        .fold(0, |offset, (&i, &dim)| offset * dim + i)
}

/// `flat_offset`的逆运算
pub(crate) fn unravel_offset(mut offset: usize, shape: &[usize]) -> Vec<usize> {
    let mut index = vec![0; shape.len()];
    for (i, &dim) in shape.iter().enumerate().rev() {
        index[i] = offset % dim;
        offset /= dim;
    }
    index
}
