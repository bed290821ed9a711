use super::Tensor;
use std::ops::{Index, IndexMut};

// 按完整下标取单个元素，如`tensor[[0, 1, 2, 3]]`；下标个数须与张量阶数一致，越界时panic
impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f32;

    fn index(&self, index: [usize; N]) -> &Self::Output {
        &self.data[&index[..]]
    }
}

impl<const N: usize> IndexMut<[usize; N]> for Tensor {
    fn index_mut(&mut self, index: [usize; N]) -> &mut Self::Output {
        &mut self.data[&index[..]]
    }
}

impl Index<&[usize]> for Tensor {
    type Output = f32;

    fn index(&self, index: &[usize]) -> &Self::Output {
        &self.data[index]
    }
}
