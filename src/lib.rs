//! # Tensor Pooling
//!
//! `tensor_pooling`用纯rust实现神经网络中的池化层（pooling）：
//! - 输出尺寸计算：`out = floor((data_dim + 2 * padding - kernel_size) / stride) + 1`，
//!   逐个作用于被池化的维度，其余维度原样保留；
//! - 结果形状校验与分配（训练模式下额外保留反向传播所需的辅助数据）；
//! - 1D/2D/3D 的最大池化、平均池化的前向与反向计算。
//!
//! ```
//! use tensor_pooling::nn::pooling::compute_value_dimension;
//!
//! assert_eq!(compute_value_dimension(7, 3, 0, 2).unwrap(), 3);
//! ```

pub mod errors;
pub mod nn;
pub mod tensor;
pub mod utils;
