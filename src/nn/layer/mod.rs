/*
 * @Description  : Layer 模块 - 便捷函数，按常见的 1D/2D/3D 用法构建池化层
 *
 * Layer 不是新的抽象层，只是把参数、池化种类与前向/反向流程打包在一起的语法糖
 */

mod pooling;

pub use pooling::{
    PoolingKind, PoolingLayer, PoolingLayerConfig, avg_pool1d, avg_pool2d, avg_pool3d,
    max_pool1d, max_pool2d, max_pool3d,
};
