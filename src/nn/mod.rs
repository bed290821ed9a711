/*
 * @Description  : 神经网络相关：池化的计算核心（pooling）及面向使用者的池化层（layer）
 */

pub mod layer;
pub mod pooling;

pub use layer::{
    PoolingKind, PoolingLayer, PoolingLayerConfig, avg_pool1d, avg_pool2d, avg_pool3d,
    max_pool1d, max_pool2d, max_pool3d,
};
pub use pooling::{PoolingMethod, PoolingParameter};
