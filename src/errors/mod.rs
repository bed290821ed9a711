/*
 * @Description  : 张量及池化层的错误类型
 */

use thiserror::Error;
mod ops;
pub use self::ops::*;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    #[error("数据长度{data_len}与形状{shape:?}所需的元素个数不一致")]
    DataLenMismatch { data_len: usize, shape: Vec<usize> },
}

/// 池化层（参数校验、尺寸计算、前向/反向计算）的错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PoolingError {
    /// 单个参数（或张量的某一维度）不满足其前置条件
    #[error("参数`{argument}`无效：{message}")]
    InvalidArgument { argument: String, message: String },
    /// 参数个数与被池化的维度数不一致，或张量形状与预期不符
    #[error("形状不匹配：预期{expected:?}，实际得到{got:?}（{message}）")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
    /// 配置（json）解析失败
    #[error("池化配置解析失败：{0}")]
    Config(String),
}

impl PoolingError {
    /// 构造“`argument`须`operator``threshold`，实际为`got`”形式的`InvalidArgument`
    pub(crate) fn must_satisfy(
        argument: impl Into<String>,
        operator: ComparisonOperator,
        threshold: usize,
        got: usize,
    ) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            message: format!("须{operator}{threshold}，实际为{got}"),
        }
    }

    pub(crate) fn shape_mismatch(
        expected: &[usize],
        got: &[usize],
        message: impl Into<String>,
    ) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for PoolingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
