use rand::Rng;

use crate::assert_err;
use crate::errors::PoolingError;
use crate::nn::pooling::{PoolingParameter, compute_value_dimension, compute_value_dimensions};

#[test]
fn test_compute_value_dimension() -> Result<(), PoolingError> {
    // (data_dim, kernel_size, padding, stride, expected)
    let cases = [
        (7, 3, 0, 2, 3),
        (5, 5, 0, 1, 1),
        (28, 2, 0, 2, 14),
        (4, 3, 1, 1, 4),
        (5, 2, 1, 2, 3),
        (1, 3, 1, 1, 1),
        (1, 1, 1, 1, 3),
    ];
    for (data_dim, kernel_size, padding, stride, expected) in cases {
        assert_eq!(
            compute_value_dimension(data_dim, kernel_size, padding, stride)?,
            expected,
            "data_dim={data_dim}, kernel_size={kernel_size}, padding={padding}, stride={stride}"
        );
    }
    Ok(())
}

#[test]
fn test_compute_value_dimension_kernel_larger_than_padded_input() {
    assert_err!(
        compute_value_dimension(4, 5, 0, 1),
        PoolingError::InvalidArgument("kernel_size")
    );
    assert_eq!(
        compute_value_dimension(4, 5, 0, 1),
        Err(PoolingError::InvalidArgument {
            argument: "kernel_size".to_string(),
            message: "须≤4，实际为5".to_string(),
        })
    );
    // 填充后刚好放得下
    assert_eq!(compute_value_dimension(3, 5, 1, 1), Ok(1));
    assert_err!(
        compute_value_dimension(2, 5, 1, 1),
        PoolingError::InvalidArgument("kernel_size")
    );
}

#[test]
fn test_compute_value_dimension_invalid_arguments() {
    assert_err!(compute_value_dimension(0, 1, 0, 1), PoolingError::InvalidArgument("data_dim"));
    assert_err!(compute_value_dimension(3, 0, 0, 1), PoolingError::InvalidArgument("kernel_size"));
    assert_err!(compute_value_dimension(3, 1, 0, 0), PoolingError::InvalidArgument("stride"));
    assert_err!(
        compute_value_dimension(3, 1, usize::MAX, 1),
        PoolingError::InvalidArgument("padding")
    );
    assert_err!(
        compute_value_dimension(usize::MAX, 1, 1, 1),
        PoolingError::InvalidArgument("padding")
    );
}

/// 随机生成参数，与直接按公式（有符号整数）计算的结果比对
#[test]
fn test_compute_value_dimension_matches_formula() {
    let mut rng = rand::thread_rng();
    for _ in 0..2000 {
        let data_dim: usize = rng.gen_range(1..64);
        let kernel_size: usize = rng.gen_range(1..16);
        let padding: usize = rng.gen_range(0..8);
        let stride: usize = rng.gen_range(1..8);

        let numerator = data_dim as i64 + 2 * padding as i64 - kernel_size as i64;
        let result = compute_value_dimension(data_dim, kernel_size, padding, stride);
        if numerator >= 0 {
            let expected = (numerator / stride as i64 + 1) as usize;
            assert_eq!(result, Ok(expected));
            assert!(expected > 0);
        } else {
            assert_err!(result, PoolingError::InvalidArgument("kernel_size"));
        }
    }
}

#[test]
fn test_compute_value_dimensions_keeps_other_dims() -> Result<(), PoolingError> {
    let parameter = PoolingParameter::pooling2d()
        .with_kernel_sizes(&[3, 3])
        .with_strides(&[2, 2]);
    assert_eq!(compute_value_dimensions(&[2, 3, 7, 5], &parameter)?, vec![2, 3, 3, 2]);

    // 1D：[batch, C, W]
    let parameter = PoolingParameter::pooling1d();
    assert_eq!(compute_value_dimensions(&[4, 8, 9], &parameter)?, vec![4, 8, 4]);

    // 3D：[batch, C, D, H, W]
    let parameter = PoolingParameter::pooling3d().with_paddings(&[1, 0, 0]);
    assert_eq!(
        compute_value_dimensions(&[1, 2, 4, 6, 8], &parameter)?,
        vec![1, 2, 3, 3, 4]
    );

    // 非默认、非升序的维度下标：每个下标使用与其对应位置的参数
    let parameter = PoolingParameter::new(&[3, 0], 1, 1, 0)
        .with_kernel_sizes(&[2, 3])
        .with_strides(&[2, 1]);
    assert_eq!(compute_value_dimensions(&[5, 6, 7, 8], &parameter)?, vec![3, 6, 7, 4]);
    Ok(())
}

#[test]
fn test_compute_value_dimensions_is_deterministic() -> Result<(), PoolingError> {
    let parameter = PoolingParameter::pooling2d()
        .with_kernel_sizes(&[3, 2])
        .with_paddings(&[1, 0])
        .with_strides(&[1, 3]);
    let input_shape = [3, 16, 11, 13];
    let first = compute_value_dimensions(&input_shape, &parameter)?;
    let second = compute_value_dimensions(&input_shape, &parameter)?;
    assert_eq!(first, second);
    assert_eq!(first, vec![3, 16, 11, 4]);
    assert_eq!(input_shape, [3, 16, 11, 13]);
    Ok(())
}

#[test]
fn test_compute_value_dimensions_errors() {
    let parameter = PoolingParameter::pooling2d().with_strides(&[2]);
    assert_err!(
        compute_value_dimensions(&[1, 1, 4, 4], &parameter),
        PoolingError::ShapeMismatch([2], [1])
    );

    let parameter = PoolingParameter::pooling2d().with_kernel_sizes(&[2, 5]);
    assert_err!(
        compute_value_dimensions(&[1, 1, 4, 4], &parameter),
        PoolingError::InvalidArgument("kernel_size")
    );
}
