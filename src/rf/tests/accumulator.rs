/*
 * @Author       : 老董
 * @Date         : 2026-02-04
 * @Description  : 感受野累加器单元测试（输出尺寸与 PyTorch 的卷积/池化公式对照）
 */

use approx::assert_abs_diff_eq;

use crate::errors::{Axis, RfError};
use crate::nn::layer::{AvgPool2d, Conv2d, MaxPool2d};
use crate::rf::RfValues;

#[test]
fn test_from_input() {
    let values = RfValues::from_input((32, 24));

    assert_eq!(values.output_shape, (32, 24));
    assert_eq!(values.jump, (1, 1));
    assert_eq!(values.receptive_field, (1, 1));
    assert_abs_diff_eq!(values.origin.0, 0.5);
    assert_abs_diff_eq!(values.origin.1, 0.5);
}

#[test]
fn test_same_padding_conv() {
    let conv = Conv2d::square(3, 8, 3, 1, 1);
    let values = RfValues::from_input((32, 32))
        .apply("conv", &conv.window())
        .unwrap();

    assert_eq!(values.output_shape, (32, 32));
    assert_eq!(values.receptive_field, (3, 3));
    assert_eq!(values.jump, (1, 1));
    assert_abs_diff_eq!(values.origin.0, 0.5);
}

#[test]
fn test_valid_conv_then_pool_origin() {
    // conv k3 p0: origin = 0.5 + (1 - 0) * 1 = 1.5
    let conv = Conv2d::square(1, 1, 3, 1, 0);
    let values = RfValues::from_input((32, 32))
        .apply("conv", &conv.window())
        .unwrap();
    assert_eq!(values.output_shape, (30, 30));
    assert_abs_diff_eq!(values.origin.0, 1.5);

    // pool k2 s2: origin = 1.5 + 0.5 * 1 = 2.0
    let pool = MaxPool2d::new((2, 2), None);
    let values = values.apply("pool", &pool.window()).unwrap();
    assert_eq!(values.output_shape, (15, 15));
    assert_eq!(values.receptive_field, (4, 4));
    assert_eq!(values.jump, (2, 2));
    assert_abs_diff_eq!(values.origin.0, 2.0);
    assert_abs_diff_eq!(values.origin.1, 2.0);
}

#[test]
fn test_stride_multiplies_jump() {
    let down = Conv2d::square(1, 1, 3, 2, 1);
    let values = RfValues::from_input((32, 32))
        .apply("down", &down.window())
        .unwrap();
    // (32 + 2 - 3) / 2 + 1 = 16
    assert_eq!(values.output_shape, (16, 16));
    assert_eq!(values.jump, (2, 2));
    assert_eq!(values.receptive_field, (3, 3));

    // 后续层每个核元素在输入上跨 2 个像素：3 + 2 * 2
    let conv = Conv2d::square(1, 1, 3, 1, 1);
    let values = values.apply("conv", &conv.window()).unwrap();
    assert_eq!(values.receptive_field, (7, 7));
    assert_eq!(values.jump, (2, 2));
}

#[test]
fn test_dilation() {
    let conv = Conv2d::square(1, 1, 3, 1, 2).with_dilation((2, 2));
    let values = RfValues::from_input((32, 32))
        .apply("dilated", &conv.window())
        .unwrap();

    assert_eq!(values.output_shape, (32, 32));
    assert_eq!(values.receptive_field, (5, 5));
    assert_abs_diff_eq!(values.origin.0, 0.5);
}

#[test]
fn test_rectangular_kernel() {
    let conv = Conv2d::new(1, 1, (3, 1), (1, 1), (0, 0));
    let values = RfValues::from_input((10, 10))
        .apply("conv", &conv.window())
        .unwrap();

    assert_eq!(values.output_shape, (8, 10));
    assert_eq!(values.receptive_field, (3, 1));
    assert_abs_diff_eq!(values.origin.0, 1.5);
    assert_abs_diff_eq!(values.origin.1, 0.5);
}

#[test]
fn test_ceil_mode() {
    let floor = MaxPool2d::new((2, 2), None);
    let ceil = MaxPool2d::new((2, 2), None).with_ceil_mode(true);
    let input = RfValues::from_input((7, 7));

    assert_eq!(input.apply("floor", &floor.window()).unwrap().output_shape, (3, 3));
    assert_eq!(input.apply("ceil", &ceil.window()).unwrap().output_shape, (4, 4));
}

#[test]
fn test_ceil_mode_drops_window_in_padding() {
    // n=5, k=2, s=2, p=1：ceil(5/2)+1 = 4，但第 4 个窗口起始于右侧填充，故为 3
    let pool = AvgPool2d::new((2, 2), None)
        .with_padding((1, 1))
        .with_ceil_mode(true);
    let values = RfValues::from_input((5, 5))
        .apply("pool", &pool.window())
        .unwrap();

    assert_eq!(values.output_shape, (3, 3));
}

#[test]
fn test_window_larger_than_input() {
    let conv = Conv2d::new(1, 1, (5, 3), (1, 1), (0, 0));
    let result = RfValues::from_input((3, 3)).apply("big", &conv.window());

    match result {
        Err(RfError::InvalidOutputShape {
            layer,
            axis,
            input,
            effective_kernel,
            ..
        }) => {
            assert_eq!(layer, "big");
            assert_eq!(axis, Axis::Height);
            assert_eq!(input, 3);
            assert_eq!(effective_kernel, 5);
        }
        other => panic!("应返回 InvalidOutputShape，实际为 {other:?}"),
    }
}

#[test]
fn test_padding_makes_window_fit() {
    // 3 + 2*1 = 5 ≥ 5
    let conv = Conv2d::square(1, 1, 5, 1, 1);
    let values = RfValues::from_input((3, 3))
        .apply("conv", &conv.window())
        .unwrap();

    assert_eq!(values.output_shape, (1, 1));
    assert_eq!(values.receptive_field, (5, 5));
}

#[test]
fn test_huge_padding_overflows() {
    let conv = Conv2d::square(1, 1, 3, 1, usize::MAX / 2 + 1);
    let result = RfValues::from_input((32, 32)).apply("conv", &conv.window());

    match result {
        Err(RfError::ArithmeticOverflow { layer, axis, .. }) => {
            assert_eq!(layer, "conv");
            assert_eq!(axis, Axis::Height);
        }
        other => panic!("应返回 ArithmeticOverflow，实际为 {other:?}"),
    }
}

#[test]
fn test_huge_stride_overflows_jump() {
    // 两层步长 2^32 的卷积：第二层之后 jump = 2^64
    let stride = 1usize << 32;
    let conv = Conv2d::square(1, 1, 1, stride, 0);
    let values = RfValues::from_input((8, 8))
        .apply("conv1", &conv.window())
        .unwrap();
    assert_eq!(values.jump, (stride, stride));

    let result = values.apply("conv2", &conv.window());
    assert!(matches!(
        result,
        Err(RfError::ArithmeticOverflow { ref layer, .. }) if layer == "conv2"
    ));
}

#[test]
fn test_huge_dilation_overflows_kernel() {
    let conv = Conv2d::square(1, 1, 3, 1, 0).with_dilation((usize::MAX, 1));
    assert_eq!(conv.window().effective_kernel(), None);

    let err = RfValues::from_input((8, 8))
        .apply("dilated", &conv.window())
        .unwrap_err();
    assert_eq!(err.to_string(), "层`dilated`在高度方向计算有效卷积核尺寸时数值溢出");
}

#[test]
fn test_apply_rejects_zero_stride() {
    let conv = Conv2d::square(1, 1, 3, 0, 1);
    let result = RfValues::from_input((8, 8)).apply("conv", &conv.window());

    assert!(matches!(result, Err(RfError::ValueMustSatisfyComparison { .. })));
}
