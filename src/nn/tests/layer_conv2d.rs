/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : Conv2d 层几何参数单元测试
 */

use crate::errors::RfError;
use crate::nn::layer::{Conv2d, Window2d};
use crate::nn::{Module, Spatial};

#[test]
fn test_conv2d_new() {
    let conv = Conv2d::new(3, 64, (7, 7), (2, 2), (3, 3));

    assert_eq!(conv.type_name(), "Conv2d");
    assert_eq!(conv.in_channels(), 3);
    assert_eq!(conv.out_channels(), 64);
    assert_eq!(conv.kernel_size(), (7, 7));
    assert_eq!(conv.stride(), (2, 2));
    assert_eq!(conv.padding(), (3, 3));
    assert_eq!(conv.dilation(), (1, 1));
}

#[test]
fn test_conv2d_window() {
    let conv = Conv2d::square(16, 16, 3, 1, 2).with_dilation((2, 2));

    let expected = Window2d {
        kernel_size: (3, 3),
        stride: (1, 1),
        padding: (2, 2),
        dilation: (2, 2),
        ceil_mode: false,
    };
    assert_eq!(conv.spatial(), Spatial::Window(expected));
    // d*(k-1)+1 = 2*2+1
    assert_eq!(expected.effective_kernel(), Some((5, 5)));
}

#[test]
fn test_conv2d_rect_effective_kernel() {
    let conv = Conv2d::new(1, 1, (3, 1), (1, 1), (0, 0)).with_dilation((3, 4));
    assert_eq!(conv.window().effective_kernel(), Some((7, 1)));
}

#[test]
fn test_window_validate() {
    assert!(Conv2d::square(1, 1, 3, 1, 1).window().validate().is_ok());

    let zero_stride = Conv2d::square(1, 1, 3, 0, 1).window().validate();
    match zero_stride {
        Err(RfError::ValueMustSatisfyComparison {
            value_name,
            threshold,
            ..
        }) => {
            assert_eq!(value_name, "stride");
            assert_eq!(threshold, 1);
        }
        other => panic!("应返回 ValueMustSatisfyComparison，实际为 {other:?}"),
    }

    let zero_kernel = Conv2d::new(1, 1, (0, 3), (1, 1), (0, 0)).window().validate();
    assert!(matches!(
        zero_kernel,
        Err(RfError::ValueMustSatisfyComparison { ref value_name, .. }) if value_name == "kernel_size"
    ));

    let zero_dilation = Conv2d::square(1, 1, 3, 1, 1)
        .with_dilation((1, 0))
        .window()
        .validate();
    assert!(zero_dilation.is_err());
}

#[test]
fn test_error_message() {
    let err = Conv2d::square(1, 1, 3, 0, 1).window().validate().unwrap_err();
    assert_eq!(err.to_string(), "stride须≥1");
}
