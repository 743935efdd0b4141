/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : MaxPool2d / AvgPool2d 层几何参数单元测试
 */

use crate::nn::layer::{AvgPool2d, MaxPool2d, Window2d};
use crate::nn::{Module, Spatial};

#[test]
fn test_max_pool2d_default_stride() {
    let pool = MaxPool2d::new((2, 2), None);

    assert_eq!(pool.type_name(), "MaxPool2d");
    assert_eq!(pool.kernel_size(), (2, 2));
    // stride 省略时等于 kernel_size
    assert_eq!(pool.stride(), (2, 2));
}

#[test]
fn test_max_pool2d_builder() {
    let pool = MaxPool2d::new((3, 3), Some((2, 2)))
        .with_padding((1, 1))
        .with_dilation((2, 2))
        .with_ceil_mode(true);

    assert_eq!(
        pool.spatial(),
        Spatial::Window(Window2d {
            kernel_size: (3, 3),
            stride: (2, 2),
            padding: (1, 1),
            dilation: (2, 2),
            ceil_mode: true,
        })
    );
}

#[test]
fn test_avg_pool2d_window() {
    let pool = AvgPool2d::new((7, 7), None).with_ceil_mode(true);
    let window = pool.window();

    assert_eq!(pool.type_name(), "AvgPool2d");
    assert_eq!(window.stride, (7, 7));
    assert_eq!(window.padding, (0, 0));
    // 平均池化没有膨胀率
    assert_eq!(window.dilation, (1, 1));
    assert!(window.ceil_mode);
}
