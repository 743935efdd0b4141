/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : MaxPool2d (2D 最大池化) 层
 *
 * 等价于 PyTorch 的 nn.MaxPool2d（只保留几何参数）
 */

use super::Window2d;
use crate::nn::{Module, Spatial};

/// MaxPool2d (2D 最大池化) 层
///
/// # 输出尺寸计算
/// ```text
/// H' = floor_or_ceil((H + 2*padding_h - dilation_h*(kernel_h-1) - 1) / stride_h) + 1
/// ```
///
/// # 示例
/// ```ignore
/// // 典型用法：卷积后接池化
/// let pool1 = MaxPool2d::new((2, 2), None);
/// let pool2 = MaxPool2d::new((3, 3), Some((2, 2))).with_padding((1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxPool2d {
    window: Window2d,
}

impl MaxPool2d {
    /// 创建 MaxPool2d 层
    ///
    /// # 参数
    /// - `kernel_size`: 池化窗口大小 (kH, kW)
    /// - `stride`: 步长 (sH, sW)，若为 None 则默认等于 `kernel_size`
    pub fn new(kernel_size: (usize, usize), stride: Option<(usize, usize)>) -> Self {
        Self {
            window: Window2d {
                kernel_size,
                stride: stride.unwrap_or(kernel_size),
                padding: (0, 0),
                dilation: (1, 1),
                ceil_mode: false,
            },
        }
    }

    /// 设置填充
    pub fn with_padding(mut self, padding: (usize, usize)) -> Self {
        self.window.padding = padding;
        self
    }

    /// 设置膨胀率
    pub fn with_dilation(mut self, dilation: (usize, usize)) -> Self {
        self.window.dilation = dilation;
        self
    }

    /// 输出尺寸是否向上取整
    pub fn with_ceil_mode(mut self, ceil_mode: bool) -> Self {
        self.window.ceil_mode = ceil_mode;
        self
    }

    pub fn kernel_size(&self) -> (usize, usize) {
        self.window.kernel_size
    }

    pub fn stride(&self) -> (usize, usize) {
        self.window.stride
    }

    pub fn window(&self) -> Window2d {
        self.window
    }
}

impl Module for MaxPool2d {
    fn type_name(&self) -> &str {
        "MaxPool2d"
    }

    fn spatial(&self) -> Spatial {
        Spatial::Window(self.window)
    }
}
