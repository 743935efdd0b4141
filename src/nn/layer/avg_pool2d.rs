/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : AvgPool2d (2D 平均池化) 层
 *
 * 等价于 PyTorch 的 nn.AvgPool2d（没有 dilation 参数）
 */

use super::Window2d;
use crate::nn::{Module, Spatial};

/// AvgPool2d (2D 平均池化) 层
///
/// # 示例
/// ```ignore
/// // 典型用法：全局平均池化
/// let gap = AvgPool2d::new((7, 7), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvgPool2d {
    kernel_size: (usize, usize),
    stride: (usize, usize),
    padding: (usize, usize),
    ceil_mode: bool,
}

impl AvgPool2d {
    /// 创建 AvgPool2d 层
    ///
    /// - `stride`: 步长 (sH, sW)，若为 None 则默认等于 kernel_size
    pub fn new(kernel_size: (usize, usize), stride: Option<(usize, usize)>) -> Self {
        Self {
            kernel_size,
            stride: stride.unwrap_or(kernel_size),
            padding: (0, 0),
            ceil_mode: false,
        }
    }

    pub fn with_padding(mut self, padding: (usize, usize)) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_ceil_mode(mut self, ceil_mode: bool) -> Self {
        self.ceil_mode = ceil_mode;
        self
    }

    pub fn window(&self) -> Window2d {
        Window2d {
            kernel_size: self.kernel_size,
            stride: self.stride,
            padding: self.padding,
            dilation: (1, 1),
            ceil_mode: self.ceil_mode,
        }
    }
}

impl Module for AvgPool2d {
    fn type_name(&self) -> &str {
        "AvgPool2d"
    }

    fn spatial(&self) -> Spatial {
        Spatial::Window(self.window())
    }
}
