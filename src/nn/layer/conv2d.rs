/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : Conv2d (2D 卷积) 层 - PyTorch 风格 API
 *
 * 输出尺寸计算（向下取整）：
 * H' = (H + 2*padding_h - dilation_h*(kernel_h-1) - 1) / stride_h + 1
 * W' = (W + 2*padding_w - dilation_w*(kernel_w-1) - 1) / stride_w + 1
 */

use super::Window2d;
use crate::nn::{Module, Spatial};

/// Conv2d (2D 卷积) 层
///
/// 只记录超参数，不创建卷积核参数
///
/// # 使用示例
/// ```ignore
/// let conv = Conv2d::new(3, 64, (7, 7), (2, 2), (3, 3));
/// let dilated = Conv2d::square(64, 64, 3, 1, 2).with_dilation((2, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conv2d {
    /// 输入通道数
    in_channels: usize,
    /// 输出通道数
    out_channels: usize,
    /// 卷积核大小 (kernel_h, kernel_w)
    kernel_size: (usize, usize),
    /// 步长 (stride_h, stride_w)
    stride: (usize, usize),
    /// 填充 (padding_h, padding_w)
    padding: (usize, usize),
    /// 膨胀率 (dilation_h, dilation_w)
    dilation: (usize, usize),
}

impl Conv2d {
    /// 创建新的 Conv2d 层（膨胀率为 1）
    ///
    /// # 参数
    /// - `in_channels`: 输入通道数
    /// - `out_channels`: 输出通道数
    /// - `kernel_size`: 卷积核大小 (kH, kW)
    /// - `stride`: 步长 (sH, sW)
    /// - `padding`: 填充 (pH, pW)
    pub fn new(
        in_channels: usize,
        out_channels: usize,
        kernel_size: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Self {
        Self {
            in_channels,
            out_channels,
            kernel_size,
            stride,
            padding,
            dilation: (1, 1),
        }
    }

    /// 创建正方形卷积核的 Conv2d 层
    pub fn square(
        in_channels: usize,
        out_channels: usize,
        kernel_size: usize,
        stride: usize,
        padding: usize,
    ) -> Self {
        Self::new(
            in_channels,
            out_channels,
            (kernel_size, kernel_size),
            (stride, stride),
            (padding, padding),
        )
    }

    /// 设置膨胀率
    pub fn with_dilation(mut self, dilation: (usize, usize)) -> Self {
        self.dilation = dilation;
        self
    }

    /// 获取输入通道数
    pub fn in_channels(&self) -> usize {
        self.in_channels
    }

    /// 获取输出通道数
    pub fn out_channels(&self) -> usize {
        self.out_channels
    }

    /// 获取卷积核大小
    pub fn kernel_size(&self) -> (usize, usize) {
        self.kernel_size
    }

    /// 获取步长
    pub fn stride(&self) -> (usize, usize) {
        self.stride
    }

    /// 获取填充
    pub fn padding(&self) -> (usize, usize) {
        self.padding
    }

    /// 获取膨胀率
    pub fn dilation(&self) -> (usize, usize) {
        self.dilation
    }

    /// 获取滑窗几何参数
    pub fn window(&self) -> Window2d {
        Window2d {
            kernel_size: self.kernel_size,
            stride: self.stride,
            padding: self.padding,
            dilation: self.dilation,
            ceil_mode: false,
        }
    }
}

impl Module for Conv2d {
    fn type_name(&self) -> &str {
        "Conv2d"
    }

    fn spatial(&self) -> Spatial {
        Spatial::Window(self.window())
    }
}
