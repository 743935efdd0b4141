/*
 * @Author       : 老董
 * @Date         : 2026-02-04
 * @Description  : 感受野累加器：逐层折叠滑窗参数
 *
 * 记 k' = d*(k-1)+1 为有效卷积核尺寸，逐轴更新：
 * n_out      = floor((n + 2p - k') / s) + 1    （ceil_mode 时向上取整）
 * r_out      = r + (k' - 1) * j
 * origin_out = origin + ((k' - 1) / 2 - p) * j
 * j_out      = j * s
 */

use serde::{Deserialize, Serialize};

use crate::errors::{Axis, RfError};
use crate::nn::layer::{Window2d, effective_kernel};

/// 某一层输出处的感受野信息，各项均为 (h, w)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RfValues {
    /// 输出特征图尺寸
    pub output_shape: (usize, usize),
    /// 首个输出单元感受野中心在输入上的坐标（像素中心为 i + 0.5）
    pub origin: (f64, f64),
    /// 相邻输出单元在输入上的间距（累计步长）
    pub jump: (usize, usize),
    /// 感受野尺寸
    pub receptive_field: (usize, usize),
}

/// 单轴状态
#[derive(Debug, Clone, Copy)]
struct AxisState {
    size: usize,
    origin: f64,
    jump: usize,
    receptive_field: usize,
}

impl RfValues {
    /// 输入层的初始状态
    pub fn from_input(input_shape: (usize, usize)) -> Self {
        Self {
            output_shape: input_shape,
            origin: (0.5, 0.5),
            jump: (1, 1),
            receptive_field: (1, 1),
        }
    }

    /// 经过一个滑窗层后的状态
    ///
    /// # 参数
    /// - `layer`: 层名称（仅用于错误信息）
    /// - `window`: 该层的几何参数
    pub fn apply(&self, layer: &str, window: &Window2d) -> Result<Self, RfError> {
        window.validate()?;
        let height = AxisWindow {
            kernel: window.kernel_size.0,
            stride: window.stride.0,
            padding: window.padding.0,
            dilation: window.dilation.0,
            ceil_mode: window.ceil_mode,
        }
        .apply(layer, Axis::Height, self.axis(Axis::Height))?;
        let width = AxisWindow {
            kernel: window.kernel_size.1,
            stride: window.stride.1,
            padding: window.padding.1,
            dilation: window.dilation.1,
            ceil_mode: window.ceil_mode,
        }
        .apply(layer, Axis::Width, self.axis(Axis::Width))?;

        Ok(Self {
            output_shape: (height.size, width.size),
            origin: (height.origin, width.origin),
            jump: (height.jump, width.jump),
            receptive_field: (height.receptive_field, width.receptive_field),
        })
    }

    fn axis(&self, axis: Axis) -> AxisState {
        match axis {
            Axis::Height => AxisState {
                size: self.output_shape.0,
                origin: self.origin.0,
                jump: self.jump.0,
                receptive_field: self.receptive_field.0,
            },
            Axis::Width => AxisState {
                size: self.output_shape.1,
                origin: self.origin.1,
                jump: self.jump.1,
                receptive_field: self.receptive_field.1,
            },
        }
    }
}

/// 单轴的滑窗参数
struct AxisWindow {
    kernel: usize,
    stride: usize,
    padding: usize,
    dilation: usize,
    ceil_mode: bool,
}

impl AxisWindow {
    fn apply(&self, layer: &str, axis: Axis, state: AxisState) -> Result<AxisState, RfError> {
        let overflow = |quantity: &str| RfError::ArithmeticOverflow {
            layer: layer.to_string(),
            axis,
            quantity: quantity.to_string(),
        };
        let (stride, padding) = (self.stride, self.padding);

        let effective_kernel = effective_kernel(self.kernel, self.dilation)
            .ok_or_else(|| overflow("有效卷积核尺寸"))?;
        let padded = padding
            .checked_mul(2)
            .and_then(|p| p.checked_add(state.size))
            .ok_or_else(|| overflow("填充后的输入尺寸"))?;
        if padded < effective_kernel {
            return Err(RfError::InvalidOutputShape {
                layer: layer.to_string(),
                axis,
                input: state.size,
                padding,
                effective_kernel,
            });
        }

        let span = padded - effective_kernel;
        let size = if self.ceil_mode {
            let size = span.div_ceil(stride) + 1;
            // 最后一个窗口必须起始于输入或左侧填充之内
            let last_start = (size - 1).checked_mul(stride);
            if last_start.is_none_or(|start| start >= state.size + padding) {
                size - 1
            } else {
                size
            }
        } else {
            span / stride + 1
        };

        let origin = state.origin
            + ((effective_kernel - 1) as f64 / 2.0 - padding as f64) * state.jump as f64;
        let jump = state
            .jump
            .checked_mul(stride)
            .ok_or_else(|| overflow("跳跃步长"))?;
        let receptive_field = (effective_kernel - 1)
            .checked_mul(state.jump)
            .and_then(|r| r.checked_add(state.receptive_field))
            .ok_or_else(|| overflow("感受野"))?;

        Ok(AxisState {
            size,
            origin,
            jump,
            receptive_field,
        })
    }
}
