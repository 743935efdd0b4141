/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : Layer 模块 - 只记录影响空间几何的超参数，不持有权重
 */

mod avg_pool2d;
mod container;
mod conv2d;
mod elementwise;
mod max_pool2d;

pub use avg_pool2d::AvgPool2d;
pub use container::{Container, Sequential};
pub use conv2d::Conv2d;
pub use elementwise::Elementwise;
pub use max_pool2d::MaxPool2d;

use crate::errors::{ComparisonOperator, RfError};

/// 滑窗类层的几何参数，各项均为 (h, w)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window2d {
    pub kernel_size: (usize, usize),
    pub stride: (usize, usize),
    pub padding: (usize, usize),
    pub dilation: (usize, usize),
    /// 输出尺寸向上取整（仅池化层可能开启）
    pub ceil_mode: bool,
}

impl Window2d {
    /// 有效卷积核尺寸：`d * (k - 1) + 1`，溢出时为 None
    pub fn effective_kernel(&self) -> Option<(usize, usize)> {
        Some((
            effective_kernel(self.kernel_size.0, self.dilation.0)?,
            effective_kernel(self.kernel_size.1, self.dilation.1)?,
        ))
    }

    /// 检查卷积核、步长、膨胀率均不为 0
    pub fn validate(&self) -> Result<(), RfError> {
        for (value_name, (h, w)) in [
            ("kernel_size", self.kernel_size),
            ("stride", self.stride),
            ("dilation", self.dilation),
        ] {
            if h == 0 || w == 0 {
                return Err(RfError::ValueMustSatisfyComparison {
                    value_name: value_name.to_string(),
                    operator: ComparisonOperator::GreaterOrEqual,
                    threshold: 1,
                });
            }
        }
        Ok(())
    }
}

pub(crate) fn effective_kernel(kernel: usize, dilation: usize) -> Option<usize> {
    dilation.checked_mul(kernel.saturating_sub(1))?.checked_add(1)
}
