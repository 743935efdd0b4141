/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : 逐元素层（激活、归一化、Dropout 等），不改变特征图的空间几何
 */

use crate::nn::{Module, Spatial};

/// 逐元素层
///
/// 感受野、步长与输出形状均原样传递
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elementwise {
    type_name: String,
}

impl Elementwise {
    /// # 示例
    /// ```ignore
    /// let act = Elementwise::new("ReLU");
    /// let bn = Elementwise::new("BatchNorm2d");
    /// ```
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
        }
    }
}

impl Module for Elementwise {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn spatial(&self) -> Spatial {
        Spatial::Passthrough
    }
}
