/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : 感受野计算过程中的错误类型
 */

use thiserror::Error;
mod ops;
pub use self::ops::*;

#[derive(Error, Debug)]
pub enum RfError {
    // 数字比较用
    #[error("{value_name}须{operator}{threshold}")]
    ValueMustSatisfyComparison {
        value_name: String,
        operator: ComparisonOperator,
        threshold: usize,
    },
    // 滑窗放不进（带填充的）输入
    #[error(
        "层`{layer}`无法计算输出形状：{axis}方向输入尺寸为{input}（含两侧填充{padding}），小于有效卷积核尺寸{effective_kernel}"
    )]
    InvalidOutputShape {
        layer: String,
        axis: Axis,
        input: usize,
        padding: usize,
        effective_kernel: usize,
    },
    // 来自模型描述的超参数过大，累加时超出 usize 范围
    #[error("层`{layer}`在{axis}方向计算{quantity}时数值溢出")]
    ArithmeticOverflow {
        layer: String,
        axis: Axis,
        quantity: String,
    },
    #[error("不支持的层：`{layer}`（类型为{type_name}）既非容器，也无法推导其空间几何")]
    UnsupportedLayer { layer: String, type_name: String },

    #[error("模型`{name}`不含任何层")]
    EmptyModel { name: String },

    #[error("未指定输入形状：请在模型描述中给出`input_shape`或通过参数传入")]
    MissingInputShape,

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON 解析/序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}
