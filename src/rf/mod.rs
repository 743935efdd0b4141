/*
 * @Author       : 老董
 * @Date         : 2026-02-04
 * @Description  : 感受野（receptive field）计算
 *
 * 按 `named_modules()` 的先序遍历逐层累加感受野。
 * 只适用于无分支、无跳连的网络：层的遍历顺序即数据流动顺序。
 */

mod accumulator;
mod report;

pub use accumulator::RfValues;
pub use report::{ReportFormat, RfReport, print_rf};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::errors::{ComparisonOperator, RfError};
use crate::nn::{Module, Spatial, module_depth, named_modules};

/// 单个模块的感受野信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRfData {
    /// 模块深度：根为 0
    pub depth: usize,
    /// 点分名称，如 `features.0`
    pub path: String,
    /// 用于表格展示的树形名称
    pub name: String,
    /// 类型名称
    #[serde(rename = "type")]
    pub type_name: String,
    /// 容器模块为 None
    pub values: Option<RfValues>,
}

impl LayerRfData {
    pub fn output_shape(&self) -> Option<(usize, usize)> {
        self.values.map(|v| v.output_shape)
    }

    pub fn origin(&self) -> Option<(f64, f64)> {
        self.values.map(|v| v.origin)
    }

    pub fn jump(&self) -> Option<(usize, usize)> {
        self.values.map(|v| v.jump)
    }

    pub fn receptive_field(&self) -> Option<(usize, usize)> {
        self.values.map(|v| v.receptive_field)
    }
}

/// 计算模块树中每个模块的感受野
///
/// # 参数
/// - `module`: 根模块（不能含分支或跳连）
/// - `input_shape`: 输入尺寸 (H, W)
/// - `max_depth`: 最大展示深度；None 表示不限制。
///   深度恰为 `max_depth` 的模块取其最后一个后代的值，更深的模块被省略
///
/// # 示例
/// ```ignore
/// let model = Sequential::new()
///     .add(Conv2d::square(3, 16, 3, 1, 1))
///     .add(Conv2d::square(16, 16, 3, 1, 1));
/// let data = get_rf_data(&model, (32, 32), None)?;
/// assert_eq!(data.last().unwrap().receptive_field(), Some((5, 5)));
/// ```
pub fn get_rf_data(
    module: &dyn Module,
    input_shape: (usize, usize),
    max_depth: Option<usize>,
) -> Result<Vec<LayerRfData>, RfError> {
    if input_shape.0 == 0 || input_shape.1 == 0 {
        return Err(RfError::ValueMustSatisfyComparison {
            value_name: "input_shape".to_string(),
            operator: ComparisonOperator::GreaterOrEqual,
            threshold: 1,
        });
    }

    let mut values = RfValues::from_input(input_shape);
    let mut data = Vec::new();

    for (path, layer) in named_modules(module) {
        let depth = module_depth(&path);
        let type_name = layer.type_name().to_string();
        let name = tree_name(&path, depth);

        if layer.is_container() {
            trace!(layer = %path, %type_name, "容器模块，跳过");
            data.push(LayerRfData {
                depth,
                path,
                name,
                type_name,
                values: None,
            });
            continue;
        }

        match layer.spatial() {
            Spatial::Window(window) => {
                let label = display_path(&path, &type_name);
                values = values.apply(&label, &window)?;
                debug!(
                    layer = %label,
                    output_shape = ?values.output_shape,
                    jump = ?values.jump,
                    receptive_field = ?values.receptive_field,
                    "计算感受野"
                );
            }
            Spatial::Passthrough => {
                trace!(layer = %path, %type_name, "逐元素层，沿用上一层的值");
            }
            Spatial::Unsupported => {
                return Err(RfError::UnsupportedLayer {
                    layer: display_path(&path, &type_name),
                    type_name,
                });
            }
        }

        data.push(LayerRfData {
            depth,
            path,
            name,
            type_name,
            values: Some(values),
        });
    }

    Ok(collapse_to_depth(data, max_depth))
}

/// 树形名称：根为空，第一层为 `├─ name`，更深层为 `|    ` 缩进加 `└─ 末段名称`
fn tree_name(path: &str, depth: usize) -> String {
    match depth {
        0 => String::new(),
        1 => format!("├─ {path}"),
        _ => {
            let last = path.rsplit('.').next().unwrap_or(path);
            format!("{}└─ {last}", "|    ".repeat(depth - 1))
        }
    }
}

/// 错误信息中使用的名称：根模块没有名称，改用类型名称
fn display_path(path: &str, type_name: &str) -> String {
    if path.is_empty() {
        type_name.to_string()
    } else {
        path.to_string()
    }
}

/// 按最大深度折叠
fn collapse_to_depth(data: Vec<LayerRfData>, max_depth: Option<usize>) -> Vec<LayerRfData> {
    let Some(max_depth) = max_depth else {
        return data;
    };

    let mut cleaned = Vec::with_capacity(data.len());
    for (i, row) in data.iter().enumerate() {
        if row.depth > max_depth {
            continue;
        }
        let mut row = row.clone();
        if row.depth == max_depth {
            let last_descendant = data[i + 1..]
                .iter()
                .take_while(|next| next.depth > max_depth)
                .last();
            if let Some(descendant) = last_descendant {
                row.values = descendant.values;
            }
        }
        cleaned.push(row);
    }
    cleaned
}

#[cfg(test)]
mod tests;
