/*
 * @Author       : 老董
 * @Date         : 2026-02-04
 * @Description  : 感受野报告：控制台表格、Markdown、JSON 输出
 */

use std::fmt::Debug;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;

use super::{LayerRfData, RfValues, get_rf_data};
use crate::errors::RfError;
use crate::nn::Module;

/// 整个模型的感受野报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfReport {
    /// 模型名称（根模块的类型名称）
    pub model_name: String,
    /// 输入尺寸 (H, W)
    pub input_shape: (usize, usize),
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    pub layers: Vec<LayerRfData>,
}

/// 报告的输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Unicode 文本表格
    Table,
    Markdown,
    Json,
}

impl ReportFormat {
    /// 根据文件扩展名选择格式：`.md` → Markdown，`.json` → JSON，其他 → 文本表格
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("md") => Self::Markdown,
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }

    /// 实际使用的格式：写入文件时由扩展名决定，忽略 `requested`
    pub fn resolve(requested: Self, output: Option<&Path>) -> Self {
        output.map_or(requested, Self::from_path)
    }
}

/// 表格中的一行
#[derive(Tabled)]
struct RfRow {
    #[tabled(rename = "Layer")]
    layer: String,
    #[tabled(rename = "Type")]
    type_name: String,
    #[tabled(rename = "Output Shape")]
    output_shape: String,
    #[tabled(rename = "Origin")]
    origin: String,
    #[tabled(rename = "Jump")]
    jump: String,
    #[tabled(rename = "Receptive Field")]
    receptive_field: String,
}

impl From<&LayerRfData> for RfRow {
    fn from(data: &LayerRfData) -> Self {
        Self {
            layer: data.name.clone(),
            type_name: data.type_name.clone(),
            output_shape: cell(data.output_shape()),
            origin: cell(data.origin()),
            jump: cell(data.jump()),
            receptive_field: cell(data.receptive_field()),
        }
    }
}

/// 元组按 `(h, w)` 显示，容器模块留空
fn cell<T: Debug>(value: Option<T>) -> String {
    value.map(|v| format!("{v:?}")).unwrap_or_default()
}

impl RfReport {
    /// 计算模型的感受野报告
    ///
    /// 参数含义同 [`get_rf_data`]
    pub fn new(
        module: &dyn Module,
        input_shape: (usize, usize),
        max_depth: Option<usize>,
    ) -> Result<Self, RfError> {
        Ok(Self {
            model_name: module.type_name().to_string(),
            input_shape,
            max_depth,
            layers: get_rf_data(module, input_shape, max_depth)?,
        })
    }

    /// 最后一个有值的模块（即网络输出处）的感受野信息
    pub fn final_values(&self) -> Option<&RfValues> {
        self.layers.iter().rev().find_map(|l| l.values.as_ref())
    }

    /// 网络输出处的感受野尺寸
    pub fn final_receptive_field(&self) -> Option<(usize, usize)> {
        self.final_values().map(|v| v.receptive_field)
    }

    /// 打印报告（Unicode 文本表格）
    pub fn print(&self) {
        println!("{}", self.table_string());
    }

    /// 按指定格式渲染报告
    pub fn render(&self, format: ReportFormat) -> Result<String, RfError> {
        Ok(match format {
            ReportFormat::Table => self.table_string(),
            ReportFormat::Markdown => self.markdown(),
            ReportFormat::Json => self.to_json()?,
        })
    }

    /// 将报告保存到文件
    ///
    /// 根据文件扩展名自动选择格式，见 [`ReportFormat::from_path`]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RfError> {
        let path = path.as_ref();
        std::fs::write(path, self.render(ReportFormat::from_path(path))?)?;
        info!(path = %path.display(), "感受野报告已保存");
        Ok(())
    }

    /// 返回 Unicode 文本表格（用于控制台输出）
    pub fn table_string(&self) -> String {
        let mut output = self.table().with(Style::modern()).to_string();
        output.push('\n');
        output.push_str(&format!("输入形状: {:?}\n", self.input_shape));
        output.push_str(&format!("最终感受野: {}\n", self.final_receptive_field_string()));
        output
    }

    /// 返回 Markdown 格式字符串
    pub fn markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# 感受野: {}\n\n", self.model_name));
        output.push_str(&self.table().with(Style::markdown()).to_string());
        output.push_str(&format!(
            "\n\n**输入形状**: {:?}  \n**最终感受野**: {}\n",
            self.input_shape,
            self.final_receptive_field_string()
        ));

        output
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn table(&self) -> Table {
        Table::new(self.layers.iter().map(RfRow::from))
    }

    fn final_receptive_field_string(&self) -> String {
        self.final_receptive_field()
            .map_or_else(|| "-".to_string(), |rf| format!("{rf:?}"))
    }
}

/// 打印模型每一层的感受野表格
///
/// # 参数
/// - `module`: 根模块（不能含分支或跳连）
/// - `input_shape`: 输入尺寸 (H, W)
/// - `max_depth`: 最大展示深度，None 表示不限制
pub fn print_rf(
    module: &dyn Module,
    input_shape: (usize, usize),
    max_depth: Option<usize>,
) -> Result<(), RfError> {
    RfReport::new(module, input_shape, max_depth)?.print();
    Ok(())
}
