/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : 模型描述符（Model Descriptor）
 *                 以 JSON 描述网络结构，无需编写 Rust 代码即可计算感受野
 */

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Module;
use super::layer::{AvgPool2d, Container, Conv2d, Elementwise, MaxPool2d, Sequential};
use crate::errors::RfError;

/// 模型的可序列化描述
///
/// # 示例
/// ```json
/// {
///   "name": "SimpleCnn",
///   "input_shape": [32, 32],
///   "layers": [
///     { "type": "Conv2d", "in_channels": 3, "out_channels": 16, "kernel_size": 3, "padding": 1 },
///     { "type": "ReLU" },
///     { "type": "MaxPool2d", "kernel_size": 2 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// 格式版本（用于向后兼容）
    #[serde(default = "default_version")]
    pub version: String,
    /// 模型名称，同时作为根模块的类型名称
    pub name: String,
    /// 默认输入形状 (H, W)，可被命令行参数覆盖
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_shape: Option<(usize, usize)>,
    /// 顶层子模块
    pub layers: Vec<LayerDescriptor>,
}

/// 单个模块的描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerDescriptor {
    /// 模块名称；省略时按位置命名为 `"0"`、`"1"`...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub layer_type: LayerTypeDescriptor,
}

/// 单个整数或 `[h, w]` 二元组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pair {
    Square(usize),
    Rect(usize, usize),
}

impl From<Pair> for (usize, usize) {
    fn from(pair: Pair) -> Self {
        match pair {
            Pair::Square(v) => (v, v),
            Pair::Rect(h, w) => (h, w),
        }
    }
}

fn pair_or(pair: Option<Pair>, default: (usize, usize)) -> (usize, usize) {
    pair.map_or(default, Into::into)
}

/// 模块类型描述（包含类型特定参数）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayerTypeDescriptor {
    Conv2d {
        #[serde(default)]
        in_channels: usize,
        #[serde(default)]
        out_channels: usize,
        kernel_size: Pair,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stride: Option<Pair>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        padding: Option<Pair>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dilation: Option<Pair>,
    },
    MaxPool2d {
        kernel_size: Pair,
        /// 省略时等于 kernel_size
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stride: Option<Pair>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        padding: Option<Pair>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dilation: Option<Pair>,
        #[serde(default)]
        ceil_mode: bool,
    },
    AvgPool2d {
        kernel_size: Pair,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stride: Option<Pair>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        padding: Option<Pair>,
        #[serde(default)]
        ceil_mode: bool,
    },
    Sequential {
        #[serde(default)]
        layers: Vec<LayerDescriptor>,
    },
    /// 自定义组合模块
    Module {
        class_name: String,
        #[serde(default)]
        layers: Vec<LayerDescriptor>,
    },
    // 逐元素层
    ReLU,
    ReLU6,
    LeakyReLU,
    PReLU,
    ELU,
    GELU,
    SiLU,
    Sigmoid,
    Tanh,
    Softplus,
    Hardswish,
    BatchNorm2d,
    GroupNorm,
    InstanceNorm2d,
    LocalResponseNorm,
    Dropout,
    Dropout2d,
    Identity,
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl ModelDescriptor {
    /// 创建新的模型描述符
    pub fn new(name: &str) -> Self {
        Self {
            version: default_version(),
            name: name.to_string(),
            input_shape: None,
            layers: Vec::new(),
        }
    }

    /// 添加顶层模块描述
    pub fn add_layer(&mut self, layer: LayerDescriptor) {
        self.layers.push(layer);
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 从 JSON 文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RfError> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// 保存为 JSON 文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RfError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// 确定输入形状：显式给出的形状优先，其次为描述中的 `input_shape`
    pub fn resolve_input_shape(
        &self,
        explicit: Option<(usize, usize)>,
    ) -> Result<(usize, usize), RfError> {
        explicit
            .or(self.input_shape)
            .ok_or(RfError::MissingInputShape)
    }

    /// 构建模块树，根模块的类型名称为模型名称
    ///
    /// 会校验所有滑窗层的超参数
    pub fn build(&self) -> Result<Container, RfError> {
        if self.layers.is_empty() {
            return Err(RfError::EmptyModel {
                name: self.name.clone(),
            });
        }
        let mut root = Container::new(&self.name);
        for (index, layer) in self.layers.iter().enumerate() {
            root = root.add_boxed(&layer.name_or_index(index), layer.build()?);
        }
        Ok(root)
    }
}

impl LayerDescriptor {
    /// 创建未命名的模块描述
    pub fn new(layer_type: LayerTypeDescriptor) -> Self {
        Self {
            name: None,
            layer_type,
        }
    }

    /// 创建命名的模块描述
    pub fn named(name: &str, layer_type: LayerTypeDescriptor) -> Self {
        Self {
            name: Some(name.to_string()),
            layer_type,
        }
    }

    fn name_or_index(&self, index: usize) -> String {
        self.name.clone().unwrap_or_else(|| index.to_string())
    }

    /// 构建对应的模块
    pub fn build(&self) -> Result<Box<dyn Module>, RfError> {
        let module: Box<dyn Module> = match &self.layer_type {
            LayerTypeDescriptor::Conv2d {
                in_channels,
                out_channels,
                kernel_size,
                stride,
                padding,
                dilation,
            } => {
                let conv = Conv2d::new(
                    *in_channels,
                    *out_channels,
                    (*kernel_size).into(),
                    pair_or(*stride, (1, 1)),
                    pair_or(*padding, (0, 0)),
                )
                .with_dilation(pair_or(*dilation, (1, 1)));
                conv.window().validate()?;
                Box::new(conv)
            }
            LayerTypeDescriptor::MaxPool2d {
                kernel_size,
                stride,
                padding,
                dilation,
                ceil_mode,
            } => {
                let pool = MaxPool2d::new((*kernel_size).into(), stride.map(Into::into))
                    .with_padding(pair_or(*padding, (0, 0)))
                    .with_dilation(pair_or(*dilation, (1, 1)))
                    .with_ceil_mode(*ceil_mode);
                pool.window().validate()?;
                Box::new(pool)
            }
            LayerTypeDescriptor::AvgPool2d {
                kernel_size,
                stride,
                padding,
                ceil_mode,
            } => {
                let pool = AvgPool2d::new((*kernel_size).into(), stride.map(Into::into))
                    .with_padding(pair_or(*padding, (0, 0)))
                    .with_ceil_mode(*ceil_mode);
                pool.window().validate()?;
                Box::new(pool)
            }
            LayerTypeDescriptor::Sequential { layers } => {
                let mut sequential = Sequential::new();
                for (index, layer) in layers.iter().enumerate() {
                    sequential =
                        sequential.add_named_boxed(&layer.name_or_index(index), layer.build()?);
                }
                Box::new(sequential)
            }
            LayerTypeDescriptor::Module { class_name, layers } => {
                let mut container = Container::new(class_name);
                for (index, layer) in layers.iter().enumerate() {
                    container =
                        container.add_boxed(&layer.name_or_index(index), layer.build()?);
                }
                Box::new(container)
            }
            LayerTypeDescriptor::ReLU => Box::new(Elementwise::new("ReLU")),
            LayerTypeDescriptor::ReLU6 => Box::new(Elementwise::new("ReLU6")),
            LayerTypeDescriptor::LeakyReLU => Box::new(Elementwise::new("LeakyReLU")),
            LayerTypeDescriptor::PReLU => Box::new(Elementwise::new("PReLU")),
            LayerTypeDescriptor::ELU => Box::new(Elementwise::new("ELU")),
            LayerTypeDescriptor::GELU => Box::new(Elementwise::new("GELU")),
            LayerTypeDescriptor::SiLU => Box::new(Elementwise::new("SiLU")),
            LayerTypeDescriptor::Sigmoid => Box::new(Elementwise::new("Sigmoid")),
            LayerTypeDescriptor::Tanh => Box::new(Elementwise::new("Tanh")),
            LayerTypeDescriptor::Softplus => Box::new(Elementwise::new("Softplus")),
            LayerTypeDescriptor::Hardswish => Box::new(Elementwise::new("Hardswish")),
            LayerTypeDescriptor::BatchNorm2d => Box::new(Elementwise::new("BatchNorm2d")),
            LayerTypeDescriptor::GroupNorm => Box::new(Elementwise::new("GroupNorm")),
            LayerTypeDescriptor::InstanceNorm2d => Box::new(Elementwise::new("InstanceNorm2d")),
            LayerTypeDescriptor::LocalResponseNorm => {
                Box::new(Elementwise::new("LocalResponseNorm"))
            }
            LayerTypeDescriptor::Dropout => Box::new(Elementwise::new("Dropout")),
            LayerTypeDescriptor::Dropout2d => Box::new(Elementwise::new("Dropout2d")),
            LayerTypeDescriptor::Identity => Box::new(Elementwise::new("Identity")),
        };
        Ok(module)
    }
}
