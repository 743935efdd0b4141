/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : Module trait 定义，以及按 PyTorch `named_modules()` 语义遍历模块树
 */

use std::fmt::Debug;

use super::layer::Window2d;

/// 模块对空间几何（特征图尺寸、感受野）的影响
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spatial {
    /// 滑窗类层（卷积、池化）
    Window(Window2d),
    /// 不改变空间几何的逐元素层（激活、归一化、Dropout 等）
    Passthrough,
    /// 无法推导空间几何的叶子层（如 Linear、Flatten）
    Unsupported,
}

/// 模块 trait
///
/// # 设计原则
/// - 模块只描述结构和超参数，不持有权重
/// - 容器模块通过 `named_children()` 暴露子模块，叶子模块通过 `spatial()` 暴露几何参数
/// - 遍历顺序与 PyTorch 的 `nn.Module.named_modules()` 一致（先序）
///
/// # 使用示例
///
/// ```ignore
/// use torch_rf::nn::{Module, Spatial};
/// use torch_rf::nn::layer::Conv2d;
///
/// #[derive(Debug)]
/// struct Stem {
///     conv: Conv2d,
/// }
///
/// impl Module for Stem {
///     fn type_name(&self) -> &str {
///         "Stem"
///     }
///
///     fn named_children(&self) -> Vec<(&str, &dyn Module)> {
///         vec![("conv", &self.conv)]
///     }
/// }
/// ```
pub trait Module: Debug {
    /// 类型名称（对应 PyTorch 中 `layer.__class__.__name__`）
    fn type_name(&self) -> &str;

    /// 直接子模块（名称, 模块），按注册顺序
    fn named_children(&self) -> Vec<(&str, &dyn Module)> {
        Vec::new()
    }

    /// 是否为容器模块
    ///
    /// 默认：有子模块即为容器。`Sequential` 即便为空也是容器
    fn is_container(&self) -> bool {
        !self.named_children().is_empty()
    }

    /// 叶子模块对空间几何的影响，容器模块不会被询问
    fn spatial(&self) -> Spatial {
        Spatial::Unsupported
    }
}

/// 先序遍历模块树，返回（点分名称, 模块）
///
/// 根模块名称为空字符串，子模块名称形如 `features.0`
pub fn named_modules(root: &dyn Module) -> Vec<(String, &dyn Module)> {
    let mut modules = Vec::new();
    collect_named_modules(root, String::new(), &mut modules);
    modules
}

fn collect_named_modules<'a>(
    module: &'a dyn Module,
    prefix: String,
    modules: &mut Vec<(String, &'a dyn Module)>,
) {
    let children = module.named_children();
    modules.push((prefix.clone(), module));
    for (child_name, child) in children {
        let child_prefix = if prefix.is_empty() {
            child_name.to_string()
        } else {
            format!("{prefix}.{child_name}")
        };
        collect_named_modules(child, child_prefix, modules);
    }
}

/// 获取所有模块的点分名称（含根模块的空名称）
pub fn get_layer_names(root: &dyn Module) -> Vec<String> {
    named_modules(root)
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}

/// 模块在树中的深度：根为 0，其余为点分段数
pub fn module_depth(dotted_name: &str) -> usize {
    if dotted_name.is_empty() {
        0
    } else {
        dotted_name.split('.').count()
    }
}
