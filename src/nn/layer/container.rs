/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : 容器模块：Sequential 以及用户自定义的组合模块
 */

use crate::nn::Module;

/// 顺序容器，等价于 PyTorch 的 nn.Sequential
///
/// 未显式命名的子模块按位置命名为 `"0"`、`"1"`...
///
/// # 示例
/// ```ignore
/// let features = Sequential::new()
///     .add(Conv2d::square(3, 16, 3, 1, 1))
///     .add(Elementwise::new("ReLU"))
///     .add(MaxPool2d::new((2, 2), None));
/// ```
#[derive(Debug, Default)]
pub struct Sequential {
    children: Vec<(String, Box<dyn Module>)>,
}

impl Sequential {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加子模块，名称为其位置索引
    pub fn add<M: Module + 'static>(self, module: M) -> Self {
        self.add_boxed(Box::new(module))
    }

    /// 追加已装箱的子模块，名称为其位置索引
    pub fn add_boxed(mut self, module: Box<dyn Module>) -> Self {
        let name = self.children.len().to_string();
        self.children.push((name, module));
        self
    }

    /// 追加命名子模块（对应 `nn.Sequential(OrderedDict(...))`）
    pub fn add_named<M: Module + 'static>(self, name: &str, module: M) -> Self {
        self.add_named_boxed(name, Box::new(module))
    }

    pub fn add_named_boxed(mut self, name: &str, module: Box<dyn Module>) -> Self {
        self.children.push((name.to_string(), module));
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Module for Sequential {
    fn type_name(&self) -> &str {
        "Sequential"
    }

    fn named_children(&self) -> Vec<(&str, &dyn Module)> {
        self.children
            .iter()
            .map(|(name, module)| (name.as_str(), module.as_ref()))
            .collect()
    }

    fn is_container(&self) -> bool {
        true
    }
}

/// 自定义组合模块（如 ResNet 的 `BasicBlock`）
///
/// 类型名称由使用者给出，子模块均需显式命名
#[derive(Debug)]
pub struct Container {
    type_name: String,
    children: Vec<(String, Box<dyn Module>)>,
}

impl Container {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            children: Vec::new(),
        }
    }

    /// 追加命名子模块
    pub fn add<M: Module + 'static>(self, name: &str, module: M) -> Self {
        self.add_boxed(name, Box::new(module))
    }

    pub fn add_boxed(mut self, name: &str, module: Box<dyn Module>) -> Self {
        self.children.push((name.to_string(), module));
        self
    }
}

impl Module for Container {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn named_children(&self) -> Vec<(&str, &dyn Module)> {
        self.children
            .iter()
            .map(|(name, module)| (name.as_str(), module.as_ref()))
            .collect()
    }

    // 没有子模块的自定义模块按叶子处理，几何未知
}
