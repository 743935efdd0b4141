/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : 负责神经网络结构（模块树）的描述与遍历
 */

mod descriptor;
pub mod layer;
mod module;

pub use descriptor::{LayerDescriptor, LayerTypeDescriptor, ModelDescriptor, Pair};
pub use module::{Module, Spatial, get_layer_names, module_depth, named_modules};

#[cfg(test)]
mod tests;
