//! # Torch RF
//!
//! `torch_rf`用于计算卷积神经网络各层的感受野（receptive field）：
//! 按 PyTorch `named_modules()` 的顺序遍历模块树，逐层累加卷积核、步长、填充与膨胀率，
//! 得到每层的输出尺寸、感受野尺寸、累计步长（jump）以及首个输出单元在输入上的中心坐标，
//! 并以表格形式展示。
//!

pub mod errors;
pub mod nn;
pub mod rf;

pub use errors::RfError;
pub use nn::get_layer_names;
pub use rf::{LayerRfData, ReportFormat, RfReport, RfValues, get_rf_data, print_rf};
