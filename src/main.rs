/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : 命令行入口：读取 JSON 模型描述，输出各层感受野
 *
 * torch-rf model.json --input-shape 224 224 --max-depth 2
 */

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use torch_rf::{ReportFormat, RfReport};
use torch_rf::nn::ModelDescriptor;

/// 计算卷积神经网络各层的感受野
#[derive(Parser, Debug)]
#[command(name = "torch-rf")]
#[command(author, version, about)]
struct Cli {
    /// JSON 模型描述文件
    model: PathBuf,

    /// 输入尺寸 H W（覆盖模型描述中的 `input_shape`）
    #[arg(long, num_args = 2, value_names = ["H", "W"])]
    input_shape: Option<Vec<usize>>,

    /// 最大展示深度
    #[arg(long)]
    max_depth: Option<usize>,

    /// 输出格式（指定 `--output` 时改由扩展名决定）
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    format: ReportFormat,

    /// 保存到文件而非打印
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let descriptor = ModelDescriptor::load(&cli.model)
        .with_context(|| format!("无法读取模型描述: {}", cli.model.display()))?;
    let explicit_shape = match cli.input_shape.as_deref() {
        Some(&[h, w]) => Some((h, w)),
        _ => None,
    };
    let input_shape = descriptor.resolve_input_shape(explicit_shape)?;
    let model = descriptor
        .build()
        .with_context(|| format!("无法构建模型: {}", descriptor.name))?;

    let report = RfReport::new(&model, input_shape, cli.max_depth)
        .with_context(|| format!("感受野计算失败: {}", descriptor.name))?;

    let format = ReportFormat::resolve(cli.format, cli.output.as_deref());
    let content = report.render(format)?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("无法保存报告: {}", path.display()))?;
            tracing::info!(path = %path.display(), "感受野报告已保存");
        }
        None => println!("{content}"),
    }

    Ok(())
}
