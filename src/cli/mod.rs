use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, LLMProvider};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(
    name = "Prism (deepreport-rs)",
    author = "Sopaco",
    version,
    about = "基于AI的文档调研报告生成工具，逐片提炼并流式产出调研报告",
    long_about = None
)]
pub struct Args {
    /// 输入文档路径（纯文本或Markdown）
    #[arg(short, long)]
    pub input_path: Option<PathBuf>,

    /// 报告输出路径
    #[arg(short, long, default_value = "./prism.report.md")]
    pub output_path: PathBuf,

    /// 调研目标
    #[arg(short = 'j', long)]
    pub objective: Option<String>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 分片大小（字节预算）
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// 相邻分片重叠（字节）
    #[arg(long)]
    pub chunk_overlap: Option<usize>,

    /// 流式输出的逐增量间隔（毫秒）
    #[arg(long)]
    pub stream_delay_ms: Option<u64>,

    /// 推理模型
    #[arg(long)]
    pub model: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 最大tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度
    #[arg(long)]
    pub temperature: Option<f64>,

    /// LLM Provider类型 (openai, moonshot, deepseek, mistral, openrouter, anthropic, gemini, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// 启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 把命令行参数转换为应用配置：先加载配置文件，再用命令行覆盖
    pub fn into_config(self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            Config::from_file(config_path)?
        } else {
            let default_path = PathBuf::from("./prism.toml");
            if default_path.exists() {
                Config::from_file(&default_path)?
            } else {
                Config::default()
            }
        };

        if let Some(input_path) = self.input_path {
            config.input_path = input_path;
        }
        config.output_path = self.output_path;
        if let Some(objective) = self.objective {
            config.objective = objective;
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if let Some(chunk_overlap) = self.chunk_overlap {
            config.chunk_overlap = chunk_overlap;
        }
        if let Some(stream_delay_ms) = self.stream_delay_ms {
            config.stream_delay_ms = stream_delay_ms;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = api_base_url;
        }
        if let Some(api_key) = self.llm_api_key {
            config.llm.api_key = api_key;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(provider) = self.llm_provider {
            config.llm.provider = provider
                .parse::<LLMProvider>()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        if self.verbose {
            config.verbose = true;
        }

        Ok(config)
    }
}
