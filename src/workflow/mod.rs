//! 调研工作流 - 读取文档、驱动管道、消费输出流、落盘报告

use std::fs;
use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result, bail};

use crate::chunking::TextChunker;
use crate::config::Config;
use crate::llm::client::LLMClient;
use crate::outlet;
use crate::pipeline::{RunStatus, StreamOptions, TransitionKind, spawn_run};

/// 启动一次完整的调研运行
pub async fn launch(config: &Config) -> Result<()> {
    println!("🚀 Prism 启动，开始文档调研...");

    let document = fs::read_to_string(&config.input_path).context(format!(
        "Failed to read input document: {:?}",
        config.input_path
    ))?;

    let chunker = TextChunker::new(config.chunk_size, config.chunk_overlap);
    let chunks = chunker.produce_chunks(&document);
    println!("✓ 文档读取完成，共 {} 个分片", chunks.len());

    let client = LLMClient::new(config.clone())?;
    client.check_connection().await?;

    println!("🧠 Objective: {}", config.objective);

    let options = StreamOptions {
        pace_ms: config.stream_delay_ms,
        ..Default::default()
    };
    let (mut rx, handle) = spawn_run(
        Arc::new(client),
        config.objective.clone(),
        chunks,
        options,
    )?;

    while let Some(transition) = rx.recv().await {
        match transition.kind {
            TransitionKind::SectionHeader => println!("\n{}:", transition.label),
            TransitionKind::Content => {
                print!("{}", transition.content);
                std::io::stdout().flush().ok();
            }
            TransitionKind::Error => {
                eprintln!("\n{}: {}", transition.label, transition.content)
            }
        }
    }

    let report = handle.await.context("调研任务异常退出")?;
    match report.status {
        RunStatus::Done => {
            outlet::save(
                &config.output_path,
                &config.objective,
                &report.state.final_output,
            )?;
            println!("🎉 调研完成");
            Ok(())
        }
        RunStatus::Failed(err) => Err(err.into()),
        RunStatus::Abandoned => bail!("输出流被提前关闭，调研被放弃"),
    }
}
