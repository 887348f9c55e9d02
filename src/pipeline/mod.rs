//! 管道核心 - 分阶段调研状态机与增量结果流
//!
//! 一次运行拥有一个[`PipelineState`]，由[`PipelineController`]按
//! 固定状态图顺序驱动五个阶段执行器，阶段产出经[`ResultStreamer`]
//! 转换为带标签的有序输出流。生成能力通过[`GenerationClient`]
//! 在构造时显式注入。

mod client;
mod controller;
mod error;
mod executors;
mod prompts;
mod state;
mod streamer;

pub use client::GenerationClient;
pub use controller::{Phase, PipelineController, RunReport, labels};
pub use error::{GenerationError, PipelineError, RunStatus};
pub use state::PipelineState;
pub use streamer::{
    ResultStreamer, Stage, StageTransition, StreamClosed, TransitionKind,
    split_preserving_whitespace,
};

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// 输出流参数
#[derive(Debug, Clone)]
pub struct StreamOptions {
    /// 输出通道容量
    pub capacity: usize,
    /// 逐增量发送间隔（毫秒），0为不间隔
    pub pace_ms: u64,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            capacity: 64,
            pace_ms: 0,
        }
    }
}

/// 启动一次调研运行
///
/// 返回增量输出流与运行句柄。多个独立运行互不共享可变状态，
/// 可以并发进行。消费方提前丢弃接收端时，运行会被放弃而不是
/// 白白跑完。
pub fn spawn_run(
    client: Arc<dyn GenerationClient>,
    objective: impl Into<String>,
    chunks: Vec<String>,
    options: StreamOptions,
) -> Result<(mpsc::Receiver<StageTransition>, JoinHandle<RunReport>), PipelineError> {
    let state = PipelineState::create(objective, chunks)?;
    let (streamer, rx) = ResultStreamer::channel(options.capacity, options.pace_ms);
    let controller = PipelineController::new(state, client, streamer);
    let handle = tokio::spawn(controller.run());
    Ok((rx, handle))
}
