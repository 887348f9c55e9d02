//! 管道控制器
//!
//! 按固定状态图驱动各阶段执行器：
//! `DEFINE -> PLAN -> GATHER(自环) -> REFINE -> GENERATE -> DONE`，
//! 任一阶段失败进入`FAILED`。GATHER的续行条件在每次执行后依据
//! 更新后的游标从状态现算，不维护独立的循环计数器。

use std::sync::Arc;

use crate::pipeline::client::GenerationClient;
use crate::pipeline::error::{PipelineError, RunStatus};
use crate::pipeline::executors;
use crate::pipeline::state::PipelineState;
use crate::pipeline::streamer::{ResultStreamer, Stage, StreamClosed};

/// 各阶段的章节标题
pub mod labels {
    pub const DEFINE: &str = "🔍 Objective Definition";
    pub const PLAN: &str = "📝 Research Plan";
    pub const REFINE: &str = "🔧 Refined Research Notes";
    pub const GENERATE: &str = "📄 Final Report";

    /// GATHER的标题按分片编号逐条生成
    pub fn gather(index: usize, total: usize) -> String {
        format!("📚 Insights from Chunk {}/{}", index + 1, total)
    }
}

/// 控制器所处的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Define,
    Plan,
    Gather,
    Refine,
    Generate,
    Done,
    Failed,
}

impl Phase {
    /// 当前阶段执行成功后的下一个状态，是状态的纯函数
    pub fn advance(self, state: &PipelineState) -> Phase {
        match self {
            Phase::Define => Phase::Plan,
            Phase::Plan => Phase::Gather,
            Phase::Gather => {
                if state.has_pending_chunks() {
                    Phase::Gather
                } else {
                    Phase::Refine
                }
            }
            Phase::Refine => Phase::Generate,
            Phase::Generate => Phase::Done,
            Phase::Done | Phase::Failed => self,
        }
    }

    /// 非终态对应的阶段
    pub fn stage(self) -> Option<Stage> {
        match self {
            Phase::Define => Some(Stage::Define),
            Phase::Plan => Some(Stage::Plan),
            Phase::Gather => Some(Stage::Gather),
            Phase::Refine => Some(Stage::Refine),
            Phase::Generate => Some(Stage::Generate),
            Phase::Done | Phase::Failed => None,
        }
    }
}

/// 运行结束后交还调用方的结果
///
/// 失败时此前累积的状态原样保留，已算出的内容一概不丢。
#[derive(Debug)]
pub struct RunReport {
    pub state: PipelineState,
    pub status: RunStatus,
}

enum StepError {
    Stage(PipelineError),
    Closed,
}

impl From<StreamClosed> for StepError {
    fn from(_: StreamClosed) -> Self {
        StepError::Closed
    }
}

/// 管道控制器
pub struct PipelineController {
    state: PipelineState,
    client: Arc<dyn GenerationClient>,
    streamer: ResultStreamer,
}

impl PipelineController {
    pub fn new(
        state: PipelineState,
        client: Arc<dyn GenerationClient>,
        streamer: ResultStreamer,
    ) -> Self {
        Self {
            state,
            client,
            streamer,
        }
    }

    /// 运行至终态
    ///
    /// 阶段严格串行，单次运行内同一时刻只有一个执行器在工作。
    /// 输出流被消费方关闭时放弃后续阶段，已累积的状态不受影响。
    pub async fn run(mut self) -> RunReport {
        let mut phase = Phase::Define;

        while phase != Phase::Done {
            let step = match phase {
                Phase::Define => self.step_define().await,
                Phase::Plan => self.step_plan().await,
                Phase::Gather => self.step_gather().await,
                Phase::Refine => self.step_refine().await,
                Phase::Generate => self.step_generate().await,
                Phase::Done | Phase::Failed => break,
            };

            match step {
                Ok(()) => phase = phase.advance(&self.state),
                Err(StepError::Stage(err)) => {
                    // 尽力向消费方发出终止错误，流已关闭也不影响终局
                    let stage = err.stage().or(phase.stage()).unwrap_or(Stage::Define);
                    let _ = self.streamer.error(stage, &err.to_string()).await;
                    return RunReport {
                        state: self.state,
                        status: RunStatus::Failed(err),
                    };
                }
                Err(StepError::Closed) => {
                    return RunReport {
                        state: self.state,
                        status: RunStatus::Abandoned,
                    };
                }
            }
        }

        RunReport {
            state: self.state,
            status: RunStatus::Done,
        }
    }

    async fn step_define(&mut self) -> Result<(), StepError> {
        self.streamer.section(Stage::Define, labels::DEFINE).await?;
        let content = executors::define(&mut self.state, self.client.as_ref())
            .await
            .map_err(StepError::Stage)?;
        self.streamer
            .content(Stage::Define, labels::DEFINE, &content)
            .await?;
        Ok(())
    }

    async fn step_plan(&mut self) -> Result<(), StepError> {
        self.streamer.section(Stage::Plan, labels::PLAN).await?;
        let content = executors::plan(&mut self.state, self.client.as_ref())
            .await
            .map_err(StepError::Stage)?;
        self.streamer
            .content(Stage::Plan, labels::PLAN, &content)
            .await?;
        Ok(())
    }

    /// GATHER一步只处理一个分片。分片序列为空时不发标题、
    /// 不调用生成服务，直接由`advance`转入REFINE。
    async fn step_gather(&mut self) -> Result<(), StepError> {
        if !self.state.has_pending_chunks() {
            return Ok(());
        }

        let label = labels::gather(self.state.cursor, self.state.chunks.len());
        self.streamer.section(Stage::Gather, &label).await?;

        if let Some(content) = executors::gather(&mut self.state, self.client.as_ref())
            .await
            .map_err(StepError::Stage)?
        {
            self.streamer
                .content(Stage::Gather, &label, &content)
                .await?;
        }
        Ok(())
    }

    async fn step_refine(&mut self) -> Result<(), StepError> {
        self.streamer.section(Stage::Refine, labels::REFINE).await?;
        let content = executors::refine(&mut self.state, self.client.as_ref())
            .await
            .map_err(StepError::Stage)?;
        self.streamer
            .content(Stage::Refine, labels::REFINE, &content)
            .await?;
        Ok(())
    }

    async fn step_generate(&mut self) -> Result<(), StepError> {
        self.streamer
            .section(Stage::Generate, labels::GENERATE)
            .await?;
        let content = executors::generate(&mut self.state, self.client.as_ref())
            .await
            .map_err(StepError::Stage)?;
        self.streamer
            .content(Stage::Generate, labels::GENERATE, &content)
            .await?;
        Ok(())
    }
}
