use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::streamer::Stage;

/// 生成服务调用失败（超时、配额、响应异常等），由调用边界上报
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{reason}")]
pub struct GenerationError {
    pub reason: String,
}

impl GenerationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// 管道运行错误
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 构造参数不合法，运行不会开始
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 阶段被乱序调用，属于集成错误，不做重试
    #[error("precondition violated in {stage} stage: {reason}")]
    PreconditionViolation { stage: Stage, reason: String },

    /// 生成服务在某个阶段调用失败，运行进入FAILED
    #[error("generation failed in {stage} stage: {source}")]
    Generation {
        stage: Stage,
        #[source]
        source: GenerationError,
    },
}

impl PipelineError {
    /// 失败发生所在的阶段，构造期错误没有阶段归属
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::InvalidInput(_) => None,
            PipelineError::PreconditionViolation { stage, .. } => Some(*stage),
            PipelineError::Generation { stage, .. } => Some(*stage),
        }
    }
}

/// 一次运行的终局
#[derive(Debug)]
pub enum RunStatus {
    /// 五个阶段全部完成
    Done,
    /// 某个阶段失败。此前已累积的状态原样保留，供调用方诊断
    Failed(PipelineError),
    /// 消费方停止读取输出流，运行被放弃
    Abandoned,
}

impl RunStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, RunStatus::Done)
    }
}
