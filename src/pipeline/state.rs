use serde::{Deserialize, Serialize};

use crate::pipeline::error::PipelineError;

/// 单次调研运行的累积状态
///
/// 每次运行独占一个实例，运行结束或失败后即丢弃，不做持久化。
/// 不变式：`0 <= cursor <= chunks.len()`，且 `gathered.len() == cursor`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    /// 用户提供的调研目标，创建后不再变更
    pub objective: String,
    /// 文档切分后的有序分片序列，创建时固定
    pub chunks: Vec<String>,
    /// 指向下一个待提炼分片的游标，单调不减
    pub cursor: usize,
    /// 逐分片提炼出的调研笔记，每完成一次GATHER追加一条
    pub gathered: Vec<String>,
    /// DEFINE阶段产出的目标界定
    pub objective_definition: String,
    /// PLAN阶段产出的分步调研计划
    pub plan: String,
    /// REFINE阶段产出的去冗精炼笔记
    pub refined: String,
    /// GENERATE阶段产出的最终报告，运行的终值
    pub final_output: String,
}

impl PipelineState {
    /// 创建一次新的调研运行状态
    ///
    /// 调研目标不允许为空；分片序列允许为空，此时管道仍会跑完
    /// DEFINE/PLAN/REFINE/GENERATE，产出一份没有分片佐证的报告。
    pub fn create(
        objective: impl Into<String>,
        chunks: Vec<String>,
    ) -> Result<Self, PipelineError> {
        let objective = objective.into();
        if objective.trim().is_empty() {
            return Err(PipelineError::InvalidInput(
                "objective must not be empty".to_string(),
            ));
        }

        Ok(Self {
            objective,
            chunks,
            cursor: 0,
            gathered: Vec::new(),
            objective_definition: String::new(),
            plan: String::new(),
            refined: String::new(),
            final_output: String::new(),
        })
    }

    /// 是否还有未提炼的分片
    pub fn has_pending_chunks(&self) -> bool {
        self.cursor < self.chunks.len()
    }
}
