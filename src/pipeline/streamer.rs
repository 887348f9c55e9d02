//! 结果流转换器
//!
//! 把控制器的阶段推进转换为带标签的有序输出流，供调用方在运行
//! 过程中增量消费。顺序保证：消费方看到的序列就是控制器的执行
//! 序列，不跨阶段缓冲重排；同一阶段的内容增量按序拼接后与原文
//! 逐字相同，无丢失、无重复。

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// 管道的五个阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Define,
    Plan,
    Gather,
    Refine,
    Generate,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Define => "DEFINE",
            Stage::Plan => "PLAN",
            Stage::Gather => "GATHER",
            Stage::Refine => "REFINE",
            Stage::Generate => "GENERATE",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 输出单元的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// 进入新阶段时的章节标题
    SectionHeader,
    /// 阶段内容的一个增量
    Content,
    /// 终止错误，之后不再有任何输出
    Error,
}

/// 输出流中的一个单元
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTransition {
    pub stage: Stage,
    pub kind: TransitionKind,
    pub label: String,
    pub content: String,
    /// 本阶段内容的最后一个增量
    pub is_final_token: bool,
}

/// 输出流已被消费方关闭，生产方应当放弃后续阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamClosed;

/// 结果流转换器
pub struct ResultStreamer {
    tx: mpsc::Sender<StageTransition>,
    pace: Option<Duration>,
}

impl ResultStreamer {
    pub fn new(tx: mpsc::Sender<StageTransition>, pace_ms: u64) -> Self {
        Self {
            tx,
            pace: (pace_ms > 0).then(|| Duration::from_millis(pace_ms)),
        }
    }

    /// 创建一对流转换器与接收端
    pub fn channel(capacity: usize, pace_ms: u64) -> (Self, mpsc::Receiver<StageTransition>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx, pace_ms), rx)
    }

    /// 进入新阶段时发出一条章节标题
    pub async fn section(
        &self,
        stage: Stage,
        label: impl Into<String>,
    ) -> Result<(), StreamClosed> {
        self.send(StageTransition {
            stage,
            kind: TransitionKind::SectionHeader,
            label: label.into(),
            content: String::new(),
            is_final_token: false,
        })
        .await
    }

    /// 把一个阶段产出的全文拆分为互不重叠的增量依次发出，
    /// 最后一个增量带`is_final_token`标记
    pub async fn content(
        &self,
        stage: Stage,
        label: &str,
        content: &str,
    ) -> Result<(), StreamClosed> {
        let tokens = split_preserving_whitespace(content);
        let last = tokens.len().saturating_sub(1);
        for (index, token) in tokens.iter().enumerate() {
            self.send(StageTransition {
                stage,
                kind: TransitionKind::Content,
                label: label.to_string(),
                content: (*token).to_string(),
                is_final_token: index == last,
            })
            .await?;

            if let Some(pace) = self.pace {
                tokio::time::sleep(pace).await;
            }
        }
        Ok(())
    }

    /// 发出终止错误
    pub async fn error(&self, stage: Stage, reason: &str) -> Result<(), StreamClosed> {
        self.send(StageTransition {
            stage,
            kind: TransitionKind::Error,
            label: "❌ Error".to_string(),
            content: reason.to_string(),
            is_final_token: true,
        })
        .await
    }

    async fn send(&self, transition: StageTransition) -> Result<(), StreamClosed> {
        self.tx.send(transition).await.map_err(|_| StreamClosed)
    }
}

/// 按空白边界切分并保留空白本身
///
/// 相邻的空白字符归并为一个增量，增量按序拼接后恰好还原原文。
pub fn split_preserving_whitespace(content: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current_is_whitespace: Option<bool> = None;

    for (index, ch) in content.char_indices() {
        let is_whitespace = ch.is_whitespace();
        match current_is_whitespace {
            None => current_is_whitespace = Some(is_whitespace),
            Some(previous) if previous != is_whitespace => {
                tokens.push(&content[start..index]);
                start = index;
                current_is_whitespace = Some(is_whitespace);
            }
            _ => {}
        }
    }

    if start < content.len() {
        tokens.push(&content[start..]);
    }
    tokens
}
