use async_trait::async_trait;

use crate::pipeline::error::GenerationError;

/// 文本生成能力
///
/// 管道核心只依赖这一能力接口，在构造时显式传入，不持有任何
/// 进程级全局客户端。生产环境由rig驱动的[`crate::llm::client::LLMClient`]
/// 实现，测试中可注入桩实现。实现方自行负责限流与并发安全，
/// 管道本身不重试。
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// 给定完整提示词，返回生成文本
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
