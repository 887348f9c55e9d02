//! 阶段执行器
//!
//! 每个执行器是 `&mut PipelineState -> 产出文本` 的单步变换，
//! 唯一的副作用与失败来源是其中那一次生成服务调用。
//! 执行器内部不做重试，重试策略属于生成服务边界。

use crate::pipeline::client::GenerationClient;
use crate::pipeline::error::PipelineError;
use crate::pipeline::prompts;
use crate::pipeline::state::PipelineState;
use crate::pipeline::streamer::Stage;

fn precondition(stage: Stage, reason: &str) -> PipelineError {
    PipelineError::PreconditionViolation {
        stage,
        reason: reason.to_string(),
    }
}

async fn generate_for(
    client: &dyn GenerationClient,
    stage: Stage,
    prompt: &str,
) -> Result<String, PipelineError> {
    client
        .generate(prompt)
        .await
        .map_err(|source| PipelineError::Generation { stage, source })
}

/// DEFINE：界定调研目标范围，写入`objective_definition`。
/// 每次运行只调用一次，重复调用视为集成错误。
pub async fn define(
    state: &mut PipelineState,
    client: &dyn GenerationClient,
) -> Result<String, PipelineError> {
    if !state.objective_definition.is_empty() {
        return Err(precondition(Stage::Define, "objective already defined"));
    }

    let prompt = prompts::define(&state.objective);
    let text = generate_for(client, Stage::Define, &prompt).await?;
    state.objective_definition = text.clone();
    Ok(text)
}

/// PLAN：基于目标界定产出分步计划，写入`plan`
pub async fn plan(
    state: &mut PipelineState,
    client: &dyn GenerationClient,
) -> Result<String, PipelineError> {
    if state.objective_definition.is_empty() {
        return Err(precondition(Stage::Plan, "objective definition not ready"));
    }

    let prompt = prompts::plan(&state.objective_definition);
    let text = generate_for(client, Stage::Plan, &prompt).await?;
    state.plan = text.clone();
    Ok(text)
}

/// GATHER：提炼游标指向的那一个分片，追加到`gathered`并推进游标。
/// 游标已越过末尾时不调用生成服务，返回`None`作为循环出口信号。
pub async fn gather(
    state: &mut PipelineState,
    client: &dyn GenerationClient,
) -> Result<Option<String>, PipelineError> {
    if state.plan.is_empty() {
        return Err(precondition(Stage::Gather, "plan not ready"));
    }
    if !state.has_pending_chunks() {
        return Ok(None);
    }

    let prompt = prompts::gather(
        &state.objective_definition,
        &state.plan,
        &state.chunks[state.cursor],
    );
    let text = generate_for(client, Stage::Gather, &prompt).await?;
    state.gathered.push(text.clone());
    state.cursor += 1;
    Ok(Some(text))
}

/// REFINE：跨全部笔记去冗提纯，写入`refined`。
/// 要求GATHER循环已经完整退出。
pub async fn refine(
    state: &mut PipelineState,
    client: &dyn GenerationClient,
) -> Result<String, PipelineError> {
    if state.has_pending_chunks() {
        return Err(precondition(Stage::Refine, "gathering not finished"));
    }

    let prompt = prompts::refine(&state.gathered);
    let text = generate_for(client, Stage::Refine, &prompt).await?;
    state.refined = text.clone();
    Ok(text)
}

/// GENERATE：基于精炼笔记合成最终报告，写入`final_output`，终结运行
pub async fn generate(
    state: &mut PipelineState,
    client: &dyn GenerationClient,
) -> Result<String, PipelineError> {
    if state.refined.is_empty() {
        return Err(precondition(Stage::Generate, "refined notes not ready"));
    }

    let prompt = prompts::generate(&state.refined);
    let text = generate_for(client, Stage::Generate, &prompt).await?;
    state.final_output = text.clone();
    Ok(text)
}
