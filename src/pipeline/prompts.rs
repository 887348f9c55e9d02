//! 五个阶段的提示词模板

/// DEFINE阶段：界定调研目标的范围
pub fn define(objective: &str) -> String {
    format!(
        "You are an expert researcher. Define the scope of this research goal:\n\nObjective: {objective}"
    )
}

/// PLAN阶段：产出带编号的分步调研计划
pub fn plan(objective_definition: &str) -> String {
    format!(
        "Based on this defined objective:\n\n{objective_definition}\n\nCreate a numbered step-by-step research plan."
    )
}

/// GATHER阶段：围绕调研目标提炼当前分片的要点
pub fn gather(objective_definition: &str, plan: &str, chunk: &str) -> String {
    format!(
        "Objective: {objective_definition}\n\nPlan: {plan}\n\nSummarize this chunk into 3 concise bullet points that relate to the research objective:\n\n{chunk}"
    )
}

/// REFINE阶段：跨全部笔记识别不冗余且与目标相关的洞察
pub fn refine(gathered: &[String]) -> String {
    let joined = gathered.join("\n\n");
    format!(
        "You are a concise research assistant. Based on the following extracted notes:\n\n{joined}\n\nPlease identify only the most **critical, relevant, and non-redundant** insights. Summarize them in 3-5 concise bullet points under each section.\nEnsure clarity, relevance, and brevity. Ignore repeated or vague points."
    )
}

/// GENERATE阶段：基于精炼笔记合成简短报告（长度为软约束）
pub fn generate(refined: &str) -> String {
    format!(
        "Using the refined notes below, write a **short, impactful markdown report** (max 1000 words).\nUse only headings and key bullet points. Avoid repetition. Focus on relevance to the original objective.\n\n{refined}"
    )
}
