use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use deepreport_rs::config::Config;
use deepreport_rs::pipeline::{
    GenerationClient, GenerationError, RunStatus, StreamOptions, TransitionKind, spawn_run,
};
use deepreport_rs::{chunking::TextChunker, outlet};

/// 按提示词形状返回固定文本的生成服务替身
struct CannedClient;

#[async_trait]
impl GenerationClient for CannedClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if prompt.contains("Define the scope") {
            Ok("The research covers the service layer.".to_string())
        } else if prompt.contains("step-by-step research plan") {
            Ok("1. survey modules\n2. extract findings".to_string())
        } else if prompt.contains("3 concise bullet points") {
            Ok("- a finding\n- another finding\n- a third finding".to_string())
        } else if prompt.contains("non-redundant") {
            Ok("- consolidated findings".to_string())
        } else {
            Ok("# Final Report\n\nThe service layer manages users.".to_string())
        }
    }
}

#[tokio::test]
async fn test_full_pipeline_produces_saved_report() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output/report.md");

    let document = "## User service\n\nThe service stores users in memory.\n\n\
        ## API\n\nUsers are added and fetched by id.";
    let chunker = TextChunker::new(60, 8);
    let chunks = chunker.produce_chunks(document);
    assert!(chunks.len() > 1);

    let total_chunks = chunks.len();
    let (mut rx, handle) = spawn_run(
        Arc::new(CannedClient),
        "how does the user service work",
        chunks,
        StreamOptions::default(),
    )
    .unwrap();

    let mut headers = Vec::new();
    let mut saw_error = false;
    while let Some(transition) = rx.recv().await {
        match transition.kind {
            TransitionKind::SectionHeader => headers.push(transition.label.clone()),
            TransitionKind::Content => {}
            TransitionKind::Error => saw_error = true,
        }
    }

    let report = handle.await.unwrap();
    assert!(report.status.is_done());
    assert!(!saw_error);

    // 固定阶段各一条标题，GATHER每分片一条
    assert_eq!(headers.len(), 4 + total_chunks);
    assert_eq!(headers[0], "🔍 Objective Definition");
    assert_eq!(headers[1], "📝 Research Plan");
    assert_eq!(
        headers.last().map(String::as_str),
        Some("📄 Final Report")
    );

    outlet::save(
        &output_path,
        &report.state.objective,
        &report.state.final_output,
    )
    .unwrap();

    let saved = std::fs::read_to_string(&output_path).unwrap();
    assert!(saved.contains("The service layer manages users."));
    assert!(saved.contains("Objective: how does the user service work"));
}

#[tokio::test]
async fn test_empty_objective_rejected_before_spawn() {
    let result = spawn_run(
        Arc::new(CannedClient),
        "   ",
        vec!["a chunk".to_string()],
        StreamOptions::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // 测试默认值
    assert_eq!(config.input_path, std::path::PathBuf::from("./document.md"));
    assert_eq!(
        config.output_path,
        std::path::PathBuf::from("./prism.report.md")
    );

    // 测试输入路径设置
    let new_path = std::path::PathBuf::from("/test/paper.md");
    config.input_path = new_path.clone();
    assert_eq!(config.input_path, new_path);
}
